use scraper::{ElementRef, Html, Selector};
use volby_model::MunicipalityResult;

use crate::fetch::PageFetcher;
use crate::normalize::{cell_text, parse_int};

const REGISTERED_HEADER: &str = "sa2";
const ENVELOPES_HEADER: &str = "sa3";
const VALID_HEADER: &str = "sa6";
const PARTY_NAME_HEADER: &str = "t1sa1 t1sb2";
const PARTY_VOTES_HEADER: &str = "t1sa2 t1sb3";

/// Fetch a municipality detail page and extract its results.
///
/// `None` if the page cannot be fetched or lacks any mandatory count.
pub async fn fetch_result(fetcher: &PageFetcher, url: &str) -> Option<MunicipalityResult> {
    let page = fetcher.fetch(url).await?;
    extract_result(&page.document)
}

/// Extract results from a parsed municipality detail page.
///
/// Registered voters, envelopes and valid votes are read from the cells
/// labelled `sa2`, `sa3` and `sa6`; if any is missing or not a number the
/// page yields nothing. Party rows are then collected from cells labelled
/// `t1sa1 t1sb2` (name) and `t1sa2 t1sb3` (votes). An unparsable party
/// tally is kept as `None` rather than rejecting the page.
pub fn extract_result(document: &Html) -> Option<MunicipalityResult> {
    let registered = header_cell_int(document, REGISTERED_HEADER);
    let envelopes = header_cell_int(document, ENVELOPES_HEADER);
    let valid = header_cell_int(document, VALID_HEADER);

    let mut result = match MunicipalityResult::new(registered, envelopes, valid) {
        Ok(result) => result,
        Err(e) => {
            tracing::debug!(error = %e, "Municipality page rejected");
            return None;
        }
    };

    let tr_sel = Selector::parse("tr").expect("valid selector");
    let cell_sel = header_cells();

    for row in document.select(&tr_sel) {
        let find = |header: &str| row.select(&cell_sel).find(|td| headers_match(*td, header));
        let (Some(name_cell), Some(votes_cell)) = (find(PARTY_NAME_HEADER), find(PARTY_VOTES_HEADER))
        else {
            continue;
        };
        let name = cell_text(name_cell);
        let votes = parse_int(Some(cell_text(votes_cell).as_str()));
        if votes.is_none() {
            tracing::debug!(party = %name, "Unparsable vote count");
        }
        result.record_party(name, votes);
    }

    Some(result)
}

/// Text of the first `td` labelled with `header`.
fn header_cell_text(document: &Html, header: &str) -> Option<String> {
    document
        .select(&header_cells())
        .find(|td| headers_match(*td, header))
        .map(cell_text)
}

fn header_cell_int(document: &Html, header: &str) -> Option<i64> {
    parse_int(header_cell_text(document, header).as_deref())
}

fn header_cells() -> Selector {
    Selector::parse("td[headers]").expect("valid selector")
}

/// Whether a cell's `headers` attribute refers to `header`.
///
/// The attribute is a whitespace-separated id list. A single id matches any
/// one token (`sa2` matches `"sa2 x"`); a multi-id label matches the whole
/// list after whitespace is collapsed (`"t1sa1 t1sb2"` matches
/// `"t1sa1  t1sb2"`).
fn headers_match(cell: ElementRef<'_>, header: &str) -> bool {
    let Some(value) = cell.value().attr("headers") else {
        return false;
    };
    let tokens: Vec<&str> = value.split_whitespace().collect();
    tokens.contains(&header) || tokens.join(" ") == header
}
