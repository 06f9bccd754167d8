use scraper::{Html, Selector};
use volby_model::MunicipalityRef;

use crate::normalize::cell_text;

/// Extract the municipality list from a region page.
///
/// A table row contributes only if it has a `td.cislo` cell containing a
/// link and a `td.overflow_name` cell. Header, footer and spacer rows lack
/// these and are skipped. The detail URL is `base_url` followed by the
/// link's `href` exactly as written.
pub fn extract_municipalities(document: &Html, base_url: &str) -> Vec<MunicipalityRef> {
    let tr_sel = Selector::parse("tr").expect("valid selector");
    let code_sel = Selector::parse("td.cislo").expect("valid selector");
    let name_sel = Selector::parse("td.overflow_name").expect("valid selector");
    let link_sel = Selector::parse("a").expect("valid selector");

    let mut municipalities = Vec::new();

    for (index, row) in document.select(&tr_sel).enumerate() {
        let Some(code_cell) = row.select(&code_sel).next() else {
            continue;
        };
        let Some(name_cell) = row.select(&name_sel).next() else {
            tracing::debug!(row = index, "Skipping row without name cell");
            continue;
        };
        let Some(href) = code_cell
            .select(&link_sel)
            .next()
            .and_then(|a| a.value().attr("href"))
            .filter(|href| !href.is_empty())
        else {
            tracing::debug!(row = index, "Skipping row without detail link");
            continue;
        };

        municipalities.push(MunicipalityRef {
            code: cell_text(code_cell),
            name: cell_text(name_cell),
            detail_url: format!("{base_url}{href}"),
        });
    }

    municipalities
}
