/// Text content of a table cell with surrounding whitespace removed.
///
/// Text nodes are trimmed individually before joining, so markup such as
/// `<td>\n  <a>529303</a>\n</td>` yields `"529303"`.
pub fn cell_text(element: scraper::ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .collect::<String>()
}

/// Parse a count as printed on the results site.
///
/// All whitespace is dropped first, including the non-breaking spaces the
/// site uses as thousands separators. An optional sign is accepted, and
/// single underscores may group digits (`1_000`). Anything else is `None`.
pub fn parse_int(value: Option<&str>) -> Option<i64> {
    let cleaned: String = value?.chars().filter(|c| !c.is_whitespace()).collect();
    let digits = cleaned.strip_prefix(['+', '-']).unwrap_or(&cleaned);
    if digits.is_empty()
        || digits.starts_with('_')
        || digits.ends_with('_')
        || digits.contains("__")
    {
        return None;
    }
    cleaned.replace('_', "").parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    #[test]
    fn test_parse_int_thousands_separator() {
        assert_eq!(parse_int(Some("12\u{a0}345")), Some(12345));
        assert_eq!(parse_int(Some(" 1 234 ")), Some(1234));
        assert_eq!(parse_int(Some("42")), Some(42));
    }

    #[test]
    fn test_parse_int_sign_and_underscores() {
        assert_eq!(parse_int(Some("-5")), Some(-5));
        assert_eq!(parse_int(Some("+7")), Some(7));
        assert_eq!(parse_int(Some("1_000")), Some(1000));
        assert_eq!(parse_int(Some("1__000")), None);
        assert_eq!(parse_int(Some("_1")), None);
        assert_eq!(parse_int(Some("1_")), None);
        assert_eq!(parse_int(Some("-")), None);
        assert_eq!(parse_int(Some("--5")), None);
    }

    #[test]
    fn test_parse_int_absent() {
        assert_eq!(parse_int(Some("")), None);
        assert_eq!(parse_int(Some("\u{a0}")), None);
        assert_eq!(parse_int(Some("abc")), None);
        assert_eq!(parse_int(Some("12,5")), None);
        assert_eq!(parse_int(None), None);
    }

    #[test]
    fn test_cell_text_trims_nested_nodes() {
        let html = Html::parse_fragment("<table><tr><td>\n  <a href=\"x\">529303</a>\n</td></tr></table>");
        let td = Selector::parse("td").expect("valid selector");
        let cell = html.select(&td).next().unwrap();
        assert_eq!(cell_text(cell), "529303");
    }
}
