use std::path::PathBuf;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

/// Region listings of the 2017 Chamber of Deputies election.
pub const REGION_URL_PREFIX: &str = "https://www.volby.cz/pls/ps2017nss/";

static REGION_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("^{}", regex::escape(REGION_URL_PREFIX))).expect("valid regex")
});

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("invalid URL '{0}': it must start with {prefix}", prefix = REGION_URL_PREFIX)]
    InvalidRegionUrl(String),

    #[error("output filename '{0}' must end with .csv")]
    InvalidOutputName(String),
}

/// Arguments that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunArgs {
    pub region_url: String,
    pub output_path: PathBuf,
}

/// Validate the region URL and output filename.
///
/// The URL is checked first; the first failure is returned.
pub fn validate_args(region_url: &str, output: &str) -> Result<RunArgs, ValidationError> {
    validate_region_url(region_url)?;
    validate_output_name(output)?;
    Ok(RunArgs {
        region_url: region_url.to_string(),
        output_path: PathBuf::from(output),
    })
}

pub fn validate_region_url(url: &str) -> Result<(), ValidationError> {
    if REGION_URL.is_match(url) {
        Ok(())
    } else {
        Err(ValidationError::InvalidRegionUrl(url.to_string()))
    }
}

/// The filename must end in `.csv`, compared case-insensitively.
pub fn validate_output_name(output: &str) -> Result<(), ValidationError> {
    if output.to_lowercase().ends_with(".csv") {
        Ok(())
    } else {
        Err(ValidationError::InvalidOutputName(output.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REGION: &str =
        "https://www.volby.cz/pls/ps2017nss/ps32?xjazyk=CZ&xkraj=2&xnumnuts=2101";

    #[test]
    fn test_valid_args() {
        let args = validate_args(REGION, "vysledky_benesov.csv").unwrap();
        assert_eq!(args.region_url, REGION);
        assert_eq!(args.output_path, PathBuf::from("vysledky_benesov.csv"));
    }

    #[test]
    fn test_region_url_prefix() {
        assert!(validate_region_url(REGION).is_ok());
        assert!(validate_region_url("https://www.volby.cz/pls/ps2017nss/").is_ok());

        for url in [
            "http://www.volby.cz/pls/ps2017nss/ps32",
            "https://www.volby.cz/pls/ps2013/ps32",
            "https://wwwxvolby.cz/pls/ps2017nss/ps32",
            "https://example.com/?u=https://www.volby.cz/pls/ps2017nss/",
            "",
        ] {
            assert_eq!(
                validate_region_url(url),
                Err(ValidationError::InvalidRegionUrl(url.to_string())),
                "{url} should be rejected"
            );
        }
    }

    #[test]
    fn test_output_name_suffix() {
        assert!(validate_output_name("out.csv").is_ok());
        assert!(validate_output_name("OUT.CSV").is_ok());
        assert!(validate_output_name("data/out.Csv").is_ok());

        assert!(matches!(
            validate_output_name("out.txt"),
            Err(ValidationError::InvalidOutputName(_))
        ));
        assert!(validate_output_name("csv").is_err());
        assert!(validate_output_name("out.csv.bak").is_err());
    }

    #[test]
    fn test_url_checked_before_output() {
        assert_eq!(
            validate_args("https://example.com/", "out.txt"),
            Err(ValidationError::InvalidRegionUrl("https://example.com/".into()))
        );
    }
}
