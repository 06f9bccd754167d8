pub mod fetch;
pub mod municipality;
pub mod normalize;
pub mod output;
pub mod region;
pub mod scrape;

pub use fetch::{FetchConfig, FetchError, Page, PageFetcher};
pub use scrape::{run, scrape_region, RunOutcome, ScrapeConfig, ScrapeError, ScrapeReport};
