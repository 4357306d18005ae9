// sitekit: interactivity for a static informational site.
// Page units run by an ordered bootstrap, plus cached GitHub repository stats.

pub mod cache;
pub mod clock;
pub mod config;
pub mod dom;
pub mod error;
pub mod github;
pub mod site;
pub mod stats;

pub use config::SiteConfig;
pub use error::{Result, SiteError};
pub use site::Site;
pub use stats::StatsFetcher;
