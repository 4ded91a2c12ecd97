pub mod types;
pub mod rss_utils;
pub mod config;
pub mod fetcher;
pub mod parser;
pub mod traits;
pub mod sources;
pub mod history;
pub mod merge;
pub mod relevance;
pub mod digest;
pub mod host;
pub mod watcher;

pub use types::*;
pub use config::WatcherConfig;
pub use fetcher::Fetcher;
pub use parser::FeedParser;
pub use traits::FeedSource;
pub use sources::RssFeedSource;
pub use history::{HistoryStore, SeenHistory};
pub use merge::merge;
pub use relevance::KeywordSet;
pub use digest::{DigestFormatter, OutputMode, WatchOutput};
pub use host::StdoutHost;
pub use watcher::ChangeDetector;
