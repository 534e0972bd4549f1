//! Client core for a shared-posts feed: fetch and validate sort-ordered
//! feeds from the BFF with a mock fallback, report engagement events, and
//! compose local drafts.
pub mod config;
pub mod context;
pub mod draft;
pub mod error;
pub mod events;
pub mod fetcher;
pub mod logging;
pub mod mock;
pub mod models;
pub mod transport;
pub mod validator;

pub use config::ClientConfig;
pub use context::{FeedContext, QueryPolicy};
pub use error::{ConfigError, DraftError, ReportingError, TransportError, ValidationError};
pub use events::EventReporter;
pub use fetcher::FeedFetcher;
pub use models::{ContentEvent, EventKind, FeedItem, FeedResponse, FeedSort, MediaKind};
pub use validator::validate_feed;
