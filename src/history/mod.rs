pub mod handlers;
pub mod store;

pub use store::{FileHistoryStore, HistoryError, SearchHistoryStore, MAX_HISTORY};
