pub mod grouping;
pub mod handlers;
pub mod models;
pub mod service;

pub use grouping::group_by_day;
pub use models::{DailyForecastGroup, ForecastEntry};
pub use service::{ForecastError, ForecastService};
