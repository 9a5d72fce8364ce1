pub mod handlers;
pub mod models;
pub mod service;

pub use models::{Condition, Coordinates, WeatherSnapshot};
pub use service::{WeatherError, WeatherService};
