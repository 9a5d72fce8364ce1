pub mod models;
pub mod service;

pub use models::GeoPoint;
pub use service::{GeocodeError, GeocodeService};
