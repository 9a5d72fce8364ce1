pub mod handlers;
pub mod models;
pub mod service;
pub mod view;

pub use models::{DashboardState, MapState, Marker};
pub use service::{DashboardError, DashboardService};
