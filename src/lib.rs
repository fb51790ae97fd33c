pub mod app;
pub mod chart;
pub mod config;
pub mod errors;
pub mod external;
pub mod logging;
pub mod models;
pub mod page;
pub mod palette;
pub mod routes;
pub mod state;
pub mod surface;
pub mod views;
