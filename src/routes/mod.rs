pub mod charts;
pub mod health;
pub mod stock;
