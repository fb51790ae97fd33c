pub mod http_stock_api;
pub mod stock_api;

pub use http_stock_api::HttpStockApi;
pub use stock_api::{StockApiError, StockDataSource};
