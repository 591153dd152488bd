pub mod wasm_api;

pub use wasm_api::{BrowserController, BrowserMarketPanel, DashboardApi, start_dashboard};
