pub mod dom;
pub mod http;
pub mod rendering;

pub use dom::DomTarget;
pub use http::ApiClient;
pub use rendering::CanvasBarChartBackend;
