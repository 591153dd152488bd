pub mod chart_service;
pub mod market_panel;
pub mod page_controller;
pub mod render_target;
pub mod view_config;

pub use chart_service::{ChartBackend, ChartRenderer, ChartSlot};
pub use market_panel::{MarketPanel, MarketSelectors};
pub use page_controller::{Generation, PageController, RefreshOutcome, ViewState};
pub use render_target::{RenderTarget, Trend};
pub use view_config::{MetricBinding, Selector, ViewConfig, ViewSelectors};
