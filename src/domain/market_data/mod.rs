pub mod entities;
pub mod repositories;
pub mod value_objects;

pub use entities::{
    ChartPoints, CombinedFlowPoint, CombinedSummary, FlowPoint, FlowSummary, MarketSnapshot,
    MetricField, Summary,
};
pub use repositories::FlowSource;
pub use value_objects::{Asset, Endpoint, QueryParams, TimeWindow, ViewKind};
