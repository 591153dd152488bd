use serde_json::Value;

use super::value_objects::{Endpoint, QueryParams};
use crate::domain::errors::FetchResult;

/// Source of raw API payloads.
///
/// Implementations report transport failures only. A payload with
/// `success: false` is a successful fetch; the caller decides what it means.
#[allow(async_fn_in_trait)]
pub trait FlowSource {
    async fn fetch(&self, endpoint: Endpoint, params: QueryParams) -> FetchResult<Value>;
}

impl<S: FlowSource> FlowSource for std::rc::Rc<S> {
    async fn fetch(&self, endpoint: Endpoint, params: QueryParams) -> FetchResult<Value> {
        (**self).fetch(endpoint, params).await
    }
}
