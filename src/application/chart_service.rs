use crate::domain::{
    chart::{BarChartConfig, ChartHandle, SeriesSpec, services::build_bar_chart},
    errors::RenderError,
    logging::{LogComponent, get_logger},
    market_data::ChartPoints,
};

/// Drawing capability behind the renderer.
///
/// `construct` must bind a fresh instance; `dispose` releases everything the
/// instance attached to its canvas.
pub trait ChartBackend {
    type Instance;

    fn canvas_exists(&self, canvas_id: &str) -> bool;
    fn construct(&self, canvas_id: &str, config: &BarChartConfig) -> Result<Self::Instance, RenderError>;
    fn dispose(&self, instance: Self::Instance);
}

/// Slot holding at most one live chart for a canvas.
pub type ChartSlot<I> = Option<ChartHandle<I>>;

/// Builds bar charts and enforces one live instance per canvas
pub struct ChartRenderer<B: ChartBackend> {
    backend: B,
}

impl<B: ChartBackend> ChartRenderer<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Replace whatever `slot` holds with a chart of `points`.
    ///
    /// A missing canvas is a no-op returning `false`; the slot is left untouched.
    /// Otherwise the previous instance is disposed before the new one is constructed.
    pub fn render(
        &self,
        slot: &mut ChartSlot<B::Instance>,
        canvas_id: &str,
        points: ChartPoints<'_>,
        spec: SeriesSpec,
    ) -> bool {
        if !self.backend.canvas_exists(canvas_id) {
            get_logger().debug(
                LogComponent::Application("ChartRenderer"),
                &format!("canvas '{canvas_id}' not in view, skipping render"),
            );
            return false;
        }

        let config = build_bar_chart(points, spec);
        self.dispose(slot);

        match self.backend.construct(canvas_id, &config) {
            Ok(instance) => {
                get_logger().debug(
                    LogComponent::Application("ChartRenderer"),
                    &format!(
                        "rendered {} points x {} series on '{canvas_id}'",
                        config.point_count(),
                        config.series.len()
                    ),
                );
                *slot = Some(ChartHandle::new(
                    canvas_id,
                    config.point_count(),
                    config.series.len(),
                    instance,
                ));
                true
            }
            Err(e) => {
                get_logger().error(
                    LogComponent::Application("ChartRenderer"),
                    &format!("failed to construct chart on '{canvas_id}': {e}"),
                );
                false
            }
        }
    }

    /// Dispose the live instance, if any.
    pub fn dispose(&self, slot: &mut ChartSlot<B::Instance>) {
        if let Some(previous) = slot.take() {
            self.backend.dispose(previous.into_instance());
        }
    }
}
