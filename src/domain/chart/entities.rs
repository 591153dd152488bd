/// Domain entity - one live chart instance bound to one canvas.
///
/// Never mutated in place: new data means dispose and construct a fresh handle.
#[derive(Debug)]
pub struct ChartHandle<I> {
    canvas_id: String,
    point_count: usize,
    series_count: usize,
    instance: I,
}

impl<I> ChartHandle<I> {
    pub fn new(canvas_id: impl Into<String>, point_count: usize, series_count: usize, instance: I) -> Self {
        Self {
            canvas_id: canvas_id.into(),
            point_count,
            series_count,
            instance,
        }
    }

    pub fn canvas_id(&self) -> &str {
        &self.canvas_id
    }

    pub fn point_count(&self) -> usize {
        self.point_count
    }

    pub fn series_count(&self) -> usize {
        self.series_count
    }

    pub fn instance(&self) -> &I {
        &self.instance
    }

    pub fn into_instance(self) -> I {
        self.instance
    }
}
