mod common;

use chrono::NaiveDate;
use common::{ChartEvent, RecordingBackend};
use etf_flow_dashboard::{
    application::{ChartRenderer, ChartSlot},
    domain::{
        chart::SeriesSpec,
        market_data::{Asset, ChartPoints, CombinedFlowPoint, FlowPoint},
    },
};

fn flows(n: u32) -> Vec<FlowPoint> {
    (1..=n)
        .map(|d| FlowPoint {
            date: NaiveDate::from_ymd_opt(2024, 2, d).unwrap(),
            flow: f64::from(d) * 1e7,
        })
        .collect()
}

#[test]
fn second_render_disposes_first_before_constructing() {
    let backend = RecordingBackend::default();
    let renderer = ChartRenderer::new(backend.clone());
    let mut slot: ChartSlot<u32> = None;
    let points = flows(3);

    assert!(renderer.render(&mut slot, "c", ChartPoints::Single(&points), SeriesSpec::Single(Asset::Ethereum)));
    assert!(renderer.render(&mut slot, "c", ChartPoints::Single(&points), SeriesSpec::Single(Asset::Ethereum)));

    let construct = |id| ChartEvent::Construct { id, canvas: "c".into(), series_lengths: vec![3] };
    assert_eq!(backend.events(), vec![construct(1), ChartEvent::Dispose(1), construct(2)]);
    assert_eq!(backend.live(), vec![2]);
    assert_eq!(slot.as_ref().map(|h| *h.instance()), Some(2));
}

#[test]
fn missing_canvas_is_a_no_op() {
    let backend = RecordingBackend::without_canvas("gone");
    let renderer = ChartRenderer::new(backend.clone());
    let mut slot: ChartSlot<u32> = None;
    let points = flows(2);

    assert!(!renderer.render(&mut slot, "gone", ChartPoints::Single(&points), SeriesSpec::Combined));
    assert!(slot.is_none());
    assert!(backend.events().is_empty());
}

#[test]
fn handle_describes_the_live_chart() {
    let renderer = ChartRenderer::new(RecordingBackend::default());
    let mut slot = None;
    let points = vec![CombinedFlowPoint {
        date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
        btc_flow: 1e6,
        eth_flow: -1e6,
    }];

    renderer.render(&mut slot, "combined-flow-chart", ChartPoints::Combined(&points), SeriesSpec::Combined);

    let handle = slot.as_ref().unwrap();
    assert_eq!(handle.canvas_id(), "combined-flow-chart");
    assert_eq!(handle.point_count(), 1);
    assert_eq!(handle.series_count(), 2);

    renderer.dispose(&mut slot);
    assert!(slot.is_none());
    assert!(renderer.backend().live().is_empty());
}
