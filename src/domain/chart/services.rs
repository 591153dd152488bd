use super::value_objects::{BarChartConfig, BarSeries, ChartTheme, SeriesSpec};
use crate::domain::market_data::{Asset, ChartPoints};

const MILLION: f64 = 1e6;

/// Chart values are shown in millions; the summary keeps raw amounts.
pub fn to_millions(value: f64) -> f64 {
    value / MILLION
}

/// `Flow: $12.34M`
pub fn tooltip_text(label: &str, value_millions: f64) -> String {
    format!("{label}: ${value_millions:.2}M")
}

/// Y-axis tick, `$250M`, `$-12.5M`.
pub fn axis_tick(value_millions: f64) -> String {
    format!("${value_millions}M")
}

/// Map chart points into bar series.
///
/// The point shape decides how many series are drawn; `spec` only supplies
/// label and color for a single series.
pub fn build_bar_chart(points: ChartPoints<'_>, spec: SeriesSpec) -> BarChartConfig {
    let labels = points.dates().iter().map(|d| d.format("%Y-%m-%d").to_string()).collect();

    match points {
        ChartPoints::Single(points) => {
            let (label, color) = match spec {
                SeriesSpec::Single(asset) => (format!("{} ETF Flow", asset.display_name()), asset.color()),
                SeriesSpec::Combined => ("ETF Flow".to_string(), Asset::Bitcoin.color()),
            };
            BarChartConfig {
                labels,
                series: vec![BarSeries {
                    label,
                    color,
                    values: points.iter().map(|p| to_millions(p.flow)).collect(),
                }],
                show_legend: false,
                tooltip_label: Some("Flow".to_string()),
                theme: ChartTheme::default(),
            }
        }
        ChartPoints::Combined(points) => BarChartConfig {
            labels,
            series: vec![
                BarSeries {
                    label: format!("{} ETF", Asset::Bitcoin.display_name()),
                    color: Asset::Bitcoin.color(),
                    values: points.iter().map(|p| to_millions(p.btc_flow)).collect(),
                },
                BarSeries {
                    label: format!("{} ETF", Asset::Ethereum.display_name()),
                    color: Asset::Ethereum.color(),
                    values: points.iter().map(|p| to_millions(p.eth_flow)).collect(),
                },
            ],
            show_legend: true,
            tooltip_label: None,
            theme: ChartTheme::default(),
        },
    }
}

/// Y range covering every bar and zero.
pub fn value_range(config: &BarChartConfig) -> (f64, f64) {
    let (min, max) = config
        .series
        .iter()
        .flat_map(|s| s.values.iter().copied())
        .filter(|v| v.is_finite())
        .fold((0.0_f64, 0.0_f64), |(lo, hi), v| (lo.min(v), hi.max(v)));
    if min == max {
        (min - 1.0, max + 1.0)
    } else {
        (min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::market_data::{CombinedFlowPoint, FlowPoint};
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn single_series_in_millions() {
        let points = vec![
            FlowPoint { date: day(1), flow: 120_000_000.0 },
            FlowPoint { date: day(2), flow: -5_500_000.0 },
        ];
        let config = build_bar_chart(ChartPoints::Single(&points), SeriesSpec::Single(Asset::Ethereum));
        assert_eq!(config.labels, vec!["2024-01-01", "2024-01-02"]);
        assert_eq!(config.series.len(), 1);
        assert_eq!(config.series[0].values, vec![120.0, -5.5]);
        assert_eq!(config.series[0].color, "#627eea");
        assert_eq!(config.tooltip_lines(1), vec!["Flow: $-5.50M"]);
        assert!(!config.show_legend);
    }

    #[test]
    fn combined_has_two_parallel_series() {
        let points = vec![CombinedFlowPoint { date: day(3), btc_flow: 2e6, eth_flow: 1e6 }];
        let config = build_bar_chart(ChartPoints::Combined(&points), SeriesSpec::Combined);
        let labels: Vec<&str> = config.series.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["Bitcoin ETF", "Ethereum ETF"]);
        assert_eq!(config.tooltip_lines(0), vec!["Bitcoin ETF: $2.00M", "Ethereum ETF: $1.00M"]);
        assert!(config.show_legend);
    }

    #[test]
    fn ticks_and_range() {
        assert_eq!(axis_tick(250.0), "$250M");
        assert_eq!(axis_tick(-12.5), "$-12.5M");
        let points = vec![FlowPoint { date: day(1), flow: 0.0 }];
        let config = build_bar_chart(ChartPoints::Single(&points), SeriesSpec::Single(Asset::Bitcoin));
        assert_eq!(value_range(&config), (-1.0, 1.0));
    }
}
