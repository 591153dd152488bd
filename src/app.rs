use leptos::html::{Div, Span};
use leptos::*;

use crate::{
    application::{MarketSelectors, MetricBinding, Selector, ViewConfig},
    domain::market_data::TimeWindow,
};

const PLACEHOLDER: &str = "--";
const CHART_WIDTH: &str = "960";
const CHART_HEIGHT: &str = "400";

/// Element carrying the attribute that `selector` matches on
fn bound_span(selector: Selector, text: &'static str) -> HtmlElement<Span> {
    let (name, value) = selector.attribute();
    html::span().attr(name, value).child(text)
}

fn bound_div(selector: Selector, class: &'static str, text: &'static str) -> HtmlElement<Div> {
    let (name, value) = selector.attribute();
    html::div().attr(name, value).classes(class).child(text)
}

/// Page skeleton for one view. Controllers fill it in by selector.
#[component]
pub fn DashboardPage(
    config: ViewConfig,
    active: RwSignal<TimeWindow>,
    on_select: Callback<TimeWindow>,
    market: Option<MarketSelectors>,
) -> impl IntoView {
    let selectors = config.selectors.clone();

    view! {
        <main class="dashboard" data-view=config.name>
            <header class="dashboard-header">
                <h1>{config.title}</h1>
                {selectors.last_updated.map(|s| view! {
                    <p class="last-updated">"Last updated: " {bound_span(s, PLACEHOLDER)}</p>
                })}
                {selectors.status.map(|s| bound_div(s, "status", "Loading..."))}
            </header>

            <section class="metrics-grid">
                {selectors
                    .metrics
                    .iter()
                    .map(|binding| view! { <MetricCard binding=*binding /> })
                    .collect_view()}
            </section>

            <p class="period">
                {selectors
                    .period_labels
                    .iter()
                    .map(|s| bound_span(*s, PLACEHOLDER))
                    .collect_view()}
            </p>

            <section class="chart-section">
                <WindowSelector active=active on_select=on_select />
                {selectors.date_range.map(|s| bound_div(s, "chart-date-range", ""))}
                <canvas
                    id=selectors.canvas_id
                    width=CHART_WIDTH
                    height=CHART_HEIGHT
                    style="cursor: crosshair;"
                />
            </section>

            {market.map(|m| view! { <MarketSummary selectors=m /> })}
        </main>
    }
}

#[component]
fn MetricCard(binding: MetricBinding) -> impl IntoView {
    view! {
        <div class="metric-card">
            <div class="metric-label">{binding.caption}</div>
            {bound_div(binding.selector, "metric-value", PLACEHOLDER)}
        </div>
    }
}

/// Window buttons; the highlighted one follows `active`.
#[component]
fn WindowSelector(active: RwSignal<TimeWindow>, on_select: Callback<TimeWindow>) -> impl IntoView {
    view! {
        <div class="chart-controls">
            {TimeWindow::all()
                .map(|window| view! {
                    <button
                        data-period=window.token()
                        class:active=move || active.get() == window
                        on:click=move |_| on_select.call(window)
                    >
                        {window.token().to_uppercase()}
                    </button>
                })
                .collect_view()}
        </div>
    }
}

#[component]
fn MarketSummary(selectors: MarketSelectors) -> impl IntoView {
    let row = |label: &'static str, selector: Selector| {
        view! {
            <div class="market-row">
                <span class="market-label">{label}</span>
                {bound_span(selector, PLACEHOLDER)}
            </div>
        }
    };

    view! {
        <section class="market-panel">
            <h2>"Ethereum Market"</h2>
            {row("Price", selectors.price)}
            {row("Market Cap", selectors.market_cap)}
            {row("Circulating Supply", selectors.supply)}
            {selectors.status.map(|s| bound_div(s, "market-status", ""))}
        </section>
    }
}
