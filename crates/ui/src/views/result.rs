use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, report_error, use_notices, view_state_from_resource};
use crate::vm::{BarVm, CHART_HEIGHT, CHART_WIDTH, ChartBody, ChartVm, map_stat_panels};

#[component]
pub fn ResultView() -> Element {
    let ctx = use_context::<AppContext>();
    let stats = ctx.stats();
    let notices = use_notices();
    let navigator = use_navigator();

    let resource = use_resource(move || {
        let stats = stats.clone();
        async move {
            match stats.load_all().await {
                Ok(panels) => Ok(map_stat_panels(&panels)),
                Err(err) => {
                    let err = ViewError::from(err);
                    report_error(notices, navigator, &err);
                    Err(err)
                }
            }
        }
    });
    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page",
            h2 { "Results" }
            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { class: "loading", "Loading statistics..." }
                },
                ViewState::Ready(charts) => rsx! {
                    div { class: "charts",
                        for chart in charts {
                            Chart { key: "{chart.title}", chart }
                        }
                    }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                    Link { to: Route::Landing {}, "Back to the main page" }
                },
            }
        }
    }
}

#[component]
fn Chart(chart: ChartVm) -> Element {
    rsx! {
        section { class: "chart",
            h3 { "{chart.title}" }
            p { class: "chart-subtitle", "{chart.subtitle}" }
            match chart.body {
                ChartBody::Bars(bars) => rsx! {
                    svg {
                        width: "{CHART_WIDTH}",
                        height: "{CHART_HEIGHT}",
                        view_box: "0 0 {CHART_WIDTH} {CHART_HEIGHT}",
                        for bar in bars {
                            Bar { bar }
                        }
                    }
                },
                ChartBody::Image { src } => rsx! {
                    img { src: "{src}", alt: "{chart.subtitle}" }
                },
                ChartBody::Empty => rsx! {
                    p { "No data yet." }
                },
            }
        }
    }
}

#[component]
fn Bar(bar: BarVm) -> Element {
    let label_x = bar.x + bar.width / 2.0;
    let value_y = (bar.y - 2.0).max(10.0);
    let label_y = CHART_HEIGHT - 6.0;

    rsx! {
        g {
            rect {
                x: "{bar.x}",
                y: "{bar.y}",
                width: "{bar.width}",
                height: "{bar.height}",
            }
            text { x: "{label_x}", y: "{value_y}", text_anchor: "middle", "{bar.value_label}" }
            text { x: "{label_x}", y: "{label_y}", text_anchor: "middle", "{bar.label}" }
        }
    }
}
