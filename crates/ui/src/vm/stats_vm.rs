use services::StatPanel;
use survey_core::model::StatChart;

pub const CHART_WIDTH: f64 = 320.0;
pub const CHART_HEIGHT: f64 = 180.0;
const LABEL_BAND: f64 = 20.0;
const GAP: f64 = 6.0;

/// One SVG bar, already laid out in chart coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct BarVm {
    pub label: String,
    pub value_label: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ChartBody {
    Bars(Vec<BarVm>),
    Image { src: String },
    Empty,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChartVm {
    pub title: String,
    pub subtitle: &'static str,
    pub body: ChartBody,
}

/// Charts are titled by position, in the order the panels were requested.
#[must_use]
pub fn map_stat_panels(panels: &[StatPanel]) -> Vec<ChartVm> {
    panels
        .iter()
        .enumerate()
        .map(|(index, panel)| ChartVm {
            title: format!("Chart {}", index + 1),
            subtitle: panel.metric.title(),
            body: chart_body(&panel.chart),
        })
        .collect()
}

fn chart_body(chart: &StatChart) -> ChartBody {
    match chart {
        StatChart::Bars(bars) if !bars.is_empty() => ChartBody::Bars(layout_bars(bars)),
        StatChart::Bars(_) | StatChart::Empty => ChartBody::Empty,
        StatChart::Image(data) => ChartBody::Image {
            src: format!("data:image/png;base64,{data}"),
        },
    }
}

fn layout_bars(bars: &[survey_core::model::StatBar]) -> Vec<BarVm> {
    let max = bars
        .iter()
        .map(|bar| bar.value)
        .fold(0.0_f64, f64::max);
    let plot_height = CHART_HEIGHT - LABEL_BAND;
    #[allow(clippy::cast_precision_loss)]
    let slot = CHART_WIDTH / bars.len() as f64;
    let width = (slot - GAP).max(1.0);

    bars.iter()
        .enumerate()
        .map(|(index, bar)| {
            let height = if max > 0.0 {
                (bar.value.max(0.0) / max) * plot_height
            } else {
                0.0
            };
            #[allow(clippy::cast_precision_loss)]
            let x = index as f64 * slot + GAP / 2.0;
            BarVm {
                label: bar.label.clone(),
                value_label: format_value(bar.value),
                x,
                y: plot_height - height,
                width,
                height,
            }
        })
        .collect()
}

fn format_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}
