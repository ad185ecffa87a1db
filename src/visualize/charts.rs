//! Chart generation and rendering for the visualize page.
//!
//! The aggregated totals are turned into a renderer-neutral [ChartData] value,
//! which is then drawn three ways with ECharts:
//! - **Bar chart**: one bar per category
//! - **Doughnut chart**: each category's share of the total
//! - **Radar chart**: categories as axes of a single polygon
//!
//! Each chart is generated as JSON configuration for the ECharts library and
//! rendered with corresponding HTML containers and JavaScript initialization code.

use charming::{
    Chart,
    component::{Axis, Grid, Legend, RadarCoordinate, RadarIndicator, Title},
    element::{AxisLabel, AxisPointer, AxisPointerType, AxisType, JsFunction, Tooltip, Trigger},
    series::{bar, pie, radar},
};
use maud::{Markup, PreEscaped, html};

use crate::visualize::aggregation::CategoryTotal;

/// The label used for the single dataset built from category totals.
const AMOUNT_LABEL: &str = "Amount";

/// One named series of values, aligned with [ChartData::labels].
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    /// The series name shown in legends and tooltips.
    pub label: String,
    /// One value per label.
    pub values: Vec<f64>,
}

/// Chart-ready data: category labels and one or more datasets whose values
/// line up with the labels.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    /// The distinct categories in the order they first appeared.
    pub labels: Vec<String>,
    /// The series drawn over the labels.
    pub datasets: Vec<Dataset>,
}

impl ChartData {
    /// Labels are the categories in order and the single "Amount" dataset
    /// holds the matching totals.
    pub fn from_totals(totals: &[CategoryTotal]) -> Self {
        Self {
            labels: totals.iter().map(|total| total.category.clone()).collect(),
            datasets: vec![Dataset {
                label: AMOUNT_LABEL.to_owned(),
                values: totals.iter().map(|total| total.total).collect(),
            }],
        }
    }
}

/// A chart with its HTML container ID and ECharts configuration.
pub(super) struct VisualizationChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JSON string
    pub options: String,
}

/// Builds the bar, doughnut and radar charts for `data`.
pub(super) fn build_charts(data: &ChartData) -> [VisualizationChart; 3] {
    [
        VisualizationChart {
            id: "bar-chart",
            options: escape_script_text(&bar_chart(data).to_string()),
        },
        VisualizationChart {
            id: "doughnut-chart",
            options: escape_script_text(&doughnut_chart(data).to_string()),
        },
        VisualizationChart {
            id: "radar-chart",
            options: escape_script_text(&radar_chart(data).to_string()),
        },
    ]
}

/// Makes chart options safe to embed in an inline `<script>` element.
///
/// Category labels come from the finance service and may contain
/// `</script>` or `<!--`. Every `<` is written as the `\u003c` escape, which
/// is only valid inside string literals, so the options must not use `<`
/// anywhere else.
fn escape_script_text(options: &str) -> String {
    options.replace('<', "\\u003c")
}

/// Renders the chart containers followed by the script that draws them.
///
/// The script is inline so that it runs both on a full page load and when
/// HTMX swaps the charts into an existing page.
pub(super) fn charts_view(charts: &[VisualizationChart]) -> Markup {
    html!(
        section
            id="charts"
            class="w-full mx-auto mb-4"
        {
            div class="grid grid-cols-1 lg:grid-cols-2 gap-4"
            {
                @for chart in charts {
                    div
                        id=(chart.id)
                        class="min-h-[380px] rounded bg-white dark:bg-gray-100"
                    {}
                }
            }
        }

        script { (charts_script(charts)) }
    )
}

/// Sets up the chart registry along with one resize listener and one theme
/// listener shared by every chart.
///
/// The listeners are installed on the first run only, so swapping in new
/// charts does not add more of them.
const CHART_REGISTRY_SCRIPT: &str = r#"window.visualizationCharts = window.visualizationCharts || {};
if (!window.visualizationChartsListening) {
    window.visualizationChartsListening = true;
    const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
    window.visualizationChartTheme = () => darkModeMediaQuery.matches ? 'dark' : 'default';
    window.addEventListener('resize', () => {
        Object.values(window.visualizationCharts).forEach((chart) => chart.resize());
    });
    darkModeMediaQuery.addEventListener('change', () => {
        const theme = window.visualizationChartTheme();
        Object.values(window.visualizationCharts).forEach((chart) => chart.setTheme(theme));
    });
}"#;

/// Generates JavaScript initialization code for the charts.
///
/// A chart drawn by an earlier request is disposed before its replacement
/// is created.
fn charts_script(charts: &[VisualizationChart]) -> PreEscaped<String> {
    let chart_scripts = charts
        .iter()
        .map(|chart| {
            format!(
                r#"(function() {{
                    const id = "{}";
                    const previous = window.visualizationCharts[id];
                    if (previous) {{
                        previous.dispose();
                    }}
                    const chart = echarts.init(document.getElementById(id));
                    const option = {};
                    chart.setOption(option);
                    chart.setTheme(window.visualizationChartTheme());
                    window.visualizationCharts[id] = chart;
                }})();"#,
                chart.id, chart.options
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    PreEscaped(format!("{CHART_REGISTRY_SCRIPT}\n{chart_scripts}"))
}

pub(super) fn bar_chart(data: &ChartData) -> Chart {
    let mut chart = Chart::new()
        .title(Title::new().text("Spending by Category"))
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Axis)
                .value_formatter(currency_formatter())
                .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow)),
        )
        .legend(Legend::new().top("1%").right("4%"))
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(
            Axis::new()
                .type_(AxisType::Category)
                .data(data.labels.clone()),
        )
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(currency_formatter())),
        );

    for dataset in &data.datasets {
        chart = chart.series(
            bar::Bar::new()
                .name(dataset.label.as_str())
                .data(dataset.values.clone()),
        );
    }

    chart
}

pub(super) fn doughnut_chart(data: &ChartData) -> Chart {
    let mut chart = Chart::new()
        .title(Title::new().text("Share of Spending"))
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Item)
                .value_formatter(currency_formatter()),
        )
        .legend(Legend::new().bottom("1%"));

    for dataset in &data.datasets {
        let slices: Vec<(f64, &str)> = dataset
            .values
            .iter()
            .copied()
            .zip(data.labels.iter().map(String::as_str))
            .collect();

        chart = chart.series(
            pie::Pie::new()
                .name(dataset.label.as_str())
                .radius(vec!["40%", "70%"])
                .data(slices),
        );
    }

    chart
}

pub(super) fn radar_chart(data: &ChartData) -> Chart {
    // ECharts scales each indicator from the data when no maximum is given.
    let indicators: Vec<RadarIndicator> = data
        .labels
        .iter()
        .map(|label| RadarIndicator::new().name(label.as_str()))
        .collect();

    let mut chart = Chart::new()
        .title(Title::new().text("Category Profile"))
        .tooltip(Tooltip::new().trigger(Trigger::Item))
        .legend(Legend::new().bottom("1%"))
        .radar(RadarCoordinate::new().indicator(indicators));

    for dataset in &data.datasets {
        chart = chart.series(
            radar::Radar::new()
                .name(dataset.label.as_str())
                .data(vec![(dataset.values.clone(), dataset.label.as_str())]),
        );
    }

    chart
}

#[inline]
fn currency_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "const currencyFormatter = new Intl.NumberFormat('en-US', {
              style: 'currency',
              currency: 'USD'
            });
            return number == null ? \"-\" : currencyFormatter.format(number);",
    )
}
