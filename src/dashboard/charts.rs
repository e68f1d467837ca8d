//! Chart generation and rendering for the dashboard.
//!
//! This module creates two ECharts visualizations of the expenses per category:
//! - **Expense Distribution**: a pie chart
//! - **Expenses by Category**: a bar chart
//!
//! Each chart is generated as JSON configuration for the ECharts library and
//! rendered with an HTML container and JavaScript initialization code.
//!
//! [ChartRenderer] owns at most one live [ChartHandle] per [ChartKind]. Each
//! redraw releases the previous handle before creating the replacement, and
//! the client script disposes the previous ECharts instance the same way.

use std::{
    fmt::{self, Display},
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title},
    element::{AxisType, Color, ItemStyle, Tooltip, Trigger},
    series::{Pie, bar},
};
use maud::{Markup, html};

use crate::ledger::CATEGORIES;

/// The slice colours of the pie chart, one per category.
const PIE_COLORS: [&str; 5] = ["#ff6384", "#36a2eb", "#ffce56", "#4caf50", "#9966ff"];
/// The colour of the bars in the bar chart.
const BAR_COLOR: &str = "#ff6384";

/// The kinds of chart on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Pie,
    Bar,
}

impl ChartKind {
    /// The HTML element ID of the chart container (kebab-case).
    pub fn element_id(&self) -> &'static str {
        match self {
            ChartKind::Pie => "pie-chart",
            ChartKind::Bar => "bar-chart",
        }
    }
}

impl Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChartKind::Pie => f.write_str("pie"),
            ChartKind::Bar => f.write_str("bar"),
        }
    }
}

/// A live chart owned by the [ChartRenderer].
///
/// Dropping the handle releases the chart.
#[derive(Debug)]
pub struct ChartHandle {
    kind: ChartKind,
    generation: u64,
    options: String,
    live_handles: Arc<AtomicUsize>,
}

impl ChartHandle {
    fn new(kind: ChartKind, generation: u64, chart: Chart, live_handles: Arc<AtomicUsize>) -> Self {
        live_handles.fetch_add(1, Ordering::SeqCst);

        Self {
            kind,
            generation,
            options: chart.to_string(),
            live_handles,
        }
    }

    /// The chart this handle draws.
    pub fn kind(&self) -> ChartKind {
        self.kind
    }

    /// How many charts had been drawn when this one was created.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The ECharts configuration as a JSON string.
    pub fn options(&self) -> &str {
        &self.options
    }
}

impl Drop for ChartHandle {
    fn drop(&mut self) {
        self.live_handles.fetch_sub(1, Ordering::SeqCst);
        tracing::debug!("released {} chart #{}", self.kind, self.generation);
    }
}

/// Draws the dashboard charts and owns the live chart handles.
#[derive(Debug, Default)]
pub struct ChartRenderer {
    pie: Option<ChartHandle>,
    bar: Option<ChartHandle>,
    generation: u64,
    live_handles: Arc<AtomicUsize>,
}

impl ChartRenderer {
    /// Create a renderer with no live charts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Redraw both charts from the per-category expense totals.
    ///
    /// `category_totals` must be aligned with [CATEGORIES].
    pub fn render(&mut self, category_totals: &[f64]) -> [&ChartHandle; 2] {
        self.generation += 1;

        drop(self.pie.take());
        let pie = ChartHandle::new(
            ChartKind::Pie,
            self.generation,
            pie_chart(category_totals),
            self.live_handles.clone(),
        );
        let pie = self.pie.insert(pie);

        drop(self.bar.take());
        let bar = ChartHandle::new(
            ChartKind::Bar,
            self.generation,
            bar_chart(category_totals),
            self.live_handles.clone(),
        );
        let bar = self.bar.insert(bar);

        [&*pie, &*bar]
    }

    /// The number of chart handles that have not been released yet.
    pub fn live_handles(&self) -> usize {
        self.live_handles.load(Ordering::SeqCst)
    }
}

fn pie_chart(category_totals: &[f64]) -> Chart {
    let data: Vec<(f64, &str)> = category_totals
        .iter()
        .copied()
        .zip(CATEGORIES)
        .collect();

    Chart::new()
        .title(Title::new().text("Expense Distribution"))
        .tooltip(Tooltip::new().trigger(Trigger::Item))
        .legend(Legend::new().bottom(0))
        .color(PIE_COLORS.iter().map(|&color| Color::from(color)).collect())
        .series(
            Pie::new()
                .name("Expense Distribution")
                .radius("60%")
                .data(data),
        )
}

fn bar_chart(category_totals: &[f64]) -> Chart {
    Chart::new()
        .title(Title::new().text("Expenses by Category"))
        .tooltip(Tooltip::new().trigger(Trigger::Axis))
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(CATEGORIES.to_vec()))
        .y_axis(Axis::new().type_(AxisType::Value))
        .series(
            bar::Bar::new()
                .name("Expenses by Category")
                .item_style(ItemStyle::new().color(BAR_COLOR))
                .data(category_totals.to_vec()),
        )
}

/// Renders the HTML containers for the charts.
pub(super) fn charts_view(charts: &[&ChartHandle]) -> Markup {
    html!(
        section
            id="charts"
            class="w-full mx-auto mb-4"
        {
            div class="grid grid-cols-1 xl:grid-cols-2 gap-4"
            {
                @for chart in charts {
                    div
                        id=(chart.kind().element_id())
                        data-chart=(chart.kind().to_string())
                        data-generation=(chart.generation())
                        class="min-h-[380px] rounded dark:bg-gray-100"
                    {}
                }
            }
        }
    )
}

/// Generates the JavaScript that draws the charts.
///
/// Any chart already drawn in a container is disposed before the new one is
/// initialized.
pub(super) fn charts_script(charts: &[&ChartHandle]) -> String {
    charts
        .iter()
        .map(|chart| {
            format!(
                r#"(function() {{
                    const chartDom = document.getElementById("{}");
                    const previous = echarts.getInstanceByDom(chartDom);
                    if (previous) {{
                        previous.dispose();
                    }}
                    const chart = echarts.init(chartDom);
                    chart.setOption({});
                }})();"#,
                chart.kind().element_id(),
                chart.options()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
