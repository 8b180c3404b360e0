//! Trend Chart
//! Line chart of the daily expense series with an optional dashed
//! budget-limit overlay, drawn with egui_plot.

use crate::charts::{BUDGET_COLOR, EXPENSE_COLOR};
use crate::data::TrendSection;
use egui_plot::{Legend, Line, LineStyle, Plot, PlotPoints};

const CHART_HEIGHT: f32 = 280.0;

/// Renders the expense trend line chart.
pub struct TrendChart;

impl TrendChart {
    pub fn show(ui: &mut egui::Ui, trend: &TrendSection) {
        let x_labels = trend.labels.clone();

        Plot::new("expense_trend")
            .height(CHART_HEIGHT)
            .legend(Legend::default())
            .allow_scroll(false)
            .x_axis_formatter(move |mark, _range| {
                let idx = mark.value.round() as usize;
                if mark.value >= 0.0 && idx < x_labels.len() {
                    x_labels[idx].clone()
                } else {
                    String::new()
                }
            })
            .show(ui, |plot_ui| {
                let points: PlotPoints = trend
                    .series
                    .iter()
                    .enumerate()
                    .map(|(i, &v)| [i as f64, v])
                    .collect();

                plot_ui.line(
                    Line::new(points)
                        .color(EXPENSE_COLOR)
                        .width(2.5)
                        .name("Daily expenses"),
                );

                if let Some(budget_line) = &trend.budget_line {
                    let points: PlotPoints = budget_line
                        .iter()
                        .enumerate()
                        .map(|(i, &v)| [i as f64, v])
                        .collect();

                    plot_ui.line(
                        Line::new(points)
                            .color(BUDGET_COLOR)
                            .width(2.5)
                            .style(LineStyle::Dashed { length: 6.0 })
                            .name("Daily budget limit"),
                    );
                }
            });
    }
}
