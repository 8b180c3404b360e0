//! Comparison Bars
//! Budget vs. expense bars over the trailing window of the trend data.

use crate::charts::{BUDGET_COLOR, EXPENSE_COLOR};
use crate::data::TrendSection;
use egui_plot::{Bar, BarChart, Legend, Plot};

const CHART_HEIGHT: f32 = 280.0;
const BAR_WIDTH: f64 = 0.34;
const GROUP_OFFSET: f64 = 0.19;

/// Number of trailing entries shown in the comparison chart.
pub const TRAILING_WINDOW: usize = 14;

/// Suffix slice of at most [`TRAILING_WINDOW`] entries, original order.
pub fn trailing_window<T>(items: &[T]) -> &[T] {
    let start = items.len().saturating_sub(TRAILING_WINDOW);
    &items[start..]
}

/// Renders the budget-vs-expense bar comparison.
pub struct ComparisonBars;

impl ComparisonBars {
    pub fn show(ui: &mut egui::Ui, trend: &TrendSection) {
        let labels = trailing_window(&trend.labels).to_vec();
        let expenses = trailing_window(&trend.series);
        let budget = trend.budget_line.as_deref().map(trailing_window);

        Plot::new("daily_budget_vs_expense")
            .height(CHART_HEIGHT)
            .legend(Legend::default())
            .allow_scroll(false)
            .x_axis_formatter(move |mark, _range| {
                let idx = mark.value.round() as usize;
                if mark.value >= 0.0 && idx < labels.len() {
                    labels[idx].clone()
                } else {
                    String::new()
                }
            })
            .show(ui, |plot_ui| {
                // Budget first when present, then expenses, like the legend.
                if let Some(budget) = budget {
                    let offset = -GROUP_OFFSET;
                    let bars: Vec<Bar> = budget
                        .iter()
                        .enumerate()
                        .map(|(i, &v)| Bar::new(i as f64 + offset, v).width(BAR_WIDTH))
                        .collect();
                    plot_ui.bar_chart(BarChart::new(bars).color(BUDGET_COLOR).name("Budget"));
                }

                let offset = if budget.is_some() { GROUP_OFFSET } else { 0.0 };
                let bars: Vec<Bar> = expenses
                    .iter()
                    .enumerate()
                    .map(|(i, &v)| Bar::new(i as f64 + offset, v).width(BAR_WIDTH))
                    .collect();
                plot_ui.bar_chart(BarChart::new(bars).color(EXPENSE_COLOR).name("Expenses"));
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_series_is_used_unmodified() {
        let items: Vec<u32> = (0..5).collect();
        assert_eq!(trailing_window(&items), items.as_slice());
    }

    #[test]
    fn exactly_window_sized_series_is_used_unmodified() {
        let items: Vec<u32> = (0..TRAILING_WINDOW as u32).collect();
        assert_eq!(trailing_window(&items), items.as_slice());
    }

    #[test]
    fn long_series_keeps_the_last_entries_in_order() {
        let items: Vec<u32> = (0..20).collect();
        let window = trailing_window(&items);
        assert_eq!(window.len(), TRAILING_WINDOW);
        assert_eq!(window.first(), Some(&6));
        assert_eq!(window.last(), Some(&19));
        assert!(window.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn empty_series_stays_empty() {
        let items: Vec<u32> = Vec::new();
        assert!(trailing_window(&items).is_empty());
    }
}
