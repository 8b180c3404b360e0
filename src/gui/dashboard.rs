//! Dashboard View
//! Central panel: summary stat row, trend and comparison cards, and the
//! breakdown card where the doughnut and the category table are linked by
//! hover highlighting.

use crate::charts::{
    slice_color, slice_percentages, BreakdownChart, ComparisonBars, TrendChart, TRAILING_WINDOW,
};
use crate::data::{BreakdownSection, DashboardPayload, SummarySection};
use crate::money::DisplayCurrency;
use egui::{Color32, RichText, ScrollArea, Sense, Stroke};

const CARD_SPACING: f32 = 15.0;

/// Scrollable dashboard. Each chart slot renders only when its payload
/// section is present; an absent section simply leaves the card out.
pub struct DashboardView {
    breakdown_chart: BreakdownChart,
}

impl Default for DashboardView {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardView {
    pub fn new() -> Self {
        Self {
            breakdown_chart: BreakdownChart::new(),
        }
    }

    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        payload: Option<&DashboardPayload>,
        display: DisplayCurrency,
    ) {
        let Some(payload) = payload else {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No dashboard loaded").size(20.0));
            });
            return;
        };

        if payload.is_empty() {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("Nothing to show in this export").size(20.0));
            });
            return;
        }

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                if let Some(summary) = &payload.summary {
                    Self::draw_summary_row(ui, summary, display);
                    ui.add_space(CARD_SPACING);
                }

                if let Some(trend) = &payload.trend {
                    Self::draw_card(ui, "Expense trend", |ui| {
                        TrendChart::show(ui, trend);
                    });
                    ui.add_space(CARD_SPACING);

                    let bars_title =
                        format!("Daily budget vs expenses (last {TRAILING_WINDOW} days)");
                    Self::draw_card(ui, &bars_title, |ui| {
                        ComparisonBars::show(ui, trend);
                    });
                    ui.add_space(CARD_SPACING);
                }

                if let Some(breakdown) = &payload.breakdown {
                    let chart = &mut self.breakdown_chart;
                    Self::draw_card(ui, "Spending breakdown", |ui| {
                        ui.horizontal_top(|ui| {
                            ui.vertical(|ui| {
                                ui.set_width(300.0);
                                chart.show(ui, breakdown);
                            });
                            ui.add_space(20.0);
                            ui.vertical(|ui| {
                                Self::draw_breakdown_table(ui, breakdown, chart, display);
                            });
                        });
                    });
                }
            });
    }

    /// Month-to-date totals in the selected display currency.
    fn draw_summary_row(ui: &mut egui::Ui, summary: &SummarySection, display: DisplayCurrency) {
        ui.horizontal(|ui| {
            Self::draw_stat_tile(ui, "Income", display.format(summary.income), Color32::from_rgb(40, 167, 69));
            Self::draw_stat_tile(ui, "Expenses", display.format(summary.expense), Color32::from_rgb(220, 53, 69));
            Self::draw_stat_tile(ui, "Net", display.format(summary.net()), Color32::from_rgb(100, 149, 237));
            Self::draw_stat_tile(
                ui,
                "Monthly budget",
                display.format(summary.total_budget),
                Color32::from_rgb(255, 170, 59),
            );

            if display.fell_back() {
                ui.label(
                    RichText::new("Rates unavailable right now.")
                        .size(11.0)
                        .color(Color32::from_rgb(255, 170, 59)),
                );
            }
        });

        if let (Some(start), Some(today)) = (&summary.month_start, &summary.today) {
            ui.label(
                RichText::new(format!("{start} – {today}"))
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        }
    }

    fn draw_stat_tile(ui: &mut egui::Ui, title: &str, value: String, accent: Color32) {
        egui::Frame::none()
            .rounding(8.0)
            .stroke(Stroke::new(1.0, accent.gamma_multiply(0.6)))
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .inner_margin(10.0)
            .show(ui, |ui| {
                ui.set_min_width(130.0);
                ui.vertical(|ui| {
                    ui.label(RichText::new(title).size(11.0).color(Color32::GRAY));
                    ui.label(RichText::new(value).size(17.0).strong().color(accent));
                });
            });
    }

    fn draw_card(ui: &mut egui::Ui, title: &str, add_contents: impl FnOnce(&mut egui::Ui)) {
        egui::Frame::none()
            .rounding(8.0)
            .stroke(Stroke::new(1.0, ui.visuals().widgets.noninteractive.bg_stroke.color))
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.label(RichText::new(title).size(15.0).strong());
                ui.add_space(8.0);
                add_contents(ui);
            });
    }

    /// Category table. Hovering a row highlights its slice in the doughnut;
    /// leaving clears the highlight again.
    fn draw_breakdown_table(
        ui: &mut egui::Ui,
        breakdown: &BreakdownSection,
        chart: &mut BreakdownChart,
        display: DisplayCurrency,
    ) {
        let percentages = slice_percentages(&breakdown.series);
        let mut hovered_row: Option<usize> = None;

        for index in 0..breakdown.slice_count() {
            let value = breakdown.series[index];
            let color = slice_color(index);

            let row = ui.horizontal(|ui| {
                // Swatch
                let (rect, _) =
                    ui.allocate_exact_size(egui::vec2(14.0, 14.0), Sense::hover());
                ui.painter().rect_filled(rect, 3.0, color);

                ui.add_sized(
                    [140.0, 18.0],
                    egui::Label::new(RichText::new(breakdown.label(index)).size(13.0)),
                );
                ui.add_sized(
                    [80.0, 18.0],
                    egui::Label::new(RichText::new(display.format(value)).size(13.0)),
                );

                // Percent badge
                egui::Frame::none()
                    .rounding(6.0)
                    .fill(Color32::from_white_alpha(10))
                    .stroke(Stroke::new(1.0, color.gamma_multiply(0.5)))
                    .inner_margin(egui::Margin::symmetric(6.0, 2.0))
                    .show(ui, |ui| {
                        ui.label(
                            RichText::new(format!("{}%", percentages[index]))
                                .size(11.0)
                                .color(Color32::from_rgb(232, 238, 252)),
                        );
                    });
            });

            if row.response.hovered() {
                hovered_row = Some(index);
            }
            ui.add_space(4.0);
        }

        match hovered_row {
            Some(index) => chart.set_active(index),
            None => chart.clear_active(),
        }
    }
}
