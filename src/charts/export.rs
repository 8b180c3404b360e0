//! Snapshot Renderer
//! Renders the dashboard to a PNG: the three panels are drawn with
//! plotters into RGB buffers in parallel, composited and encoded in memory.

use crate::charts::slice_color;
use crate::data::{BreakdownSection, DashboardPayload, TrendSection};
use anyhow::{anyhow, Context, Result};
use image::{imageops, ImageFormat, Rgb, RgbImage};
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use std::f64::consts::{PI, TAU};
use std::io::Cursor;

use super::bars::trailing_window;
use super::breakdown::{slice_percentages, LABEL_SUPPRESS_PCT};

const EXPENSE_RGB: RGBColor = RGBColor(59, 163, 255);
const BUDGET_RGB: RGBColor = RGBColor(255, 77, 77);

fn slice_rgb(index: usize) -> RGBColor {
    let c = slice_color(index);
    RGBColor(c.r(), c.g(), c.b())
}

/// Renders dashboard snapshots for export.
pub struct SnapshotRenderer;

impl SnapshotRenderer {
    /// Render the dashboard to in-memory PNG bytes. Sections the payload
    /// is missing leave their panel blank, matching the live view.
    pub fn render_dashboard_to_bytes(
        payload: &DashboardPayload,
        width: u32,
        height: u32,
    ) -> Result<Vec<u8>> {
        if payload.trend.is_none() && payload.breakdown.is_none() {
            return Err(anyhow!("payload has no renderable sections"));
        }

        let top_h = height / 2;
        let bottom_h = height - top_h;
        let left_w = width / 2;
        let right_w = width - left_w;

        // The three panels are independent; render them in parallel.
        let (trend_img, (bars_img, breakdown_img)) = rayon::join(
            || {
                payload
                    .trend
                    .as_ref()
                    .map(|t| Self::render_trend_panel(t, width, top_h))
                    .transpose()
            },
            || {
                rayon::join(
                    || {
                        payload
                            .trend
                            .as_ref()
                            .map(|t| Self::render_bars_panel(t, left_w, bottom_h))
                            .transpose()
                    },
                    || {
                        payload
                            .breakdown
                            .as_ref()
                            .map(|b| Self::render_breakdown_panel(b, right_w, bottom_h))
                            .transpose()
                    },
                )
            },
        );

        let mut canvas = RgbImage::from_pixel(width, height, Rgb([255, 255, 255]));
        if let Some(img) = trend_img? {
            imageops::replace(&mut canvas, &img, 0, 0);
        }
        if let Some(img) = bars_img? {
            imageops::replace(&mut canvas, &img, 0, i64::from(top_h));
        }
        if let Some(img) = breakdown_img? {
            imageops::replace(&mut canvas, &img, i64::from(left_w), i64::from(top_h));
        }

        let mut bytes = Vec::new();
        canvas
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .context("encode snapshot PNG")?;
        Ok(bytes)
    }

    fn render_trend_panel(trend: &TrendSection, width: u32, height: u32) -> Result<RgbImage> {
        let mut buf = vec![0u8; (width * height * 3) as usize];
        {
            let root = BitMapBackend::with_buffer(&mut buf, (width, height)).into_drawing_area();
            root.fill(&WHITE).map_err(|e| anyhow!("trend panel: {e}"))?;

            let y_max = Self::y_ceiling(trend);
            let x_max = (trend.series.len().saturating_sub(1)).max(1) as f64;
            let labels = trend.labels.clone();

            let mut chart = ChartBuilder::on(&root)
                .caption("Daily expenses", ("sans-serif", 20))
                .margin(12)
                .x_label_area_size(28)
                .y_label_area_size(48)
                .build_cartesian_2d(0f64..x_max, 0f64..y_max)
                .map_err(|e| anyhow!("trend panel: {e}"))?;

            chart
                .configure_mesh()
                .x_labels(8)
                .x_label_formatter(&|x| Self::label_at(&labels, *x))
                .draw()
                .map_err(|e| anyhow!("trend panel: {e}"))?;

            chart
                .draw_series(LineSeries::new(
                    trend.series.iter().enumerate().map(|(i, &v)| (i as f64, v)),
                    EXPENSE_RGB.stroke_width(2),
                ))
                .map_err(|e| anyhow!("trend panel: {e}"))?
                .label("Daily expenses")
                .legend(|(x, y)| {
                    PathElement::new(vec![(x, y), (x + 18, y)], EXPENSE_RGB.stroke_width(2))
                });

            if let Some(budget_line) = &trend.budget_line {
                chart
                    .draw_series(DashedLineSeries::new(
                        budget_line.iter().enumerate().map(|(i, &v)| (i as f64, v)),
                        6,
                        6,
                        BUDGET_RGB.stroke_width(2).into(),
                    ))
                    .map_err(|e| anyhow!("trend panel: {e}"))?
                    .label("Daily budget limit")
                    .legend(|(x, y)| {
                        PathElement::new(vec![(x, y), (x + 18, y)], BUDGET_RGB.stroke_width(2))
                    });
            }

            chart
                .configure_series_labels()
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK.mix(0.3))
                .draw()
                .map_err(|e| anyhow!("trend panel: {e}"))?;

            root.present().map_err(|e| anyhow!("trend panel: {e}"))?;
        }
        RgbImage::from_raw(width, height, buf).context("trend panel buffer")
    }

    fn render_bars_panel(trend: &TrendSection, width: u32, height: u32) -> Result<RgbImage> {
        let labels = trailing_window(&trend.labels).to_vec();
        let expenses = trailing_window(&trend.series);
        let budget = trend.budget_line.as_deref().map(trailing_window);

        let mut buf = vec![0u8; (width * height * 3) as usize];
        {
            let root = BitMapBackend::with_buffer(&mut buf, (width, height)).into_drawing_area();
            root.fill(&WHITE).map_err(|e| anyhow!("bars panel: {e}"))?;

            let y_max = Self::y_ceiling(trend);
            let x_max = expenses.len().max(1) as f64;

            let mut chart = ChartBuilder::on(&root)
                .caption("Budget vs expenses", ("sans-serif", 20))
                .margin(12)
                .x_label_area_size(28)
                .y_label_area_size(48)
                .build_cartesian_2d(-0.6f64..x_max, 0f64..y_max)
                .map_err(|e| anyhow!("bars panel: {e}"))?;

            chart
                .configure_mesh()
                .disable_x_mesh()
                .x_labels(labels.len().min(7))
                .x_label_formatter(&|x| Self::label_at(&labels, *x))
                .draw()
                .map_err(|e| anyhow!("bars panel: {e}"))?;

            if let Some(budget) = budget {
                chart
                    .draw_series(budget.iter().enumerate().map(|(i, &v)| {
                        Rectangle::new(
                            [(i as f64 - 0.38, 0.0), (i as f64 - 0.02, v)],
                            BUDGET_RGB.filled(),
                        )
                    }))
                    .map_err(|e| anyhow!("bars panel: {e}"))?
                    .label("Budget")
                    .legend(|(x, y)| {
                        Rectangle::new([(x, y - 5), (x + 10, y + 5)], BUDGET_RGB.filled())
                    });
            }

            let offset = if budget.is_some() { 0.02 } else { -0.18 };
            chart
                .draw_series(expenses.iter().enumerate().map(|(i, &v)| {
                    Rectangle::new(
                        [(i as f64 + offset, 0.0), (i as f64 + offset + 0.36, v)],
                        EXPENSE_RGB.filled(),
                    )
                }))
                .map_err(|e| anyhow!("bars panel: {e}"))?
                .label("Expenses")
                .legend(|(x, y)| {
                    Rectangle::new([(x, y - 5), (x + 10, y + 5)], EXPENSE_RGB.filled())
                });

            chart
                .configure_series_labels()
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK.mix(0.3))
                .draw()
                .map_err(|e| anyhow!("bars panel: {e}"))?;

            root.present().map_err(|e| anyhow!("bars panel: {e}"))?;
        }
        RgbImage::from_raw(width, height, buf).context("bars panel buffer")
    }

    fn render_breakdown_panel(
        section: &BreakdownSection,
        width: u32,
        height: u32,
    ) -> Result<RgbImage> {
        let mut buf = vec![0u8; (width * height * 3) as usize];
        {
            let root = BitMapBackend::with_buffer(&mut buf, (width, height)).into_drawing_area();
            root.fill(&WHITE).map_err(|e| anyhow!("breakdown panel: {e}"))?;

            root.draw(&Text::new(
                "Spending breakdown",
                (12, 12),
                ("sans-serif", 20).into_font(),
            ))
            .map_err(|e| anyhow!("breakdown panel: {e}"))?;

            let cx = f64::from(width) / 2.0;
            let cy = f64::from(height) / 2.0 + 10.0;
            let r_outer = (f64::from(width.min(height)) / 2.0 - 40.0).max(10.0);
            let r_inner = r_outer * 0.55;

            let total: f64 = section.series.iter().sum();
            if total > 0.0 {
                let percentages = slice_percentages(&section.series);
                let mut angle = -PI / 2.0;
                for (i, &value) in section.series.iter().enumerate() {
                    let sweep = value / total * TAU;
                    root.draw(&Polygon::new(
                        Self::ring_sector_points(cx, cy, r_inner, r_outer, angle, angle + sweep),
                        slice_rgb(i).filled(),
                    ))
                    .map_err(|e| anyhow!("breakdown panel: {e}"))?;

                    let pct = percentages[i];
                    if pct > LABEL_SUPPRESS_PCT {
                        let mid = angle + sweep / 2.0;
                        let r_mid = (r_inner + r_outer) / 2.0;
                        let x = (cx + mid.cos() * r_mid) as i32 - 10;
                        let y = (cy + mid.sin() * r_mid) as i32 - 8;
                        root.draw(&Text::new(
                            format!("{pct}%"),
                            (x, y),
                            ("sans-serif", 15).into_font().color(&WHITE),
                        ))
                        .map_err(|e| anyhow!("breakdown panel: {e}"))?;
                    }

                    angle += sweep;
                }

                // Category legend down the left edge.
                for (i, label) in section.labels.iter().enumerate() {
                    let y = 40 + i as i32 * 18;
                    root.draw(&Rectangle::new(
                        [(12, y), (24, y + 12)],
                        slice_rgb(i).filled(),
                    ))
                    .map_err(|e| anyhow!("breakdown panel: {e}"))?;
                    root.draw(&Text::new(
                        label.clone(),
                        (30, y),
                        ("sans-serif", 14).into_font(),
                    ))
                    .map_err(|e| anyhow!("breakdown panel: {e}"))?;
                }
            }

            root.present().map_err(|e| anyhow!("breakdown panel: {e}"))?;
        }
        RgbImage::from_raw(width, height, buf).context("breakdown panel buffer")
    }

    fn ring_sector_points(
        cx: f64,
        cy: f64,
        r_inner: f64,
        r_outer: f64,
        start: f64,
        end: f64,
    ) -> Vec<(i32, i32)> {
        let steps = (((end - start) / 0.05).ceil() as usize).max(1);
        let at = |t: f64, r: f64| ((cx + t.cos() * r) as i32, (cy + t.sin() * r) as i32);

        let mut points = Vec::with_capacity((steps + 1) * 2);
        for s in 0..=steps {
            let t = start + (end - start) * s as f64 / steps as f64;
            points.push(at(t, r_outer));
        }
        for s in (0..=steps).rev() {
            let t = start + (end - start) * s as f64 / steps as f64;
            points.push(at(t, r_inner));
        }
        points
    }

    fn label_at(labels: &[String], x: f64) -> String {
        let idx = x.round();
        if (x - idx).abs() > 0.25 || idx < 0.0 {
            return String::new();
        }
        labels
            .get(idx as usize)
            .cloned()
            .unwrap_or_default()
    }

    fn y_ceiling(trend: &TrendSection) -> f64 {
        let series_max = trend.series.iter().copied().fold(0.0f64, f64::max);
        let budget_max = trend
            .budget_line
            .as_deref()
            .map(|b| b.iter().copied().fold(0.0f64, f64::max))
            .unwrap_or(0.0);
        (series_max.max(budget_max) * 1.15).max(1.0)
    }
}
