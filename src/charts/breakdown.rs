//! Breakdown Chart
//! Doughnut of spending shares per category, painted as an egui mesh,
//! with rounded percentage labels drawn on the slices and a hover tooltip.

use crate::charts::slice_color;
use crate::data::BreakdownSection;
use egui::{Align2, Color32, FontId, Mesh, Pos2, Sense, Shape, Stroke, Vec2};
use std::f32::consts::{PI, TAU};

/// Slices at or below this rounded percentage get no on-slice label.
pub const LABEL_SUPPRESS_PCT: i64 = 3;

/// Fraction of the outer radius cut out of the middle.
const CUTOUT: f32 = 0.55;

/// Extra radius for the highlighted slice.
const ACTIVE_GROWTH: f32 = 5.0;

/// Angular step used when tessellating slice arcs, ~3 degrees.
const ARC_STEP: f32 = 0.05;

/// Rounded share of the total per slice. All zeros when the total is zero.
/// Percentages round independently; their sum is not reconciled to 100.
pub fn slice_percentages(values: &[f64]) -> Vec<i64> {
    let total: f64 = values.iter().sum();
    if total == 0.0 {
        return vec![0; values.len()];
    }
    values
        .iter()
        .map(|&v| (v / total * 100.0).round() as i64)
        .collect()
}

/// Doughnut chart with a single active (highlighted) slice, driven either
/// by the pointer or by the breakdown table rows.
pub struct BreakdownChart {
    active: Option<usize>,
}

impl Default for BreakdownChart {
    fn default() -> Self {
        Self::new()
    }
}

impl BreakdownChart {
    pub fn new() -> Self {
        Self { active: None }
    }

    /// Highlight the slice at `index`. Idempotent; out-of-range indices are
    /// kept but draw no highlight.
    pub fn set_active(&mut self, index: usize) {
        self.active = Some(index);
    }

    /// Return to no active element.
    pub fn clear_active(&mut self) {
        self.active = None;
    }

    #[allow(dead_code)]
    pub fn active(&self) -> Option<usize> {
        self.active
    }

    /// Draw the doughnut into the available space.
    pub fn show(&mut self, ui: &mut egui::Ui, section: &BreakdownSection) {
        let side = ui.available_width().clamp(180.0, 300.0);
        let (response, painter) = ui.allocate_painter(Vec2::splat(side), Sense::hover());
        let center = response.rect.center();
        let r_outer = side / 2.0 - ACTIVE_GROWTH - 2.0;
        let r_inner = r_outer * CUTOUT;

        let total: f64 = section.series.iter().sum();
        if total == 0.0 {
            // Valid empty state: faint ring, no labels, no tooltip.
            painter.circle_stroke(
                center,
                (r_outer + r_inner) / 2.0,
                Stroke::new(r_outer - r_inner, Color32::from_gray(45)),
            );
            return;
        }

        let percentages = slice_percentages(&section.series);
        let hovered = response
            .hover_pos()
            .and_then(|pos| hit_test(pos, center, r_inner, r_outer + ACTIVE_GROWTH, &section.series));
        let highlight = hovered.or(self.active);

        // Slices, clockwise from the top.
        let mut angle = -PI / 2.0;
        for (i, &value) in section.series.iter().enumerate() {
            let sweep = (value / total) as f32 * TAU;
            let is_highlighted = highlight == Some(i);
            let radius = if is_highlighted {
                r_outer + ACTIVE_GROWTH
            } else {
                r_outer
            };

            let mut mesh = Mesh::default();
            add_ring_sector(
                &mut mesh,
                center,
                r_inner,
                radius,
                angle,
                angle + sweep,
                slice_color(i),
            );
            painter.add(Shape::mesh(mesh));
            angle += sweep;
        }

        // Percentage labels, suppressed for slivers.
        let mut angle = -PI / 2.0;
        for (i, &value) in section.series.iter().enumerate() {
            let sweep = (value / total) as f32 * TAU;
            let pct = percentages[i];
            if pct > LABEL_SUPPRESS_PCT {
                let mid = angle + sweep / 2.0;
                let pos = center + Vec2::angled(mid) * (r_inner + r_outer) / 2.0;
                painter.text(
                    pos,
                    Align2::CENTER_CENTER,
                    format!("{pct}%"),
                    FontId::proportional(12.0),
                    Color32::WHITE,
                );
            }
            angle += sweep;
        }

        // Tooltip mirrors the table: label, value, rounded share.
        if let Some(i) = hovered {
            let value = section.series[i];
            let pct = percentages[i];
            let label = section.label(i);
            egui::show_tooltip_at_pointer(
                ui.ctx(),
                ui.layer_id(),
                response.id.with("breakdown_tooltip"),
                |ui| {
                    ui.label(format!("{label}: {value:.2} ({pct}%)"));
                },
            );
        }
    }
}

/// Slice index under `pos`, if the pointer is inside the ring.
fn hit_test(
    pos: Pos2,
    center: Pos2,
    r_inner: f32,
    r_outer: f32,
    values: &[f64],
) -> Option<usize> {
    let offset = pos - center;
    let distance = offset.length();
    if distance < r_inner || distance > r_outer {
        return None;
    }

    let total: f64 = values.iter().sum();
    if total == 0.0 {
        return None;
    }

    // Angle clockwise from the top, in [0, TAU).
    let mut angle = offset.y.atan2(offset.x) + PI / 2.0;
    if angle < 0.0 {
        angle += TAU;
    }

    let mut cursor = 0.0f32;
    for (i, &value) in values.iter().enumerate() {
        cursor += (value / total) as f32 * TAU;
        if angle < cursor {
            return Some(i);
        }
    }
    // Float accumulation can leave the last boundary a hair short.
    if values.is_empty() {
        None
    } else {
        Some(values.len() - 1)
    }
}

/// Tessellate one ring sector into triangles.
fn add_ring_sector(
    mesh: &mut Mesh,
    center: Pos2,
    r_inner: f32,
    r_outer: f32,
    start: f32,
    end: f32,
    color: Color32,
) {
    if end <= start {
        return;
    }

    let steps = (((end - start) / ARC_STEP).ceil() as usize).max(1);
    let base = mesh.vertices.len() as u32;

    for s in 0..=steps {
        let t = start + (end - start) * s as f32 / steps as f32;
        let dir = Vec2::angled(t);
        mesh.colored_vertex(center + dir * r_outer, color);
        mesh.colored_vertex(center + dir * r_inner, color);
    }

    for s in 0..steps as u32 {
        let o0 = base + s * 2;
        let i0 = o0 + 1;
        let o1 = o0 + 2;
        let i1 = o0 + 3;
        mesh.add_triangle(o0, i0, o1);
        mesh.add_triangle(i0, i1, o1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentages_stay_within_the_bounded_rounding_window() {
        // Independent rounding may sum to 99..=101; never reconciled.
        for values in [
            vec![1.0, 1.0, 1.0],
            vec![40.0, 30.0, 20.0, 10.0],
            vec![33.4, 33.3, 33.3],
            vec![412.35, 96.20, 230.00, 42.99, 120.50],
        ] {
            let sum: i64 = slice_percentages(&values).iter().sum();
            assert!((99..=101).contains(&sum), "sum {sum} for {values:?}");
        }
    }

    #[test]
    fn zero_total_yields_zero_percentages() {
        assert_eq!(slice_percentages(&[0.0, 0.0, 0.0]), vec![0, 0, 0]);
        assert_eq!(slice_percentages(&[]), Vec::<i64>::new());
    }

    #[test]
    fn tiny_slices_fall_under_the_suppression_threshold() {
        // 2% and 3% suppressed, 95% labeled.
        let pcts = slice_percentages(&[2.0, 3.0, 95.0]);
        let labeled: Vec<i64> = pcts
            .iter()
            .copied()
            .filter(|&p| p > LABEL_SUPPRESS_PCT)
            .collect();
        assert_eq!(labeled, vec![95]);
    }

    #[test]
    fn active_slice_updates_are_idempotent() {
        let mut chart = BreakdownChart::new();
        assert_eq!(chart.active(), None);

        chart.set_active(2);
        chart.set_active(2);
        assert_eq!(chart.active(), Some(2));

        chart.clear_active();
        chart.clear_active();
        assert_eq!(chart.active(), None);
    }

    #[test]
    fn hit_test_finds_the_slice_under_the_pointer() {
        let center = Pos2::new(100.0, 100.0);
        let values = vec![25.0, 25.0, 50.0];

        // Straight up-right, just past the top: first slice.
        let hit = hit_test(Pos2::new(110.0, 40.0), center, 30.0, 80.0, &values);
        assert_eq!(hit, Some(0));

        // Straight down: halfway around, inside the third slice.
        let hit = hit_test(Pos2::new(100.0, 160.0), center, 30.0, 80.0, &values);
        assert_eq!(hit, Some(2));

        // Inside the cutout: no slice.
        let hit = hit_test(Pos2::new(100.0, 110.0), center, 30.0, 80.0, &values);
        assert_eq!(hit, None);
    }
}
