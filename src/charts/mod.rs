//! Charts module - Chart rendering

mod bars;
mod breakdown;
mod export;
mod trend;

pub use bars::{ComparisonBars, TRAILING_WINDOW};
pub use breakdown::{slice_percentages, BreakdownChart, LABEL_SUPPRESS_PCT};
pub use export::SnapshotRenderer;
pub use trend::TrendChart;

use egui::Color32;

/// Series color for daily expenses.
pub const EXPENSE_COLOR: Color32 = Color32::from_rgb(59, 163, 255); // #3BA3FF

/// Series color for the budget limit overlay.
pub const BUDGET_COLOR: Color32 = Color32::from_rgb(255, 77, 77); // #FF4D4D

/// Slice palette for the breakdown chart and table swatches.
pub const PALETTE: [Color32; 8] = [
    Color32::from_rgb(59, 163, 255),  // #3BA3FF
    Color32::from_rgb(255, 95, 138),  // #FF5F8A
    Color32::from_rgb(255, 170, 59),  // #FFAA3B
    Color32::from_rgb(255, 211, 90),  // #FFD35A
    Color32::from_rgb(66, 214, 197),  // #42D6C5
    Color32::from_rgb(155, 124, 255), // #9B7CFF
    Color32::from_rgb(127, 226, 107), // #7FE26B
    Color32::from_rgb(255, 107, 107), // #FF6B6B
];

/// Color for a slice or table row; wraps past the palette.
pub fn slice_color(index: usize) -> Color32 {
    PALETTE[index % PALETTE.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slice_colors_wrap_modulo_the_palette() {
        assert_eq!(slice_color(0), PALETTE[0]);
        assert_eq!(slice_color(7), PALETTE[7]);
        assert_eq!(slice_color(8), PALETTE[0]);
        assert_eq!(slice_color(19), PALETTE[3]);
    }
}
