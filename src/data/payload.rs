//! Dashboard Payload Model
//! The JSON document a finance tracker exports for the dashboard, parsed
//! section by section so one bad section never takes down the others.

use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use tracing::warn;

/// Daily expense trend: ordered labels, a parallel value series and an
/// optional budget-limit line of the same shape.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendSection {
    pub labels: Vec<String>,
    pub series: Vec<f64>,
    pub budget_line: Option<Vec<f64>>,
}

/// Spending per category for the breakdown doughnut.
#[derive(Debug, Clone, PartialEq)]
pub struct BreakdownSection {
    pub labels: Vec<String>,
    pub series: Vec<f64>,
}

impl BreakdownSection {
    /// Number of slices rendered; follows the value series.
    pub fn slice_count(&self) -> usize {
        self.series.len()
    }

    /// Label for a slice, empty when the label sequence is shorter.
    pub fn label(&self, index: usize) -> &str {
        self.labels.get(index).map(String::as_str).unwrap_or("")
    }
}

/// Month-to-date totals shown above the charts.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SummarySection {
    #[serde(default)]
    pub income: f64,
    #[serde(default)]
    pub expense: f64,
    #[serde(default)]
    pub total_budget: f64,
    #[serde(default)]
    pub month_start: Option<String>,
    #[serde(default)]
    pub today: Option<String>,
}

impl SummarySection {
    pub fn net(&self) -> f64 {
        self.income - self.expense
    }
}

/// Reference FX rates embedded in the export (base EUR).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FxSection {
    #[serde(default = "FxSection::default_base")]
    pub base: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub rates: HashMap<String, f64>,
}

impl FxSection {
    fn default_base() -> String {
        "EUR".to_string()
    }

    /// Rate from the base currency to `code`, if the export carried one.
    pub fn rate(&self, code: &str) -> Option<f64> {
        self.rates.get(code).copied()
    }
}

/// One dashboard export. Every section is independent: a missing or
/// malformed section is `None` and the chart that reads it is skipped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardPayload {
    pub trend: Option<TrendSection>,
    pub breakdown: Option<BreakdownSection>,
    pub summary: Option<SummarySection>,
    pub fx: Option<FxSection>,
}

impl DashboardPayload {
    /// Parse an already-decoded JSON document. The document itself must be
    /// an object; each section inside it degrades to `None` on its own.
    pub fn from_value(doc: &Value) -> Self {
        let Some(map) = doc.as_object() else {
            warn!("payload document is not a JSON object; all charts skipped");
            return Self::default();
        };

        Self {
            trend: map.get("trend").and_then(parse_trend_section),
            breakdown: map.get("breakdown").and_then(parse_breakdown_section),
            summary: map.get("summary").and_then(|v| {
                deserialize_section::<SummarySection>("summary", v)
            }),
            fx: map
                .get("fx")
                .and_then(|v| deserialize_section::<FxSection>("fx", v)),
        }
    }

    /// True when no section parsed; the dashboard renders an empty state.
    pub fn is_empty(&self) -> bool {
        self.trend.is_none()
            && self.breakdown.is_none()
            && self.summary.is_none()
            && self.fx.is_none()
    }

    /// Deterministic in-memory payload so the dashboard is viewable
    /// without a file on disk.
    pub fn demo() -> Self {
        let labels: Vec<String> = (1..=30).map(|d| format!("Jun {d:02}")).collect();
        // Fixed pseudo-pattern, no RNG: varies day to day but reproducible.
        let series: Vec<f64> = (0..30u32)
            .map(|i| 24.0 + f64::from((i * 37) % 23) * 2.6 + f64::from(i % 5) * 3.1)
            .map(|v| (v * 100.0).round() / 100.0)
            .collect();
        let budget_line = Some(vec![50.0; 30]);

        let breakdown = BreakdownSection {
            labels: vec![
                "Food".to_string(),
                "Transport".to_string(),
                "Bills".to_string(),
                "Subscriptions".to_string(),
                "Entertainment".to_string(),
            ],
            series: vec![412.35, 96.20, 230.00, 42.99, 120.50],
        };

        Self {
            trend: Some(TrendSection {
                labels,
                series,
                budget_line,
            }),
            breakdown: Some(breakdown),
            summary: Some(SummarySection {
                income: 2600.00,
                expense: 1480.45,
                total_budget: 1500.00,
                month_start: Some("Jun 01".to_string()),
                today: Some("Jun 30".to_string()),
            }),
            fx: Some(FxSection {
                base: "EUR".to_string(),
                date: Some("2026-06-30".to_string()),
                rates: HashMap::from([
                    ("USD".to_string(), 1.0843),
                    ("GBP".to_string(), 0.8457),
                ]),
            }),
        }
    }
}

/// `Number(x) || 0`-style coercion: numbers pass through, numeric strings
/// parse, everything else counts as zero.
fn coerce_number(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    }
}

fn parse_number_series(value: &Value) -> Option<Vec<f64>> {
    value
        .as_array()
        .map(|items| items.iter().map(coerce_number).collect())
}

fn parse_label_series(value: &Value) -> Option<Vec<String>> {
    let items = value.as_array()?;
    let mut labels = Vec::with_capacity(items.len());
    for item in items {
        match item {
            Value::String(s) => labels.push(s.clone()),
            Value::Number(n) => labels.push(n.to_string()),
            _ => return None,
        }
    }
    Some(labels)
}

fn parse_trend_section(value: &Value) -> Option<TrendSection> {
    let map = value.as_object().or_else(|| {
        warn!("trend section malformed, skipping trend charts");
        None
    })?;

    let labels = map.get("labels").and_then(parse_label_series);
    let series = map.get("series").and_then(parse_number_series);
    let (Some(labels), Some(series)) = (labels, series) else {
        warn!("trend section missing labels or series, skipping trend charts");
        return None;
    };

    // The budget line only counts when it is a proper sequence.
    let budget_line = map.get("budget_line").and_then(parse_number_series);

    Some(TrendSection {
        labels,
        series,
        budget_line,
    })
}

fn parse_breakdown_section(value: &Value) -> Option<BreakdownSection> {
    let map = value.as_object().or_else(|| {
        warn!("breakdown section malformed, skipping breakdown chart");
        None
    })?;

    let labels = map.get("labels").and_then(parse_label_series);
    let series = map.get("series").and_then(parse_number_series);
    let (Some(labels), Some(series)) = (labels, series) else {
        warn!("breakdown section missing labels or series, skipping breakdown chart");
        return None;
    };

    Some(BreakdownSection { labels, series })
}

fn deserialize_section<T: for<'de> Deserialize<'de>>(name: &str, value: &Value) -> Option<T> {
    match serde_json::from_value::<T>(value.clone()) {
        Ok(section) => Some(section),
        Err(err) => {
            warn!("{name} section malformed, skipping: {err}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use serde_json::json;

    #[test]
    fn coercion_maps_non_numeric_entries_to_zero() {
        let raw = json!([1, "2.5", null, "x", 4.25]);
        let series = parse_number_series(&raw).expect("array parses");
        assert_eq!(series, vec![1.0, 2.5, 0.0, 0.0, 4.25]);
    }

    #[test]
    fn coercion_handles_single_values() {
        assert_relative_eq!(coerce_number(&json!(10)), 10.0);
        assert_relative_eq!(coerce_number(&json!("5.5")), 5.5);
        assert_relative_eq!(coerce_number(&json!(null)), 0.0);
        assert_relative_eq!(coerce_number(&json!({"a": 1})), 0.0);
    }

    #[test]
    fn trend_section_requires_labels_and_series() {
        let doc = json!({ "trend": { "labels": ["a", "b"] } });
        let payload = DashboardPayload::from_value(&doc);
        assert!(payload.trend.is_none());
    }

    #[test]
    fn budget_line_must_be_a_sequence() {
        let doc = json!({
            "trend": {
                "labels": ["a", "b"],
                "series": [1.0, 2.0],
                "budget_line": "not-a-list"
            }
        });
        let trend = DashboardPayload::from_value(&doc).trend.expect("trend parses");
        assert!(trend.budget_line.is_none());

        let doc = json!({
            "trend": {
                "labels": ["a", "b"],
                "series": [1.0, 2.0],
                "budget_line": [50.0, 50.0]
            }
        });
        let trend = DashboardPayload::from_value(&doc).trend.expect("trend parses");
        assert_eq!(trend.budget_line, Some(vec![50.0, 50.0]));
    }

    #[test]
    fn malformed_section_leaves_other_sections_intact() {
        let doc = json!({
            "trend": { "labels": [{"bad": true}], "series": [1.0] },
            "breakdown": { "labels": ["Food"], "series": [12.5] },
            "summary": { "income": 100.0, "expense": 40.0 }
        });
        let payload = DashboardPayload::from_value(&doc);
        assert!(payload.trend.is_none());

        let breakdown = payload.breakdown.expect("breakdown still parses");
        assert_eq!(breakdown.labels, vec!["Food"]);

        let summary = payload.summary.expect("summary still parses");
        assert_relative_eq!(summary.net(), 60.0);
    }

    #[test]
    fn non_object_document_skips_everything() {
        let payload = DashboardPayload::from_value(&json!([1, 2, 3]));
        assert!(payload.is_empty());
    }

    #[test]
    fn breakdown_label_falls_back_to_empty_past_the_sequence() {
        let section = BreakdownSection {
            labels: vec!["Food".to_string()],
            series: vec![10.0, 20.0],
        };
        assert_eq!(section.slice_count(), 2);
        assert_eq!(section.label(0), "Food");
        assert_eq!(section.label(1), "");
    }

    #[test]
    fn demo_payload_carries_every_section_with_matching_shapes() {
        let payload = DashboardPayload::demo();
        let trend = payload.trend.expect("trend");
        assert_eq!(trend.labels.len(), trend.series.len());
        assert_eq!(
            trend.budget_line.as_ref().map(Vec::len),
            Some(trend.series.len())
        );

        let breakdown = payload.breakdown.expect("breakdown");
        assert_eq!(breakdown.labels.len(), breakdown.series.len());

        assert!(payload.summary.is_some());
        let fx = payload.fx.expect("fx");
        assert!(fx.rate("USD").is_some());
        assert!(fx.rate("GBP").is_some());
    }
}
