//! Money Module
//! Display-currency selection and 2-decimal conversion for summary amounts.
//! Amounts in a payload are stored in EUR; conversion uses the rates the
//! export carried, never a live fetch.

use crate::data::FxSection;

/// Currencies the dashboard can display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Currency {
    Eur,
    Usd,
    Gbp,
}

impl Default for Currency {
    fn default() -> Self {
        Currency::Eur
    }
}

impl Currency {
    pub const ALL: [Currency; 3] = [Currency::Eur, Currency::Usd, Currency::Gbp];

    pub fn code(self) -> &'static str {
        match self {
            Currency::Eur => "EUR",
            Currency::Usd => "USD",
            Currency::Gbp => "GBP",
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Currency::Eur => "€",
            Currency::Usd => "$",
            Currency::Gbp => "£",
        }
    }
}

/// Convert an EUR amount with a currency-friendly 2dp result.
pub fn convert(amount: f64, rate: f64) -> f64 {
    (amount * rate * 100.0).round() / 100.0
}

/// How summary amounts should be displayed this frame.
#[derive(Debug, Clone, Copy)]
pub struct DisplayCurrency {
    pub currency: Currency,
    rate: Option<f64>,
}

impl DisplayCurrency {
    /// Resolve the selected currency against the payload's FX section.
    /// A missing rate falls back to EUR display.
    pub fn resolve(selected: Currency, fx: Option<&FxSection>) -> Self {
        let rate = match selected {
            Currency::Eur => Some(1.0),
            other => fx.and_then(|fx| fx.rate(other.code())),
        };
        Self {
            currency: if rate.is_some() { selected } else { Currency::Eur },
            rate,
        }
    }

    /// True when the selected currency had no rate and EUR is shown instead.
    pub fn fell_back(&self) -> bool {
        self.rate.is_none()
    }

    pub fn amount(&self, eur_amount: f64) -> f64 {
        match self.rate {
            Some(rate) => convert(eur_amount, rate),
            None => eur_amount,
        }
    }

    pub fn format(&self, eur_amount: f64) -> String {
        format!("{}{:.2}", self.currency.symbol(), self.amount(eur_amount))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::collections::HashMap;

    fn fx(rates: &[(&str, f64)]) -> FxSection {
        FxSection {
            base: "EUR".to_string(),
            date: None,
            rates: rates
                .iter()
                .map(|(code, rate)| (code.to_string(), *rate))
                .collect::<HashMap<_, _>>(),
        }
    }

    #[test]
    fn conversion_rounds_to_two_decimals() {
        assert_relative_eq!(convert(100.0, 1.0843), 108.43);
        assert_relative_eq!(convert(19.995, 1.0), 20.0);
    }

    #[test]
    fn missing_rate_falls_back_to_eur() {
        let fx = fx(&[("USD", 1.08)]);
        let display = DisplayCurrency::resolve(Currency::Gbp, Some(&fx));
        assert_eq!(display.currency, Currency::Eur);
        assert!(display.fell_back());
        assert_relative_eq!(display.amount(12.34), 12.34);
    }

    #[test]
    fn selected_rate_applies_on_display() {
        let fx = fx(&[("USD", 1.5)]);
        let display = DisplayCurrency::resolve(Currency::Usd, Some(&fx));
        assert_eq!(display.currency, Currency::Usd);
        assert!(!display.fell_back());
        assert_eq!(display.format(10.0), "$15.00");
    }

    #[test]
    fn eur_never_needs_an_fx_section() {
        let display = DisplayCurrency::resolve(Currency::Eur, None);
        assert!(!display.fell_back());
        assert_eq!(display.format(7.5), "€7.50");
    }
}
