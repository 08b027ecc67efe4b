//! Profitability scoring for a single product.
//!
//! The calculator is a pure function of the Amazon sale price, the wholesale
//! buy price, and a [`ProfitConfig`] carrying the per-unit costs. It never
//! touches the network or the clock, so the same inputs always produce the
//! same [`Profitability`].

use serde::Serialize;

/// Per-unit cost settings applied to every scored product.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfitConfig {
    /// Fixed cost of sourcing one unit on top of the wholesale price
    /// (shipping from the wholesaler, prep, labelling).
    pub sourcing_cost: f64,
    /// Flat fulfillment fee charged per unit sold.
    pub fulfillment_fee: f64,
    /// Minimum return on investment, in percent, for a "Good Buy".
    pub min_roi_percent: f64,
}

impl Default for ProfitConfig {
    fn default() -> Self {
        Self {
            sourcing_cost: 3.50,
            fulfillment_fee: 3.55,
            min_roi_percent: 50.0,
        }
    }
}

/// Buy recommendation derived from net profit and ROI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Recommendation {
    #[serde(rename = "Low Profit")]
    LowProfit,
    #[serde(rename = "Slow Sales")]
    SlowSales,
    #[serde(rename = "Good Buy")]
    GoodBuy,
}

impl Recommendation {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Recommendation::LowProfit => "Low Profit",
            Recommendation::SlowSales => "Slow Sales",
            Recommendation::GoodBuy => "Good Buy",
        }
    }
}

impl std::fmt::Display for Recommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Scored economics of buying wholesale and reselling on Amazon.
///
/// Money fields are rounded to 2 decimals, percentages to 1 decimal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Profitability {
    pub total_cost: f64,
    pub fees: f64,
    pub net_profit: f64,
    /// Net profit as a percentage of the Amazon price.
    pub margin: f64,
    /// Net profit as a percentage of the total buy cost.
    pub roi: f64,
    pub recommendation: Recommendation,
}

/// Scores a product from its Amazon price and wholesale price.
///
/// Returns `None` when either price is missing or zero; a zero price means
/// the page did not expose a usable value, not that the product is free.
///
/// The recommendation is decided on unrounded values, in order:
/// negative net profit is always "Low Profit", then an ROI below
/// `config.min_roi_percent` is "Slow Sales", anything else is "Good Buy".
#[must_use]
pub fn calculate_profitability(
    amazon_price: Option<f64>,
    source_price: Option<f64>,
    config: &ProfitConfig,
) -> Option<Profitability> {
    let amazon_price = amazon_price.filter(|p| p.abs() > 0.0)?;
    let source_price = source_price.filter(|p| p.abs() > 0.0)?;

    let total_cost = source_price + config.sourcing_cost;
    let fees = config.fulfillment_fee;
    let net_profit = amazon_price - (total_cost + fees);
    let margin = if amazon_price > 0.0 {
        net_profit / amazon_price * 100.0
    } else {
        0.0
    };
    let roi = if total_cost > 0.0 {
        net_profit / total_cost * 100.0
    } else {
        0.0
    };

    let recommendation = if net_profit < 0.0 {
        Recommendation::LowProfit
    } else if roi < config.min_roi_percent {
        Recommendation::SlowSales
    } else {
        Recommendation::GoodBuy
    };

    Some(Profitability {
        total_cost: round_to(total_cost, 2),
        fees: round_to(fees, 2),
        net_profit: round_to(net_profit, 2),
        margin: round_to(margin, 1),
        roi: round_to(roi, 1),
        recommendation,
    })
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

#[cfg(test)]
#[path = "profit_test.rs"]
mod tests;
