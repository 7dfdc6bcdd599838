use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use crate::constants::UNNAMED_SECURITY_PREFIX;

/// A single position as reported by the aggregator.
///
/// Field names follow the aggregator's snake_case wire format; fields the
/// pipeline does not use are ignored during deserialization.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RawHolding {
    pub security_id: String,
    /// Current market value of the position.
    pub institution_value: Decimal,
    /// Unit price reported by the institution, used when no close price is known.
    #[serde(default)]
    pub institution_price: Option<Decimal>,
    /// Total cost paid for the position. Unknown cost counts as zero.
    #[serde(default)]
    pub cost_basis: Option<Decimal>,
    pub quantity: Decimal,
    #[serde(default)]
    pub account_id: Option<String>,
    #[serde(default)]
    pub iso_currency_code: Option<String>,
}

/// Reference and pricing data for one security.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RawSecurity {
    pub security_id: String,
    #[serde(default)]
    pub ticker_symbol: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub sector: Option<String>,
    /// Most recent market price; preferred over the institution price.
    #[serde(default)]
    pub close_price: Option<Decimal>,
    #[serde(default, rename = "type")]
    pub security_type: Option<String>,
    #[serde(default)]
    pub iso_currency_code: Option<String>,
}

/// Holding view model sent to the client and embedded in share links.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedHolding {
    pub ticker: Option<String>,
    pub name: String,
    pub security_id: String,
    pub sector: Option<String>,
    pub price: Option<Decimal>,
    /// Share of total portfolio value, 0-100.
    pub percentage: Decimal,
    /// Share of total unrealized profit/loss.
    #[serde(rename = "percentagePL", default, deserialize_with = "null_as_zero")]
    pub percentage_pl: Decimal,
}

// Payloads written by older clients carry `percentagePL: null`.
fn null_as_zero<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Decimal>::deserialize(deserializer)?.unwrap_or_default())
}

/// Display name used when the security record has none.
pub fn fallback_security_name(security_id: &str) -> String {
    format!("{}{}", UNNAMED_SECURITY_PREFIX, security_id)
}

/// Normalized holdings plus the portfolio-level profit/loss.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioResult {
    pub holdings: Vec<NormalizedHolding>,
    #[serde(rename = "totalPL")]
    pub total_pl: Decimal,
}
