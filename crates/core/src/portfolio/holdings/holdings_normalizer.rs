//! Joins aggregator holdings with their security records and derives
//! portfolio weights and profit/loss shares.

use std::collections::HashMap;

use log::{debug, warn};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use super::holdings_model::{
    fallback_security_name, NormalizedHolding, PortfolioResult, RawHolding, RawSecurity,
};
use crate::constants::DISPLAY_DECIMAL_PRECISION;

/// Normalizes raw aggregator holdings into the client view.
///
/// Every input holding yields exactly one output, in input order. Securities
/// without a matching holding are ignored. When the security set repeats a
/// `security_id`, the last record wins.
///
/// Percentages are rounded half away from zero to two decimals. A zero total
/// value yields `percentage = 0` and a zero total P&L yields
/// `percentage_pl = 0` for every holding.
pub fn normalize_holdings(holdings: &[RawHolding], securities: &[RawSecurity]) -> PortfolioResult {
    let security_map = index_securities(securities);

    let total_value = checked_total(holdings.iter().map(|h| h.institution_value), "value");

    let priced: Vec<(&RawHolding, Option<&RawSecurity>, Decimal)> = holdings
        .iter()
        .map(|holding| {
            let security = security_map.get(holding.security_id.as_str()).copied();
            let pl = holding_pl(holding, security);
            (holding, security, pl)
        })
        .collect();

    let total_pl = checked_total(priced.iter().map(|(_, _, pl)| *pl), "P&L");

    if total_value.is_zero() && !holdings.is_empty() {
        debug!(
            "Total portfolio value is zero across {} holdings. Percentages set to 0.",
            holdings.len()
        );
    }

    let normalized = priced
        .into_iter()
        .map(|(holding, security, pl)| NormalizedHolding {
            ticker: security.and_then(|s| s.ticker_symbol.clone()),
            name: security
                .and_then(|s| s.name.clone())
                .unwrap_or_else(|| fallback_security_name(&holding.security_id)),
            security_id: holding.security_id.clone(),
            sector: security.and_then(|s| s.sector.clone()),
            price: resolve_price(holding, security),
            percentage: share_of(holding.institution_value, total_value),
            percentage_pl: share_of(pl, total_pl),
        })
        .collect();

    PortfolioResult {
        holdings: normalized,
        total_pl,
    }
}

/// Builds the `security_id -> security` lookup in a single forward pass.
fn index_securities(securities: &[RawSecurity]) -> HashMap<&str, &RawSecurity> {
    securities
        .iter()
        .map(|security| (security.security_id.as_str(), security))
        .collect()
}

/// Close price of the matched security, else the institution price.
pub fn resolve_price(holding: &RawHolding, security: Option<&RawSecurity>) -> Option<Decimal> {
    security
        .and_then(|s| s.close_price)
        .or(holding.institution_price)
}

/// Unrealized profit/loss of one holding: `(price - cost_basis) * quantity`.
///
/// A holding with no price at all, or whose P&L does not fit in a `Decimal`,
/// contributes zero.
pub fn holding_pl(holding: &RawHolding, security: Option<&RawSecurity>) -> Decimal {
    let Some(price) = resolve_price(holding, security) else {
        warn!(
            "No close or institution price for security {}; treating its P&L as 0",
            holding.security_id
        );
        return Decimal::ZERO;
    };
    let cost_basis = holding.cost_basis.unwrap_or(Decimal::ZERO);
    match price
        .checked_sub(cost_basis)
        .and_then(|gain| gain.checked_mul(holding.quantity))
    {
        Some(pl) => pl,
        None => {
            warn!(
                "P&L of security {} overflowed; treating its P&L as 0",
                holding.security_id
            );
            Decimal::ZERO
        }
    }
}

/// Sums `values`, or returns zero if the sum overflows. A zero total makes
/// every share of it zero.
fn checked_total(values: impl IntoIterator<Item = Decimal>, what: &str) -> Decimal {
    values
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, v| acc.checked_add(v))
        .unwrap_or_else(|| {
            warn!("Total portfolio {} overflowed; reporting shares of it as 0", what);
            Decimal::ZERO
        })
}

/// `part / total * 100` rounded for display, or zero when the total is zero.
fn share_of(part: Decimal, total: Decimal) -> Decimal {
    if total.is_zero() {
        return Decimal::ZERO;
    }
    match part.checked_div(total).and_then(|ratio| ratio.checked_mul(dec!(100))) {
        Some(pct) => round_display(pct),
        None => {
            warn!("Percentage of {} over {} overflowed; reporting 0", part, total);
            Decimal::ZERO
        }
    }
}

/// Rounds half away from zero to the display precision.
pub fn round_display(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(
        DISPLAY_DECIMAL_PRECISION,
        RoundingStrategy::MidpointAwayFromZero,
    )
}
