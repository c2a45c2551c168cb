use serde_json::{json, Value};

use crate::config::{IssuerTable, RateTable};
use crate::models::{PathHop, PathOption};
use crate::utils::{drops_to_xrp, parse_amount, parse_drops};
use crate::xrpl::error::RequestError;

pub const NATIVE_CURRENCY: &str = "XRP";

/// Base fee of a single payment, in XRP
pub const BASE_NETWORK_FEE: f64 = 0.000012;

const MIN_QUALITY: f64 = 0.9;
const QUALITY_STEP_PER_HOP: f64 = 0.01;

/// Pricing of one synthesized route relative to the quoted base rate
struct RouteProfile {
    id: &'static str,
    spread: f64,
    rate_factor: f64,
    network_fee: f64,
    quality: f64,
}

// Best quality first; callers auto-select index 0.
const BEST_RATE: RouteProfile = RouteProfile {
    id: "demo_path_best",
    spread: 1.001,
    rate_factor: 0.999,
    network_fee: 0.000012,
    quality: 0.998,
};

const FAST: RouteProfile = RouteProfile {
    id: "demo_path_fast",
    spread: 1.005,
    rate_factor: 0.995,
    network_fee: 0.000015,
    quality: 0.995,
};

const STABLE: RouteProfile = RouteProfile {
    id: "demo_path_stable",
    spread: 1.01,
    rate_factor: 0.99,
    network_fee: 0.000018,
    quality: 0.992,
};

/// Build the fixed three-route list for delivering `amount` of `currency`.
///
/// Routes are direct, one hop through the currency's gateway, and two hops
/// through the USD and BTC gateways. `destination_amount` is echoed verbatim.
pub fn synthesize_paths(
    destination_amount: &str,
    amount: f64,
    currency: &str,
    rates: &RateTable,
    issuers: &IssuerTable,
) -> Vec<PathOption> {
    let base_rate = rates.rate_for(currency);

    let gateway_currency = if issuers.knows(currency) {
        currency
    } else {
        issuers.fallback_currency.as_str()
    };
    let gateway_hop = PathHop::new(gateway_currency, issuers.issuer_for(gateway_currency));

    let routes = [
        (BEST_RATE, vec![]),
        (FAST, vec![gateway_hop]),
        (
            STABLE,
            vec![
                PathHop::new("USD", issuers.issuer_for("USD")),
                PathHop::new("BTC", issuers.issuer_for("BTC")),
            ],
        ),
    ];

    routes
        .into_iter()
        .map(|(profile, paths)| PathOption {
            id: profile.id.to_string(),
            hop_count: paths.len() as u32 + 1,
            paths,
            source_amount: format!("{:.6}", (amount / base_rate) * profile.spread),
            destination_amount: destination_amount.to_string(),
            rate: base_rate * profile.rate_factor,
            network_fee: profile.network_fee,
            quality: profile.quality,
        })
        .collect()
}

/// Quality score for a route of `hop_count` legs: 1.0 for direct, minus 0.01
/// per extra leg, never below 0.9
pub fn path_quality(hop_count: u32) -> f64 {
    let penalty = hop_count.saturating_sub(1) as f64 * QUALITY_STEP_PER_HOP;
    (1.0 - penalty).clamp(MIN_QUALITY, 1.0)
}

/// `destination_amount` parameter for `ripple_path_find`.
///
/// Native amounts are sent in drops and must not exceed the XRP supply.
pub fn destination_amount_param(value: &str, currency: &str, issuers: &IssuerTable) -> Result<Value, RequestError> {
    if currency == NATIVE_CURRENCY {
        return Ok(Value::String(parse_drops(value)?.to_string()));
    }

    Ok(json!({
        "currency": currency,
        "issuer": issuers.issuer_for(currency),
        "value": parse_amount(value)?.to_string(),
    }))
}

/// Normalize the alternatives of a `ripple_path_find` result, best first.
///
/// Returns `None` when the result has no usable alternatives.
pub fn paths_from_ledger(result: &Value, destination_amount: &str) -> Option<Vec<PathOption>> {
    let alternatives = result.get("alternatives")?.as_array()?;
    let destination: f64 = destination_amount.parse().ok()?;

    let mut options: Vec<PathOption> = alternatives
        .iter()
        .enumerate()
        .filter_map(|(index, alternative)| {
            let source = source_amount(alternative.get("source_amount")?)?;
            let paths = first_computed_path(alternative);
            let hop_count = paths.len() as u32 + 1;

            Some(PathOption {
                id: format!("live_path_{}", index),
                paths,
                source_amount: format!("{:.6}", source),
                destination_amount: destination_amount.to_string(),
                rate: if source > 0.0 { destination / source } else { 0.0 },
                network_fee: BASE_NETWORK_FEE,
                hop_count,
                quality: path_quality(hop_count),
            })
        })
        .collect();

    if options.is_empty() {
        return None;
    }

    // Stable sort keeps ledger order among equal-quality routes
    options.sort_by(|a, b| b.quality.total_cmp(&a.quality));
    Some(options)
}

// Drops string for the native asset, `{currency, issuer, value}` otherwise
fn source_amount(amount: &Value) -> Option<f64> {
    match amount {
        Value::String(drops) => drops.parse::<u64>().ok().map(drops_to_xrp),
        Value::Object(issued) => issued.get("value")?.as_str()?.parse().ok(),
        _ => None,
    }
}

fn first_computed_path(alternative: &Value) -> Vec<PathHop> {
    alternative
        .get("paths_computed")
        .and_then(Value::as_array)
        .and_then(|paths| paths.first())
        .and_then(Value::as_array)
        .map(|steps| {
            // Account-only steps ripple through the currency of the previous step
            let mut currency = NATIVE_CURRENCY;
            steps
                .iter()
                .map(|step| {
                    if let Some(c) = step.get("currency").and_then(Value::as_str) {
                        currency = c;
                    }
                    let issuer = step
                        .get("issuer")
                        .or_else(|| step.get("account"))
                        .and_then(Value::as_str)
                        .unwrap_or_default();
                    PathHop::new(currency, issuer)
                })
                .collect()
        })
        .unwrap_or_default()
}
