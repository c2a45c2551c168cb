use crate::xrpl::RequestError;

pub const DROPS_PER_XRP: u64 = 1_000_000;

/// Total XRP ever issued; no native amount can exceed it
pub const MAX_XRP: f64 = 100_000_000_000.0;

/// Convert drops to XRP
pub fn drops_to_xrp(drops: u64) -> f64 {
    drops as f64 / DROPS_PER_XRP as f64
}

/// Convert XRP to drops, `None` for amounts outside `0..=MAX_XRP`
pub fn xrp_to_drops(xrp: f64) -> Option<u64> {
    if !xrp.is_finite() || !(0.0..=MAX_XRP).contains(&xrp) {
        return None;
    }
    Some((xrp * DROPS_PER_XRP as f64).round() as u64)
}

/// Parse a caller-supplied decimal amount, rejecting negatives and non-finite values
pub fn parse_amount(value: &str) -> Result<f64, RequestError> {
    match value.trim().parse::<f64>() {
        Ok(amount) if amount.is_finite() && amount >= 0.0 => Ok(amount),
        _ => Err(RequestError::InvalidAmount { value: value.to_string() }),
    }
}

/// Parse a native amount given in XRP into drops
pub fn parse_drops(value: &str) -> Result<u64, RequestError> {
    let xrp = parse_amount(value)?;
    xrp_to_drops(xrp).ok_or_else(|| RequestError::InvalidAmount { value: value.to_string() })
}
