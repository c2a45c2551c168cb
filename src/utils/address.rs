use log::debug;
use regex::Regex;
use std::sync::OnceLock;

/// Classic account addresses: `r` followed by base58 (ripple alphabet, no 0/O/I/l)
const ADDRESS_PATTERN: &str = r"^r[1-9A-HJ-NP-Za-km-z]{24,33}$";
const MIN_ADDRESS_LEN: usize = 25;
const MAX_ADDRESS_LEN: usize = 34;

fn address_regex() -> &'static Regex {
    static ADDRESS_RE: OnceLock<Regex> = OnceLock::new();
    ADDRESS_RE.get_or_init(|| Regex::new(ADDRESS_PATTERN).expect("Failed to compile address pattern"))
}

/// Check whether `address` is a syntactically valid classic ledger address.
///
/// The input is checked as given; surrounding whitespace makes it invalid.
/// The length bound, the pattern and the ambiguous-glyph check are evaluated
/// independently and must all hold.
pub fn is_valid_address(address: &str) -> bool {
    if address.is_empty() {
        debug!("Address validation failed: empty");
        return false;
    }

    if !address.starts_with('r') {
        debug!("Address validation failed: does not start with 'r'");
        return false;
    }

    if address.len() < MIN_ADDRESS_LEN || address.len() > MAX_ADDRESS_LEN {
        debug!("Address validation failed: invalid length {}", address.len());
        return false;
    }

    if !address_regex().is_match(address) {
        debug!("Address validation failed: pattern mismatch");
        return false;
    }

    if address.contains(&['0', 'O', 'I', 'l'][..]) {
        debug!("Address validation failed: ambiguous base58 character");
        return false;
    }

    true
}
