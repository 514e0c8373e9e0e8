use near_workspaces::types::NearToken;

use crate::error::{Error, Result};

pub const NEAR_DECIMALS: u32 = 24;
pub const ONE_YOCTO: NearToken = NearToken::from_yoctonear(1);

/// Parses a human-readable NEAR amount, e.g. `"1.5"` or `"0.000001"`
pub fn near_from_decimal(value: &str) -> Result<NearToken> {
    let invalid = |reason| Error::InvalidAmount {
        value: value.to_string(),
        reason,
    };
    let trimmed = value.trim();
    let (int_part, frac_part) = trimmed.split_once('.').unwrap_or((trimmed, ""));
    if int_part.is_empty() && frac_part.is_empty() {
        return Err(invalid("empty"));
    }
    if frac_part.len() > NEAR_DECIMALS as usize {
        return Err(invalid("more than 24 fractional digits"));
    }
    if !int_part
        .chars()
        .chain(frac_part.chars())
        .all(|c| c.is_ascii_digit())
    {
        return Err(invalid("not a decimal number"));
    }

    let int = if int_part.is_empty() {
        0
    } else {
        int_part.parse::<u128>().map_err(|_| invalid("overflow"))?
    };
    let frac = if frac_part.is_empty() {
        0
    } else {
        let scale = 10u128.pow(NEAR_DECIMALS - frac_part.len() as u32);
        frac_part.parse::<u128>().map_err(|_| invalid("overflow"))? * scale
    };

    int.checked_mul(10u128.pow(NEAR_DECIMALS))
        .and_then(|v| v.checked_add(frac))
        .map(NearToken::from_yoctonear)
        .ok_or_else(|| invalid("overflow"))
}

/// Interprets a floating point number as a yocto amount
///
/// The number is printed with its shortest round-trip digits, without exponent
/// or grouping, so `1e24` becomes exactly one NEAR.
pub fn parse_near(value: f64) -> Result<NearToken> {
    let invalid = |reason| Error::InvalidAmount {
        value: value.to_string(),
        reason,
    };
    if !value.is_finite() {
        return Err(invalid("not finite"));
    }
    if value < 0.0 {
        return Err(invalid("negative"));
    }
    let digits = value.to_string();
    if digits.contains('.') {
        return Err(invalid("fractional yocto"));
    }
    digits
        .parse::<u128>()
        .map(NearToken::from_yoctonear)
        .map_err(|_| invalid("overflow"))
}
