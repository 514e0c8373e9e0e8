//! Approximate comparisons of balances
//!
//! Balances in the sandbox drift by gas charges and rounding across operations,
//! so exact equality is often too strict for assertions.
use near_workspaces::types::NearToken;

/// `0.000001` NEAR
pub const DEFAULT_TOLERANCE: NearToken = NearToken::from_yoctonear(1_000_000_000_000_000_000);

fn abs_diff(a: NearToken, b: NearToken) -> u128 {
    a.as_yoctonear().abs_diff(b.as_yoctonear())
}

/// True if `a` and `b` differ by strictly less than [`DEFAULT_TOLERANCE`]
pub fn numbers_equal(a: NearToken, b: NearToken) -> bool {
    numbers_equal_within(a, b, DEFAULT_TOLERANCE)
}

/// True if `a` and `b` differ by strictly less than `tolerance`
pub fn numbers_equal_within(a: NearToken, b: NearToken, tolerance: NearToken) -> bool {
    abs_diff(a, b) < tolerance.as_yoctonear()
}

/// True if `a` and `b` differ by at most one yocto, the precision lost by rounding
pub fn no_more_than_one_yocto_diff(a: NearToken, b: NearToken) -> bool {
    abs_diff(a, b) <= 1
}

#[track_caller]
pub fn assert_numbers_equal(a: NearToken, b: NearToken) {
    assert_numbers_equal_within(a, b, DEFAULT_TOLERANCE);
}

#[track_caller]
pub fn assert_numbers_equal_within(a: NearToken, b: NearToken, tolerance: NearToken) {
    assert!(
        numbers_equal_within(a, b, tolerance),
        "Amounts differ by {} yocto, tolerance is {}: {} vs {}",
        abs_diff(a, b),
        tolerance.as_yoctonear(),
        a.as_yoctonear(),
        b.as_yoctonear()
    );
}

#[track_caller]
pub fn assert_no_more_than_one_yocto_diff(a: NearToken, b: NearToken) {
    assert!(
        no_more_than_one_yocto_diff(a, b),
        "Amounts differ by more than 1 yocto: {} vs {}",
        a.as_yoctonear(),
        b.as_yoctonear()
    );
}
