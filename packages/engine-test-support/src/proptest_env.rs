//! Env knobs shared by every property test in the workspace.
//!
//! - `PROPTEST_CASES`: number of cases per property (default 32).
//! - `PROPTEST_MAX_SHRINK_MS`: optional cap for shrinking time.
//!
//! Generate valid inputs by construction instead of filtering with
//! `prop_assume!`.

/// Number of cases to run per property.
pub fn cases() -> u32 {
    std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|s| s.parse::<u32>().ok())
        .unwrap_or(32)
        .max(1)
}

/// Optional shrink-time cap in milliseconds.
pub fn max_shrink_ms() -> Option<u32> {
    std::env::var("PROPTEST_MAX_SHRINK_MS")
        .ok()
        .and_then(|s| s.parse::<u32>().ok())
}
