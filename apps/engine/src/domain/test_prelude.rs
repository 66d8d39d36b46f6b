use proptest::prelude::*;

/// Shared proptest config; honours `PROPTEST_CASES` / `PROPTEST_MAX_SHRINK_MS`.
pub fn proptest_config() -> ProptestConfig {
    let mut cfg = ProptestConfig {
        cases: engine_test_support::proptest_env::cases(),
        ..ProptestConfig::default()
    };
    if let Some(ms) = engine_test_support::proptest_env::max_shrink_ms() {
        cfg.max_shrink_time = ms;
    }
    cfg
}
