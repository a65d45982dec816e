use std::sync::Once;

static INIT: Once = Once::new();

/// Routes `log` output (including the "Inventory" audit target) to the test
/// harness. Safe to call from every test.
pub fn init_logging() {
    INIT.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}
