// Browser smoke test: `wasm-pack test --headless --chrome`.
#![cfg(target_arch = "wasm32")]

use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn exports_report_idle_state_before_start() {
    assert_eq!(balloon_pump::burst_count(), 0);
    assert!(!balloon_pump::is_complete());
}
