//! Browser tests, run with `wasm-pack test --headless --chrome`
#![cfg(target_arch = "wasm32")]

use page_mind::format_summary_html;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn bullet_summary_is_wrapped_in_list() {
    assert_eq!(
        format_summary_html("- a\n- b"),
        "<ul><li>a</li><li>b</li></ul>"
    );
}

#[wasm_bindgen_test]
fn prose_summary_has_no_list() {
    let html = format_summary_html("The page explains things.\nIt is short.");
    assert!(!html.contains("<ul>"));
    assert_eq!(html, "<p>The page explains things.</p><p>It is short.</p>");
}
