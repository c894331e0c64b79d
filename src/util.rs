// Small shared helpers for the components.

use wasm_bindgen::JsValue;

pub fn clog(msg: &str) {
    web_sys::console::log_1(&JsValue::from_str(msg));
}

/// Badge color per gold cost tier.
pub fn cost_color(cost: u8) -> &'static str {
    match cost {
        1 => "#52525b",
        2 => "#15803d",
        3 => "#1d4ed8",
        4 => "#6d28d9",
        5 => "#b91c1c",
        _ => "#6366f1",
    }
}

/// Star label per gold cost tier, e.g. `"3★"`.
pub fn cost_label(cost: u8) -> String {
    format!("{cost}★")
}
