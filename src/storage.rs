//! Browser persistence glue: the shareable URL and the local-storage
//! autosave. Everything here is best-effort; a missing window, disabled
//! storage, or a full quota degrades to the in-memory state staying
//! authoritative for the session.

use crate::codec::{self, QueryParts};
use crate::model::BoardState;
use crate::util::clog;
use wasm_bindgen::JsValue;
use web_sys::UrlSearchParams;

/// Fixed local-storage key for the autosaved lineup.
pub const AUTOSAVE_KEY: &str = "lineup_builder_autosave";

/// Reads the current query string into its known keys. Values arrive
/// percent-decoded from `URLSearchParams`.
pub fn read_query() -> QueryParts {
    let Some(window) = web_sys::window() else {
        return QueryParts::default();
    };
    let Ok(search) = window.location().search() else {
        return QueryParts::default();
    };
    let Ok(params) = UrlSearchParams::new_with_str(search.trim_start_matches('?')) else {
        return QueryParts::default();
    };
    QueryParts {
        comp: params.get("comp"),
        blessed: params.get("blessed"),
        gl1: params.get("gl1"),
        gl5: params.get("gl5"),
    }
}

/// Rewrites the URL in place (replace, not push, so the history stack does
/// not fill up with every placement).
pub fn write_query(state: &BoardState) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let location = window.location();
    let Ok(pathname) = location.pathname() else {
        return;
    };
    let parts = codec::encode_query(state);
    let url = if parts.is_empty() {
        pathname
    } else {
        let Ok(params) = UrlSearchParams::new() else {
            return;
        };
        if let Some(comp) = &parts.comp {
            params.set("comp", comp);
        }
        if let Some(blessed) = &parts.blessed {
            params.set("blessed", blessed);
        }
        if let Some(gl1) = &parts.gl1 {
            params.set("gl1", gl1);
        }
        if let Some(gl5) = &parts.gl5 {
            params.set("gl5", gl5);
        }
        format!("{}?{}", pathname, String::from(params.to_string()))
    };
    if let Ok(history) = window.history() {
        let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(&url));
    }
}

pub fn read_snapshot() -> Option<String> {
    let storage = web_sys::window()?.local_storage().ok()??;
    storage.get_item(AUTOSAVE_KEY).ok()?
}

/// Writes the autosave snapshot, swallowing quota and availability errors.
pub fn write_snapshot(state: &BoardState) {
    let Some(json) = codec::snapshot_json(state) else {
        return;
    };
    if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            if storage.set_item(AUTOSAVE_KEY, &json).is_err() {
                clog("lineup autosave failed; storage unavailable or full");
            }
        }
    }
}

/// Discards the autosave, e.g. after a corrupt snapshot was found.
pub fn clear_snapshot() {
    if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            let _ = storage.remove_item(AUTOSAVE_KEY);
        }
    }
}

/// The absolute shareable link for the current board, for the share panel.
pub fn share_url() -> Option<String> {
    let window = web_sys::window()?;
    window.location().href().ok()
}
