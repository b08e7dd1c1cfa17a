//! WebAssembly bindings for NavBlock
//!
//! The extension background script calls `init` once with the stored
//! settings, `update_config` whenever storage changes, and `decide_navigation`
//! for every committed navigation and history update.

use std::sync::OnceLock;
use wasm_bindgen::prelude::*;
use nb_core::{
    notice_url,
    normalize_host,
    Configuration,
    Engine,
    NavigationTarget,
    Notice,
    PolicyStore,
    TimeOfDay,
    Verdict,
};

struct EngineState {
    engine: Engine,
    store: PolicyStore,
}

static ENGINE_STATE: OnceLock<EngineState> = OnceLock::new();

fn parse_config(config_json: &str) -> Result<Configuration, JsValue> {
    let config = Configuration::from_json(config_json)
        .map_err(|e| JsValue::from_str(&format!("Failed to load configuration: {}", e)))?;
    for diagnostic in config.diagnostics() {
        web_sys::console::warn_1(&JsValue::from_str(&diagnostic.to_string()));
    }
    Ok(config)
}

#[wasm_bindgen]
pub fn init(config_json: &str, notice_page: &str) -> Result<(), JsValue> {
    if ENGINE_STATE.get().is_some() {
        return Err(JsValue::from_str("Already initialized. Use update_config to change settings."));
    }

    let config = parse_config(config_json)?;
    let state = EngineState {
        engine: Engine::new(notice_page),
        store: PolicyStore::new(&config),
    };

    ENGINE_STATE.set(state)
        .map_err(|_| JsValue::from_str("Failed to set engine state"))?;

    Ok(())
}

#[wasm_bindgen]
pub fn is_initialized() -> bool {
    ENGINE_STATE.get().is_some()
}

#[wasm_bindgen]
pub fn update_config(config_json: &str) -> Result<(), JsValue> {
    let state = ENGINE_STATE.get()
        .ok_or_else(|| JsValue::from_str("Not initialized"))?;
    let config = parse_config(config_json)?;
    state.store.replace(&config);
    Ok(())
}

#[wasm_bindgen]
pub fn get_policy_info() -> JsValue {
    let result = js_sys::Object::new();
    if let Some(state) = ENGINE_STATE.get() {
        let policy = state.store.load();
        let _ = js_sys::Reflect::set(&result, &"initialized".into(), &JsValue::from(true));
        let _ = js_sys::Reflect::set(&result, &"sites".into(), &JsValue::from(policy.hosts().len() as u32));
        let _ = js_sys::Reflect::set(&result, &"searches".into(), &JsValue::from(policy.terms().len() as u32));
        let _ = js_sys::Reflect::set(&result, &"window".into(), &JsValue::from_str(&policy.window().to_string()));
    } else {
        let _ = js_sys::Reflect::set(&result, &"initialized".into(), &JsValue::from(false));
    }
    result.into()
}

/// Decide a navigation.
///
/// `now_minutes` is minutes since local midnight; when omitted the current
/// local time is used, as it is for values past 23:59. Sub-frame navigations
/// are always allowed.
#[wasm_bindgen]
pub fn decide_navigation(url: &str, frame_id: i32, now_minutes: Option<u32>) -> JsValue {
    let verdict = ENGINE_STATE.get().map_or(Verdict::Allow, |state| {
        verdict_for(state, url, frame_id, || resolve_now(now_minutes, local_time_of_day))
    });

    let js_result = js_sys::Object::new();
    let _ = js_sys::Reflect::set(&js_result, &"decision".into(), &JsValue::from(verdict as u8));
    let _ = js_sys::Reflect::set(&js_result, &"blocked".into(), &JsValue::from(verdict.is_blocked()));

    if let Some(reason) = verdict.reason() {
        let _ = js_sys::Reflect::set(&js_result, &"reason".into(), &JsValue::from_str(reason));
    }

    if let Some(state) = ENGINE_STATE.get() {
        if let Some(redirect_url) = notice_url(state.engine.notice_page(), verdict, url) {
            let _ = js_sys::Reflect::set(&js_result, &"redirectUrl".into(), &JsValue::from_str(&redirect_url));
        }
    }

    js_result.into()
}

#[wasm_bindgen]
pub fn should_block(url: &str) -> bool {
    match ENGINE_STATE.get() {
        Some(state) => {
            let policy = state.store.load();
            let target = NavigationTarget::now(url);
            state.engine.decide(&policy, &target, local_time_of_day()).is_blocked()
        }
        None => false,
    }
}

/// Message and target for the notice page, read from its own address.
#[wasm_bindgen]
pub fn read_notice(notice_url: &str) -> JsValue {
    let notice = Notice::parse(notice_url);
    let js_result = js_sys::Object::new();
    let _ = js_sys::Reflect::set(&js_result, &"message".into(), &JsValue::from_str(notice.message()));
    if let Some(target) = notice.target {
        let _ = js_sys::Reflect::set(&js_result, &"target".into(), &JsValue::from_str(&target));
    }
    js_result.into()
}

#[wasm_bindgen]
pub fn normalize_host_js(entry: &str) -> String {
    normalize_host(entry)
}

fn verdict_for(state: &EngineState, url: &str, frame_id: i32, now: impl FnOnce() -> TimeOfDay) -> Verdict {
    if frame_id != 0 {
        return Verdict::Allow;
    }
    let policy = state.store.load();
    let target = NavigationTarget::now(url);
    state.engine.decide(&policy, &target, now())
}

/// Minutes since midnight from the caller, or `fallback` when absent or out of range.
fn resolve_now(now_minutes: Option<u32>, fallback: impl FnOnce() -> TimeOfDay) -> TimeOfDay {
    now_minutes
        .and_then(|m| u16::try_from(m).ok())
        .and_then(TimeOfDay::from_minutes)
        .unwrap_or_else(fallback)
}

fn local_time_of_day() -> TimeOfDay {
    let date = js_sys::Date::new_0();
    let minutes = date.get_hours() * 60 + date.get_minutes();
    u16::try_from(minutes)
        .ok()
        .and_then(TimeOfDay::from_minutes)
        .unwrap_or(TimeOfDay::MIDNIGHT)
}
