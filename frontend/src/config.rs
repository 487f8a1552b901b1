use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Compiled defaults; override at runtime via `window.__AMBUTRACK_ENV`
/// (env.js) or a served `./config.json`.
pub const DEFAULT_API_BASE_URL: &str = "https://ambulance-tracker-backend.onrender.com/api/v1";
pub const DEFAULT_REALTIME_URL: &str = "ws://localhost:4000/ws";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuntimeConfig {
    pub api_base_url: Option<String>,
    pub realtime_url: Option<String>,
    pub maps_api_key: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub api_base_url: String,
    pub realtime_url: String,
    /// Empty when no key was provided; the maps loader surfaces that as a
    /// configuration error instead of injecting a keyless script.
    pub maps_api_key: String,
}

static RESOLVED: OnceLock<ResolvedConfig> = OnceLock::new();

#[cfg(target_arch = "wasm32")]
fn read_global_key(source: &str, upper: &str, lower: &str) -> Option<String> {
    let w = web_sys::window()?;
    let any = js_sys::Reflect::get(&w, &source.into()).ok()?;
    if any.is_undefined() || any.is_null() {
        return None;
    }
    let obj = js_sys::Object::from(any);
    let val = js_sys::Reflect::get(&obj, &upper.into())
        .ok()
        .filter(|v| !v.is_undefined() && !v.is_null())
        .or_else(|| js_sys::Reflect::get(&obj, &lower.into()).ok());
    val.and_then(|v| v.as_string()).filter(|s| !s.is_empty())
}

fn snapshot_from_globals() -> RuntimeConfig {
    #[cfg(target_arch = "wasm32")]
    {
        // window.__AMBUTRACK_ENV takes precedence over window.__AMBUTRACK_CONFIG.
        let from_env = |upper: &str, lower: &str| {
            read_global_key("__AMBUTRACK_ENV", upper, lower)
                .or_else(|| read_global_key("__AMBUTRACK_CONFIG", lower, upper))
        };
        RuntimeConfig {
            api_base_url: from_env("API_BASE_URL", "api_base_url"),
            realtime_url: from_env("REALTIME_URL", "realtime_url"),
            maps_api_key: from_env("MAPS_API_KEY", "maps_api_key"),
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        RuntimeConfig::default()
    }
}

#[cfg(target_arch = "wasm32")]
fn write_window_config(cfg: &RuntimeConfig) {
    let w = match web_sys::window() {
        Some(win) => win,
        None => return,
    };
    let obj = js_sys::Object::new();
    let set = |key: &str, value: &Option<String>| {
        if let Some(value) = value {
            let _ = js_sys::Reflect::set(
                &obj,
                &key.into(),
                &wasm_bindgen::JsValue::from_str(value),
            );
        }
    };
    set("api_base_url", &cfg.api_base_url);
    set("realtime_url", &cfg.realtime_url);
    set("maps_api_key", &cfg.maps_api_key);
    let _ = js_sys::Reflect::set(&w, &"__AMBUTRACK_CONFIG".into(), &obj);
}

async fn fetch_runtime_config() -> Option<RuntimeConfig> {
    #[cfg(target_arch = "wasm32")]
    {
        let resp = reqwest::get("./config.json").await.ok()?;
        if !resp.status().is_success() {
            return None;
        }
        resp.json::<RuntimeConfig>().await.ok()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        None
    }
}

fn resolve(globals: RuntimeConfig, fetched: Option<RuntimeConfig>) -> ResolvedConfig {
    let fetched = fetched.unwrap_or_default();
    ResolvedConfig {
        api_base_url: globals
            .api_base_url
            .or(fetched.api_base_url)
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
        realtime_url: globals
            .realtime_url
            .or(fetched.realtime_url)
            .unwrap_or_else(|| DEFAULT_REALTIME_URL.to_string()),
        maps_api_key: globals
            .maps_api_key
            .or(fetched.maps_api_key)
            .unwrap_or_default(),
    }
}

pub async fn await_config() -> ResolvedConfig {
    if let Some(cached) = RESOLVED.get() {
        return cached.clone();
    }
    let globals = snapshot_from_globals();
    let fetched = if globals.api_base_url.is_some()
        && globals.realtime_url.is_some()
        && globals.maps_api_key.is_some()
    {
        None
    } else {
        let cfg = fetch_runtime_config().await;
        #[cfg(target_arch = "wasm32")]
        if let Some(cfg) = &cfg {
            write_window_config(cfg);
        }
        cfg
    };
    let resolved = resolve(globals, fetched);
    let _ = RESOLVED.set(resolved.clone());
    resolved
}

pub async fn await_api_base_url() -> String {
    await_config().await.api_base_url
}

pub async fn await_realtime_url() -> String {
    await_config().await.realtime_url
}

pub async fn await_maps_api_key() -> String {
    await_config().await.maps_api_key
}

pub async fn init() {
    let _ = await_config().await;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_prefers_globals_over_fetched() {
        let globals = RuntimeConfig {
            api_base_url: Some("https://env.example/api/v1".into()),
            realtime_url: None,
            maps_api_key: None,
        };
        let fetched = RuntimeConfig {
            api_base_url: Some("https://file.example/api/v1".into()),
            realtime_url: Some("wss://file.example/ws".into()),
            maps_api_key: Some("file-key".into()),
        };
        let resolved = resolve(globals, Some(fetched));
        assert_eq!(resolved.api_base_url, "https://env.example/api/v1");
        assert_eq!(resolved.realtime_url, "wss://file.example/ws");
        assert_eq!(resolved.maps_api_key, "file-key");
    }

    #[test]
    fn resolve_falls_back_to_defaults() {
        let resolved = resolve(RuntimeConfig::default(), None);
        assert_eq!(resolved.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(resolved.realtime_url, DEFAULT_REALTIME_URL);
        assert_eq!(resolved.maps_api_key, "");
    }

    #[test]
    fn runtime_config_deserializes_partial_json() {
        let cfg: RuntimeConfig =
            serde_json::from_str(r#"{"api_base_url":"http://localhost:4000/api/v1"}"#)
                .unwrap();
        assert_eq!(
            cfg.api_base_url.as_deref(),
            Some("http://localhost:4000/api/v1")
        );
        assert!(cfg.realtime_url.is_none());
        assert!(cfg.maps_api_key.is_none());
    }
}
