use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000/api";
pub const DEFAULT_PAGE_SIZE: usize = 20;
pub const DEFAULT_EXPORT_TIMEOUT_SECS: u64 = 30;
pub const PAGE_SIZE_OPTIONS: &[usize] = &[10, 20, 50];

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RuntimeConfig {
    #[serde(default)]
    pub api_base_url: Option<String>,
    #[serde(default)]
    pub default_page_size: Option<usize>,
    #[serde(default)]
    pub export_timeout_secs: Option<u64>,
    #[serde(default)]
    pub time_zone: Option<String>,
}

/// Fully resolved settings; every field has a value.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub api_base_url: String,
    pub default_page_size: usize,
    pub export_timeout_secs: u64,
    pub time_zone: Tz,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            default_page_size: DEFAULT_PAGE_SIZE,
            export_timeout_secs: DEFAULT_EXPORT_TIMEOUT_SECS,
            time_zone: Tz::UTC,
        }
    }
}

impl RuntimeConfig {
    /// Fields set in `self` win over `fallback`.
    fn merge(self, fallback: RuntimeConfig) -> RuntimeConfig {
        RuntimeConfig {
            api_base_url: self.api_base_url.or(fallback.api_base_url),
            default_page_size: self.default_page_size.or(fallback.default_page_size),
            export_timeout_secs: self.export_timeout_secs.or(fallback.export_timeout_secs),
            time_zone: self.time_zone.or(fallback.time_zone),
        }
    }

    pub fn resolve(self) -> ResolvedConfig {
        let defaults = ResolvedConfig::default();
        let time_zone = self
            .time_zone
            .as_deref()
            .and_then(|name| match name.parse::<Tz>() {
                Ok(tz) => Some(tz),
                Err(_) => {
                    log::warn!("Unknown time zone '{}' in runtime config; using UTC", name);
                    None
                }
            })
            .unwrap_or(defaults.time_zone);
        ResolvedConfig {
            api_base_url: self
                .api_base_url
                .map(|url| url.trim_end_matches('/').to_string())
                .filter(|url| !url.is_empty())
                .unwrap_or(defaults.api_base_url),
            default_page_size: self
                .default_page_size
                .filter(|size| *size > 0)
                .unwrap_or(defaults.default_page_size),
            export_timeout_secs: self
                .export_timeout_secs
                .filter(|secs| *secs > 0)
                .unwrap_or(defaults.export_timeout_secs),
            time_zone,
        }
    }
}

static RESOLVED: OnceLock<ResolvedConfig> = OnceLock::new();

#[cfg(target_arch = "wasm32")]
fn read_global(name: &str) -> Option<RuntimeConfig> {
    let window = web_sys::window()?;
    let any = js_sys::Reflect::get(&window, &name.into()).ok()?;
    if any.is_undefined() || any.is_null() {
        return None;
    }
    let obj = js_sys::Object::from(any);
    let string_field = |keys: &[&str]| {
        keys.iter().find_map(|key| {
            js_sys::Reflect::get(&obj, &(*key).into())
                .ok()
                .filter(|v| !v.is_undefined() && !v.is_null())
        })
    };
    Some(RuntimeConfig {
        api_base_url: string_field(&["API_BASE_URL", "api_base_url"]).and_then(|v| v.as_string()),
        default_page_size: string_field(&["DEFAULT_PAGE_SIZE", "default_page_size"])
            .and_then(|v| v.as_f64())
            .map(|v| v as usize),
        export_timeout_secs: string_field(&["EXPORT_TIMEOUT_SECS", "export_timeout_secs"])
            .and_then(|v| v.as_f64())
            .map(|v| v as u64),
        time_zone: string_field(&["TIME_ZONE", "time_zone"]).and_then(|v| v.as_string()),
    })
}

#[cfg(not(target_arch = "wasm32"))]
fn read_global(_name: &str) -> Option<RuntimeConfig> {
    None
}

// window.__HRM_ENV (env.js) takes precedence over window.__HRM_CONFIG.
fn snapshot_from_globals() -> RuntimeConfig {
    let env = read_global("__HRM_ENV").unwrap_or_default();
    let cfg = read_global("__HRM_CONFIG").unwrap_or_default();
    env.merge(cfg)
}

#[cfg(target_arch = "wasm32")]
async fn fetch_runtime_config() -> Option<RuntimeConfig> {
    let origin = web_sys::window()?.location().origin().ok()?;
    let resp = reqwest::get(format!("{}/config.json", origin)).await.ok()?;
    if !resp.status().is_success() {
        return None;
    }
    resp.json::<RuntimeConfig>().await.ok()
}

#[cfg(not(target_arch = "wasm32"))]
async fn fetch_runtime_config() -> Option<RuntimeConfig> {
    None
}

pub async fn await_config() -> ResolvedConfig {
    if let Some(cached) = RESOLVED.get() {
        return cached.clone();
    }
    let mut merged = snapshot_from_globals();
    if merged.api_base_url.is_none() {
        if let Some(file) = fetch_runtime_config().await {
            merged = merged.merge(file);
        }
    }
    let resolved = merged.resolve();
    let _ = RESOLVED.set(resolved.clone());
    RESOLVED.get().cloned().unwrap_or(resolved)
}

pub async fn await_api_base_url() -> String {
    await_config().await.api_base_url
}

/// Settings known so far; defaults until `init` has completed.
pub fn current() -> ResolvedConfig {
    RESOLVED.get().cloned().unwrap_or_default()
}

pub fn current_time_zone() -> Tz {
    current().time_zone
}

pub async fn init() {
    let cfg = await_config().await;
    log::info!(
        "Runtime config resolved: api={}, page_size={}, tz={}",
        cfg.api_base_url,
        cfg.default_page_size,
        cfg.time_zone
    );
}
