/// Build-time configuration for the popup

/// Backend used when `PAGE_MIND_BACKEND_URL` is not set at compile time
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone, PartialEq)]
pub struct PopupConfig {
    pub backend_url: String,
    pub log_level: log::Level,
}

impl PopupConfig {
    /// Read the configuration baked into the wasm binary.
    ///
    /// The popup offers no settings UI, so the backend address can only be
    /// changed by rebuilding with `PAGE_MIND_BACKEND_URL` set.
    pub fn from_build_env() -> PopupConfig {
        PopupConfig::with_backend(option_env!("PAGE_MIND_BACKEND_URL").unwrap_or(DEFAULT_BACKEND_URL))
    }

    pub fn with_backend(backend_url: &str) -> PopupConfig {
        let backend_url = backend_url.trim();
        let backend_url = if backend_url.is_empty() {
            DEFAULT_BACKEND_URL
        } else {
            backend_url
        };

        PopupConfig {
            backend_url: backend_url.to_string(),
            log_level: default_log_level(),
        }
    }
}

impl Default for PopupConfig {
    fn default() -> Self {
        PopupConfig::with_backend(DEFAULT_BACKEND_URL)
    }
}

fn default_log_level() -> log::Level {
    if cfg!(debug_assertions) {
        log::Level::Debug
    } else {
        log::Level::Info
    }
}
