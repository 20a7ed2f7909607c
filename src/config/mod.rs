pub(crate) const DEFAULT_API_URL: &str = "http://localhost:8888";

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct EnvConfig {
    pub api_url: String,
}

impl EnvConfig {
    /// Resolve the backend base URL from `window.ENV`.
    ///
    /// Both `window.ENV.API_URL` and `window.ENV.api_url` are honored, in that
    /// order; otherwise the local development backend is used.
    pub fn new() -> Self {
        if let Some(window) = web_sys::window() {
            if let Some(env) = window.get("ENV") {
                if !env.is_undefined() && env.is_object() {
                    for key in ["API_URL", "api_url"] {
                        if let Ok(v) = js_sys::Reflect::get(&env, &key.into()) {
                            if let Some(url) = v.as_string() {
                                return Self::with_api_url(&url);
                            }
                        }
                    }
                }
            }
        }

        Self::with_api_url(DEFAULT_API_URL)
    }

    pub fn with_api_url(url: &str) -> Self {
        let trimmed = url.trim().trim_end_matches('/');
        let api_url = if trimmed.is_empty() {
            DEFAULT_API_URL.to_string()
        } else {
            trimmed.to_string()
        };
        Self { api_url }
    }
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self::new()
    }
}
