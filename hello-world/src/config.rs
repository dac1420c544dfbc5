//! Function configuration read from the Lambda environment.
//!
//! None of these settings change how events are routed; the queue URL, stage and free-form
//! setting are only reported at cold start.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// `MY_QUEUE_URL`
    pub queue_url: Option<String>,
    /// `STAGE`
    pub stage: Option<String>,
    /// `OTHER_CONFIG`
    pub other_config: Option<String>,
    /// `STRICT_USER_VALIDATION`: answer invalid create payloads with `400` instead of `500`.
    pub strict_user_validation: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the config from any variable source.
    pub fn from_lookup(mut lookup: impl FnMut(&str) -> Option<String>) -> Self {
        let strict_user_validation = lookup("STRICT_USER_VALIDATION")
            .map(|raw| parse_flag(&raw))
            .unwrap_or(false);

        Self {
            queue_url: non_empty(lookup("MY_QUEUE_URL")),
            stage: non_empty(lookup("STAGE")),
            other_config: non_empty(lookup("OTHER_CONFIG")),
            strict_user_validation,
        }
    }

    pub fn log_environment(&self) {
        tracing::info!(
            queue_url = self.queue_url.as_deref().unwrap_or("No se encontró la URL de la cola"),
            stage = self.stage.as_deref().unwrap_or("No se encontró el entorno"),
            other_config = self
                .other_config
                .as_deref()
                .unwrap_or("No se encontró la otra configuración"),
            strict_user_validation = self.strict_user_validation,
            "environment"
        );
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
