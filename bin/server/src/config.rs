//! Centralized server configuration.
//!
//! Loaded via the `config` crate from environment variables, using `__` to
//! reach nested fields (`LLM__API_KEY`, `SKILL__FOLLOWUP_COUNT`).

use serde::Deserialize;
use voxgpt_ai::LlmBackendConfig;
use voxgpt_skill::SkillConfig;

/// Server configuration composed from library configs.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to.
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Chat completion backend.
    #[serde(default)]
    pub llm: LlmBackendConfig,

    /// Skill behaviour.
    #[serde(default)]
    pub skill: SkillConfig,
}

fn default_bind_address() -> String {
    "0.0.0.0:3000".to_string()
}

impl ServerConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is present but invalid.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(
                config::Environment::default()
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}
