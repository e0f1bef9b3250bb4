use crate::error::AppError;
use config::{Config as Cfg, File};
use serde::Deserialize;
use std::env;

#[derive(Debug, Clone)]
pub struct ChatbotConfig {
    pub common: CommonConfig,
    pub google: GoogleConfig,
    pub models: ModelConfig,
    pub storage: StorageConfig,
}

/// Server settings shared with the `configuration` file / `APP__` env vars.
#[derive(Debug, Deserialize, Clone)]
pub struct CommonConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_port() -> u16 {
    8080
}

#[derive(Debug, Clone)]
pub struct GoogleConfig {
    pub api_key: String,
}

#[derive(Debug, Clone)]
pub struct ModelConfig {
    /// Gemini model used for chat replies (e.g., gemini-2.0-flash-001)
    pub text_model: String,
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Directory served at /static; uploads land in its `uploads` subdirectory.
    pub static_dir: String,
}

impl CommonConfig {
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let config = Cfg::builder()
            .add_source(File::with_name("configuration").required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

impl ChatbotConfig {
    pub fn load() -> Result<Self, AppError> {
        let common = CommonConfig::load()?;
        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        Ok(ChatbotConfig {
            common,
            google: GoogleConfig {
                api_key: get_env("GOOGLE_API_KEY", None, is_prod)?,
            },
            models: ModelConfig {
                text_model: get_env("GENAI_TEXT_MODEL", Some("gemini-2.0-flash-001"), is_prod)?,
            },
            storage: StorageConfig {
                static_dir: get_env("STATIC_DIR", Some("static"), is_prod)?,
            },
        })
    }
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}
