use crate::provider::ProviderClientConfig;
use anyhow::{Context, Result};
use shared::config::{optional, parse_bool, required};

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub provider: ProviderClientConfig,
    pub is_dev: bool,
    pub enable_file_log: bool,
}

impl Config {
    pub fn init() -> Result<Self> {
        let port = optional::<u16>("PORT", 8001).context("PORT must be a valid u16 integer")?;

        let provider = ProviderClientConfig {
            base_url: required("AUTH_PROVIDER_URL")?,
            service_key: required("AUTH_PROVIDER_SERVICE_KEY")?,
            signup_table: optional::<String>("SIGNUP_TABLE", "signup_requests".into())?,
        };

        Ok(Self {
            port,
            provider,
            is_dev: parse_bool("DEV_MODE"),
            enable_file_log: parse_bool("ENABLE_FILE_LOG"),
        })
    }
}
