use crate::domain::lifecycle::LockPolicy;
use crm_core::config as core_config;
use crm_core::config::get_env;
use crm_core::error::AppError;
use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct CrmConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub mongodb: MongoConfig,
    pub lock_policy: LockPolicy,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MongoConfig {
    pub uri: String,
    pub database: String,
}

impl CrmConfig {
    pub fn load() -> Result<Self, AppError> {
        // Load common config (handles .env and APP__ prefix)
        let common = core_config::Config::load()?;

        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        Ok(CrmConfig {
            common,
            mongodb: MongoConfig {
                uri: get_env("MONGODB_URI", None, is_prod)?,
                database: get_env("MONGODB_DATABASE", Some("crm_db"), is_prod)?,
            },
            lock_policy: LockPolicy {
                payments_while_closed: parse_bool(get_env(
                    "LOCK_PAYMENTS_WHILE_CLOSED",
                    Some("true"),
                    is_prod,
                )?)?,
                follow_ups_while_closed: parse_bool(get_env(
                    "LOCK_FOLLOW_UPS_WHILE_CLOSED",
                    Some("false"),
                    is_prod,
                )?)?,
            },
        })
    }
}

fn parse_bool(value: String) -> Result<bool, AppError> {
    value
        .parse()
        .map_err(|_| AppError::ConfigError(anyhow::anyhow!("invalid boolean: {}", value)))
}
