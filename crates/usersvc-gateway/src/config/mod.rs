//! Service config loader (strict parsing + environment overrides).

pub mod schema;

use std::fs;
use std::path::Path;

use usersvc_core::error::{Result, UserSvcError};

pub use schema::{ListSection, ServerSection, ServiceConfig, StoreBackend, StoreSection};

/// Default config file, read from the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "usersvc.yaml";

/// Environment variables that override file values.
pub const ENV_CONFIG_PATH: &str = "USERSVC_CONFIG";
pub const ENV_LISTEN: &str = "USERSVC_LISTEN";
pub const ENV_REGION: &str = "AWS_REGION";
pub const ENV_TABLE: &str = "DYNAMODB_USERS_TABLE";
pub const ENV_ENDPOINT: &str = "DYNAMODB_ENDPOINT";

/// Load config using the process environment.
pub fn load() -> Result<ServiceConfig> {
    load_with(|key| std::env::var(key).ok())
}

/// Resolve config from `USERSVC_CONFIG` (must exist) or the default path
/// (optional), then apply environment overrides and validate.
pub fn load_with<F>(lookup: F) -> Result<ServiceConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let mut cfg = match lookup(ENV_CONFIG_PATH) {
        Some(path) => parse_file(&path)?,
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => parse_file(DEFAULT_CONFIG_PATH)?,
        None => ServiceConfig::default(),
    };
    apply_overrides(&mut cfg, lookup);
    cfg.validate()?;
    Ok(cfg)
}

pub fn load_from_str(s: &str) -> Result<ServiceConfig> {
    let cfg = parse_str(s)?;
    cfg.validate()?;
    Ok(cfg)
}

/// Overwrite fields whose environment key is set and non-empty.
/// `lookup` is injected so tests need not touch the process environment.
pub fn apply_overrides<F>(cfg: &mut ServiceConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(v) = get(ENV_LISTEN) {
        cfg.server.listen = v;
    }
    if let Some(v) = get(ENV_REGION) {
        cfg.store.region = v;
    }
    if let Some(v) = get(ENV_TABLE) {
        cfg.store.table = v;
    }
    if let Some(v) = get(ENV_ENDPOINT) {
        cfg.store.endpoint = Some(v);
    }
}

fn parse_file(path: &str) -> Result<ServiceConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| UserSvcError::Config(format!("read config failed ({path}): {e}")))?;
    parse_str(&s)
}

fn parse_str(s: &str) -> Result<ServiceConfig> {
    serde_yaml::from_str(s).map_err(|e| UserSvcError::Config(format!("invalid yaml: {e}")))
}
