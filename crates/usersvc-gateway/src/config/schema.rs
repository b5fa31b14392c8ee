use std::net::SocketAddr;

use serde::Deserialize;
use usersvc_core::error::{Result, UserSvcError};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub store: StoreSection,

    #[serde(default)]
    pub list: ListSection,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            version: 1,
            server: ServerSection::default(),
            store: StoreSection::default(),
            list: ListSection::default(),
        }
    }
}

impl ServiceConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(UserSvcError::Config(format!(
                "unsupported config version: {}",
                self.version
            )));
        }

        self.server.validate()?;
        self.store.validate()?;
        self.list.validate()?;

        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Reported by `/health`.
    #[serde(default = "default_service_name")]
    pub service_name: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            service_name: default_service_name(),
        }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        self.listen.parse::<SocketAddr>().map_err(|e| {
            UserSvcError::Config(format!("server.listen must be a socket address: {e}"))
        })?;
        if self.service_name.trim().is_empty() {
            return Err(UserSvcError::Config(
                "server.service_name must not be empty".into(),
            ));
        }
        Ok(())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen
            .parse()
            .map_err(|e| UserSvcError::Config(format!("server.listen: {e}")))
    }
}

/// Which `ItemStore` implementation backs the service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Dynamodb,
    /// Process-local; records do not survive a restart.
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreSection {
    #[serde(default)]
    pub backend: StoreBackend,

    #[serde(default = "default_region")]
    pub region: String,

    #[serde(default = "default_table")]
    pub table: String,

    /// Endpoint override (e.g. DynamoDB Local).
    #[serde(default)]
    pub endpoint: Option<String>,
}

impl Default for StoreSection {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            region: default_region(),
            table: default_table(),
            endpoint: None,
        }
    }
}

impl StoreSection {
    pub fn validate(&self) -> Result<()> {
        if self.region.trim().is_empty() {
            return Err(UserSvcError::Config("store.region must not be empty".into()));
        }
        if self.table.trim().is_empty() {
            return Err(UserSvcError::Config("store.table must not be empty".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ListSection {
    #[serde(default = "default_limit")]
    pub default_limit: usize,
}

impl Default for ListSection {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
        }
    }
}

impl ListSection {
    pub fn validate(&self) -> Result<()> {
        if self.default_limit == 0 {
            return Err(UserSvcError::Config(
                "list.default_limit must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

fn default_listen() -> String {
    "0.0.0.0:8000".into()
}
fn default_service_name() -> String {
    "user-service".into()
}
fn default_region() -> String {
    "us-east-1".into()
}
fn default_table() -> String {
    "aws-microservices-cicd-users".into()
}
fn default_limit() -> usize {
    10
}
