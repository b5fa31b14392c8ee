//! Shared application state for the user service.
//!
//! Dependencies (item store, metrics registry) are built by the caller and
//! injected here once at startup; handlers reach them only through this state.

use std::sync::Arc;

use usersvc_core::error::Result;
use usersvc_core::store::ItemStore;

use crate::config::ServiceConfig;
use crate::obs::ServiceMetrics;
use crate::services::UserService;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
    metrics: Arc<ServiceMetrics>,
}

struct AppStateInner {
    cfg: ServiceConfig,
    users: UserService,
}

impl AppState {
    /// Build application state.
    /// Returns Result so main can handle errors gracefully (no panic).
    pub fn new(
        cfg: ServiceConfig,
        store: Arc<dyn ItemStore>,
        metrics: Arc<ServiceMetrics>,
    ) -> Result<Self> {
        cfg.validate()?;

        if store.table() != cfg.store.table {
            tracing::warn!(
                configured = %cfg.store.table,
                store = %store.table(),
                "item store table differs from config"
            );
        }

        let users = UserService::new(store, cfg.list.clone());

        Ok(Self {
            inner: Arc::new(AppStateInner { cfg, users }),
            metrics,
        })
    }

    pub fn cfg(&self) -> &ServiceConfig {
        &self.inner.cfg
    }

    pub fn users(&self) -> &UserService {
        &self.inner.users
    }

    pub fn metrics(&self) -> &ServiceMetrics {
        &self.metrics
    }
}
