// Route exports
pub mod imports;
pub mod prospects;
pub mod search;

use actix_web::web;
use std::sync::Arc;

use crate::core::SearchEngine;
use crate::services::{Ingestor, PostgresClient, ProspectStore};

/// Search-limit policy from configuration.
#[derive(Debug, Clone, Copy)]
pub struct SearchLimits {
    pub default_limit: usize,
    pub max_limit: usize,
}

impl SearchLimits {
    /// Requested limit, defaulted and capped.
    pub fn effective(&self, requested: Option<u16>) -> usize {
        requested
            .map(|l| l as usize)
            .unwrap_or(self.default_limit)
            .min(self.max_limit)
    }
}

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<SearchEngine>,
    pub ingestor: Arc<Ingestor>,
    pub prospects: Arc<ProspectStore>,
    pub postgres: Arc<PostgresClient>,
    pub limits: SearchLimits,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(search::configure)
            .configure(prospects::configure)
            .configure(imports::configure),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_limit_defaults_and_caps() {
        let limits = SearchLimits { default_limit: 50, max_limit: 200 };
        assert_eq!(limits.effective(None), 50);
        assert_eq!(limits.effective(Some(20)), 20);
        assert_eq!(limits.effective(Some(500)), 200);
    }
}
