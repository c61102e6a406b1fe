//! Composition root, the only place that names concrete outbound adapters.

use std::sync::Arc;

use sqlx::PgPool;

use crate::{
    adapters::outbound::postgres::{
        PostgresCostingRepository, PostgresFinanceRepository, PostgresRateCardRepository,
    },
    domain::{
        ports::inbound::{CostingService, ProjectFinanceService, RateCardService},
        services::{CostingServiceImpl, ProjectFinanceServiceImpl, RateCardServiceImpl},
    },
};

pub struct Services {
    pub costing: Arc<dyn CostingService>,
    pub finance: Arc<dyn ProjectFinanceService>,
    pub rate_cards: Arc<dyn RateCardService>,
}

pub fn postgres_services(pool: PgPool) -> Services {
    let costing_repo = Arc::new(PostgresCostingRepository::new(pool.clone()));
    let finance_repo = Arc::new(PostgresFinanceRepository::new(pool.clone()));
    let rate_card_repo = Arc::new(PostgresRateCardRepository::new(pool));

    Services {
        costing: Arc::new(CostingServiceImpl::new(
            costing_repo.clone(),
            costing_repo.clone(),
            costing_repo.clone(),
        )),
        finance: Arc::new(ProjectFinanceServiceImpl::new(
            costing_repo.clone(),
            finance_repo,
        )),
        rate_cards: Arc::new(RateCardServiceImpl::new(
            costing_repo.clone(),
            costing_repo,
            rate_card_repo,
        )),
    }
}

/// Services over a shared in-memory store.
#[cfg(test)]
pub fn in_memory_services(store: &crate::adapters::outbound::memory::InMemoryStore) -> Services {
    let store = Arc::new(store.clone());
    Services {
        costing: Arc::new(CostingServiceImpl::new(
            store.clone(),
            store.clone(),
            store.clone(),
        )),
        finance: Arc::new(ProjectFinanceServiceImpl::new(store.clone(), store.clone())),
        rate_cards: Arc::new(RateCardServiceImpl::new(store.clone(), store.clone(), store)),
    }
}
