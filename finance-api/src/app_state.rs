use std::sync::Arc;

use sqlx::PgPool;

use crate::{
    domain::ports::inbound::{CostingService, ProjectFinanceService, RateCardService},
    factory,
};

#[derive(Clone)]
pub struct AppState {
    pub costing_service: Arc<dyn CostingService>,
    pub finance_service: Arc<dyn ProjectFinanceService>,
    pub rate_card_service: Arc<dyn RateCardService>,
}

impl AppState {
    pub fn new(db_pool: PgPool) -> Self {
        Self::from_services(factory::postgres_services(db_pool))
    }

    pub fn from_services(services: factory::Services) -> Self {
        Self {
            costing_service: services.costing,
            finance_service: services.finance,
            rate_card_service: services.rate_cards,
        }
    }
}
