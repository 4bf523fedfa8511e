use std::sync::Arc;

use async_trait::async_trait;

use notifications::{ObligationsSource, SalaryObligation};

use crate::domain::service::PayrollService;

/// Publishes payroll data to the obligation scanner.
pub struct PayrollObligationsGateway {
    service: Arc<PayrollService>,
}

impl PayrollObligationsGateway {
    pub fn new(service: Arc<PayrollService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl ObligationsSource for PayrollObligationsGateway {
    async fn monthly_obligations(&self) -> anyhow::Result<Vec<SalaryObligation>> {
        self.service
            .monthly_obligations()
            .await
            .map_err(anyhow::Error::new)
    }
}
