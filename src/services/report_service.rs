// src/services/report_service.rs

use sqlx::PgPool;

use crate::{
    common::error::AppError,
    common::scope::Caller,
    db::ReportRepository,
    models::reports::{SalesChartEntry, SummaryReport, TopProductEntry},
};

#[derive(Clone)]
pub struct ReportService {
    report_repo: ReportRepository,
    pool: PgPool,
}

impl ReportService {
    pub fn new(report_repo: ReportRepository, pool: PgPool) -> Self {
        Self { report_repo, pool }
    }

    pub async fn summary(&self, caller: &Caller) -> Result<SummaryReport, AppError> {
        self.report_repo.summary(&self.pool, caller).await
    }

    pub async fn sales_chart(&self, caller: &Caller) -> Result<Vec<SalesChartEntry>, AppError> {
        self.report_repo
            .sales_last_30_days(&self.pool, caller)
            .await
    }

    pub async fn top_products(&self, caller: &Caller) -> Result<Vec<TopProductEntry>, AppError> {
        self.report_repo.top_products(&self.pool, caller).await
    }
}
