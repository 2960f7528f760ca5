use anyhow::Result;
use async_trait::async_trait;
use chrono::{Local, NaiveDate, Utc};
use mockall::automock;

use crate::cloud_providers::aws::cost_explorer::{CostExplorerClient, CostSummary};
use crate::cloud_providers::aws::ec2::Ec2Client;
use crate::error::CycleError;

/// Everything one render cycle puts on the panel. Nothing survives the
/// cycle; the next refresh rebuilds it from scratch.
#[derive(Clone, Debug, PartialEq)]
pub struct DashboardSnapshot {
    pub yesterday_cost: f64,
    pub month_cost: f64,
    pub ec2_running: usize,
    pub updated_at: String,
}

#[automock]
#[async_trait]
pub trait CostSource {
    async fn fetch_costs(&self, today: NaiveDate) -> Result<CostSummary>;
}

#[automock]
#[async_trait]
pub trait InstanceSource {
    async fn count_running_instances(&self) -> Result<usize>;
}

#[async_trait]
impl CostSource for CostExplorerClient {
    async fn fetch_costs(&self, today: NaiveDate) -> Result<CostSummary> {
        CostExplorerClient::fetch_costs(self, today).await
    }
}

#[async_trait]
impl InstanceSource for Ec2Client {
    async fn count_running_instances(&self) -> Result<usize> {
        Ec2Client::count_running_instances(self).await
    }
}

/// Sequences the two fetches for one cycle. Billing windows use the UTC
/// calendar date; the footer timestamp is local wall-clock time.
pub async fn build_snapshot<C, I>(costs: &C, instances: &I) -> Result<DashboardSnapshot, CycleError>
where
    C: CostSource + ?Sized,
    I: InstanceSource + ?Sized,
{
    let today = Utc::now().date_naive();

    let summary = costs
        .fetch_costs(today)
        .await
        .map_err(CycleError::Billing)?;
    let running = instances
        .count_running_instances()
        .await
        .map_err(CycleError::Inventory)?;

    Ok(DashboardSnapshot {
        yesterday_cost: summary.yesterday,
        month_cost: summary.month_to_date,
        ec2_running: running,
        updated_at: Local::now().format("%Y-%m-%d %H:%M").to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[tokio::test]
    async fn snapshot_carries_both_costs_and_the_count() {
        let mut costs = MockCostSource::new();
        costs.expect_fetch_costs().times(1).returning(|_| {
            Ok(CostSummary {
                yesterday: 12.34,
                month_to_date: 456.78,
            })
        });

        let mut instances = MockInstanceSource::new();
        instances
            .expect_count_running_instances()
            .times(1)
            .returning(|| Ok(5));

        let snapshot = build_snapshot(&costs, &instances).await.unwrap();
        assert_eq!(snapshot.yesterday_cost, 12.34);
        assert_eq!(snapshot.month_cost, 456.78);
        assert_eq!(snapshot.ec2_running, 5);
        // "YYYY-MM-DD HH:MM"
        assert_eq!(snapshot.updated_at.len(), 16);
    }

    #[tokio::test]
    async fn billing_failure_short_circuits_the_cycle() {
        let mut costs = MockCostSource::new();
        costs
            .expect_fetch_costs()
            .returning(|_| Err(anyhow!("no result buckets")));

        // No expectations: touching the inventory source would panic.
        let instances = MockInstanceSource::new();

        let err = build_snapshot(&costs, &instances).await.unwrap_err();
        assert!(matches!(err, CycleError::Billing(_)));
    }

    #[tokio::test]
    async fn inventory_failure_is_tagged_as_such() {
        let mut costs = MockCostSource::new();
        costs.expect_fetch_costs().returning(|_| {
            Ok(CostSummary {
                yesterday: 1.0,
                month_to_date: 2.0,
            })
        });

        let mut instances = MockInstanceSource::new();
        instances
            .expect_count_running_instances()
            .returning(|| Err(anyhow!("throttled")));

        let err = build_snapshot(&costs, &instances).await.unwrap_err();
        assert!(matches!(err, CycleError::Inventory(_)));
    }
}
