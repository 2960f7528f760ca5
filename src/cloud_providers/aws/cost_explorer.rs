use anyhow::{Context, Result};
use aws_config::SdkConfig;
use aws_sdk_costexplorer as costexplorer;
use aws_sdk_costexplorer::types::{DateInterval, Granularity, ResultByTime};
use chrono::{Datelike, Days, NaiveDate};

const UNBLENDED_COST: &str = "UnblendedCost";

/// Cost figures for one render cycle, in the account's billing currency.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CostSummary {
    pub yesterday: f64,
    pub month_to_date: f64,
}

pub struct CostExplorerClient {
    client: costexplorer::Client,
}

impl CostExplorerClient {
    pub fn new_with_config(conf: &SdkConfig) -> Self {
        Self {
            client: costexplorer::Client::new(conf),
        }
    }

    /// Runs the two Cost Explorer queries for `today` (current UTC date):
    /// the previous calendar day at daily granularity and month-to-date at
    /// monthly granularity. Both windows are half-open, ending on `today`.
    ///
    /// Cost Explorer answers with one bucket per window here; an empty
    /// answer (no usage yet, month boundary race) is surfaced as an error
    /// and the cycle is abandoned.
    pub async fn fetch_costs(&self, today: NaiveDate) -> Result<CostSummary> {
        let yesterday = today
            .checked_sub_days(Days::new(1))
            .context("no calendar day before today")?;
        let month_start = today
            .with_day(1)
            .context("no first day in current month")?;

        let daily = self
            .cost_for_window(yesterday, today, Granularity::Daily)
            .await
            .context("fetching yesterday's cost")?;
        let monthly = self
            .cost_for_window(month_start, today, Granularity::Monthly)
            .await
            .context("fetching month-to-date cost")?;

        Ok(CostSummary {
            yesterday: daily,
            month_to_date: monthly,
        })
    }

    async fn cost_for_window(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        granularity: Granularity,
    ) -> Result<f64> {
        let period = DateInterval::builder()
            .start(start.format("%Y-%m-%d").to_string())
            .end(end.format("%Y-%m-%d").to_string())
            .build()
            .context("building cost query time period")?;

        let resp = self
            .client
            .get_cost_and_usage()
            .time_period(period)
            .granularity(granularity)
            .metrics(UNBLENDED_COST)
            .send()
            .await
            .context("GetCostAndUsage request failed")?;

        total_unblended_cost(resp.results_by_time())
    }
}

/// Pulls the unblended cost amount out of the first result bucket.
pub(crate) fn total_unblended_cost(results: &[ResultByTime]) -> Result<f64> {
    let bucket = results
        .first()
        .context("billing response contained no result buckets")?;

    let amount = bucket
        .total()
        .and_then(|total| total.get(UNBLENDED_COST))
        .and_then(|metric| metric.amount())
        .context("result bucket is missing the UnblendedCost amount")?;

    amount
        .parse::<f64>()
        .with_context(|| format!("unparseable cost amount {:?}", amount))
}
