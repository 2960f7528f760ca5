use std::time::Duration;

use tokio::time::sleep;
use tracing::{error, info};

use crate::dashboard::layout;
use crate::dashboard::snapshot::{build_snapshot, CostSource, InstanceSource};
use crate::display::DashboardScreen;
use crate::error::CycleError;

/// Owns the panel handle and the two AWS sources for the life of the
/// process, and drives the fetch-draw-sleep loop.
pub struct DashboardRunner<C, I, S> {
    costs: C,
    instances: I,
    screen: S,
    refresh_interval: Duration,
}

impl<C, I, S> DashboardRunner<C, I, S>
where
    C: CostSource,
    I: InstanceSource,
    S: DashboardScreen,
{
    pub fn new(costs: C, instances: I, screen: S, refresh_interval: Duration) -> Self {
        Self {
            costs,
            instances,
            screen,
            refresh_interval,
        }
    }

    /// Never returns. Each iteration either paints the panel or logs why
    /// it could not; the wait is the same fixed interval either way, with
    /// no backoff and no re-initialization after a failure.
    pub async fn run(mut self) -> ! {
        loop {
            info!("Updating AWS dashboard...");
            if let Err(err) = self.run_cycle().await {
                error!("{}", err);
            }
            sleep(self.refresh_interval).await;
        }
    }

    async fn run_cycle(&mut self) -> Result<(), CycleError> {
        let snapshot = build_snapshot(&self.costs, &self.instances).await?;
        let frame = layout::render(&snapshot).map_err(CycleError::Render)?;
        self.screen.show(&frame).map_err(CycleError::Screen)?;
        self.screen.sleep().map_err(CycleError::Screen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cloud_providers::aws::cost_explorer::CostSummary;
    use crate::dashboard::snapshot::{MockCostSource, MockInstanceSource};
    use crate::display::MockDashboardScreen;
    use anyhow::anyhow;

    fn working_costs() -> MockCostSource {
        let mut costs = MockCostSource::new();
        costs.expect_fetch_costs().returning(|_| {
            Ok(CostSummary {
                yesterday: 7.5,
                month_to_date: 1234.004,
            })
        });
        costs
    }

    fn working_instances() -> MockInstanceSource {
        let mut instances = MockInstanceSource::new();
        instances.expect_count_running_instances().returning(|| Ok(5));
        instances
    }

    #[tokio::test]
    async fn good_cycle_paints_then_sleeps_the_panel() {
        let mut screen = MockDashboardScreen::new();
        screen.expect_show().times(1).returning(|_| Ok(()));
        screen.expect_sleep().times(1).returning(|| Ok(()));

        let mut runner = DashboardRunner::new(
            working_costs(),
            working_instances(),
            screen,
            Duration::from_secs(3600),
        );

        runner.run_cycle().await.unwrap();
    }

    #[tokio::test]
    async fn failed_fetch_never_touches_the_panel() {
        let mut costs = MockCostSource::new();
        costs
            .expect_fetch_costs()
            .returning(|_| Err(anyhow!("billing response contained no result buckets")));

        let mut screen = MockDashboardScreen::new();
        screen.expect_show().times(0);
        screen.expect_sleep().times(0);

        let mut runner = DashboardRunner::new(
            costs,
            MockInstanceSource::new(),
            screen,
            Duration::from_secs(3600),
        );

        // A persistently failing API keeps erroring cycle after cycle
        // without ever escalating past the error return.
        for _ in 0..3 {
            let err = runner.run_cycle().await.unwrap_err();
            assert!(matches!(err, CycleError::Billing(_)));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn failing_cycles_wait_the_same_fixed_interval() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::sync::Arc;

        let attempts = Arc::new(AtomicUsize::new(0));

        let mut costs = MockCostSource::new();
        let counter = attempts.clone();
        costs.expect_fetch_costs().returning(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            Err(anyhow!("throttled"))
        });

        let mut screen = MockDashboardScreen::new();
        screen.expect_show().times(0);
        screen.expect_sleep().times(0);

        let runner = DashboardRunner::new(
            costs,
            MockInstanceSource::new(),
            screen,
            Duration::from_secs(3600),
        );
        let loop_task = tokio::spawn(runner.run());

        // The first cycle fires as soon as the loop starts.
        sleep(Duration::from_millis(1)).await;
        assert_eq!(attempts.load(Ordering::SeqCst), 1);

        // Just short of the interval: the failure has not shortened the wait.
        sleep(Duration::from_secs(3598)).await;
        assert_eq!(attempts.load(Ordering::SeqCst), 1);

        // Crossing the interval releases exactly one more attempt.
        sleep(Duration::from_secs(3)).await;
        assert_eq!(attempts.load(Ordering::SeqCst), 2);

        // Repeated failures do not grow the interval either.
        sleep(Duration::from_secs(3600)).await;
        assert_eq!(attempts.load(Ordering::SeqCst), 3);

        loop_task.abort();
    }

    #[tokio::test]
    async fn panel_failure_is_tagged_as_screen_error() {
        let mut screen = MockDashboardScreen::new();
        screen
            .expect_show()
            .times(1)
            .returning(|_| Err(anyhow!("SPI write failed")));
        screen.expect_sleep().times(0);

        let mut runner = DashboardRunner::new(
            working_costs(),
            working_instances(),
            screen,
            Duration::from_secs(3600),
        );

        let err = runner.run_cycle().await.unwrap_err();
        assert!(matches!(err, CycleError::Screen(_)));
    }
}
