//! Price aggregation for a postcode
//!
//! Fetches recorded sales for one postcode and reduces them to
//! [`PriceStatistics`]. A registry failure propagates unchanged; an empty
//! sample is a successful result with every figure zero.

use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::instrument;

use crate::error::{Operation, Registry, RegistryError};
use crate::model::PriceStatistics;
use crate::property_registry::{PropertyRegistryClient, DEFAULT_POSTCODE_LIMIT};

pub struct PriceAggregator {
    client: PropertyRegistryClient,
    limit: usize,
    deadline: Option<Duration>,
}

impl PriceAggregator {
    pub fn new(client: PropertyRegistryClient) -> Self {
        Self {
            client,
            limit: DEFAULT_POSTCODE_LIMIT,
            deadline: None,
        }
    }

    /// Maximum number of sales to fetch per aggregation.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub async fn aggregate(&self, postcode: &str) -> Result<PriceStatistics, RegistryError> {
        self.aggregate_at(postcode, Utc::now()).await
    }

    /// Aggregate with an explicit `computed_at` timestamp.
    #[instrument(skip(self), fields(limit = self.limit))]
    pub async fn aggregate_at(
        &self,
        postcode: &str,
        computed_at: DateTime<Utc>,
    ) -> Result<PriceStatistics, RegistryError> {
        let fetch = self.client.fetch_prices_by_postcode(postcode, self.limit);

        let observations = match self.deadline {
            Some(deadline) => tokio::time::timeout(deadline, fetch).await.map_err(|_| {
                tracing::warn!(postcode, ?deadline, "price aggregation timed out");
                RegistryError::deadline_exceeded(
                    Registry::Property,
                    Operation::AggregatePrices,
                    format!("/def/ppi?postcode={postcode}"),
                    deadline,
                )
            })??,
            None => fetch.await?,
        };

        let prices: Vec<u64> = observations.iter().map(|o| o.price).collect();
        let stats = PriceStatistics::from_prices(&prices, computed_at);

        tracing::info!(
            postcode,
            sample_size = stats.sample_size,
            average = stats.average,
            median = stats.median,
            "price statistics computed"
        );
        Ok(stats)
    }
}
