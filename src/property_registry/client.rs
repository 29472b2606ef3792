//! Land registry client
//!
//! Title records, price-paid observations and ownership history over the
//! land registry API.

use std::sync::Arc;

use serde::de::DeserializeOwned;

use super::normalize::{normalize_price_paid, normalize_title};
use super::postcode::{is_valid_postcode, normalize_postcode};
use super::types::{RawPricePaid, RawTitle};
use crate::config::RegistryConfig;
use crate::error::{Operation, Registry, RegistryError, TransportError};
use crate::model::{PriceObservation, RawRecord, TitleRecord};
use crate::normalize::{parse_payload, ItemList};
use crate::transport::{encode_path_segment, HttpTransport, RegistryRequest, RegistryTransport};

pub const DEFAULT_POSTCODE_LIMIT: usize = 100;
pub const DEFAULT_ADDRESS_LIMIT: usize = 50;

pub struct PropertyRegistryClient {
    transport: Arc<dyn RegistryTransport>,
}

impl PropertyRegistryClient {
    pub fn new(config: &RegistryConfig) -> Result<Self, TransportError> {
        Ok(Self::with_transport(Arc::new(HttpTransport::new(config)?)))
    }

    pub fn with_transport(transport: Arc<dyn RegistryTransport>) -> Self {
        Self { transport }
    }

    async fn get<T: DeserializeOwned>(
        &self,
        operation: Operation,
        shape: &'static str,
        request: RegistryRequest,
    ) -> Result<T, RegistryError> {
        let response = self.transport.send(request).await.map_err(|e| {
            tracing::warn!(registry = %Registry::Property, operation = %operation, error = %e, "registry call failed");
            RegistryError::new(Registry::Property, operation, e)
        })?;

        parse_payload(shape, &response.body)
            .map_err(|e| RegistryError::new(Registry::Property, operation, e))
    }

    /// Fetch the register entry for a title.
    pub async fn fetch_title_record(&self, title_number: &str) -> Result<TitleRecord, RegistryError> {
        let path = title_path(title_number, "", Operation::FetchTitleRecord)?;
        let raw: RawTitle = self
            .get(Operation::FetchTitleRecord, "title record", RegistryRequest::get(path))
            .await?;
        Ok(normalize_title(&raw))
    }

    /// Sales recorded in a postcode.
    ///
    /// The postcode is upper-cased and stripped of whitespace before the call.
    /// A postcode that is not UK-shaped is rejected without a request.
    pub async fn fetch_prices_by_postcode(
        &self,
        postcode: &str,
        limit: usize,
    ) -> Result<Vec<PriceObservation>, RegistryError> {
        let operation = Operation::FetchPricesByPostcode;
        let postcode = normalize_postcode(postcode);
        if !is_valid_postcode(&postcode) {
            return Err(RegistryError::invalid_input(
                Registry::Property,
                operation,
                format!("not a UK postcode: {postcode:?}"),
            ));
        }
        check_limit(limit, operation)?;

        let request = RegistryRequest::get("/def/ppi")
            .with_query("postcode", &postcode)
            .with_query("limit", limit);
        self.price_observations(operation, request).await
    }

    /// Sales whose street matches an address fragment.
    pub async fn fetch_prices_by_address(
        &self,
        address_fragment: &str,
        limit: usize,
    ) -> Result<Vec<PriceObservation>, RegistryError> {
        let operation = Operation::FetchPricesByAddress;
        let fragment = address_fragment.trim();
        if fragment.is_empty() {
            return Err(RegistryError::invalid_input(
                Registry::Property,
                operation,
                "address fragment must not be empty",
            ));
        }
        check_limit(limit, operation)?;

        let request = RegistryRequest::get("/def/ppi")
            .with_query("street", fragment)
            .with_query("limit", limit);
        self.price_observations(operation, request).await
    }

    /// Proprietorship history for a title, as the registry returned it.
    pub async fn fetch_ownership_history(
        &self,
        title_number: &str,
    ) -> Result<Vec<RawRecord>, RegistryError> {
        let path = title_path(title_number, "/proprietors", Operation::FetchOwnershipHistory)?;
        let history: ItemList<RawRecord> = self
            .get(
                Operation::FetchOwnershipHistory,
                "ownership history",
                RegistryRequest::get(path),
            )
            .await?;
        Ok(history.into_items())
    }

    async fn price_observations(
        &self,
        operation: Operation,
        request: RegistryRequest,
    ) -> Result<Vec<PriceObservation>, RegistryError> {
        let rows: ItemList<RawPricePaid> = self.get(operation, "price paid list", request).await?;
        Ok(rows.into_items().iter().map(normalize_price_paid).collect())
    }
}

fn title_path(title_number: &str, suffix: &str, operation: Operation) -> Result<String, RegistryError> {
    let title = title_number.trim().to_uppercase();
    if title.is_empty() {
        return Err(RegistryError::invalid_input(
            Registry::Property,
            operation,
            "title number must not be empty",
        ));
    }
    Ok(format!("/def/ccod/{}{}", encode_path_segment(&title), suffix))
}

fn check_limit(limit: usize, operation: Operation) -> Result<(), RegistryError> {
    if limit == 0 {
        return Err(RegistryError::invalid_input(
            Registry::Property,
            operation,
            "limit must be at least 1",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RegistryFailure;
    use crate::model::Tenure;
    use crate::transport::InMemoryTransport;
    use serde_json::json;

    fn client(transport: InMemoryTransport) -> (PropertyRegistryClient, Arc<InMemoryTransport>) {
        let transport = Arc::new(transport);
        (
            PropertyRegistryClient::with_transport(transport.clone()),
            transport,
        )
    }

    #[tokio::test]
    async fn test_postcode_is_normalized_before_the_call() {
        let (client, transport) = client(InMemoryTransport::new().with_json(
            "/def/ppi?postcode=SW1A1AA&limit=100",
            json!({ "items": [
                { "price": 380000, "postcode": "SW1A 1AA" },
                { "price": 450000, "postcode": "SW1A 1AA" }
            ]}),
        ));

        let prices = client
            .fetch_prices_by_postcode(" sw1a 1aa ", DEFAULT_POSTCODE_LIMIT)
            .await
            .unwrap();
        assert_eq!(prices.len(), 2);
        assert_eq!(prices[1].price, 450_000);
        assert_eq!(
            transport.request_paths(),
            vec!["/def/ppi?postcode=SW1A1AA&limit=100"]
        );
    }

    #[tokio::test]
    async fn test_invalid_postcode_is_rejected_before_the_call() {
        let (client, transport) = client(InMemoryTransport::new());
        let err = client
            .fetch_prices_by_postcode("NOT A POSTCODE", 100)
            .await
            .unwrap_err();
        assert_eq!(err.registry, Registry::Property);
        assert_eq!(err.operation, Operation::FetchPricesByPostcode);
        assert!(matches!(err.cause, RegistryFailure::InvalidInput(_)));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_prices_by_address() {
        let (client, transport) = client(InMemoryTransport::new().with_json(
            "/def/ppi?street=Downing+Street&limit=50",
            json!({ "items": [{ "price": 1250000, "street": "DOWNING STREET", "tenure": "freehold" }] }),
        ));

        let prices = client
            .fetch_prices_by_address("Downing Street", DEFAULT_ADDRESS_LIMIT)
            .await
            .unwrap();
        assert_eq!(prices[0].tenure, Tenure::Freehold);
        assert_eq!(transport.requests().len(), 1);

        let err = client.fetch_prices_by_address(" ", 50).await.unwrap_err();
        assert!(matches!(err.cause, RegistryFailure::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_price_row_without_price_is_malformed() {
        let (client, _) = client(InMemoryTransport::new().with_json(
            "/def/ppi?postcode=M11AE&limit=100",
            json!({ "items": [{ "postcode": "M1 1AE" }] }),
        ));
        let err = client.fetch_prices_by_postcode("M1 1AE", 100).await.unwrap_err();
        assert!(matches!(err.cause, RegistryFailure::Normalization(_)));
    }

    #[tokio::test]
    async fn test_zero_price_row_fails_the_whole_list() {
        let (client, _) = client(InMemoryTransport::new().with_json(
            "/def/ppi?postcode=M11AE&limit=100",
            json!({ "items": [{ "price": 400000 }, { "price": 0 }] }),
        ));
        let err = client.fetch_prices_by_postcode("M1 1AE", 100).await.unwrap_err();
        assert_eq!(err.operation, Operation::FetchPricesByPostcode);
        assert!(matches!(err.cause, RegistryFailure::Normalization(_)));
    }

    #[tokio::test]
    async fn test_fetch_title_and_ownership_history() {
        let (client, transport) = client(
            InMemoryTransport::new()
                .with_json(
                    "/def/ccod/NGL123456",
                    json!({ "title_number": "NGL123456", "tenure": "Leasehold" }),
                )
                .with_json(
                    "/def/ccod/NGL123456/proprietors",
                    json!({ "items": [
                        { "proprietor_name": "ACME LETTINGS LIMITED", "date_proprietor_added": "2019-03-29" }
                    ]}),
                ),
        );

        let title = client.fetch_title_record("ngl123456").await.unwrap();
        assert_eq!(title.tenure, Tenure::Leasehold);

        let history = client.fetch_ownership_history("NGL123456").await.unwrap();
        assert_eq!(history[0]["proprietor_name"], json!("ACME LETTINGS LIMITED"));

        assert_eq!(
            transport.request_paths(),
            vec!["/def/ccod/NGL123456", "/def/ccod/NGL123456/proprietors"]
        );
    }

    #[tokio::test]
    async fn test_transport_failure_is_attributed() {
        let (client, _) = client(InMemoryTransport::new().with_error(
            "/def/ccod/NGL1",
            TransportError::Status {
                url: "/def/ccod/NGL1".into(),
                status: 503,
                body: "maintenance".into(),
            },
        ));
        let err = client.fetch_title_record("NGL1").await.unwrap_err();
        assert_eq!(err.operation, Operation::FetchTitleRecord);
        assert!(err.is_retryable());
    }
}
