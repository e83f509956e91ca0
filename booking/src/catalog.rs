//! Item catalog lookup collaborator.
//!
//! The wizard resolves the booked item's display data through this
//! boundary. The HTTP implementation talks to the hosted data service;
//! the mock serves tests and the demo. Lookup failures never block the
//! wizard: callers substitute [`fallback_item`] instead.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use reqwest::Client;
use thiserror::Error;

use crate::types::{ItemDetails, ItemId, ItemKind};

/// Item catalog result
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors from the item-catalog lookup
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// Network-level failure reaching the catalog
    #[error("Catalog request failed: {0}")]
    Transport(String),

    /// Catalog answered with a non-success status
    #[error("Catalog returned status {status}")]
    Status {
        /// HTTP status code
        status: u16,
    },

    /// Catalog answered 2xx but the body did not parse
    #[error("Catalog response parsing failed: {0}")]
    InvalidBody(String),
}

/// Item catalog trait
///
/// Abstraction over the hosted item-data service.
pub trait ItemCatalog: Send + Sync {
    /// Fetch display data for one bookable item
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup fails; callers fall back to the
    /// fixed demo item rather than surfacing the error.
    fn fetch_item(
        &self,
        kind: ItemKind,
        id: ItemId,
    ) -> Pin<Box<dyn Future<Output = CatalogResult<ItemDetails>> + Send>>;
}

/// The fixed demo item substituted when the catalog lookup fails
#[must_use]
pub fn fallback_item() -> ItemDetails {
    ItemDetails {
        name: "Hilton Sharm El-Sheikh".to_string(),
        location: "Sharm El-Sheikh, Egypt".to_string(),
        description: "Luxury resort on the Red Sea beach with stunning views and world-class service"
            .to_string(),
        price_per_night: 800.0,
        rating: 4.8,
        features: "WiFi, Air Conditioning, Gym, Spa, Multiple Restaurants".to_string(),
    }
}

/// HTTP implementation backed by the hosted data service
#[derive(Clone, Debug)]
pub struct HttpItemCatalog {
    client: Client,
    base_url: String,
}

impl HttpItemCatalog {
    /// Creates a new catalog client against the given base URL
    #[must_use]
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
        }
    }

    /// Creates an Arc-wrapped instance for sharing
    #[must_use]
    pub fn shared(base_url: String) -> Arc<dyn ItemCatalog> {
        Arc::new(Self::new(base_url))
    }

    fn item_url(&self, kind: ItemKind, id: &ItemId) -> String {
        format!("{}/items/{}/{}", self.base_url, kind.as_str(), id.as_str())
    }
}

impl ItemCatalog for HttpItemCatalog {
    fn fetch_item(
        &self,
        kind: ItemKind,
        id: ItemId,
    ) -> Pin<Box<dyn Future<Output = CatalogResult<ItemDetails>> + Send>> {
        let client = self.client.clone();
        let url = self.item_url(kind, &id);

        Box::pin(async move {
            tracing::debug!(url = %url, "Fetching item data");

            let response = client
                .get(&url)
                .send()
                .await
                .map_err(|e| CatalogError::Transport(e.to_string()))?;

            let status = response.status();
            if !status.is_success() {
                return Err(CatalogError::Status {
                    status: status.as_u16(),
                });
            }

            response
                .json::<ItemDetails>()
                .await
                .map_err(|e| CatalogError::InvalidBody(e.to_string()))
        })
    }
}

/// Mock item catalog for development and testing
#[derive(Clone, Debug)]
pub struct MockItemCatalog {
    response: CatalogResult<ItemDetails>,
}

impl MockItemCatalog {
    /// Creates a mock that resolves every lookup to the given item
    #[must_use]
    pub const fn returning(details: ItemDetails) -> Self {
        Self {
            response: Ok(details),
        }
    }

    /// Creates a mock that fails every lookup
    #[must_use]
    pub fn failing() -> Self {
        Self {
            response: Err(CatalogError::Transport("connection refused".to_string())),
        }
    }

    /// Creates an Arc-wrapped instance for sharing
    #[must_use]
    pub fn shared(self) -> Arc<dyn ItemCatalog> {
        Arc::new(self)
    }
}

impl ItemCatalog for MockItemCatalog {
    fn fetch_item(
        &self,
        kind: ItemKind,
        id: ItemId,
    ) -> Pin<Box<dyn Future<Output = CatalogResult<ItemDetails>> + Send>> {
        let response = self.response.clone();
        Box::pin(async move {
            // Simulate network delay
            tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

            match &response {
                Ok(details) => {
                    tracing::info!(
                        kind = %kind,
                        id = %id,
                        name = %details.name,
                        "Mock catalog resolved item"
                    );
                },
                Err(error) => {
                    tracing::info!(kind = %kind, id = %id, %error, "Mock catalog lookup failed");
                },
            }

            response
        })
    }
}
