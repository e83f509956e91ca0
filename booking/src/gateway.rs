//! Booking submission collaborator.
//!
//! The finished draft is converted to a [`BookingRecord`] and handed to
//! this boundary exactly once per accepted booking. The HTTP
//! implementation posts to the hosted booking service; the mock serves
//! tests and the demo and counts how often it was called.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use reqwest::Client;
use thiserror::Error;

use crate::types::{BookingId, BookingRecord, SubmissionReceipt};

/// Booking gateway result
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Errors from the booking submission call
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum GatewayError {
    /// Network-level failure reaching the gateway
    #[error("Booking request failed: {0}")]
    Transport(String),

    /// Gateway answered with a non-success status
    #[error("Booking rejected with status {status}")]
    Rejected {
        /// HTTP status code
        status: u16,
    },

    /// Gateway accepted but the receipt did not parse
    #[error("Booking receipt parsing failed: {0}")]
    InvalidBody(String),
}

/// Booking gateway trait
///
/// Abstraction over the external service persisting finalized bookings.
pub trait BookingGateway: Send + Sync {
    /// Submit a finalized booking
    ///
    /// # Errors
    ///
    /// Returns an error if the submission fails; the wizard stays on the
    /// payment step and the draft remains intact for a retry.
    fn submit(
        &self,
        record: BookingRecord,
    ) -> Pin<Box<dyn Future<Output = GatewayResult<SubmissionReceipt>> + Send>>;
}

/// HTTP implementation backed by the hosted booking service
#[derive(Clone, Debug)]
pub struct HttpBookingGateway {
    client: Client,
    base_url: String,
}

impl HttpBookingGateway {
    /// Creates a new gateway client against the given base URL
    #[must_use]
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
        }
    }

    /// Creates an Arc-wrapped instance for sharing
    #[must_use]
    pub fn shared(base_url: String) -> Arc<dyn BookingGateway> {
        Arc::new(Self::new(base_url))
    }
}

impl BookingGateway for HttpBookingGateway {
    fn submit(
        &self,
        record: BookingRecord,
    ) -> Pin<Box<dyn Future<Output = GatewayResult<SubmissionReceipt>> + Send>> {
        let client = self.client.clone();
        let url = format!("{}/bookings", self.base_url);

        Box::pin(async move {
            tracing::debug!(url = %url, item = %record.item_name, "Submitting booking");

            let response = client
                .post(&url)
                .json(&record)
                .send()
                .await
                .map_err(|e| GatewayError::Transport(e.to_string()))?;

            let status = response.status();
            if !status.is_success() {
                return Err(GatewayError::Rejected {
                    status: status.as_u16(),
                });
            }

            response
                .json::<SubmissionReceipt>()
                .await
                .map_err(|e| GatewayError::InvalidBody(e.to_string()))
        })
    }
}

/// Mock booking gateway for development and testing
///
/// Counts submissions so tests can assert the double-submit guard:
/// exactly one gateway call per accepted booking.
#[derive(Clone, Debug)]
pub struct MockBookingGateway {
    accept: bool,
    calls: Arc<AtomicUsize>,
}

impl MockBookingGateway {
    /// Creates a mock that accepts every submission
    #[must_use]
    pub fn accepting() -> Self {
        Self {
            accept: true,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Creates a mock that rejects every submission
    #[must_use]
    pub fn rejecting() -> Self {
        Self {
            accept: false,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Creates an Arc-wrapped instance for sharing
    #[must_use]
    pub fn shared(self) -> Arc<dyn BookingGateway> {
        Arc::new(self)
    }

    /// Number of submissions received so far
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl BookingGateway for MockBookingGateway {
    fn submit(
        &self,
        record: BookingRecord,
    ) -> Pin<Box<dyn Future<Output = GatewayResult<SubmissionReceipt>> + Send>> {
        let accept = self.accept;
        let calls = Arc::clone(&self.calls);

        Box::pin(async move {
            // Simulate network delay
            tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

            calls.fetch_add(1, Ordering::SeqCst);

            if accept {
                let id = format!("booking_{}", uuid::Uuid::new_v4());

                tracing::info!(
                    customer = %record.customer_name,
                    item = %record.item_name,
                    total = record.total_price.cents(),
                    booking_id = %id,
                    "Mock gateway accepted booking"
                );

                Ok(SubmissionReceipt {
                    id: BookingId::new(id),
                })
            } else {
                tracing::info!(
                    customer = %record.customer_name,
                    item = %record.item_name,
                    "Mock gateway rejected booking"
                );

                Err(GatewayError::Rejected { status: 503 })
            }
        })
    }
}
