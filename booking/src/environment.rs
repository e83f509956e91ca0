//! Dependency container for the wizard reducer.
//!
//! All side-effecting collaborators reach the reducer through this
//! environment, so production wiring and test doubles swap freely.

use std::sync::Arc;
use std::time::Duration;

use tripflow_core::environment::{Clock, SystemClock};

use crate::catalog::{HttpItemCatalog, ItemCatalog};
use crate::config::Config;
use crate::gateway::{BookingGateway, HttpBookingGateway};
use crate::notification::{LoggingNotifier, Notifier};

/// Environment dependencies for the wizard reducer
///
/// Production uses the HTTP collaborators and `SystemClock`; tests use
/// mocks and `FixedClock`.
#[derive(Clone)]
pub struct BookingEnvironment {
    /// Clock for timestamps and date defaults
    pub clock: Arc<dyn Clock>,
    /// Item-data lookup collaborator
    pub catalog: Arc<dyn ItemCatalog>,
    /// Booking submission collaborator
    pub gateway: Arc<dyn BookingGateway>,
    /// Notification side channel
    pub notifier: Arc<dyn Notifier>,
    /// Simulated payment processing delay before the gateway call
    pub processing_delay: Duration,
    /// Operator WhatsApp number for the booking notification
    pub operator_phone: String,
}

impl BookingEnvironment {
    /// Creates an environment from explicit collaborators
    #[must_use]
    pub fn new(
        clock: Arc<dyn Clock>,
        catalog: Arc<dyn ItemCatalog>,
        gateway: Arc<dyn BookingGateway>,
        notifier: Arc<dyn Notifier>,
        processing_delay: Duration,
        operator_phone: String,
    ) -> Self {
        Self {
            clock,
            catalog,
            gateway,
            notifier,
            processing_delay,
            operator_phone,
        }
    }

    /// Creates the production environment from configuration
    ///
    /// HTTP collaborators against the configured base URL, the logging
    /// notifier, and the system clock.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            Arc::new(SystemClock),
            HttpItemCatalog::shared(config.api_base_url.clone()),
            HttpBookingGateway::shared(config.api_base_url.clone()),
            LoggingNotifier::shared(),
            config.processing_delay(),
            config.operator_phone.clone(),
        )
    }
}
