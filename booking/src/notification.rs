//! WhatsApp deep-link notification side channel.
//!
//! After an accepted submission the wizard builds a prefilled `wa.me`
//! link and hands it to a [`Notifier`]. Delivery is fire-and-forget:
//! failure never affects booking state.

use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

/// Builds a `wa.me` deep link with a URL-encoded prefilled message
#[must_use]
pub fn whatsapp_link(phone: &str, message: &str) -> String {
    format!("https://wa.me/{phone}?text={}", urlencoding::encode(message))
}

/// Notification delivery trait
///
/// Abstraction over how a deep link reaches the user: a browser would
/// open it, the demo logs it, tests record it.
pub trait Notifier: Send + Sync {
    /// Hand off a deep link; errors are swallowed by the implementation
    fn deliver(&self, link: String) -> Pin<Box<dyn Future<Output = ()> + Send>>;
}

/// Notifier that logs links instead of opening them
#[derive(Clone, Debug)]
pub struct LoggingNotifier;

impl LoggingNotifier {
    /// Creates a new logging notifier
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Creates an Arc-wrapped instance for sharing
    #[must_use]
    pub fn shared() -> Arc<dyn Notifier> {
        Arc::new(Self::new())
    }
}

impl Default for LoggingNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for LoggingNotifier {
    fn deliver(&self, link: String) -> Pin<Box<dyn Future<Output = ()> + Send>> {
        Box::pin(async move {
            tracing::info!(link = %link, "Notification link ready");
        })
    }
}

/// Mock notifier that records every delivered link
#[derive(Clone, Debug, Default)]
pub struct MockNotifier {
    links: Arc<Mutex<Vec<String>>>,
}

impl MockNotifier {
    /// Creates a new recording notifier
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an Arc-wrapped instance for sharing
    #[must_use]
    pub fn shared(self) -> Arc<dyn Notifier> {
        Arc::new(self)
    }

    /// Links delivered so far, in order
    #[must_use]
    pub fn delivered(&self) -> Vec<String> {
        self.links.lock().map(|links| links.clone()).unwrap_or_default()
    }
}

impl Notifier for MockNotifier {
    fn deliver(&self, link: String) -> Pin<Box<dyn Future<Output = ()> + Send>> {
        let links = Arc::clone(&self.links);
        Box::pin(async move {
            if let Ok(mut links) = links.lock() {
                links.push(link);
            }
        })
    }
}
