//! # Webhook Addresses
//!
//! The externally reachable callback address of this connector is not known
//! until something first asks for it (it may depend on configuration loaded
//! after the protocol contexts were registered). [`WebhookAddress`] defers the
//! computation to the first call and memoizes the result.
//!
//! ## Concurrency
//!
//! The first resolution wins. Concurrent first callers block on the same
//! initialization and all observe the same value afterwards.

use std::sync::{Arc, OnceLock};

type Resolver = dyn Fn() -> String + Send + Sync;

/// A lazily resolved, memoized callback address.
#[derive(Clone)]
pub struct WebhookAddress {
    resolver: Arc<Resolver>,
    resolved: Arc<OnceLock<String>>,
}

impl std::fmt::Debug for WebhookAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebhookAddress")
            .field("resolved", &self.resolved.get())
            .finish_non_exhaustive()
    }
}

impl WebhookAddress {
    /// Create an address resolved by `resolver` on first use.
    pub fn lazy<F>(resolver: F) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        Self {
            resolver: Arc::new(resolver),
            resolved: Arc::new(OnceLock::new()),
        }
    }

    /// Create an already-known address.
    pub fn fixed(address: impl Into<String>) -> Self {
        let address = address.into();
        let resolved = OnceLock::new();
        let _ = resolved.set(address.clone());
        Self {
            resolver: Arc::new(move || address.clone()),
            resolved: Arc::new(resolved),
        }
    }

    /// Derive an address that appends `suffix` to this one.
    ///
    /// The derived address resolves this address (memoizing it) the first
    /// time it is itself resolved.
    pub fn with_suffix(&self, suffix: impl Into<String>) -> Self {
        let base = self.clone();
        let suffix = suffix.into();
        Self::lazy(move || format!("{}{}", base.get(), suffix))
    }

    /// The address, resolving it on first call.
    pub fn get(&self) -> &str {
        self.resolved.get_or_init(|| {
            let address = (self.resolver)();
            tracing::debug!(address = %address, "resolved webhook address");
            address
        })
    }

    /// Whether the address has been resolved already.
    pub fn is_resolved(&self) -> bool {
        self.resolved.get().is_some()
    }
}
