//! Ordered fallback over upstream tiers.
//!
//! A tier is an async supplier returning `Ok(Some(value))` on a hit,
//! `Ok(None)` on a definitive miss and `Err` on failure. Tiers run strictly
//! in order, each at most once, and the first hit wins.

use std::future::Future;

use futures_util::future::{BoxFuture, FutureExt};
use tracing::{debug, warn};

use crate::error::{AdapterError, Result};

type Supplier<'a, T> = Box<dyn FnOnce() -> BoxFuture<'a, Result<Option<T>>> + Send + 'a>;

/// One named attempt in a fallback chain.
pub struct Tier<'a, T> {
    name: &'static str,
    supplier: Supplier<'a, T>,
}

impl<'a, T: 'a> Tier<'a, T> {
    pub fn new<F, Fut>(name: &'static str, supplier: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'a,
        Fut: Future<Output = Result<Option<T>>> + Send + 'a,
    {
        Self {
            name,
            supplier: Box::new(move || supplier().boxed()),
        }
    }
}

/// Outcome of running a fallback chain.
#[derive(Debug)]
pub enum FallbackOutcome<T> {
    /// A tier produced a value.
    Hit { tier: &'static str, value: T },
    /// Every tier missed or failed. Failures are kept in attempt order.
    Exhausted {
        failures: Vec<(&'static str, AdapterError)>,
    },
}

impl<T> FallbackOutcome<T> {
    /// The value, treating failures as misses.
    pub fn into_value(self) -> Option<T> {
        match self {
            Self::Hit { value, .. } => Some(value),
            Self::Exhausted { .. } => None,
        }
    }

    /// The value, or the last failure when no tier hit and at least one failed.
    pub fn into_result(self) -> Result<Option<T>> {
        match self {
            Self::Hit { value, .. } => Ok(Some(value)),
            Self::Exhausted { mut failures } => match failures.pop() {
                Some((_, err)) => Err(err),
                None => Ok(None),
            },
        }
    }
}

/// Run tiers in order until one hits.
pub async fn first_hit<'a, T>(tiers: Vec<Tier<'a, T>>) -> FallbackOutcome<T> {
    let mut failures = Vec::new();

    for tier in tiers {
        let name = tier.name;
        match (tier.supplier)().await {
            Ok(Some(value)) => {
                debug!("Tier '{}' hit", name);
                return FallbackOutcome::Hit { tier: name, value };
            }
            Ok(None) => debug!("Tier '{}' missed", name),
            Err(e) => {
                warn!("Tier '{}' failed: {}", name, e);
                failures.push((name, e));
            }
        }
    }

    FallbackOutcome::Exhausted { failures }
}
