//! Concurrent stream list aggregation.

use std::sync::atomic::{AtomicU64, Ordering};

use futures::future::join_all;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use streamboard_core::constants::DEFAULT_READY_THRESHOLD;
use streamboard_core::error::{Result, StreamboardError};
use streamboard_core::types::{StreamReference, StreamView};

use crate::resolver::SummaryResolver;

/// Loader configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// Minimum published list length before the view is marked ready.
    pub ready_threshold: usize,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            ready_threshold: DEFAULT_READY_THRESHOLD,
        }
    }
}

impl LoaderConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the readiness threshold.
    pub fn ready_threshold(mut self, threshold: usize) -> Self {
        self.ready_threshold = threshold;
        self
    }
}

/// Result of one aggregation invocation.
#[derive(Clone, Debug)]
pub enum LoadOutcome {
    /// This invocation was still the latest and its view was published.
    Published {
        /// The merged, ordered view model.
        streams: Vec<StreamView>,
        /// Whether the view is ready for rendering.
        ready: bool,
    },
    /// A newer invocation began first; the computed result was discarded.
    Superseded,
}

#[derive(Default)]
struct PublishedState {
    streams: Vec<StreamView>,
    ready: bool,
}

/// Aggregates stream references into the published view model.
///
/// Each [`StreamLoader::load`] call is one aggregation invocation over an
/// input snapshot. Invocations are numbered by a generation counter; an
/// invocation that is no longer the latest when its resolutions settle
/// discards its result instead of publishing. The underlying reads are not
/// cancelled, only abandoned.
pub struct StreamLoader {
    resolver: SummaryResolver,
    config: LoaderConfig,
    generation: AtomicU64,
    published: RwLock<PublishedState>,
}

impl StreamLoader {
    /// Creates a loader over the given resolver.
    pub fn new(resolver: SummaryResolver, config: LoaderConfig) -> Self {
        Self {
            resolver,
            config,
            generation: AtomicU64::new(0),
            published: RwLock::new(PublishedState::default()),
        }
    }

    /// The resolver this loader aggregates through.
    pub fn resolver(&self) -> &SummaryResolver {
        &self.resolver
    }

    /// Resolves every reference concurrently and publishes the merged view.
    ///
    /// All resolutions are fired before any is awaited, and all settle before
    /// the outcome is decided. If any resolution failed, the whole invocation
    /// fails with the first failure and nothing is published. A successful
    /// invocation publishes only if no newer invocation has started since.
    #[instrument(skip(self, references), fields(count = references.len()))]
    pub async fn load(&self, references: &[StreamReference]) -> Result<LoadOutcome> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(generation, "Starting aggregation");

        let resolutions = references.iter().map(|reference| {
            let resolver = self.resolver.clone();
            let reference = reference.clone();
            async move {
                match resolver.resolve(&reference.address).await {
                    Ok(summary) => Ok(StreamView::new(reference, summary)),
                    Err(source) => Err((reference.address, source)),
                }
            }
        });

        let settled = join_all(resolutions).await;

        let mut streams = Vec::with_capacity(settled.len());
        let mut first_failure = None;
        for result in settled {
            match result {
                Ok(view) => streams.push(view),
                Err(failure) => {
                    first_failure.get_or_insert(failure);
                }
            }
        }

        if let Some((address, source)) = first_failure {
            warn!(generation, %address, "Aggregation failed");
            return Err(StreamboardError::Aggregation {
                address,
                source: Box::new(source),
            });
        }

        if self.generation.load(Ordering::SeqCst) != generation {
            debug!(generation, "Aggregation superseded, discarding result");
            return Ok(LoadOutcome::Superseded);
        }

        let ready = {
            let mut published = self.published.write();
            published.streams = streams.clone();
            if streams.len() >= self.config.ready_threshold {
                published.ready = true;
            }
            published.ready
        };

        info!(generation, count = streams.len(), ready, "Published stream view");
        Ok(LoadOutcome::Published { streams, ready })
    }

    /// The currently published view model and readiness flag.
    pub fn snapshot(&self) -> (Vec<StreamView>, bool) {
        let published = self.published.read();
        (published.streams.clone(), published.ready)
    }

    /// Whether the published view has reached the readiness threshold.
    pub fn is_ready(&self) -> bool {
        self.published.read().ready
    }
}
