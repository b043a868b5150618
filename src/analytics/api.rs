use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::analytics::client::GaClient;
use crate::analytics::events::{Hit, Pageview, SetCommand, Timing};
use crate::logger::Logger;

const LOGGER_NAME: &str = "ga-adapter";

/// Adapter settings applied at construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnalyticsSettings {
    pub collection_enabled: bool,
}

impl Default for AnalyticsSettings {
    fn default() -> Self {
        Self {
            collection_enabled: true,
        }
    }
}

/// Adapter over a host-provided tracking client.
///
/// Every operation degrades to a silent no-op when no client was injected;
/// analytics must never block or break the host application. Cloning is
/// cheap and clones share state.
#[derive(Clone)]
pub struct Analytics {
    inner: Arc<AnalyticsInner>,
}

struct AnalyticsInner {
    client: Option<Arc<dyn GaClient>>,
    logger: Logger,
    collection_enabled: AtomicBool,
}

impl fmt::Debug for Analytics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Analytics")
            .field("client_present", &self.inner.client.is_some())
            .field("collection_enabled", &self.collection_enabled())
            .finish()
    }
}

impl Analytics {
    /// Creates an adapter over the injected tracking client. `None` models a
    /// host where the tracking library never loaded.
    pub fn new(client: Option<Arc<dyn GaClient>>) -> Self {
        Self::with_settings(client, AnalyticsSettings::default())
    }

    pub fn with_settings(client: Option<Arc<dyn GaClient>>, settings: AnalyticsSettings) -> Self {
        let inner = AnalyticsInner {
            client,
            logger: Logger::new(LOGGER_NAME),
            collection_enabled: AtomicBool::new(settings.collection_enabled),
        };
        Self {
            inner: Arc::new(inner),
        }
    }

    /// The adapter's diagnostic logger. Hosts can attach a handler or tune
    /// the level; the adapter itself only writes through it on malformed
    /// input.
    pub fn logger(&self) -> &Logger {
        &self.inner.logger
    }

    /// Property setter over a loosely-typed argument list, in the shape the
    /// external client's `set` command takes.
    ///
    /// A leading object literal is forwarded whole and any further arguments
    /// are ignored. Otherwise the first two arguments are forwarded as a
    /// field name / field value pair when at least one of them is a string;
    /// anything else logs a diagnostic and forwards nothing. An empty list
    /// is a no-op without a diagnostic.
    pub fn set(&self, args: &[Value]) {
        if self.inner.client.is_none() {
            return;
        }

        match SetCommand::from_args(args) {
            Ok(Some(command)) => self.set_command(command),
            Ok(None) => {}
            Err(err) => self.inner.logger.warn(err.to_string()),
        }
    }

    /// Sets a single named field.
    pub fn set_field(&self, name: impl Into<String>, value: impl Into<String>) {
        self.set_command(SetCommand::Field(
            Value::String(name.into()),
            Value::String(value.into()),
        ));
    }

    /// Applies a whole configuration map in one call.
    pub fn set_bulk(&self, config: Map<String, Value>) {
        self.set_command(SetCommand::Bulk(config));
    }

    /// Forwards an already-shaped command: the typed front door for callers
    /// that construct [`SetCommand`] variants directly.
    pub fn set_command(&self, command: SetCommand) {
        let Some(client) = self.client() else { return };
        if self.collection_enabled() {
            client.set(&command);
        }
    }

    /// Sends one pageview hit to every registered tracker instance.
    pub fn track_page(&self, view: Pageview) {
        self.send_hit(Hit::Pageview(view));
    }

    /// Sends one timing hit to every registered tracker instance.
    pub fn track_time(&self, timing: Timing) {
        self.send_hit(Hit::Timing(timing));
    }

    /// Enables or disables forwarding to the client. Argument validation and
    /// its diagnostics still run while disabled.
    pub fn set_collection_enabled(&self, enabled: bool) {
        self.inner
            .collection_enabled
            .store(enabled, Ordering::SeqCst);
    }

    pub fn collection_enabled(&self) -> bool {
        self.inner.collection_enabled.load(Ordering::SeqCst)
    }

    fn send_hit(&self, hit: Hit) {
        let Some(client) = self.client() else { return };
        if !self.collection_enabled() {
            return;
        }
        for tracker in client.trackers() {
            tracker.send(&hit);
        }
    }

    fn client(&self) -> Option<&Arc<dyn GaClient>> {
        self.inner.client.as_ref()
    }
}
