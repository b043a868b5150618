use std::sync::Arc;

use crate::analytics::events::{Hit, SetCommand};

/// Host-injected handle to the external tracking client.
///
/// The adapter treats the client as opaque: it forwards `set` commands to it
/// and fans hits out to whatever tracker instances it reports. Hosts
/// implement this over the real tracking library; tests implement it with
/// recording fakes.
pub trait GaClient: Send + Sync {
    /// Forwards one property-setter command.
    fn set(&self, command: &SetCommand);

    /// Enumerates the registered tracker instances, in the client's own
    /// order.
    fn trackers(&self) -> Vec<Arc<dyn GaTracker>>;
}

/// One registered measurement target of the external client.
pub trait GaTracker: Send + Sync {
    fn send(&self, hit: &Hit);
}
