use crate::signal::{EventCallback, ScalarKind, ScalarValue, Signature};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// A settable scalar property, matched by exact name against configuration
/// keys.
#[derive(Debug, Clone, Copy)]
pub struct PropertySpec {
    pub name: &'static str,
    pub kind: ScalarKind,
}

/// A named input slot and the callback shape it accepts.
#[derive(Debug, Clone, PartialEq)]
pub struct PortSpec {
    pub name: &'static str,
    pub signature: Signature,
}

/// A named output operation whose parameter list defines its signature.
#[derive(Debug, Clone, PartialEq)]
pub struct EmitterSpec {
    pub name: &'static str,
    pub signature: Signature,
}

/// Shared handle to a constructed worker.
///
/// Event delivery locks the destination for the duration of its handler, so
/// a connection cycle that re-enters the emitting worker will deadlock. The
/// wiring layer does not detect cycles.
pub type WorkerHandle = Arc<Mutex<Box<dyn Worker>>>;

/// The capability contract every pluggable worker implements.
///
/// A worker is addressed by its alias, configured through named scalar
/// properties, and participates in the event graph through declared ports
/// (inputs) and emitters (outputs). The engine calls `load_defaults` exactly
/// once, before any configuration override is applied; `prepare` runs once
/// more, just before scheduling begins, for resource setup that should not
/// happen at wiring time.
pub trait Worker: Send {
    /// The unique addressing key for this instance.
    fn alias(&self) -> String;

    /// Establish required defaults: alias, intervals, format strings.
    fn load_defaults(&mut self);

    /// One-shot setup hook, run before the first tick.
    fn prepare(&mut self) {}

    /// Periodic work, driven by the scheduler at `tick_interval`.
    fn tick(&mut self) {}

    /// How often `tick` should run. `None` for purely reactive workers.
    fn tick_interval(&self) -> Option<Duration> {
        None
    }

    /// The declared scalar property schema.
    fn properties(&self) -> &'static [PropertySpec];

    /// Current value of a property, or `None` if it is not readable.
    fn get_property(&self, name: &str) -> Option<ScalarValue>;

    /// Assign a property. Unknown names and mismatched kinds are ignored.
    fn set_property(&mut self, name: &str, value: ScalarValue);

    /// Declared input slots.
    fn ports(&self) -> Vec<PortSpec> {
        Vec::new()
    }

    /// Declared output operations.
    fn emitters(&self) -> Vec<EmitterSpec> {
        Vec::new()
    }

    /// Handle an event arriving on the named port.
    fn deliver(&mut self, _port: &str, _args: &[ScalarValue]) {}

    /// Register a callback with the named emitter's multicast list.
    fn subscribe(&mut self, _emitter: &str, _callback: EventCallback) {}
}
