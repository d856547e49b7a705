pub mod worker;

pub use worker::{EmitterSpec, PortSpec, PropertySpec, Worker, WorkerHandle};
