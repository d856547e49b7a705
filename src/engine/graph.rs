use crate::signal::{BoundCallback, Signature};
use crate::traits::{PortSpec, WorkerHandle};
use std::fmt;

/// A declared port plus the callbacks currently bound into it.
///
/// Bindings only ever grow, in connection order; there is no unbind.
#[derive(Debug)]
pub struct PortState {
    pub name: String,
    pub expected: Signature,
    pub bindings: Vec<BoundCallback>,
}

impl PortState {
    pub fn new(spec: &PortSpec) -> Self {
        Self {
            name: spec.name.to_string(),
            expected: spec.signature.clone(),
            bindings: Vec::new(),
        }
    }
}

/// One constructed worker plus the engine-side record of its wiring.
///
/// The alias is captured at insertion time and is the sole addressing key
/// used while resolving connections.
pub struct ServiceInstance {
    pub class_name: String,
    pub alias: String,
    pub worker: WorkerHandle,
    pub ports: Vec<PortState>,
}

impl ServiceInstance {
    pub fn port(&self, name: &str) -> Option<&PortState> {
        self.ports.iter().find(|port| port.name == name)
    }

    pub fn port_mut(&mut self, name: &str) -> Option<&mut PortState> {
        self.ports.iter_mut().find(|port| port.name == name)
    }
}

impl fmt::Debug for ServiceInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceInstance")
            .field("class_name", &self.class_name)
            .field("alias", &self.alias)
            .field("ports", &self.ports)
            .finish()
    }
}

/// The populated, alias-indexed service graph.
///
/// Instances keep document order so a serialized snapshot lists services the
/// way the source document did. Alias lookup takes the first match; the
/// builder refuses duplicate aliases so in practice there is exactly one.
#[derive(Debug, Default)]
pub struct ServiceGraph {
    instances: Vec<ServiceInstance>,
}

impl ServiceGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, instance: ServiceInstance) {
        self.instances.push(instance);
    }

    /// First instance carrying the alias, if any.
    pub fn find(&self, alias: &str) -> Option<&ServiceInstance> {
        self.instances.iter().find(|instance| instance.alias == alias)
    }

    pub fn find_mut(&mut self, alias: &str) -> Option<&mut ServiceInstance> {
        self.instances.iter_mut().find(|instance| instance.alias == alias)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ServiceInstance> {
        self.instances.iter()
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::{ScalarKind, ScalarValue, Signature};
    use crate::traits::{PropertySpec, Worker};
    use std::sync::{Arc, Mutex};

    struct Inert {
        alias: String,
    }

    impl Worker for Inert {
        fn alias(&self) -> String {
            self.alias.clone()
        }

        fn load_defaults(&mut self) {}

        fn properties(&self) -> &'static [PropertySpec] {
            &[]
        }

        fn get_property(&self, _name: &str) -> Option<ScalarValue> {
            None
        }

        fn set_property(&mut self, _name: &str, _value: ScalarValue) {}
    }

    fn instance(alias: &str) -> ServiceInstance {
        let worker: Box<dyn Worker> = Box::new(Inert { alias: alias.to_string() });
        ServiceInstance {
            class_name: "Inert".to_string(),
            alias: alias.to_string(),
            worker: Arc::new(Mutex::new(worker)),
            ports: Vec::new(),
        }
    }

    #[test]
    fn test_find_returns_first_match() {
        let mut graph = ServiceGraph::new();
        graph.insert(instance("A"));
        graph.insert(instance("B"));

        assert_eq!(graph.len(), 2);
        assert_eq!(graph.find("B").unwrap().alias, "B");
        assert!(graph.find("C").is_none());
    }

    #[test]
    fn test_port_lookup() {
        let mut entry = instance("A");
        entry.ports.push(PortState {
            name: "record".to_string(),
            expected: Signature::of(&[ScalarKind::Text]),
            bindings: Vec::new(),
        });

        assert!(entry.port("record").is_some());
        assert!(entry.port("missing").is_none());
    }
}
