use serde::{Deserialize, Serialize};

/// Anything the merger can key by name.
///
/// Both `Service` and `Endpoints` carry an immutable name used as the merge
/// key; payload fields beyond the name are opaque to the mux, which compares
/// and replaces entities as whole values (never merges field-by-field).
pub trait Named {
    fn name(&self) -> &str;
}

/// A named service and the port it listens on. `metadata` is opaque to the
/// mux — carried through snapshots unexamined, same as an event payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub name: String,
    pub port: u16,
    #[serde(default)]
    pub metadata: serde_json::Value,
}

impl Named for Service {
    fn name(&self) -> &str {
        &self.name
    }
}

/// The ordered backend address list for a service of the same name.
///
/// The list's order is caller-defined and preserved verbatim; the mux never
/// reorders it. `addresses` holds `host:port` strings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Endpoints {
    pub name: String,
    pub addresses: Vec<String>,
    #[serde(default)]
    pub metadata: serde_json::Value,
}

impl Named for Endpoints {
    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_name_is_the_merge_key() {
        let svc = Service {
            name: "foo".to_string(),
            port: 10,
            metadata: serde_json::Value::Null,
        };
        assert_eq!(svc.name(), "foo");
    }

    #[test]
    fn endpoints_name_is_the_merge_key() {
        let eps = Endpoints {
            name: "foo".to_string(),
            addresses: vec!["10.0.0.1:8080".to_string()],
            metadata: serde_json::Value::Null,
        };
        assert_eq!(eps.name(), "foo");
    }
}
