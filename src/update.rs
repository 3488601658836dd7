use serde::{Deserialize, Serialize};

/// The per-source mutation kind carried by an [`Update`] envelope.
///
/// There is no fourth variant: an "invalid operation code" (§7 of the design
/// notes) is unrepresentable for in-process callers because this is a plain
/// Rust enum. A caller decoding an envelope from an external format (JSON,
/// TOML, a future wire protocol) hits that error class as an ordinary `serde`
/// deserialization failure on an unknown discriminant — no separate
/// validation pass is needed to reject it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Operation {
    /// Merge the listed entities into this source's view (upsert by name).
    Add,
    /// Remove the listed entities (by name) from this source's view. Missing
    /// names are ignored, not an error.
    Remove,
    /// Replace this source's entire view with exactly the listed entities.
    Set,
}

/// One message sent on a source channel: an operation plus the entities it
/// applies to.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Update<E> {
    pub op: Operation,
    pub entities: Vec<E>,
}

impl<E> Update<E> {
    pub fn add(entities: Vec<E>) -> Self {
        Self {
            op: Operation::Add,
            entities,
        }
    }

    pub fn remove(entities: Vec<E>) -> Self {
        Self {
            op: Operation::Remove,
            entities,
        }
    }

    pub fn set(entities: Vec<E>) -> Self {
        Self {
            op: Operation::Set,
            entities,
        }
    }
}
