use crate::entity::Named;
use crate::update::{Operation, Update};
use std::collections::HashMap;
use std::sync::Arc;

/// Owns the authoritative `source-name -> (entity-name -> entity)` map for
/// one pipeline and applies update envelopes to it.
///
/// `Merger` is never shared: it lives exclusively inside the pipeline's agent
/// task (see `pipeline::agent`), so every method here runs with no
/// concurrent access to worry about. Entities are held behind `Arc` so a
/// snapshot can be hip-pocketed out to every handler as a refcount bump
/// instead of a deep copy of each payload.
pub(crate) struct Merger<E> {
    sources: HashMap<String, HashMap<String, Arc<E>>>,
}

impl<E: Named> Merger<E> {
    pub(crate) fn new() -> Self {
        Self {
            sources: HashMap::new(),
        }
    }

    /// Apply one update envelope from `source` to that source's view.
    ///
    /// A source entry is created lazily on first update; `ADD` never deletes
    /// entities from its source, `REMOVE` never touches other sources, and
    /// `SET` is scoped to its own source — the table in the merger design.
    pub(crate) fn apply(&mut self, source: &str, update: Update<E>) {
        match update.op {
            Operation::Add => {
                let map = self.sources.entry(source.to_string()).or_default();
                for entity in update.entities {
                    map.insert(entity.name().to_string(), Arc::new(entity));
                }
            }
            Operation::Remove => {
                let map = self.sources.entry(source.to_string()).or_default();
                for entity in update.entities {
                    map.remove(entity.name());
                }
            }
            Operation::Set => {
                let map: HashMap<String, Arc<E>> = update
                    .entities
                    .into_iter()
                    .map(|e| (e.name().to_string(), Arc::new(e)))
                    .collect();
                self.sources.insert(source.to_string(), map);
            }
        }
    }

    /// Flatten every source's entities into one snapshot.
    ///
    /// Two sources advertising the same entity name both contribute; the
    /// mux does not deduplicate across sources — that is a
    /// source-configuration concern left to handlers. Cloning the returned
    /// vector clones `Arc` handles, not the entities themselves, so the
    /// same payload allocation is shared by every handler of this snapshot.
    pub(crate) fn snapshot(&self) -> Vec<Arc<E>> {
        self.sources
            .values()
            .flat_map(|m| m.values().cloned())
            .collect()
    }
}
