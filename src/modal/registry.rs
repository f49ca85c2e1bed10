use std::collections::HashMap;

use tracing::debug;

use crate::modal::{ModalBody, ModalDefinition, ModalElement, ModalError, ModalId};

/// A registered dialog together with its realized element.
pub struct ModalEntry {
    pub definition: ModalDefinition,
    pub element: ModalElement,
}

/// Dialogs keyed by id.
#[derive(Default)]
pub struct ModalRegistry {
    entries: HashMap<ModalId, ModalEntry>,
}

impl ModalRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a realized dialog. Fails without touching the registry if the id is taken.
    pub fn insert(
        &mut self,
        definition: ModalDefinition,
        element: ModalElement,
    ) -> Result<(), ModalError> {
        let id = definition.id().clone();
        if self.entries.contains_key(&id) {
            return Err(ModalError::DuplicateId(id));
        }
        debug!(%id, "Registered dialog");
        self.entries.insert(
            id,
            ModalEntry {
                definition,
                element,
            },
        );
        Ok(())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&ModalEntry> {
        self.entries.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut ModalEntry> {
        self.entries.get_mut(id)
    }

    /// Swap in new body content, returning false for unknown ids.
    pub fn replace_body(&mut self, id: &str, body: ModalBody) -> bool {
        let Some(entry) = self.entries.get_mut(id) else {
            return false;
        };
        entry.element.set_body(&body);
        entry.definition.set_body(body);
        true
    }
}
