//! Listener registry for case edits and selection changes.

use crate::case::{Case, CaseKey};

type FieldListener = Box<dyn Fn(&Case) + Send + Sync>;
type SelectionListener = Box<dyn Fn(&CaseKey) + Send + Sync>;

/// Registered listeners, notified in registration order
#[derive(Default)]
pub struct CaseEvents {
    field_changed: Vec<FieldListener>,
    selection_changed: Vec<SelectionListener>,
}

impl CaseEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_field_changed<F>(&mut self, listener: F)
    where
        F: Fn(&Case) + Send + Sync + 'static,
    {
        self.field_changed.push(Box::new(listener));
    }

    pub fn on_selection_changed<F>(&mut self, listener: F)
    where
        F: Fn(&CaseKey) + Send + Sync + 'static,
    {
        self.selection_changed.push(Box::new(listener));
    }

    pub fn field_changed(&self, case: &Case) {
        for listener in &self.field_changed {
            listener(case);
        }
    }

    pub fn selection_changed(&self, key: &CaseKey) {
        for listener in &self.selection_changed {
            listener(key);
        }
    }

}

impl std::fmt::Debug for CaseEvents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaseEvents")
            .field("field_changed", &self.field_changed.len())
            .field("selection_changed", &self.selection_changed.len())
            .finish()
    }
}
