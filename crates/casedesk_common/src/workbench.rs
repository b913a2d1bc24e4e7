//! Workbench: the case store, calculator and listeners behind one front end.
//!
//! Every mutation is persisted before listeners run, so a listener that
//! reads the cases file sees the new state. A mutation whose save fails is
//! undone in memory, leaving the store matching the file.

use tracing::{info, warn};

use crate::case::{Case, CaseKey};
use crate::error::StoreError;
use crate::events::CaseEvents;
use crate::scheduler::{render_schedule, Schedule, ScheduleCalculator};
use crate::store::CaseStore;

#[derive(Debug)]
pub struct Workbench {
    store: CaseStore,
    calculator: ScheduleCalculator,
    events: CaseEvents,
}

impl Workbench {
    pub fn new(store: CaseStore, calculator: ScheduleCalculator) -> Self {
        Self {
            store,
            calculator,
            events: CaseEvents::new(),
        }
    }

    pub fn store(&self) -> &CaseStore {
        &self.store
    }

    pub fn calculator(&self) -> &ScheduleCalculator {
        &self.calculator
    }

    pub fn events_mut(&mut self) -> &mut CaseEvents {
        &mut self.events
    }

    /// Validate, store and persist a case. The day is saved in the
    /// calendar's own spelling.
    pub fn save_case(&mut self, mut case: Case) -> Result<Option<Case>, StoreError> {
        case.validate(self.calculator.calendar())?;
        case.last_contact_day = self
            .calculator
            .calendar()
            .canonical_name(&case.last_contact_day)?
            .to_string();

        let key = case.key();
        let previous = self.store.upsert(case.clone());
        if let Err(err) = self.store.save() {
            warn!(key = %key, error = %err, "save failed, restoring previous case");
            match &previous {
                Some(old) => {
                    self.store.upsert(old.clone());
                }
                None => {
                    self.store.remove(&key);
                }
            }
            return Err(err);
        }
        info!(key = %case.key(), replaced = previous.is_some(), "case saved");

        self.events.field_changed(&case);
        Ok(previous)
    }

    pub fn delete_case(&mut self, key: &CaseKey) -> Result<Case, StoreError> {
        let removed = self
            .store
            .remove(key)
            .ok_or_else(|| StoreError::NotFound(key.clone()))?;
        if let Err(err) = self.store.save() {
            warn!(key = %key, error = %err, "save failed, restoring deleted case");
            self.store.upsert(removed);
            return Err(err);
        }
        info!(key = %key, "case deleted");
        Ok(removed)
    }

    /// Select a stored case and return its formatted schedule.
    pub fn select(&self, key: &CaseKey) -> Result<String, StoreError> {
        Ok(render_schedule(&self.select_schedule(key)?))
    }

    /// Select a stored case and return its computed schedule.
    pub fn select_schedule(&self, key: &CaseKey) -> Result<Schedule, StoreError> {
        let case = self.case(key)?;
        self.events.selection_changed(key);
        Ok(self.calculator.calculate_schedule(case)?)
    }

    pub fn schedule_for(&self, key: &CaseKey) -> Result<Schedule, StoreError> {
        let case = self.case(key)?;
        Ok(self.calculator.calculate_schedule(case)?)
    }

    fn case(&self, key: &CaseKey) -> Result<&Case, StoreError> {
        self.store
            .get(key)
            .ok_or_else(|| StoreError::NotFound(key.clone()))
    }
}
