//! Per-semester module store with a display mirror.
//!
//! # Responsibility
//! - Keep module identities unique within each semester list.
//! - Mirror the displayed semester into `display` on every write.
//! - Manage instructor references inside module records.
//!
//! # Invariants
//! - `display` always has the same content, in the same order, as
//!   `semesters[display_semester]`.
//! - The same code may appear in both semesters; the lists are independent.
//! - Semester list writes happen before mirror writes and carry every
//!   identity check, so a rejected call writes nothing.
//! - Only `show_semester` rebuilds `display` wholesale.

use crate::collection::{EntityKind, StoreError, StoreResult, UniqueList};
use crate::model::module::{Module, ModuleCode, Semester};
use crate::model::person::Person;

/// Module lists for both semesters plus the mirrored display list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleStore {
    semesters: [UniqueList<Module>; 2],
    display: UniqueList<Module>,
    display_semester: Semester,
}

impl ModuleStore {
    /// Creates an empty store displaying the first semester.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_module(&self, module: &Module, semester: Semester) -> bool {
        self.list(semester).contains(module)
    }

    pub fn has_module_code(&self, code: &ModuleCode, semester: Semester) -> bool {
        self.list(semester).contains_key(code)
    }

    pub fn find_module(&self, code: &ModuleCode, semester: Semester) -> Option<&Module> {
        self.list(semester).find_by_key(code)
    }

    pub fn add_module(&mut self, module: Module, semester: Semester) -> StoreResult<()> {
        if !self.is_displayed(semester) {
            return self.list_mut(semester).add(module);
        }
        self.list_mut(semester).add(module.clone())?;
        self.display.add(module)
    }

    /// Replaces `target` with `edited` in place.
    pub fn set_module(
        &mut self,
        target: &Module,
        edited: Module,
        semester: Semester,
    ) -> StoreResult<()> {
        if !self.is_displayed(semester) {
            return self.list_mut(semester).set_element(target, edited);
        }
        self.list_mut(semester).set_element(target, edited.clone())?;
        self.display.set_element(target, edited)
    }

    pub fn remove_module(&mut self, module: &Module, semester: Semester) -> StoreResult<Module> {
        self.remove_module_with_code(&module.code, semester)
    }

    pub fn remove_module_with_code(
        &mut self,
        code: &ModuleCode,
        semester: Semester,
    ) -> StoreResult<Module> {
        let removed = self.list_mut(semester).remove_by_key(code)?;
        if self.is_displayed(semester) {
            self.display.remove_by_key(code)?;
        }
        Ok(removed)
    }

    /// Empties one semester list. The mirror is cleared only when that
    /// semester is the displayed one.
    pub fn clear_modules(&mut self, semester: Semester) {
        self.list_mut(semester).clear_all();
        if self.is_displayed(semester) {
            self.display.clear_all();
        }
    }

    /// Adds `person` to the instructors of module `code`.
    ///
    /// # Errors
    /// - `NotFound` when `code` is not in the semester list.
    ///
    /// Assigning an instructor twice leaves the module unchanged.
    pub fn assign_instructor(
        &mut self,
        person: &Person,
        code: &ModuleCode,
        semester: Semester,
    ) -> StoreResult<()> {
        let current = self.require_module(code, semester)?;
        let updated = current.with_instructor(person);
        self.replace_module(updated, semester)
    }

    /// Removes `person` from the instructors of module `code`.
    ///
    /// Unassigning a person who is not an instructor is a no-op.
    pub fn unassign_instructor(
        &mut self,
        person: &Person,
        code: &ModuleCode,
        semester: Semester,
    ) -> StoreResult<()> {
        let current = self.require_module(code, semester)?;
        let updated = current.without_instructor(person);
        self.replace_module(updated, semester)
    }

    /// Clears the instructors of every module in `semester`.
    pub fn unassign_all_instructors(&mut self, semester: Semester) {
        self.list_mut(semester).update_each(Module::without_instructors);
        if self.is_displayed(semester) {
            self.display.replace_with(&self.semesters[semester.index()]);
        }
    }

    pub fn module_code_has_instructor(
        &self,
        code: &ModuleCode,
        person: &Person,
        semester: Semester,
    ) -> StoreResult<bool> {
        Ok(self.require_module(code, semester)?.has_instructor(person))
    }

    /// Modules in `semester` that list `person` as an instructor.
    pub fn modules_taught_by(&self, person: &Person, semester: Semester) -> Vec<&Module> {
        self.list(semester)
            .iter()
            .filter(|module| module.has_instructor(person))
            .collect()
    }

    /// Points the mirror at `semester` and rebuilds it from that list.
    pub fn show_semester(&mut self, semester: Semester) {
        self.display_semester = semester;
        self.display.replace_with(&self.semesters[semester.index()]);
    }

    pub fn display_semester(&self) -> Semester {
        self.display_semester
    }

    pub fn modules(&self, semester: Semester) -> &UniqueList<Module> {
        self.list(semester)
    }

    pub fn display(&self) -> &UniqueList<Module> {
        &self.display
    }

    fn require_module(&self, code: &ModuleCode, semester: Semester) -> StoreResult<&Module> {
        self.find_module(code, semester)
            .ok_or_else(|| StoreError::NotFound {
                kind: EntityKind::Module,
                key: code.to_string(),
            })
    }

    fn replace_module(&mut self, updated: Module, semester: Semester) -> StoreResult<()> {
        // `updated` keeps its code, so it is its own target.
        let target = updated.clone();
        self.set_module(&target, updated, semester)
    }

    fn is_displayed(&self, semester: Semester) -> bool {
        self.display_semester == semester
    }

    fn list(&self, semester: Semester) -> &UniqueList<Module> {
        &self.semesters[semester.index()]
    }

    fn list_mut(&mut self, semester: Semester) -> &mut UniqueList<Module> {
        &mut self.semesters[semester.index()]
    }
}
