//! `DataBook` aggregate root.
//!
//! # Responsibility
//! - Compose the person store and the semester module store.
//! - Be the only mutation entry point for every entity collection.
//! - Track the active semester and implement semester switching.
//!
//! # Invariants
//! - The active semester is the semester mirrored into the display list.
//! - Every mutation either fully succeeds or leaves the book unchanged.
//! - No I/O and no logging happen here; callers persist after mutating.

use crate::collection::{StoreResult, UniqueList};
use crate::model::module::{Module, ModuleCode, Semester};
use crate::model::person::{Name, Person};
use crate::store::{ModuleStore, PersonStore};

/// Collection sizes used for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookSummary {
    pub persons: usize,
    pub first_semester_modules: usize,
    pub second_semester_modules: usize,
    pub active_semester: Semester,
}

/// In-memory aggregate of contacts and per-semester modules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataBook {
    persons: PersonStore,
    modules: ModuleStore,
}

impl DataBook {
    /// Creates an empty book with the first semester active.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns this book with `semester` active and mirrored.
    pub fn with_active_semester(mut self, semester: Semester) -> Self {
        self.modules.show_semester(semester);
        self
    }

    /// Replaces all data with a copy of `other`, including its active
    /// semester.
    pub fn reset_data(&mut self, other: &DataBook) {
        self.clone_from(other);
    }

    // person-level operations

    pub fn has_person(&self, person: &Person) -> bool {
        self.persons.has_person(person)
    }

    pub fn find_person(&self, name: &Name) -> Option<&Person> {
        self.persons.find_person(name)
    }

    pub fn add_person(&mut self, person: Person) -> StoreResult<()> {
        self.persons.add_person(person)
    }

    pub fn set_person(&mut self, target: &Person, edited: Person) -> StoreResult<()> {
        self.persons.set_person(target, edited)
    }

    pub fn remove_person(&mut self, person: &Person) -> StoreResult<Person> {
        self.persons.remove_person(person)
    }

    pub fn clear_contacts(&mut self) {
        self.persons.clear_contacts();
    }

    pub fn person_list(&self) -> &UniqueList<Person> {
        self.persons.persons()
    }

    // module-level operations

    pub fn has_module(&self, module: &Module, semester: Semester) -> bool {
        self.modules.has_module(module, semester)
    }

    pub fn has_module_code(&self, code: &ModuleCode, semester: Semester) -> bool {
        self.modules.has_module_code(code, semester)
    }

    pub fn find_module(&self, code: &ModuleCode, semester: Semester) -> Option<&Module> {
        self.modules.find_module(code, semester)
    }

    pub fn add_module(&mut self, module: Module, semester: Semester) -> StoreResult<()> {
        self.modules.add_module(module, semester)
    }

    pub fn set_module(
        &mut self,
        target: &Module,
        edited: Module,
        semester: Semester,
    ) -> StoreResult<()> {
        self.modules.set_module(target, edited, semester)
    }

    pub fn remove_module(&mut self, module: &Module, semester: Semester) -> StoreResult<Module> {
        self.modules.remove_module(module, semester)
    }

    pub fn remove_module_with_code(
        &mut self,
        code: &ModuleCode,
        semester: Semester,
    ) -> StoreResult<Module> {
        self.modules.remove_module_with_code(code, semester)
    }

    pub fn clear_modules(&mut self, semester: Semester) {
        self.modules.clear_modules(semester);
    }

    pub fn assign_instructor(
        &mut self,
        person: &Person,
        code: &ModuleCode,
        semester: Semester,
    ) -> StoreResult<()> {
        self.modules.assign_instructor(person, code, semester)
    }

    pub fn unassign_instructor(
        &mut self,
        person: &Person,
        code: &ModuleCode,
        semester: Semester,
    ) -> StoreResult<()> {
        self.modules.unassign_instructor(person, code, semester)
    }

    pub fn unassign_all_instructors(&mut self, semester: Semester) {
        self.modules.unassign_all_instructors(semester);
    }

    pub fn module_code_has_instructor(
        &self,
        code: &ModuleCode,
        person: &Person,
        semester: Semester,
    ) -> StoreResult<bool> {
        self.modules.module_code_has_instructor(code, person, semester)
    }

    pub fn modules_taught_by(&self, person: &Person, semester: Semester) -> Vec<&Module> {
        self.modules.modules_taught_by(person, semester)
    }

    pub fn module_list(&self, semester: Semester) -> &UniqueList<Module> {
        self.modules.modules(semester)
    }

    /// Module list bound by the UI; mirrors the active semester.
    pub fn display_module_list(&self) -> &UniqueList<Module> {
        self.modules.display()
    }

    // semester switching

    pub fn active_semester(&self) -> Semester {
        self.modules.display_semester()
    }

    /// Toggles the active semester and rebuilds the display list.
    ///
    /// Returns the newly active semester. This operation cannot fail.
    pub fn switch_semester(&mut self) -> Semester {
        let next = self.active_semester().other();
        self.modules.show_semester(next);
        next
    }

    pub fn summary(&self) -> BookSummary {
        BookSummary {
            persons: self.persons.persons().len(),
            first_semester_modules: self.modules.modules(Semester::First).len(),
            second_semester_modules: self.modules.modules(Semester::Second).len(),
            active_semester: self.active_semester(),
        }
    }
}
