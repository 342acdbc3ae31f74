//! Contact list store.

use crate::collection::{StoreResult, UniqueList};
use crate::model::person::{Name, Person};

/// Duplicate-free contact list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonStore {
    persons: UniqueList<Person>,
}

impl PersonStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if a person with the same identity exists.
    pub fn has_person(&self, person: &Person) -> bool {
        self.persons.contains(person)
    }

    /// Looks a person up by (case-insensitive) name.
    pub fn find_person(&self, name: &Name) -> Option<&Person> {
        self.persons.find_by_key(name.identity_key())
    }

    pub fn add_person(&mut self, person: Person) -> StoreResult<()> {
        self.persons.add(person)
    }

    /// Replaces `target` with `edited`, keeping its list position.
    pub fn set_person(&mut self, target: &Person, edited: Person) -> StoreResult<()> {
        self.persons.set_element(target, edited)
    }

    pub fn remove_person(&mut self, person: &Person) -> StoreResult<Person> {
        self.persons.remove(person)
    }

    pub fn clear_contacts(&mut self) {
        self.persons.clear_all();
    }

    pub fn persons(&self) -> &UniqueList<Person> {
        &self.persons
    }
}
