//! Duplicate-free ordered collection keyed by entity identity.
//!
//! # Responsibility
//! - Store entities in insertion order without identity duplicates.
//! - Provide in-place replacement so edits keep list position.
//!
//! # Invariants
//! - No two elements share an identity key.
//! - Every failing operation leaves the collection unchanged; all checks run
//!   before the first write.
//! - Elements are never handed out mutably, so identity cannot drift.

use crate::model::module::{Module, ModuleCode};
use crate::model::person::Person;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::slice::Iter;

pub type StoreResult<T> = Result<T, StoreError>;

/// Entity family named in store errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Person,
    Module,
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Person => f.write_str("person"),
            Self::Module => f.write_str("module"),
        }
    }
}

/// Identity violation raised by unique collections and the stores on top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The write would leave two elements with the same identity.
    DuplicateEntity { kind: EntityKind, key: String },
    /// No element with the addressed identity exists.
    NotFound { kind: EntityKind, key: String },
}

impl StoreError {
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::DuplicateEntity { kind, .. } | Self::NotFound { kind, .. } => *kind,
        }
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateEntity { kind, key } => write!(f, "duplicate {kind}: {key}"),
            Self::NotFound { kind, key } => write!(f, "{kind} not found: {key}"),
        }
    }
}

impl Error for StoreError {}

/// Identity contract for elements of a [`UniqueList`].
///
/// Identity is deliberately narrower than `PartialEq`: two values with the
/// same key are "the same entity" even when other attributes differ. Keys
/// are borrowed from the element, so lookups never allocate.
pub trait Identified {
    type Key: Eq + Display + ?Sized;

    const KIND: EntityKind;

    fn identity_key(&self) -> &Self::Key;
}

impl Identified for Person {
    type Key = str;

    const KIND: EntityKind = EntityKind::Person;

    fn identity_key(&self) -> &str {
        self.name.identity_key()
    }
}

impl Identified for Module {
    type Key = ModuleCode;

    const KIND: EntityKind = EntityKind::Module;

    fn identity_key(&self) -> &ModuleCode {
        &self.code
    }
}

/// Ordered list with no two elements of equal identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniqueList<T> {
    items: Vec<T>,
}

impl<T> Default for UniqueList<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Identified> UniqueList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when an element with the same identity exists.
    pub fn contains(&self, item: &T) -> bool {
        self.position_of_key(item.identity_key()).is_some()
    }

    pub fn contains_key(&self, key: &T::Key) -> bool {
        self.position_of_key(key).is_some()
    }

    pub fn find_by_key(&self, key: &T::Key) -> Option<&T> {
        self.position_of_key(key).map(|index| &self.items[index])
    }

    /// Appends `item`.
    ///
    /// # Errors
    /// - `DuplicateEntity` when an element with the same identity exists.
    pub fn add(&mut self, item: T) -> StoreResult<()> {
        if self.position_of_key(item.identity_key()).is_some() {
            return Err(duplicate::<T>(item.identity_key()));
        }
        self.items.push(item);
        Ok(())
    }

    /// Replaces `target` with `replacement`, keeping list position.
    ///
    /// # Errors
    /// - `NotFound` when no element has `target`'s identity.
    /// - `DuplicateEntity` when `replacement` collides with another element.
    pub fn set_element(&mut self, target: &T, replacement: T) -> StoreResult<()> {
        let target_key = target.identity_key();
        let index = self
            .position_of_key(target_key)
            .ok_or_else(|| not_found::<T>(target_key))?;

        let replacement_key = replacement.identity_key();
        if replacement_key != target_key && self.position_of_key(replacement_key).is_some() {
            return Err(duplicate::<T>(replacement_key));
        }

        self.items[index] = replacement;
        Ok(())
    }

    /// Removes the element sharing `item`'s identity and returns it.
    pub fn remove(&mut self, item: &T) -> StoreResult<T> {
        self.remove_by_key(item.identity_key())
    }

    pub fn remove_by_key(&mut self, key: &T::Key) -> StoreResult<T> {
        let index = self
            .position_of_key(key)
            .ok_or_else(|| not_found::<T>(key))?;
        Ok(self.items.remove(index))
    }

    pub fn clear_all(&mut self) {
        self.items.clear();
    }

    /// Replaces the whole content with `items`.
    ///
    /// # Errors
    /// - `DuplicateEntity` when `items` itself holds two equal identities.
    pub fn set_all(&mut self, items: Vec<T>) -> StoreResult<()> {
        for (index, item) in items.iter().enumerate() {
            let key = item.identity_key();
            if items[..index].iter().any(|earlier| earlier.identity_key() == key) {
                return Err(duplicate::<T>(key));
            }
        }
        self.items = items;
        Ok(())
    }

    /// Copies the content of another list, which is duplicate-free already.
    pub(crate) fn replace_with(&mut self, source: &UniqueList<T>)
    where
        T: Clone,
    {
        self.items.clone_from(&source.items);
    }

    /// Rewrites every element in place with `update`, which must keep each
    /// element's identity key.
    pub(crate) fn update_each(&mut self, update: impl Fn(&T) -> T) {
        for item in &mut self.items {
            let next = update(item);
            debug_assert!(next.identity_key() == item.identity_key());
            *item = next;
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, T> {
        self.items.iter()
    }

    /// Read-only view for display and iteration.
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Raw backing sequence, for snapshotting by persistence adapters.
    pub fn internal_list(&self) -> &Vec<T> {
        &self.items
    }

    fn position_of_key(&self, key: &T::Key) -> Option<usize> {
        self.items.iter().position(|item| item.identity_key() == key)
    }
}

impl<'a, T> IntoIterator for &'a UniqueList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

fn duplicate<T: Identified>(key: &T::Key) -> StoreError {
    StoreError::DuplicateEntity {
        kind: T::KIND,
        key: key.to_string(),
    }
}

fn not_found<T: Identified>(key: &T::Key) -> StoreError {
    StoreError::NotFound {
        kind: T::KIND,
        key: key.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::{EntityKind, Identified, StoreError, UniqueList};

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Item {
        key: &'static str,
        value: u32,
    }

    impl Identified for Item {
        type Key = str;

        const KIND: EntityKind = EntityKind::Module;

        fn identity_key(&self) -> &str {
            self.key
        }
    }

    fn item(key: &'static str, value: u32) -> Item {
        Item { key, value }
    }

    fn keys(list: &UniqueList<Item>) -> Vec<&'static str> {
        list.iter().map(|item| item.key).collect()
    }

    #[test]
    fn add_then_contains_and_duplicate_is_rejected() {
        let mut list = UniqueList::new();
        list.add(item("a", 1)).unwrap();
        assert!(list.contains(&item("a", 99)));

        let err = list.add(item("a", 2)).unwrap_err();
        assert_eq!(
            err,
            StoreError::DuplicateEntity {
                kind: EntityKind::Module,
                key: "a".to_string()
            }
        );
        assert_eq!(list.len(), 1);
        assert_eq!(list.as_slice()[0].value, 1);
    }

    #[test]
    fn set_element_keeps_position_and_allows_same_identity_edit() {
        let mut list = UniqueList::new();
        list.set_all(vec![item("a", 1), item("b", 2), item("c", 3)])
            .unwrap();

        list.set_element(&item("b", 0), item("b", 20)).unwrap();
        list.set_element(&item("c", 0), item("d", 4)).unwrap();

        assert_eq!(keys(&list), vec!["a", "b", "d"]);
        assert_eq!(list.find_by_key("b").map(|item| item.value), Some(20));
    }

    #[test]
    fn set_element_rejects_missing_target_and_collisions() {
        let mut list = UniqueList::new();
        list.set_all(vec![item("a", 1), item("b", 2)]).unwrap();
        let before = list.clone();

        assert!(matches!(
            list.set_element(&item("z", 0), item("y", 0)),
            Err(StoreError::NotFound { .. })
        ));
        assert!(matches!(
            list.set_element(&item("a", 1), item("b", 9)),
            Err(StoreError::DuplicateEntity { .. })
        ));
        assert_eq!(list, before);
    }

    #[test]
    fn remove_then_contains_is_false() {
        let mut list = UniqueList::new();
        list.add(item("a", 1)).unwrap();

        let removed = list.remove(&item("a", 0)).unwrap();
        assert_eq!(removed, item("a", 1));
        assert!(!list.contains(&item("a", 1)));
        assert!(matches!(
            list.remove(&item("a", 1)),
            Err(StoreError::NotFound { .. })
        ));
    }

    #[test]
    fn set_all_rejects_internal_duplicates_without_writing() {
        let mut list = UniqueList::new();
        list.add(item("keep", 1)).unwrap();

        let err = list.set_all(vec![item("x", 1), item("x", 2)]).unwrap_err();
        assert!(matches!(err, StoreError::DuplicateEntity { key, .. } if key == "x"));
        assert_eq!(keys(&list), vec!["keep"]);

        list.clear_all();
        assert!(list.is_empty());
    }
}
