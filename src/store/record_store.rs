use crate::error::{HrisError, HrisResult};

use super::{Patch, Record};

/// An ordered in-memory collection of records.
///
/// Insertion order is preserved; [`RecordStore::prepend`] puts a record at
/// the front for most-recent-first lists.
///
/// # Example
///
/// ```
/// use hris_engine::models::Notification;
/// use hris_engine::store::RecordStore;
///
/// let mut store = RecordStore::new(vec![]);
/// store.prepend(Notification {
///     id: "1".to_string(),
///     message: "Payroll generated for October 2023".to_string(),
///     read: false,
/// });
/// assert_eq!(store.len(), 1);
/// assert!(store.get("1").is_some());
/// ```
#[derive(Debug, Clone)]
pub struct RecordStore<T> {
    records: Vec<T>,
}

impl<T> Default for RecordStore<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

impl<T: Record> RecordStore<T> {
    /// Creates a store seeded with the given records.
    pub fn new(records: Vec<T>) -> Self {
        Self { records }
    }

    /// Returns all records in store order.
    pub fn all(&self) -> &[T] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the record with the given id, if present.
    pub fn get(&self, id: &str) -> Option<&T> {
        self.records.iter().find(|r| r.id() == id)
    }

    /// Returns the record with the given id or a not-found error.
    pub fn find(&self, id: &str) -> HrisResult<&T> {
        self.get(id).ok_or_else(|| HrisError::not_found(T::ENTITY, id))
    }

    /// Returns true if a record with the given id exists.
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Appends a record.
    pub fn add(&mut self, record: T) {
        self.records.push(record);
    }

    /// Inserts a record at the front.
    pub fn prepend(&mut self, record: T) {
        self.records.insert(0, record);
    }

    /// Replaces every record.
    pub fn set(&mut self, records: Vec<T>) {
        self.records = records;
    }

    /// Shallow-merges `patch` into the record with the given id.
    pub fn update<P: Patch<T>>(&mut self, id: &str, patch: P) -> HrisResult<&T> {
        self.modify(id, |record| patch.apply(record))
    }

    /// Applies `f` to the record with the given id.
    pub fn modify<F: FnOnce(&mut T)>(&mut self, id: &str, f: F) -> HrisResult<&T> {
        let record = self
            .records
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or_else(|| HrisError::not_found(T::ENTITY, id))?;
        f(record);
        Ok(record)
    }

    /// Removes and returns the record with the given id.
    pub fn remove(&mut self, id: &str) -> Option<T> {
        let index = self.records.iter().position(|r| r.id() == id)?;
        Some(self.records.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EmployeePatch, Notification};
    use crate::store::Patch;

    fn notification(id: &str) -> Notification {
        Notification {
            id: id.to_string(),
            message: format!("message {}", id),
            read: false,
        }
    }

    struct MarkRead;

    impl Patch<Notification> for MarkRead {
        fn apply(self, target: &mut Notification) {
            target.read = true;
        }
    }

    #[test]
    fn test_add_appends_and_prepend_inserts_first() {
        let mut store = RecordStore::new(vec![notification("1")]);
        store.add(notification("2"));
        store.prepend(notification("0"));

        let ids: Vec<&str> = store.all().iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["0", "1", "2"]);
    }

    #[test]
    fn test_update_merges_patch_into_matching_record() {
        let mut store = RecordStore::new(vec![notification("1"), notification("2")]);

        let updated = store.update("2", MarkRead).unwrap();
        assert!(updated.read);
        assert!(!store.get("1").unwrap().read);
    }

    #[test]
    fn test_update_unknown_id_is_not_found() {
        let mut store: RecordStore<crate::models::Employee> = RecordStore::default();
        let result = store.update("EMP404", EmployeePatch::default());

        match result {
            Err(HrisError::NotFound { entity, id }) => {
                assert_eq!(entity, "Employee");
                assert_eq!(id, "EMP404");
            }
            other => panic!("Expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_remove_and_set() {
        let mut store = RecordStore::new(vec![notification("1"), notification("2")]);
        assert!(store.remove("1").is_some());
        assert!(store.remove("1").is_none());
        assert_eq!(store.len(), 1);

        store.set(vec![]);
        assert!(store.is_empty());
    }
}
