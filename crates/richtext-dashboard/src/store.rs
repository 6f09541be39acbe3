//! Client-side record collections backed by a content-store repository.
//!
//! A [`Collection`] mirrors one entity type from the content store. Every
//! mutation goes to the [`Repository`] first and is applied to the local list
//! only when the repository accepts it.

use std::fmt::Debug;

use crate::access::{visible, Actor, SchoolScoped};

/// Error reported by a repository
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("record {0} not found")]
    NotFound(String),

    #[error("request rejected: {0}")]
    Rejected(String),

    #[error("content store unavailable: {0}")]
    Unavailable(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// A record with a stable identifier
pub trait Entity: Clone {
    type Id: Clone + PartialEq + Debug;

    fn id(&self) -> Self::Id;
}

/// Persistence collaborator for one entity type
pub trait Repository {
    type Item: Entity;
    /// Writable fields of an item
    type Draft;

    fn list(&mut self) -> Result<Vec<Self::Item>>;

    fn create(&mut self, draft: &Self::Draft) -> Result<Self::Item>;

    fn update(&mut self, id: &<Self::Item as Entity>::Id, draft: &Self::Draft) -> Result<Self::Item>;

    fn delete(&mut self, id: &<Self::Item as Entity>::Id) -> Result<()>;
}

type IdOf<R> = <<R as Repository>::Item as Entity>::Id;

/// Local state for one entity type
pub struct Collection<R: Repository> {
    repository: R,
    items: Vec<R::Item>,
    loading: bool,
    error: Option<StoreError>,
}

impl<R: Repository> Collection<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository,
            items: Vec::new(),
            loading: false,
            error: None,
        }
    }

    /// Reload all items. On failure the previous items are kept and the error
    /// is recorded.
    pub fn fetch(&mut self) {
        self.loading = true;
        match self.repository.list() {
            Ok(items) => {
                log::debug!("fetched {} records", items.len());
                self.items = items;
                self.error = None;
            }
            Err(err) => {
                log::warn!("fetch failed: {err}");
                self.error = Some(err);
            }
        }
        self.loading = false;
    }

    /// Create an item and append it
    pub fn create(&mut self, draft: &R::Draft) -> Result<R::Item> {
        match self.repository.create(draft) {
            Ok(item) => {
                self.items.push(item.clone());
                self.error = None;
                Ok(item)
            }
            Err(err) => Err(self.record(err)),
        }
    }

    /// Update an item and replace the local copy with the same id
    pub fn update(&mut self, id: &IdOf<R>, draft: &R::Draft) -> Result<R::Item> {
        match self.repository.update(id, draft) {
            Ok(item) => {
                for slot in self.items.iter_mut().filter(|slot| slot.id() == *id) {
                    *slot = item.clone();
                }
                self.error = None;
                Ok(item)
            }
            Err(err) => Err(self.record(err)),
        }
    }

    /// Delete an item. Failures are recorded in [`Collection::error`].
    pub fn delete(&mut self, id: &IdOf<R>) {
        match self.repository.delete(id) {
            Ok(()) => {
                self.items.retain(|item| item.id() != *id);
                self.error = None;
            }
            Err(err) => {
                self.record(err);
            }
        }
    }

    /// Delete several items, removing every one the repository deleted.
    ///
    /// Returns the number removed; the first failure is recorded.
    pub fn delete_many(&mut self, ids: &[IdOf<R>]) -> usize {
        let mut deleted = Vec::with_capacity(ids.len());
        let mut first_error = None;

        for id in ids {
            match self.repository.delete(id) {
                Ok(()) => deleted.push(id.clone()),
                Err(err) => {
                    log::warn!("failed to delete {id:?}: {err}");
                    first_error.get_or_insert(err);
                }
            }
        }

        let before = self.items.len();
        self.items.retain(|item| !deleted.contains(&item.id()));
        self.error = first_error;
        before - self.items.len()
    }

    pub fn get(&self, id: &IdOf<R>) -> Option<&R::Item> {
        self.items.iter().find(|item| item.id() == *id)
    }

    pub fn items(&self) -> &[R::Item] {
        &self.items
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&StoreError> {
        self.error.as_ref()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn repository_mut(&mut self) -> &mut R {
        &mut self.repository
    }

    fn record(&mut self, err: StoreError) -> StoreError {
        log::warn!("store request failed: {err}");
        self.error = Some(err.clone());
        err
    }
}

impl<R> Collection<R>
where
    R: Repository,
    R::Item: SchoolScoped,
{
    /// Items the actor may see
    pub fn visible_to(&self, actor: &Actor) -> Vec<&R::Item> {
        visible(actor, &self.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::{Role, SchoolId};

    #[derive(Debug, Clone, PartialEq)]
    struct Note {
        id: u64,
        body: String,
        school: SchoolId,
    }

    impl Entity for Note {
        type Id = u64;

        fn id(&self) -> u64 {
            self.id
        }
    }

    impl SchoolScoped for Note {
        fn school_id(&self) -> Option<SchoolId> {
            Some(self.school)
        }
    }

    /// In-memory repository with an injectable outage and per-id failures
    #[derive(Default)]
    struct MemoryRepo {
        rows: Vec<Note>,
        next_id: u64,
        offline: bool,
        locked: Vec<u64>,
    }

    impl MemoryRepo {
        fn check(&self) -> Result<()> {
            if self.offline {
                Err(StoreError::Unavailable("offline".to_string()))
            } else {
                Ok(())
            }
        }
    }

    impl Repository for MemoryRepo {
        type Item = Note;
        type Draft = (String, SchoolId);

        fn list(&mut self) -> Result<Vec<Note>> {
            self.check()?;
            Ok(self.rows.clone())
        }

        fn create(&mut self, draft: &Self::Draft) -> Result<Note> {
            self.check()?;
            self.next_id += 1;
            let note = Note {
                id: self.next_id,
                body: draft.0.clone(),
                school: draft.1,
            };
            self.rows.push(note.clone());
            Ok(note)
        }

        fn update(&mut self, id: &u64, draft: &Self::Draft) -> Result<Note> {
            self.check()?;
            let row = self
                .rows
                .iter_mut()
                .find(|row| row.id == *id)
                .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
            row.body = draft.0.clone();
            row.school = draft.1;
            Ok(row.clone())
        }

        fn delete(&mut self, id: &u64) -> Result<()> {
            self.check()?;
            if self.locked.contains(id) {
                return Err(StoreError::Rejected(format!("{id} is locked")));
            }
            self.rows.retain(|row| row.id != *id);
            Ok(())
        }
    }

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn seeded() -> Collection<MemoryRepo> {
        init();
        let mut notes = Collection::new(MemoryRepo::default());
        for (body, school) in [("a", 1), ("b", 2), ("c", 1)] {
            notes.create(&(body.to_string(), school)).unwrap();
        }
        notes
    }

    #[test]
    fn test_fetch() {
        let mut notes = seeded();
        notes.repository_mut().rows.remove(0);
        notes.fetch();
        assert_eq!(notes.items().len(), 2);
        assert!(!notes.is_loading());
        assert!(notes.error().is_none());
    }

    #[test]
    fn test_fetch_failure_keeps_items() {
        let mut notes = seeded();
        notes.repository_mut().offline = true;
        notes.fetch();
        assert_eq!(notes.items().len(), 3);
        assert!(matches!(notes.error(), Some(StoreError::Unavailable(_))));
        assert!(!notes.is_loading());
    }

    #[test]
    fn test_create_appends() {
        let notes = seeded();
        let bodies: Vec<_> = notes.items().iter().map(|n| n.body.as_str()).collect();
        assert_eq!(bodies, ["a", "b", "c"]);
    }

    #[test]
    fn test_create_failure_is_returned_and_recorded() {
        let mut notes = seeded();
        notes.repository_mut().offline = true;
        let err = notes.create(&("d".to_string(), 1)).unwrap_err();
        assert_eq!(notes.error(), Some(&err));
        assert_eq!(notes.items().len(), 3);
    }

    #[test]
    fn test_update_replaces_by_id() {
        let mut notes = seeded();
        notes.update(&2, &("B".to_string(), 3)).unwrap();
        assert_eq!(notes.get(&2).map(|n| n.body.as_str()), Some("B"));
        assert_eq!(notes.items()[1].school, 3);
        assert_eq!(notes.items().len(), 3);
    }

    #[test]
    fn test_update_missing() {
        let mut notes = seeded();
        assert_eq!(
            notes.update(&42, &("x".to_string(), 1)),
            Err(StoreError::NotFound("42".to_string()))
        );
    }

    #[test]
    fn test_delete() {
        let mut notes = seeded();
        notes.delete(&1);
        assert!(notes.get(&1).is_none());
        assert_eq!(notes.items().len(), 2);
    }

    #[test]
    fn test_delete_failure_is_recorded() {
        let mut notes = seeded();
        notes.repository_mut().locked.push(1);
        notes.delete(&1);
        assert!(notes.get(&1).is_some());
        assert!(matches!(notes.error(), Some(StoreError::Rejected(_))));
    }

    #[test]
    fn test_delete_many_removes_successes() {
        let mut notes = seeded();
        notes.repository_mut().locked.push(2);
        let removed = notes.delete_many(&[1, 2, 3]);
        assert_eq!(removed, 2);
        assert_eq!(notes.items().iter().map(|n| n.id).collect::<Vec<_>>(), [2]);
        assert!(matches!(notes.error(), Some(StoreError::Rejected(_))));

        notes.clear_error();
        assert!(notes.error().is_none());
    }

    #[test]
    fn test_visible_to() {
        let notes = seeded();
        let teacher = Actor::new(9, Role::Teacher).with_school(1);
        let seen: Vec<_> = notes.visible_to(&teacher).iter().map(|n| n.id).collect();
        assert_eq!(seen, [1, 3]);
        assert_eq!(notes.visible_to(&Actor::admin(1)).len(), 3);
    }
}
