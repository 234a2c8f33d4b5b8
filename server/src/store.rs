// store.rs

use log::debug;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::error::StoreError;
use crate::hostel::Hostel;
use crate::util::HostelId;

/// In-memory owner of every hostel record.
///
/// One mutex covers the whole map and is held for the full duration of each
/// operation, so callers observe a total order of effects. Keys always equal the
/// `id` of the record stored under them.
pub struct HostelStore {
    hostels: Mutex<HashMap<HostelId, Hostel>>,
}

impl HostelStore {
    pub fn new() -> Self {
        HostelStore {
            hostels: Mutex::new(HashMap::new()),
        }
    }

    // No operation panics while the map is half-updated, so a poisoned lock
    // still guards a consistent map.
    fn lock(&self) -> MutexGuard<'_, HashMap<HostelId, Hostel>> {
        self.hostels.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of all records, in no particular order.
    pub fn list(&self) -> Vec<Hostel> {
        let hostels = self.lock();
        hostels.values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn exists(&self, id: &str) -> bool {
        self.lock().contains_key(id)
    }

    pub fn get(&self, id: &str) -> Result<Hostel, StoreError> {
        let hostels = self.lock();
        hostels
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    /// Inserts `hostel` under the id derived from its name. Never overwrites:
    /// a second hostel with the same name is rejected.
    pub fn create(&self, mut hostel: Hostel) -> Result<Hostel, StoreError> {
        hostel.id = hostel.derived_id();
        let mut hostels = self.lock();
        if hostels.contains_key(&hostel.id) {
            return Err(StoreError::InvalidId(hostel.id));
        }
        debug!("create {} ({})", hostel.id, hostel.name);
        hostels.insert(hostel.id.clone(), hostel.clone());
        Ok(hostel)
    }

    /// Replaces the record stored under `existing_id`.
    ///
    /// When the new name derives a different id the record is moved: the old key
    /// is removed and the new one inserted under the same lock acquisition. A move
    /// onto an id held by another record is rejected.
    pub fn update(&self, existing_id: &str, mut hostel: Hostel) -> Result<Hostel, StoreError> {
        let new_id = hostel.derived_id();
        let mut hostels = self.lock();
        if !hostels.contains_key(existing_id) {
            return Err(StoreError::NotFound(existing_id.to_string()));
        }
        if new_id != existing_id {
            if hostels.contains_key(&new_id) {
                return Err(StoreError::InvalidId(new_id));
            }
            hostels.remove(existing_id);
            debug!("rename {} -> {}", existing_id, new_id);
        } else {
            debug!("update {}", existing_id);
        }
        hostel.id = new_id;
        hostels.insert(hostel.id.clone(), hostel.clone());
        Ok(hostel)
    }

    pub fn delete(&self, id: &str) -> Result<(), StoreError> {
        let mut hostels = self.lock();
        match hostels.remove(id) {
            Some(_) => {
                debug!("delete {}", id);
                Ok(())
            }
            None => Err(StoreError::NotFound(id.to_string())),
        }
    }
}

impl Default for HostelStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::hostel_id;
    use chrono::{TimeZone, Utc};
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::thread;

    fn hostel(name: &str, rooms: i64) -> Hostel {
        Hostel::new(name, Utc.with_ymd_and_hms(1921, 12, 23, 0, 0, 0).unwrap(), rooms)
    }

    #[test]
    fn test_create_then_get() {
        let store = HostelStore::new();
        let created = store.create(hostel("Tagore Bhavan", 122)).unwrap();
        assert_eq!(created.id, "I3953378145");
        assert!(store.exists(&created.id));

        let fetched = store.get(&created.id).unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.num_of_rooms, 122);
    }

    #[test]
    fn test_create_ignores_client_id() {
        let store = HostelStore::new();
        let mut input = hostel("Tagore Bhavan", 1);
        input.id = String::from("h1");
        let created = store.create(input).unwrap();
        assert_eq!(created.id, hostel_id("Tagore Bhavan"));
        assert!(!store.exists("h1"));
    }

    #[test]
    fn test_duplicate_name_is_rejected() {
        let store = HostelStore::new();
        let first = store.create(hostel("Tagore Bhavan", 122)).unwrap();
        let err = store.create(hostel("Tagore Bhavan", 7)).unwrap_err();
        assert_eq!(err, StoreError::InvalidId(first.id.clone()));
        assert_eq!(store.get(&first.id).unwrap().num_of_rooms, 122);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_get_missing() {
        let store = HostelStore::new();
        assert!(!store.exists("I1"));
        assert_eq!(store.get("I1"), Err(StoreError::NotFound("I1".into())));
    }

    #[test]
    fn test_delete_twice() {
        let store = HostelStore::new();
        let created = store.create(hostel("Tagore Bhavan", 122)).unwrap();
        store.delete(&created.id).unwrap();
        assert_eq!(store.get(&created.id), Err(StoreError::NotFound(created.id.clone())));
        assert_eq!(store.delete(&created.id), Err(StoreError::NotFound(created.id.clone())));
        assert!(store.is_empty());
    }

    #[test]
    fn test_update_same_name_overwrites_in_place() {
        let store = HostelStore::new();
        let created = store.create(hostel("Tagore Bhavan", 122)).unwrap();
        let updated = store.update(&created.id, hostel("Tagore Bhavan", 150)).unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(store.get(&created.id).unwrap().num_of_rooms, 150);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_update_rename_moves_record() {
        let store = HostelStore::new();
        let created = store.create(hostel("Tagore Bhavan", 122)).unwrap();
        let renamed = store.update(&created.id, hostel("Nehru Bhavan", 122)).unwrap();
        assert_eq!(renamed.id, hostel_id("Nehru Bhavan"));
        assert_eq!(store.get(&created.id), Err(StoreError::NotFound(created.id.clone())));
        assert_eq!(store.get(&renamed.id).unwrap().name, "Nehru Bhavan");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_update_rename_onto_existing_is_rejected() {
        let store = HostelStore::new();
        let tagore = store.create(hostel("Tagore Bhavan", 122)).unwrap();
        let nehru = store.create(hostel("Nehru Bhavan", 40)).unwrap();
        let err = store.update(&tagore.id, hostel("Nehru Bhavan", 1)).unwrap_err();
        assert_eq!(err, StoreError::InvalidId(nehru.id.clone()));
        assert_eq!(store.get(&tagore.id).unwrap().num_of_rooms, 122);
        assert_eq!(store.get(&nehru.id).unwrap().num_of_rooms, 40);
    }

    #[test]
    fn test_update_missing() {
        let store = HostelStore::new();
        let err = store.update("I1", hostel("Tagore Bhavan", 1)).unwrap_err();
        assert_eq!(err, StoreError::NotFound("I1".into()));
        assert!(store.is_empty());
    }

    #[test]
    fn test_list_matches_live_ids() {
        let store = HostelStore::new();
        let a = store.create(hostel("A", 1)).unwrap();
        let b = store.create(hostel("B", 2)).unwrap();
        let c = store.create(hostel("C", 3)).unwrap();
        store.delete(&b.id).unwrap();

        let ids: Vec<HostelId> = store.list().into_iter().map(|h| h.id).collect();
        let unique: HashSet<&HostelId> = ids.iter().collect();
        assert_eq!(ids.len(), 2);
        let expected: HashSet<&HostelId> = [&a.id, &c.id].iter().copied().collect();
        assert_eq!(unique, expected);
    }

    #[test]
    fn test_concurrent_creates_are_not_lost() {
        let store = Arc::new(HostelStore::new());
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let store = store.clone();
                thread::spawn(move || {
                    for i in 0..50 {
                        store.create(hostel(&format!("hostel-{}-{}", t, i), i)).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let listed: HashSet<HostelId> = store.list().into_iter().map(|h| h.id).collect();
        assert_eq!(listed.len(), 400);
        for t in 0..8 {
            for i in 0..50 {
                assert!(listed.contains(&hostel_id(&format!("hostel-{}-{}", t, i))));
            }
        }
    }
}
