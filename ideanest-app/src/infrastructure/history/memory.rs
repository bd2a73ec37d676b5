use crate::domain::HistoryEntry;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use uuid::Uuid;

/// Process-local history used when no database is configured.
#[derive(Clone, Default)]
pub struct MemoryHistory {
    entries: Arc<DashMap<Uuid, (u64, HistoryEntry)>>,
    sequence: Arc<AtomicU64>,
}

impl MemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, mut entry: HistoryEntry) -> Uuid {
        let seq = self.sequence.fetch_add(1, Ordering::SeqCst);
        entry.created_at.get_or_insert_with(chrono::Utc::now);
        let id = entry.id;
        self.entries.insert(id, (seq, entry));
        id
    }

    pub fn get(&self, id: Uuid) -> Option<HistoryEntry> {
        self.entries.get(&id).map(|slot| slot.value().1.clone())
    }

    /// Entries for one owner, newest first.
    pub fn for_user(&self, user_id: &str) -> Vec<HistoryEntry> {
        let mut found: Vec<(u64, HistoryEntry)> = self
            .entries
            .iter()
            .filter(|slot| slot.value().1.user_id == user_id)
            .map(|slot| slot.value().clone())
            .collect();

        found.sort_by(|(a_seq, a), (b_seq, b)| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b_seq.cmp(a_seq))
        });
        found.into_iter().map(|(_, entry)| entry).collect()
    }

    pub fn remove(&self, id: Uuid) -> bool {
        self.entries.remove(&id).is_some()
    }
}
