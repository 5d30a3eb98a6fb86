use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use crate::models::DiagnosisSuggestion;

/// Storage for computed diagnosis lists, injected into [`DiagnosisService`].
///
/// Keys are the caller's non-blank symptoms in input order.
///
/// [`DiagnosisService`]: crate::services::diagnosis::DiagnosisService
pub trait DiagnosisCache: Send + Sync {
    fn get(&self, key: &[String]) -> Option<Vec<DiagnosisSuggestion>>;
    fn put(&self, key: Vec<String>, diagnoses: Vec<DiagnosisSuggestion>);
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Default)]
struct CacheEntries {
    map: HashMap<Vec<String>, Vec<DiagnosisSuggestion>>,
    order: VecDeque<Vec<String>>,
}

/// Bounded in-process cache; the oldest entry is evicted first.
pub struct MemoryDiagnosisCache {
    capacity: usize,
    entries: Mutex<CacheEntries>,
}

impl MemoryDiagnosisCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: Mutex::new(CacheEntries::default()),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl DiagnosisCache for MemoryDiagnosisCache {
    fn get(&self, key: &[String]) -> Option<Vec<DiagnosisSuggestion>> {
        let entries = self.entries.lock().ok()?;
        entries.map.get(key).cloned()
    }

    fn put(&self, key: Vec<String>, diagnoses: Vec<DiagnosisSuggestion>) {
        if self.capacity == 0 {
            return;
        }
        let Ok(mut entries) = self.entries.lock() else {
            return;
        };

        if entries.map.insert(key.clone(), diagnoses).is_none() {
            entries.order.push_back(key);
        }

        while entries.map.len() > self.capacity {
            match entries.order.pop_front() {
                Some(oldest) => {
                    entries.map.remove(&oldest);
                }
                None => break,
            }
        }
    }

    fn len(&self) -> usize {
        self.entries.lock().map(|entries| entries.map.len()).unwrap_or(0)
    }
}
