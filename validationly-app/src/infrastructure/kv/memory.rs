use crate::application::ports::ListStore;
use async_trait::async_trait;
use dashmap::DashMap;
use std::collections::VecDeque;
use validationly_errors::AppError;

/// In-process list store with the same ordering rules as the KV backend.
/// Used by tests.
#[derive(Default)]
pub struct MemoryListStore {
    lists: DashMap<String, VecDeque<String>>,
}

impl MemoryListStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self, key: &str) -> usize {
        self.lists.get(key).map(|list| list.len()).unwrap_or(0)
    }

    pub fn is_empty(&self, key: &str) -> bool {
        self.len(key) == 0
    }
}

#[async_trait]
impl ListStore for MemoryListStore {
    async fn push(&self, key: &str, item: &str) -> Result<(), AppError> {
        self.lists
            .entry(key.to_string())
            .or_default()
            .push_front(item.to_string());
        Ok(())
    }

    async fn trim(&self, key: &str, max_len: usize) -> Result<(), AppError> {
        if let Some(mut list) = self.lists.get_mut(key) {
            list.truncate(max_len);
        }
        Ok(())
    }

    async fn range(&self, key: &str, start: usize, end: usize) -> Result<Vec<String>, AppError> {
        let Some(list) = self.lists.get(key) else {
            return Ok(vec![]);
        };
        if start > end {
            return Ok(vec![]);
        }
        Ok(list
            .iter()
            .skip(start)
            .take(end - start + 1)
            .cloned()
            .collect())
    }
}
