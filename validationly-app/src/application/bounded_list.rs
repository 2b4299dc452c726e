use super::ports::ListStore;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;
use validationly_errors::AppError;

/// Newest-first JSON list that never keeps more than `cap` items.
pub struct BoundedList<'a, T> {
    store: &'a dyn ListStore,
    key: String,
    cap: usize,
    _item: PhantomData<fn() -> T>,
}

impl<'a, T> BoundedList<'a, T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(store: &'a dyn ListStore, key: impl Into<String>, cap: usize) -> Self {
        Self {
            store,
            key: key.into(),
            cap: cap.max(1),
            _item: PhantomData,
        }
    }

    pub async fn append(&self, item: &T) -> Result<(), AppError> {
        let encoded =
            serde_json::to_string(item).map_err(|e| AppError::Internal(e.to_string()))?;
        self.store.push(&self.key, &encoded).await?;
        self.store.trim(&self.key, self.cap).await
    }

    pub async fn recent(&self) -> Result<Vec<T>, AppError> {
        let raw = self.store.range(&self.key, 0, self.cap - 1).await?;
        Ok(raw
            .iter()
            .filter_map(|entry| match serde_json::from_str(entry) {
                Ok(item) => Some(item),
                Err(e) => {
                    tracing::warn!("Skipping malformed entry in '{}': {}", self.key, e);
                    None
                }
            })
            .take(self.cap)
            .collect())
    }
}
