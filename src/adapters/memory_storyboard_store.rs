use std::sync::{Arc, Mutex, MutexGuard};

use crate::adapters::memory_slot_claims::MemorySlotClaims;
use crate::domain::{AppError, StoryboardState};
use crate::ports::{SlotClaims, StoryboardStore};

#[derive(Debug, Default)]
struct Inner {
    state: Option<StoryboardState>,
    credential: Option<String>,
    config: Option<String>,
    saves: usize,
}

/// In-memory storyboard store for tests and embedding hosts.
#[derive(Debug, Clone, Default)]
pub struct MemoryStoryboardStore {
    // Shared so clones observe each other's writes.
    inner: Arc<Mutex<Inner>>,
    claims: Arc<MemorySlotClaims>,
}

impl MemoryStoryboardStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `state`.
    pub fn with_state(state: StoryboardState) -> Self {
        let store = Self::new();
        store.lock().state = Some(state);
        store
    }

    pub fn with_config(self, config: &str) -> Self {
        self.lock().config = Some(config.to_string());
        self
    }

    /// Number of committed saves, including the one made by `initialize`.
    pub fn save_count(&self) -> usize {
        self.lock().saves
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // A poisoned lock only means another test thread panicked mid-write.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl StoryboardStore for MemoryStoryboardStore {
    fn exists(&self) -> bool {
        self.lock().state.is_some()
    }

    fn initialize(&self, state: &StoryboardState) -> Result<(), AppError> {
        let mut inner = self.lock();
        if inner.state.is_some() {
            return Err(AppError::StoryboardExists);
        }
        inner.state = Some(state.clone());
        inner.saves += 1;
        Ok(())
    }

    fn load(&self) -> Result<StoryboardState, AppError> {
        self.lock().state.clone().ok_or(AppError::StoryboardNotFound)
    }

    fn save(&self, state: &StoryboardState) -> Result<(), AppError> {
        let mut inner = self.lock();
        inner.state = Some(state.clone());
        inner.saves += 1;
        Ok(())
    }

    fn read_credential(&self) -> Result<Option<String>, AppError> {
        Ok(self.lock().credential.clone())
    }

    fn write_credential(&self, credential: Option<&str>) -> Result<(), AppError> {
        self.lock().credential = credential.map(|key| key.trim().to_string());
        Ok(())
    }

    fn read_config(&self) -> Result<Option<String>, AppError> {
        Ok(self.lock().config.clone())
    }

    fn claims(&self) -> Arc<dyn SlotClaims> {
        self.claims.clone()
    }
}
