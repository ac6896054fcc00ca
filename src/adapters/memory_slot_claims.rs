use std::collections::BTreeSet;
use std::sync::{Mutex, MutexGuard};

use crate::domain::AppError;
use crate::ports::SlotClaims;

/// Process-local claim registry.
#[derive(Debug, Default)]
pub struct MemorySlotClaims {
    held: Mutex<BTreeSet<u32>>,
}

impl MemorySlotClaims {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, BTreeSet<u32>> {
        self.held.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl SlotClaims for MemorySlotClaims {
    fn acquire(&self, ids: &BTreeSet<u32>) -> Result<(), AppError> {
        let mut held = self.lock();
        let overlap: Vec<u32> = ids.intersection(&held).copied().collect();
        if !overlap.is_empty() {
            return Err(AppError::GenerationInFlight { slots: overlap });
        }
        held.extend(ids.iter().copied());
        Ok(())
    }

    fn release(&self, ids: &BTreeSet<u32>) -> Result<(), AppError> {
        let mut held = self.lock();
        for id in ids {
            held.remove(id);
        }
        Ok(())
    }

    fn held(&self) -> Result<BTreeSet<u32>, AppError> {
        Ok(self.lock().clone())
    }
}
