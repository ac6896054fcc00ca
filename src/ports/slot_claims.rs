//! Slot claim registry port.

use std::collections::BTreeSet;
use std::fmt::Debug;

use crate::domain::AppError;

/// Records which slot ids an unfinished generation request targets.
///
/// Implementations decide how far a claim is visible: the in-memory registry
/// covers one process, the filesystem registry every process sharing a
/// storyboard directory.
pub trait SlotClaims: Debug + Send + Sync {
    /// Claim every id in `ids`, or none of them.
    ///
    /// Fails with [`AppError::GenerationInFlight`] listing the overlapping ids.
    fn acquire(&self, ids: &BTreeSet<u32>) -> Result<(), AppError>;

    /// Release ids previously acquired. Unknown ids are ignored.
    fn release(&self, ids: &BTreeSet<u32>) -> Result<(), AppError>;

    /// Ids currently held by a live claim.
    fn held(&self) -> Result<BTreeSet<u32>, AppError>;
}
