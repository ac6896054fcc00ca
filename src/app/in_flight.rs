//! Exclusivity ledger for in-flight generation requests.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::adapters::MemorySlotClaims;
use crate::domain::AppError;
use crate::ports::SlotClaims;

/// Slot ids currently targeted by an unfinished request.
///
/// A new request whose targets overlap an existing claim is rejected instead
/// of racing it to overwrite the same slots. Claims are recorded in a
/// [`SlotClaims`] registry; [`InFlightLedger::new`] keeps them in memory.
#[derive(Debug, Clone)]
pub struct InFlightLedger {
    claims: Arc<dyn SlotClaims>,
}

impl Default for InFlightLedger {
    fn default() -> Self {
        Self::backed_by(Arc::new(MemorySlotClaims::new()))
    }
}

impl InFlightLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn backed_by(claims: Arc<dyn SlotClaims>) -> Self {
        Self { claims }
    }

    /// Claim every id in `ids`, or none of them if any is already claimed.
    pub fn claim(&self, ids: impl IntoIterator<Item = u32>) -> Result<InFlightClaim, AppError> {
        let ids: BTreeSet<u32> = ids.into_iter().collect();
        self.claims.acquire(&ids)?;
        Ok(InFlightClaim { ledger: self.clone(), ids })
    }

    pub fn is_claimed(&self, id: u32) -> bool {
        self.claims.held().is_ok_and(|held| held.contains(&id))
    }
}

/// Held for the lifetime of one request; releases its ids on drop.
#[derive(Debug)]
pub struct InFlightClaim {
    ledger: InFlightLedger,
    ids: BTreeSet<u32>,
}

impl InFlightClaim {
    pub fn ids(&self) -> &BTreeSet<u32> {
        &self.ids
    }
}

impl Drop for InFlightClaim {
    fn drop(&mut self) {
        if let Err(err) = self.ledger.claims.release(&self.ids) {
            tracing::warn!(error = %err, slots = ?self.ids, "failed to release slot claim");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlapping_claim_is_rejected_with_overlap() {
        let ledger = InFlightLedger::new();
        let _batch = ledger.claim(1..=4).unwrap();

        let err = ledger.claim([3, 4, 7]).unwrap_err();
        match err {
            AppError::GenerationInFlight { slots } => assert_eq!(slots, vec![3, 4]),
            other => panic!("unexpected error: {}", other),
        }
        assert!(!ledger.is_claimed(7));
    }

    #[test]
    fn disjoint_claims_coexist() {
        let ledger = InFlightLedger::new();
        let _first = ledger.claim([1]).unwrap();
        let _second = ledger.claim([2]).unwrap();
        assert!(ledger.is_claimed(1) && ledger.is_claimed(2));
    }

    #[test]
    fn dropping_claim_releases_ids() {
        let ledger = InFlightLedger::new();
        let claim = ledger.claim([5, 6]).unwrap();
        assert_eq!(claim.ids().len(), 2);
        drop(claim);

        assert!(!ledger.is_claimed(5));
        assert!(ledger.claim([5]).is_ok());
    }
}
