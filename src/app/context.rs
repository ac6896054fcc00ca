use crate::app::InFlightLedger;
use crate::domain::{AppError, StoryboardState};
use crate::ports::StoryboardStore;

/// Application context holding dependencies for command execution.
pub struct AppContext<S: StoryboardStore> {
    store: S,
}

impl<S: StoryboardStore> AppContext<S> {
    /// Create a new application context.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Get a reference to the storyboard store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Ledger over the store's claim registry, shared with every other
    /// handle on the same storyboard.
    pub fn ledger(&self) -> InFlightLedger {
        InFlightLedger::backed_by(self.store.claims())
    }

    /// Load the storyboard and normalize it for use.
    ///
    /// Pending flags are kept only for slots a live request still claims.
    pub fn load_state(&self) -> Result<StoryboardState, AppError> {
        let mut state = self.store.load()?;
        let in_flight = self.store.claims().held()?;
        state.rehydrate(&in_flight);
        Ok(state)
    }

    /// Load, apply `edit`, and save when it reports a change.
    pub fn update_state<T>(
        &self,
        edit: impl FnOnce(&mut StoryboardState) -> Result<(T, bool), AppError>,
    ) -> Result<T, AppError> {
        let mut state = self.load_state()?;
        let (value, changed) = edit(&mut state)?;
        if changed {
            self.store.save(&state)?;
        }
        Ok(value)
    }
}
