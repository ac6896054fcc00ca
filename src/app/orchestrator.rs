//! Generation orchestrator: one remote call per operation, merged into the storyboard.
//!
//! Batch and single-shot generation are split into `begin_*` / [`dispatch`] /
//! `finish_*` phases so a host can persist the pending flags, release its copy of
//! the state while the request is outstanding, and merge into a freshly loaded
//! copy. The plain `generate_*` methods run all three in a row.
//!
//! [`dispatch`]: GenerationOrchestrator::dispatch

use std::collections::BTreeSet;

use tracing::{info, warn};

use crate::app::in_flight::{InFlightClaim, InFlightLedger};
use crate::domain::generation::{
    GenerationRequest, StoryboardReply, parse_bilingual_pair, parse_storyboard,
};
use crate::domain::{AppError, SceneDescription, ShotContent, StoryboardState, effective_scene_text};
use crate::ports::GenerativeClient;

/// An issued batch request. Pass it back to `finish_generate_all`.
#[derive(Debug)]
pub struct BatchTicket {
    request: GenerationRequest,
    slot_count: usize,
    claim: InFlightClaim,
}

impl BatchTicket {
    pub fn request(&self) -> &GenerationRequest {
        &self.request
    }
}

/// An issued single-shot request. Pass it back to `finish_generate_single`.
#[derive(Debug)]
pub struct SingleTicket {
    request: GenerationRequest,
    slot_id: u32,
    claim: InFlightClaim,
}

impl SingleTicket {
    pub fn request(&self) -> &GenerationRequest {
        &self.request
    }

    pub fn slot_id(&self) -> u32 {
        self.slot_id
    }
}

/// Result of a successful batch merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOutcome {
    /// Slots whose content was replaced.
    pub merged: usize,
    /// Slots that were requested but had no result at their position.
    pub missing: usize,
    /// Whether the scene was replaced by the refined description.
    pub scene_refined: bool,
}

pub struct GenerationOrchestrator<C: GenerativeClient> {
    client: C,
    ledger: InFlightLedger,
}

impl<C: GenerativeClient> GenerationOrchestrator<C> {
    pub fn new(client: C) -> Self {
        Self::with_ledger(client, InFlightLedger::new())
    }

    /// Share a ledger between orchestrators that write to the same storyboard.
    pub fn with_ledger(client: C, ledger: InFlightLedger) -> Self {
        Self { client, ledger }
    }

    pub fn ledger(&self) -> &InFlightLedger {
        &self.ledger
    }

    /// Derive a scene description from an image and replace the current scene with it.
    pub fn analyze_scene(
        &self,
        state: &mut StoryboardState,
        image: Vec<u8>,
        mime_type: &str,
    ) -> Result<SceneDescription, AppError> {
        let scene = self.describe_image(image, mime_type)?;
        state.scene = scene.clone();
        info!("scene replaced from image analysis");
        Ok(scene)
    }

    /// Ask for a scene description of an image without touching any state.
    pub fn describe_image(
        &self,
        image: Vec<u8>,
        mime_type: &str,
    ) -> Result<SceneDescription, AppError> {
        let request = GenerationRequest::analyze_scene(image, mime_type)?;
        let text = self.dispatch(&request)?;
        Ok(parse_bilingual_pair(&text)?)
    }

    /// Generate content for every slot and merge it by position.
    pub fn generate_all(&self, state: &mut StoryboardState) -> Result<BatchOutcome, AppError> {
        let ticket = self.begin_generate_all(state)?;
        let response = self.dispatch(ticket.request());
        self.finish_generate_all(state, ticket, response)
    }

    /// Generate content for one slot and merge it by id.
    pub fn generate_single(
        &self,
        state: &mut StoryboardState,
        slot_id: u32,
    ) -> Result<ShotContent, AppError> {
        let ticket = self.begin_generate_single(state, slot_id)?;
        let response = self.dispatch(ticket.request());
        self.finish_generate_single(state, ticket, response)
    }

    /// Claim every slot, mark them pending, and build the batch request.
    pub fn begin_generate_all(&self, state: &mut StoryboardState) -> Result<BatchTicket, AppError> {
        let claim = self.ledger.claim(state.slots.iter().map(|slot| slot.id))?;
        let request = GenerationRequest::storyboard(
            &effective_scene_text(&state.scene),
            &state.grid.label,
            &state.shot_types(),
        )?;

        for slot in &mut state.slots {
            slot.is_pending = true;
        }

        Ok(BatchTicket { request, slot_count: state.slots.len(), claim })
    }

    /// Claim one slot, mark it pending, and build the single-shot request.
    pub fn begin_generate_single(
        &self,
        state: &mut StoryboardState,
        slot_id: u32,
    ) -> Result<SingleTicket, AppError> {
        let shot_type =
            state.slot(slot_id).ok_or(AppError::SlotNotFound(slot_id))?.shot_type.clone();
        let claim = self.ledger.claim([slot_id])?;
        let request =
            GenerationRequest::single_shot(&effective_scene_text(&state.scene), &shot_type)?;

        mark_pending(state, claim.ids(), true);
        Ok(SingleTicket { request, slot_id, claim })
    }

    /// Send a request. Holds no reference to the storyboard.
    pub fn dispatch(&self, request: &GenerationRequest) -> Result<String, AppError> {
        info!(kind = request.kind.as_str(), "dispatching generation request");
        self.client.generate_json(request).inspect_err(|err| {
            warn!(kind = request.kind.as_str(), error = %err, "generation request failed");
        })
    }

    /// Merge a batch response. On any failure nothing but the pending flags changes.
    pub fn finish_generate_all(
        &self,
        state: &mut StoryboardState,
        ticket: BatchTicket,
        response: Result<String, AppError>,
    ) -> Result<BatchOutcome, AppError> {
        let reply = response.and_then(|text| Ok(parse_storyboard(&text)?));
        mark_pending(state, ticket.claim.ids(), false);

        let StoryboardReply { refined_scene, shots } = reply?;

        let merged = shots.len().min(ticket.slot_count);
        // Positional: result i belongs to whatever slot sits at position i now.
        for (slot, content) in state.slots.iter_mut().take(ticket.slot_count).zip(shots) {
            slot.content = Some(content);
        }

        let scene_refined = refined_scene.is_some();
        if let Some(scene) = refined_scene {
            state.scene = scene;
        }

        let missing = ticket.slot_count.saturating_sub(merged);
        let outcome = BatchOutcome { merged, missing, scene_refined };
        if outcome.missing > 0 {
            warn!(missing = outcome.missing, "batch reply had fewer shots than requested");
        }
        info!(merged = outcome.merged, scene_refined, "batch generation merged");
        Ok(outcome)
    }

    /// Merge a single-shot response into its slot, if the slot still exists.
    pub fn finish_generate_single(
        &self,
        state: &mut StoryboardState,
        ticket: SingleTicket,
        response: Result<String, AppError>,
    ) -> Result<ShotContent, AppError> {
        let reply = response.and_then(|text| Ok(parse_bilingual_pair(&text)?));
        mark_pending(state, ticket.claim.ids(), false);
        let content = reply?;

        match state.slots.iter_mut().find(|slot| slot.id == ticket.slot_id) {
            Some(slot) => slot.content = Some(content.clone()),
            None => warn!(slot = ticket.slot_id, "slot removed before single shot completed"),
        }
        info!(slot = ticket.slot_id, "single shot merged");
        Ok(content)
    }
}

fn mark_pending(state: &mut StoryboardState, ids: &BTreeSet<u32>, pending: bool) {
    for slot in state.slots.iter_mut().filter(|slot| ids.contains(&slot.id)) {
        slot.is_pending = pending;
    }
}
