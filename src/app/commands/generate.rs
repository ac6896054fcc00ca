//! Shot generation commands.
//!
//! The stored state is not held across the request: pending flags are saved
//! before dispatch, and the reply is merged into a freshly loaded copy so edits
//! made meanwhile by other invocations survive.

use crate::app::AppContext;
use crate::app::orchestrator::{BatchOutcome, GenerationOrchestrator};
use crate::domain::{AppError, ShotContent};
use crate::ports::{GenerativeClient, StoryboardStore};

/// Generate every slot in one request.
///
/// Fails with `GenerationInFlight` when any slot is claimed by another request.
pub fn all<S, C>(ctx: &AppContext<S>, client: C) -> Result<BatchOutcome, AppError>
where
    S: StoryboardStore,
    C: GenerativeClient,
{
    let orchestrator = GenerationOrchestrator::with_ledger(client, ctx.ledger());

    let mut state = ctx.load_state()?;
    let ticket = orchestrator.begin_generate_all(&mut state)?;
    ctx.store().save(&state)?;

    let response = orchestrator.dispatch(ticket.request());

    let mut state = ctx.load_state()?;
    let outcome = orchestrator.finish_generate_all(&mut state, ticket, response);
    ctx.store().save(&state)?;
    outcome
}

/// Generate slot `id` alone.
pub fn single<S, C>(ctx: &AppContext<S>, client: C, id: u32) -> Result<ShotContent, AppError>
where
    S: StoryboardStore,
    C: GenerativeClient,
{
    let orchestrator = GenerationOrchestrator::with_ledger(client, ctx.ledger());

    let mut state = ctx.load_state()?;
    let ticket = orchestrator.begin_generate_single(&mut state, id)?;
    ctx.store().save(&state)?;

    let response = orchestrator.dispatch(ticket.request());

    let mut state = ctx.load_state()?;
    let content = orchestrator.finish_generate_single(&mut state, ticket, response);
    ctx.store().save(&state)?;
    content
}
