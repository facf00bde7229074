//! Response dispatch
//!
//! Matching rules for a [`SelectionResponse`]:
//!
//! | Answer | Fires |
//! |--------|-------|
//! | canceled | every handler with index [`CANCELED`](crate::CANCELED) |
//! | button `k` | every handler with index `k` |
//!
//! Handlers fire in registration order. Duplicate indices all fire; nothing
//! is deduplicated. The first failing handler ends the pass.

use crate::error::Result;
use crate::presenter::{FieldResponse, Identity, Presenter, SelectionResponse};
use crate::response::{Feedback, Response};
use std::sync::Arc;

/// Run every handler matching `response`, returning how many fired
pub fn dispatch_selection<I: Identity>(
    responses: &[Response<I>],
    response: &SelectionResponse,
    presenter: &Arc<dyn Presenter<I>>,
    identity: &I,
) -> Result<usize> {
    let mut fired = 0;
    for handler in responses.iter().filter(|h| h.fires_on(response)) {
        tracing::trace!(index = handler.index(), "response handler fired");
        handler.run(presenter, identity)?;
        fired += 1;
    }

    tracing::debug!(fired, registered = responses.len(), "dispatched selection");
    Ok(fired)
}

/// Hand a modal answer to its feedback handler, unchanged
pub fn dispatch_feedback<I: Identity>(
    feedback: &Feedback<I>,
    identity: &I,
    response: FieldResponse,
) -> Result<()> {
    feedback.run(identity, response)
}
