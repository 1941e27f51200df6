//! Spawning collaborator requests.
//!
//! Responsibilities:
//! - Run each `Request` on the task tracker and post its `Completion` back
//!   to the event channel.
//!
//! Does NOT handle:
//! - Deciding whether a completion is stale. The app checks the context id
//!   when the completion arrives.
//!
//! Invariants:
//! - Every spawned request posts exactly one completion unless the event
//!   channel has closed.

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::mpsc::Sender;
use tokio_util::task::TaskTracker;
use tracing::{Instrument, info_span};

use crate::action::{Completion, Request};
use crate::event::Event;

use super::collaborator::Collaborator;

pub fn dispatch(
    requests: Vec<Request>,
    collaborator: &Arc<dyn Collaborator>,
    tx: &Sender<Event>,
    tracker: &TaskTracker,
) {
    for request in requests {
        let collaborator = Arc::clone(collaborator);
        let tx = tx.clone();
        let span = info_span!(
            "tally.dispatch",
            kind = %request.invocation.kind(),
            context = %request.context,
            duration_ms = tracing::field::Empty,
        );
        tracker.spawn(
            async move {
                let start = Instant::now();
                let completion = match collaborator.call(request.invocation.clone()).await {
                    Ok(payload) => Completion::ok(&request, payload),
                    Err(e) => Completion::failed(&request, e.to_string()),
                };
                tracing::Span::current().record("duration_ms", start.elapsed().as_millis() as i64);
                if tx.send(Event::Completion(completion)).await.is_err() {
                    tracing::debug!("Event channel closed; completion dropped");
                }
            }
            .instrument(span),
        );
    }
}
