//! Request/completion round trips through the task dispatcher and the
//! demo collaborator.

mod helpers;

use std::sync::Arc;
use std::time::Duration;

use helpers::*;
use tally_tui::action::{Invocation, InvocationKind, Request};
use tally_tui::context::{Overlay, SuggestionState};
use tally_tui::runtime::demo::seed;
use tally_tui::runtime::{Collaborator, DemoCollaborator, tasks};
use tally_tui::status::StatusLevel;
use tally_tui::{App, Event};
use tokio::sync::mpsc::{Receiver, channel};
use tokio_util::task::TaskTracker;

struct Harness {
    collaborator: Arc<dyn Collaborator>,
    tracker: TaskTracker,
    tx: tokio::sync::mpsc::Sender<Event>,
    rx: Receiver<Event>,
}

impl Harness {
    fn new() -> Self {
        let (tx, rx) = channel(16);
        Self {
            collaborator: Arc::new(DemoCollaborator::new(Duration::ZERO).expect("seed parses")),
            tracker: TaskTracker::new(),
            tx,
            rx,
        }
    }

    /// Dispatch `requests`, feed every completion back into `app`, and
    /// return the follow-up requests.
    async fn run(&mut self, app: &mut App, requests: Vec<Request>) -> Vec<Request> {
        let count = requests.len();
        tasks::dispatch(requests, &self.collaborator, &self.tx, &self.tracker);
        let mut follow_up = Vec::new();
        for _ in 0..count {
            let event = tokio::time::timeout(Duration::from_secs(5), self.rx.recv())
                .await
                .expect("completion arrives")
                .expect("channel open");
            follow_up.extend(app.handle_event(event));
        }
        follow_up
    }

    /// Run requests and their follow-ups until nothing is left.
    async fn settle(&mut self, app: &mut App, mut requests: Vec<Request>) {
        while !requests.is_empty() {
            requests = self.run(app, requests).await;
        }
    }
}

#[tokio::test]
async fn startup_loads_the_snapshot() {
    let mut harness = Harness::new();
    let mut app = empty_app();
    assert!(app.state.loading);

    let requests = app.startup_requests();
    harness.settle(&mut app, requests).await;

    assert!(!app.state.loading);
    assert_eq!(app.state.transactions.row_count(), 14);
    assert_eq!(app.state.data.categories.len(), 8);
}

#[tokio::test]
async fn suggestions_for_a_closed_picker_are_dropped() {
    let mut harness = Harness::new();
    let mut app = seeded_app();

    let stale = press(&mut app, key('c'));
    assert_eq!(stale.len(), 1);
    press(&mut app, esc_key());
    assert!(app.state.overlay.is_none());

    // Reopening mints a new picker id.
    let live = press(&mut app, key('c'));
    assert_ne!(stale[0].context, live[0].context);

    harness.run(&mut app, stale).await;
    let Some(Overlay::CategoryPicker(picker)) = &app.state.overlay else {
        panic!("reopened picker should still be open");
    };
    assert_eq!(picker.suggestions(), SuggestionState::Pending);

    harness.run(&mut app, live).await;
    let Some(Overlay::CategoryPicker(picker)) = &app.state.overlay else {
        panic!("picker should still be open");
    };
    assert!(matches!(picker.suggestions(), SuggestionState::Ready(_)));
}

#[tokio::test]
async fn choosing_a_category_round_trips() {
    let mut harness = Harness::new();
    let mut app = seeded_app();
    // Fresh Market, uncategorized.
    press(&mut app, key('/'));
    type_str(&mut app, "2024-03-16");
    press(&mut app, enter_key());
    assert_eq!(app.state.transactions.selected_id(), Some(12));

    let requests = press(&mut app, key('c'));
    harness.settle(&mut app, requests).await;

    // Keyword and payee-history matches put Groceries first.
    let requests = press(&mut app, enter_key());
    assert_eq!(
        requests.iter().map(|r| r.invocation.kind()).collect::<Vec<_>>(),
        vec![InvocationKind::SetCategory]
    );
    assert!(app.state.overlay.is_none());
    harness.settle(&mut app, requests).await;

    let txn = app.state.data.transaction(12).expect("transaction kept");
    assert_eq!(app.state.data.category_name(txn.category), "Groceries");
    let status = app.state.status.as_ref().expect("status set");
    assert_eq!(status.level, StatusLevel::Success);
    assert_eq!(status.message, "Category applied");
}

#[tokio::test]
async fn merging_duplicates_reloads_the_ledger() {
    let mut harness = Harness::new();
    let mut app = seeded_app();
    press(&mut app, tab_key());
    press(&mut app, tab_key());

    let requests = press(&mut app, key('s'));
    harness.settle(&mut app, requests).await;
    assert!(!app.state.dedup.is_scanning());
    assert_eq!(app.state.dedup.groups().len(), 2);
    assert_eq!(status_text(&app), Some("Found 2 duplicate group(s)"));

    press(&mut app, enter_key());
    assert!(matches!(app.state.overlay, Some(Overlay::DedupReview(_))));
    let requests = press(&mut app, enter_key());
    assert_eq!(
        requests[0].invocation,
        Invocation::ResolveDuplicate {
            group: 3,
            keep: Some(3)
        }
    );
    harness.settle(&mut app, requests).await;

    assert_eq!(app.state.data.transactions.len(), 13);
    assert!(app.state.data.transaction(4).is_none());
    assert_eq!(app.state.dedup.groups().len(), 1);
}

#[tokio::test]
async fn rejected_requests_become_error_status() {
    let mut harness = Harness::new();
    let mut app = seeded_app();
    press(&mut app, tab_key());
    press(&mut app, key('n'));
    type_str(&mut app, "groceries");
    let requests = press(&mut app, enter_key());
    assert_eq!(requests.len(), 1);

    harness.settle(&mut app, requests).await;
    let status = app.state.status.as_ref().expect("status set");
    assert_eq!(status.level, StatusLevel::Error);
    assert!(status.message.starts_with("Failed to create category"));
    assert_eq!(app.state.data.categories.len(), 8);
}

#[tokio::test]
async fn reset_restores_the_seed() {
    let mut harness = Harness::new();
    let mut app = seeded_app();
    press(&mut app, tab_key());
    press(&mut app, key('x'));
    let requests = press(&mut app, key('y'));
    harness.settle(&mut app, requests).await;
    assert_eq!(app.state.data.categories.len(), 7);

    // Reset is bound on the transactions tab.
    press(&mut app, tab_key());
    press(&mut app, tab_key());
    press(&mut app, key('R'));
    let requests = press(&mut app, key('y'));
    harness.settle(&mut app, requests).await;
    assert_eq!(*app.state.data, seed().expect("seed parses"));
    assert_eq!(status_text(&app), Some("Data reset"));
}
