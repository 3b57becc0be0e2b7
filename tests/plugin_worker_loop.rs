//! Drives the controller and the storage worker together, the way the plugin
//! shim does, against a real data directory.

use pretty_assertions::assert_eq;
use std::path::Path;
use ztodo::app::DetailState;
use ztodo::worker::{TodoWorker, WorkerMessage, WorkerResponse};
use ztodo::{handle_event, initialize, Action, AppState, Config, Event, FilterMode, LatencyConfig};

const T0: i64 = 1_700_000_000_000;

/// Plugin state plus its worker, with actions routed synchronously.
struct Harness {
    state: AppState,
    worker: TodoWorker,
    now: i64,
}

impl Harness {
    fn start(data_dir: &Path, latency: LatencyConfig) -> Self {
        let config = Config {
            data_dir: data_dir.to_path_buf(),
            latency,
            ..Config::default()
        };
        let mut harness = Self {
            state: initialize(&config),
            worker: TodoWorker::default(),
            now: T0,
        };
        harness.send(Event::Start);
        harness
    }

    /// Handles an event and runs every resulting worker request to completion.
    fn send(&mut self, event: Event) -> Vec<Action> {
        let (_, actions) = handle_event(&mut self.state, &event, self.now).expect("handled");
        let mut other = vec![];
        for action in actions {
            match action {
                Action::PostToWorker(message) => {
                    let response = self.round_trip(message);
                    self.send(Event::WorkerResponse(response));
                }
                action => other.push(action),
            }
        }
        other
    }

    /// Sends a message through its JSON wire form, as the host does.
    fn round_trip(&mut self, message: WorkerMessage) -> WorkerResponse {
        let payload = serde_json::to_string(&message).expect("encode request");
        let request = serde_json::from_str(&payload).expect("decode request");
        let response = self.worker.handle_message(request);
        let payload = serde_json::to_string(&response).expect("encode response");
        serde_json::from_str(&payload).expect("decode response")
    }

    fn advance(&mut self, ms: i64) {
        self.now += ms;
        self.send(Event::Tick);
    }

    fn texts(&self) -> Vec<String> {
        self.state
            .collection
            .items()
            .iter()
            .map(|item| item.text.clone())
            .collect()
    }
}

#[test]
fn items_survive_a_restart() {
    let dir = tempfile::tempdir().expect("temp dir");
    let mut first = Harness::start(dir.path(), LatencyConfig::none());

    first.send(Event::Add { text: "wash dishes".into() });
    first.send(Event::Add { text: "buy milk".into() });
    let milk = first.state.collection.items()[1].id;
    first.send(Event::ToggleComplete { id: milk });
    first.send(Event::ToggleFavorite { id: milk });

    let second = Harness::start(dir.path(), LatencyConfig::none());
    assert_eq!(second.texts(), vec!["wash dishes", "buy milk"]);
    let reloaded = &second.state.collection.items()[1];
    assert!(reloaded.completed);
    assert!(reloaded.is_favorite);
}

#[test]
fn stored_blob_uses_the_public_field_names() {
    let dir = tempfile::tempdir().expect("temp dir");
    let mut harness = Harness::start(dir.path(), LatencyConfig::none());
    harness.send(Event::Add { text: "buy milk".into() });

    let blob = std::fs::read_to_string(dir.path().join("todos.json")).expect("stored");
    let value: serde_json::Value = serde_json::from_str(&blob).expect("json");
    assert_eq!(
        value,
        serde_json::json!([{
            "id": T0,
            "text": "buy milk",
            "completed": false,
            "isFavorite": false
        }])
    );
}

#[test]
fn deferred_delete_persists_only_after_its_window() {
    let dir = tempfile::tempdir().expect("temp dir");
    let mut harness = Harness::start(dir.path(), LatencyConfig::default());

    harness.send(Event::Add { text: "a".into() });
    let wakeups = harness.send(Event::Add { text: "rejected while busy".into() });
    assert!(wakeups.is_empty());
    harness.advance(300);
    assert_eq!(harness.texts(), vec!["a"]);

    let id = harness.state.collection.items()[0].id;
    let actions = harness.send(Event::Delete { id });
    assert_eq!(actions, vec![Action::Wakeup { after_ms: 300 }]);

    harness.advance(100);
    assert_eq!(harness.texts(), vec!["a"]);
    harness.advance(200);
    assert!(harness.texts().is_empty());

    let restarted = Harness::start(dir.path(), LatencyConfig::none());
    assert!(restarted.texts().is_empty());
}

#[test]
fn detail_lookup_reads_the_committed_item() {
    let dir = tempfile::tempdir().expect("temp dir");
    let mut harness = Harness::start(dir.path(), LatencyConfig::none());
    harness.send(Event::Add { text: "buy milk".into() });
    let id = harness.state.collection.items()[0].id;
    harness.send(Event::CommitEdit { id, text: "buy oat milk".into() });

    harness.send(Event::OpenDetail { id: id.to_string() });
    match &harness.state.detail.as_ref().expect("detail open").state {
        DetailState::Found(item) => assert_eq!(item.text, "buy oat milk"),
        other => panic!("unexpected detail state: {other:?}"),
    }

    harness.send(Event::OpenDetail { id: "not-a-number".into() });
    assert_eq!(
        harness.state.detail.as_ref().map(|d| d.state.clone()),
        Some(DetailState::NotFound)
    );
}

#[test]
fn corrupt_store_starts_empty_and_says_so() {
    let dir = tempfile::tempdir().expect("temp dir");
    std::fs::write(dir.path().join("todos.json"), "{ not json").expect("write");

    let mut harness = Harness::start(dir.path(), LatencyConfig::none());
    assert!(harness.texts().is_empty());
    let notification = harness.state.notification.visible().expect("notified");
    assert!(notification.message.contains("could not be read"));

    harness.send(Event::Add { text: "fresh start".into() });
    let restarted = Harness::start(dir.path(), LatencyConfig::none());
    assert_eq!(restarted.texts(), vec!["fresh start"]);
}

#[test]
fn filters_and_search_never_change_the_stored_order() {
    let dir = tempfile::tempdir().expect("temp dir");
    let mut harness = Harness::start(dir.path(), LatencyConfig::none());
    for text in ["wash dishes", "buy milk", "walk dog"] {
        harness.send(Event::Add { text: text.into() });
    }

    harness.send(Event::SetFilter(FilterMode::Active));
    harness.send(Event::SetSearch("MILK".into()));
    let visible: Vec<String> = harness
        .state
        .visible_items()
        .iter()
        .map(|item| item.text.clone())
        .collect();
    assert_eq!(visible, vec!["buy milk"]);
    assert_eq!(harness.texts(), vec!["wash dishes", "buy milk", "walk dog"]);
}
