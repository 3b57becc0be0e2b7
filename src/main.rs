//! Zellij plugin wrapper and entry point.
//!
//! The thin layer between the ztodo library and the Zellij host. Everything
//! that calls into the host lives here; the library only sees events and
//! returns actions.
//!
//! ```text
//! ┌─────────────────────────┐
//! │   Zellij Main Thread    │
//! │  ┌──────────────────┐   │
//! │  │  State (plugin)  │   │  ← keys, timers, rendering
//! │  └──────────────────┘   │
//! │          │ IPC          │
//! │          ▼              │
//! │  ┌──────────────────┐   │
//! │  │  TodoWorkerShim  │   │  ← load, save, lookup
//! │  │ (worker thread)  │   │
//! │  └──────────────────┘   │
//! └─────────────────────────┘
//! ```
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: parse config, start tracing, build state, request permissions
//! 2. **Permissions**: on the host's answer, post `LoadItems` to the worker
//! 3. **Update**: map host events to library events, execute the actions
//! 4. **Render**: delegate to the library renderer
//!
//! # Event Mapping
//!
//! - `Key` → `Event::Char`, `KeyDown`, `KeyUp`, `Submit`, `Cancel`, `Backspace`, `CycleFilter`
//! - `Timer` → `Event::Tick`
//! - `CustomMessage("todo", ..)` → `Event::WorkerResponse`
//! - `PermissionRequestResult` → `Event::Start`

#![allow(clippy::multiple_crate_versions)]

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;
use zellij_tile::prelude::*;
use zellij_tile::shim::{post_message_to, post_message_to_plugin};

use ztodo::worker::{TodoWorker, WorkerMessage, WorkerResponse, WORKER_NAME};
use ztodo::{handle_event, Action, Config, Event, TodoError};

register_plugin!(State);
register_worker!(TodoWorkerShim, todo_worker, TODO_WORKER);

fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Plugin state wrapper around the library's `AppState`.
struct State {
    app: ztodo::AppState,
}

impl Default for State {
    fn default() -> Self {
        Self {
            app: ztodo::initialize(&Config::default()),
        }
    }
}

impl ZellijPlugin for State {
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        ztodo::observability::init_tracing(&config.data_dir, config.trace_level.as_deref());

        let _span = tracing::debug_span!("plugin_load").entered();
        tracing::debug!(config = ?config, "parsed configuration");
        self.app = ztodo::initialize(&config);

        request_permission(&[PermissionType::FullHdAccess]);
        subscribe(&[
            EventType::Key,
            EventType::Timer,
            EventType::CustomMessage,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let _span = tracing::debug_span!("plugin_update_event", event_type = %event_name).entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::Timer(_) => Event::Tick,
            zellij_tile::prelude::Event::CustomMessage(message, payload) => {
                match Self::map_custom_message_event(&message, &payload) {
                    Ok(Some(event)) => event,
                    Ok(None) => return false,
                    Err(e) => {
                        tracing::warn!(error = %e, "dropping worker message");
                        return false;
                    }
                }
            }
            zellij_tile::prelude::Event::PermissionRequestResult(status) => {
                if matches!(status, PermissionStatus::Denied) {
                    tracing::warn!("permissions denied - items may not persist");
                }
                Event::Start
            }
            _ => return false,
        };

        match handle_event(&mut self.app, &our_event, now_ms()) {
            Ok((should_render, actions)) => {
                tracing::debug!(action_count = actions.len(), should_render, "event handled");
                for action in &actions {
                    Self::execute_action(action);
                }
                should_render
            }
            Err(e) => {
                tracing::error!(error = %e, "error handling event");
                false
            }
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        ztodo::ui::render(&self.app, rows, cols);
    }
}

impl State {
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::Timer(_) => "Timer".to_string(),
            zellij_tile::prelude::Event::CustomMessage(msg, _) => format!("CustomMessage({msg})"),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                "PermissionRequestResult".to_string()
            }
            _ => "Other".to_string(),
        }
    }

    /// Translates a key press for the current input mode.
    ///
    /// Ctrl-n and Ctrl-p move the selection; other modified keys are ignored.
    /// Tab only cycles the filter outside text entry.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        if key.has_modifiers(&[KeyModifier::Ctrl]) {
            return match key.bare_key {
                BareKey::Char('n') => Some(Event::KeyDown),
                BareKey::Char('p') => Some(Event::KeyUp),
                _ => None,
            };
        }

        Some(match key.bare_key {
            BareKey::Down => Event::KeyDown,
            BareKey::Up => Event::KeyUp,
            BareKey::Enter => Event::Submit,
            BareKey::Esc => Event::Cancel,
            BareKey::Backspace => Event::Backspace,
            BareKey::Tab if !self.app.input_mode.is_text_entry() => Event::CycleFilter,
            BareKey::Char(c) => Event::Char(c),
            _ => return None,
        })
    }

    /// Decodes a worker reply. Messages addressed to other names yield `None`.
    fn map_custom_message_event(message: &str, payload: &str) -> ztodo::Result<Option<Event>> {
        if message != WORKER_NAME {
            tracing::debug!(message_name = %message, "ignoring custom message with unknown name");
            return Ok(None);
        }
        let response: WorkerResponse = serde_json::from_str(payload)
            .map_err(|e| TodoError::Worker(format!("invalid worker response: {e}")))?;
        Ok(Some(Event::WorkerResponse(response)))
    }

    fn post_worker_message(message: &WorkerMessage) {
        match serde_json::to_string(message) {
            Ok(payload) => {
                tracing::debug!(message_type = message.kind(), payload_len = payload.len(), "posting to worker");
                post_message_to(PluginMessage {
                    worker_name: Some(WORKER_NAME.to_string()),
                    name: WORKER_NAME.to_string(),
                    payload,
                });
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to serialize worker message");
            }
        }
    }

    fn execute_action(action: &Action) {
        match action {
            Action::CloseFocus => hide_self(),
            Action::PostToWorker(message) => Self::post_worker_message(message),
            Action::Wakeup { after_ms } => {
                set_timeout(Duration::from_millis(*after_ms).as_secs_f64());
            }
        }
    }
}

/// Host-facing storage worker.
///
/// Zellij requires workers to be serializable; the repository itself is
/// rebuilt on the first `LoadItems`.
#[derive(Default, Serialize, Deserialize)]
struct TodoWorkerShim {
    #[serde(skip)]
    worker: TodoWorker,
}

impl ZellijWorker<'_> for TodoWorkerShim {
    fn on_message(&mut self, message: String, payload: String) {
        let request: WorkerMessage = match serde_json::from_str(&payload) {
            Ok(request) => request,
            Err(e) => {
                tracing::warn!(error = %e, "failed to deserialize worker message");
                return;
            }
        };

        let is_load = matches!(request, WorkerMessage::LoadItems { .. });
        if let WorkerMessage::LoadItems { data_dir, .. } = &request {
            ztodo::observability::init_tracing(data_dir, None);
        }

        let response = self.worker.handle_message(request);
        if is_load && self.worker.is_degraded() {
            tracing::warn!("storage unavailable - items will not survive a restart");
        }
        match serde_json::to_string(&response) {
            Ok(payload) => post_message_to_plugin(PluginMessage {
                name: message,
                payload,
                worker_name: None,
            }),
            Err(e) => tracing::error!(error = %e, "failed to serialize worker response"),
        }
    }
}
