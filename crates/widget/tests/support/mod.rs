#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;
use std::time::Duration;

use futures::channel::oneshot;
use futures::future::LocalBoxFuture;
use omni_widget::{
    ChatTransport, ConfigError, Diagnostics, EntryId, EntryKind, EventDispatcher, HostBindings,
    MountSpec, RenderedEntry, Runtime, Sender, SessionId, Surface, TransportError,
    TransportResponse, TransportResult, WidgetHandle, mount,
};

pub const API_URL: &str = "https://agent.example.com";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceCall {
    InjectStyles(String),
    Mount,
    Bind,
    Show {
        id: EntryId,
        sender: Sender,
        kind: EntryKind,
        html: String,
    },
    Drop(EntryId),
    Scroll,
    Visible(bool),
    InputEnabled(bool),
    ClearInput,
    FocusInput,
}

/// Surface fake that records every call; clones share the same log.
#[derive(Clone, Default)]
pub struct RecordingSurface {
    calls: Rc<RefCell<Vec<SurfaceCall>>>,
    dispatcher: Rc<RefCell<Option<EventDispatcher>>>,
}

impl RecordingSurface {
    pub fn calls(&self) -> Vec<SurfaceCall> {
        self.calls.borrow().clone()
    }

    pub fn clear(&self) {
        self.calls.borrow_mut().clear();
    }

    pub fn dispatcher(&self) -> Option<EventDispatcher> {
        self.dispatcher.borrow().clone()
    }

    pub fn shown(&self) -> Vec<(EntryId, Sender, EntryKind, String)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                SurfaceCall::Show {
                    id,
                    sender,
                    kind,
                    html,
                } => Some((id, sender, kind, html)),
                _ => None,
            })
            .collect()
    }

    pub fn placeholders_shown(&self) -> Vec<EntryId> {
        self.shown()
            .into_iter()
            .filter(|(_, _, kind, _)| *kind == EntryKind::Placeholder)
            .map(|(id, ..)| id)
            .collect()
    }

    pub fn dropped(&self) -> Vec<EntryId> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                SurfaceCall::Drop(id) => Some(id),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: SurfaceCall) {
        self.calls.borrow_mut().push(call);
    }
}

impl Surface for RecordingSurface {
    fn inject_styles(&mut self, stylesheet: &str) {
        self.record(SurfaceCall::InjectStyles(stylesheet.to_string()));
    }

    fn mount(&mut self, _spec: &MountSpec) {
        self.record(SurfaceCall::Mount);
    }

    fn bind(&mut self, dispatcher: EventDispatcher) {
        *self.dispatcher.borrow_mut() = Some(dispatcher);
        self.record(SurfaceCall::Bind);
    }

    fn show_entry(&mut self, entry: RenderedEntry<'_>) {
        self.record(SurfaceCall::Show {
            id: entry.id,
            sender: entry.sender,
            kind: entry.kind,
            html: entry.html(),
        });
    }

    fn drop_entry(&mut self, id: EntryId) {
        self.record(SurfaceCall::Drop(id));
    }

    fn scroll_to_latest(&mut self) {
        self.record(SurfaceCall::Scroll);
    }

    fn set_window_visible(&mut self, visible: bool) {
        self.record(SurfaceCall::Visible(visible));
    }

    fn set_input_enabled(&mut self, enabled: bool) {
        self.record(SurfaceCall::InputEnabled(enabled));
    }

    fn clear_input(&mut self) {
        self.record(SurfaceCall::ClearInput);
    }

    fn focus_input(&mut self) {
        self.record(SurfaceCall::FocusInput);
    }
}

pub enum Scripted {
    Respond(u16, String),
    Fail(&'static str),
    Gate(oneshot::Receiver<TransportResponse>),
}

/// Transport fake answering from a queue and recording request bodies.
#[derive(Default)]
pub struct ScriptedTransport {
    script: RefCell<VecDeque<Scripted>>,
    requests: RefCell<Vec<(String, serde_json::Value)>>,
}

impl ScriptedTransport {
    pub fn respond(&self, status: u16, body: &str) {
        self.push(Scripted::Respond(status, body.to_string()));
    }

    pub fn fail(&self, cause: &'static str) {
        self.push(Scripted::Fail(cause));
    }

    pub fn gate(&self) -> oneshot::Sender<TransportResponse> {
        let (tx, rx) = oneshot::channel();
        self.push(Scripted::Gate(rx));
        tx
    }

    pub fn push(&self, step: Scripted) {
        self.script.borrow_mut().push_back(step);
    }

    pub fn requests(&self) -> Vec<(String, serde_json::Value)> {
        self.requests.borrow().clone()
    }

    fn network_error(url: &str, cause: &str) -> TransportError {
        TransportError::Network {
            stage: "scripted-transport",
            url: url.to_string(),
            source: Box::new(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                cause.to_string(),
            )),
        }
    }
}

impl ChatTransport for ScriptedTransport {
    fn post_json<'a>(
        &'a self,
        url: &'a str,
        body: String,
    ) -> LocalBoxFuture<'a, TransportResult<TransportResponse>> {
        let parsed = serde_json::from_str(&body).unwrap_or(serde_json::Value::Null);
        self.requests.borrow_mut().push((url.to_string(), parsed));
        let step = self.script.borrow_mut().pop_front();

        Box::pin(async move {
            match step {
                Some(Scripted::Respond(status, body)) => Ok(TransportResponse::new(status, body)),
                Some(Scripted::Fail(cause)) => Err(Self::network_error(url, cause)),
                Some(Scripted::Gate(rx)) => rx
                    .await
                    .map_err(|_| Self::network_error(url, "gate dropped")),
                None => Err(Self::network_error(url, "no scripted response")),
            }
        })
    }
}

#[derive(Default)]
pub struct RecordingDiagnostics {
    pub config_errors: RefCell<Vec<String>>,
    pub transport_errors: RefCell<Vec<String>>,
}

impl Diagnostics for RecordingDiagnostics {
    fn configuration_rejected(&self, error: &ConfigError) {
        self.config_errors.borrow_mut().push(error.to_string());
    }

    fn transport_failed(&self, _session_id: &SessionId, error: &TransportError) {
        self.transport_errors.borrow_mut().push(error.to_string());
    }
}

/// Runtime fake: spawned tasks wait until `run_pending`, sleeps resolve at once.
#[derive(Default)]
pub struct ManualRuntime {
    tasks: RefCell<VecDeque<LocalBoxFuture<'static, ()>>>,
    sleeps: RefCell<Vec<Duration>>,
}

impl ManualRuntime {
    pub async fn run_pending(&self) {
        loop {
            let next = self.tasks.borrow_mut().pop_front();
            match next {
                Some(task) => task.await,
                None => break,
            }
        }
    }

    pub fn pending_tasks(&self) -> usize {
        self.tasks.borrow().len()
    }

    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.borrow().clone()
    }
}

impl Runtime for ManualRuntime {
    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        self.tasks.borrow_mut().push_back(task);
    }

    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()> {
        self.sleeps.borrow_mut().push(duration);
        Box::pin(async {})
    }
}

pub struct Harness {
    pub surface: RecordingSurface,
    pub transport: Rc<ScriptedTransport>,
    pub runtime: Rc<ManualRuntime>,
    pub diagnostics: Rc<RecordingDiagnostics>,
}

impl Harness {
    pub fn new() -> Self {
        Self {
            surface: RecordingSurface::default(),
            transport: Rc::new(ScriptedTransport::default()),
            runtime: Rc::new(ManualRuntime::default()),
            diagnostics: Rc::new(RecordingDiagnostics::default()),
        }
    }

    pub fn mount(&self, attributes: &[(&str, &str)]) -> Result<WidgetHandle, ConfigError> {
        let attributes = attributes
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect::<HashMap<String, String>>();

        mount(
            &attributes,
            HostBindings {
                surface: Box::new(self.surface.clone()),
                transport: self.transport.clone(),
                runtime: self.runtime.clone(),
                diagnostics: self.diagnostics.clone(),
            },
        )
    }

    /// Mounts in user-id mode and discards the boot-time surface calls.
    pub fn mount_default(&self) -> WidgetHandle {
        let handle = self
            .mount(&[("data-user-id", "user-42"), ("data-api-url", API_URL)])
            .expect("default attributes are valid");
        self.surface.clear();
        handle
    }
}
