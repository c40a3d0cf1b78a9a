#![deny(unsafe_code)]

//! Session and message-exchange core of the Omni embeddable chat widget.
//!
//! Hosts (the browser crate, the console harness) provide a [`Surface`], a
//! [`ChatTransport`], a [`Runtime`] and [`Diagnostics`], then call [`mount`].

pub mod board;
/// Boot order: configuration, styles, surface, listeners, welcome line.
pub mod bootstrap;
pub mod client;
pub mod config;
pub mod diagnostics;
pub mod error;
/// Event contracts between surface listeners and the widget.
pub mod events;
pub mod message;
pub mod protocol;
pub mod render;
pub mod runtime;
pub mod session;
pub mod styles;
pub mod surface;
pub mod transport;
/// Turn lifecycle state machine and outcome classification types.
pub mod turn;
pub mod visibility;
pub mod widget;

pub use board::{MessageBoard, PLACEHOLDER_TEXT};
pub use bootstrap::{HostBindings, WELCOME_DELAY, WELCOME_MESSAGE, WidgetHandle, mount};
pub use client::{ChatClient, classify};
pub use config::{AttributeSource, AuthMode, DEFAULT_THEME_COLOR, WidgetConfig};
pub use diagnostics::{Diagnostics, TracingDiagnostics};
pub use error::{ConfigError, ConfigResult, TransportCause, TransportError, TransportResult};
pub use events::{EventDispatcher, WidgetEvent};
pub use message::{EntryId, EntryKind, Message, Sender};
pub use render::Fragment;
pub use runtime::Runtime;
pub use session::{Session, SessionId};
pub use surface::{MountSpec, RenderedEntry, Surface};
pub use transport::{ChatTransport, ReqwestTransport, TransportResponse};
pub use turn::{
    AuthRejection, CONNECTION_ERROR_REPLY, DOMAIN_NOT_AUTHORIZED_REPLY, FALLBACK_REPLY,
    INVALID_CREDENTIAL_REPLY, SubmitOutcome, TurnId, TurnOutcome, TurnPhase,
};
pub use visibility::Visibility;
pub use widget::ChatWidget;
