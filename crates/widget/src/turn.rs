/// Identifier for one user submission and its reply.
///
/// Allocated per dispatch so a late completion can never settle a newer turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TurnId(pub u64);

impl TurnId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }
}

/// Which security check the backend refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthRejection {
    /// HTTP 401.
    InvalidCredential,
    /// HTTP 403: the embedding origin is not on the backend's allow list.
    DomainNotAuthorized,
}

pub const FALLBACK_REPLY: &str = "No response received";
pub const CONNECTION_ERROR_REPLY: &str = "Connection error. Please try again.";
pub const INVALID_CREDENTIAL_REPLY: &str =
    "Security error: this chat widget is configured with an invalid credential.";
pub const DOMAIN_NOT_AUTHORIZED_REPLY: &str =
    "Security error: this website is not authorized to use this chat agent.";

impl AuthRejection {
    pub fn from_status(status: u16) -> Option<Self> {
        match status {
            401 => Some(Self::InvalidCredential),
            403 => Some(Self::DomainNotAuthorized),
            _ => None,
        }
    }

    pub fn user_message(self) -> &'static str {
        match self {
            Self::InvalidCredential => INVALID_CREDENTIAL_REPLY,
            Self::DomainNotAuthorized => DOMAIN_NOT_AUTHORIZED_REPLY,
        }
    }
}

/// Classified result of one dispatched turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    Fulfilled { reply: String },
    AuthRejected(AuthRejection),
    TransportFailed,
}

impl TurnOutcome {
    /// Bot-authored text shown for this outcome. Never empty.
    pub fn bot_text(&self) -> &str {
        match self {
            Self::Fulfilled { reply } => reply,
            Self::AuthRejected(rejection) => rejection.user_message(),
            Self::TransportFailed => CONNECTION_ERROR_REPLY,
        }
    }
}

/// What a submit call did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Empty or whitespace-only input; nothing changed.
    Ignored,
    /// Another turn is still dispatched.
    Busy,
    Completed(TurnOutcome),
}

/// Lifecycle of one conversational turn.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TurnPhase {
    #[default]
    Idle,
    Composing,
    Dispatched(TurnId),
    Fulfilled(TurnId),
    AuthRejected {
        turn: TurnId,
        rejection: AuthRejection,
    },
    TransportFailed(TurnId),
}

/// Transition input for the turn lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnTransition {
    Compose,
    Dispatch(TurnId),
    Resolve { turn: TurnId, outcome: TurnOutcome },
    Settle,
}

/// Rejection reason for transitions that do not apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnTransitionRejection {
    TurnInFlight { active: Option<TurnId> },
    NotComposing,
    NoActiveTurn,
    TurnMismatch { active: TurnId, attempted: TurnId },
    NotResolved,
}

pub type TurnTransitionResult = Result<TurnPhase, TurnTransitionRejection>;

impl TurnPhase {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Fulfilled(_) | Self::AuthRejected { .. } | Self::TransportFailed(_)
        )
    }

    /// Returns the dispatched turn if and only if the phase is `Dispatched`.
    pub fn active_turn(&self) -> Option<TurnId> {
        match self {
            Self::Dispatched(turn) => Some(*turn),
            _ => None,
        }
    }

    /// Applies one transition deterministically.
    ///
    /// A new turn may only be composed from `Idle`; terminal phases must be
    /// settled first. `Resolve` must name the dispatched turn exactly.
    pub fn apply(&self, transition: TurnTransition) -> TurnTransitionResult {
        match transition {
            TurnTransition::Compose => self.apply_compose(),
            TurnTransition::Dispatch(turn) => self.apply_dispatch(turn),
            TurnTransition::Resolve { turn, outcome } => self.apply_resolve(turn, outcome),
            TurnTransition::Settle => self.apply_settle(),
        }
    }

    fn apply_compose(&self) -> TurnTransitionResult {
        match self {
            Self::Idle => Ok(Self::Composing),
            Self::Composing => Err(TurnTransitionRejection::TurnInFlight { active: None }),
            Self::Dispatched(active) => Err(TurnTransitionRejection::TurnInFlight {
                active: Some(*active),
            }),
            Self::Fulfilled(_) | Self::AuthRejected { .. } | Self::TransportFailed(_) => {
                Err(TurnTransitionRejection::NotResolved)
            }
        }
    }

    fn apply_dispatch(&self, turn: TurnId) -> TurnTransitionResult {
        match self {
            Self::Composing => Ok(Self::Dispatched(turn)),
            _ => Err(TurnTransitionRejection::NotComposing),
        }
    }

    fn apply_resolve(&self, turn: TurnId, outcome: TurnOutcome) -> TurnTransitionResult {
        match self {
            Self::Dispatched(active) if *active == turn => Ok(match outcome {
                TurnOutcome::Fulfilled { .. } => Self::Fulfilled(turn),
                TurnOutcome::AuthRejected(rejection) => Self::AuthRejected { turn, rejection },
                TurnOutcome::TransportFailed => Self::TransportFailed(turn),
            }),
            Self::Dispatched(active) => Err(TurnTransitionRejection::TurnMismatch {
                active: *active,
                attempted: turn,
            }),
            _ => Err(TurnTransitionRejection::NoActiveTurn),
        }
    }

    fn apply_settle(&self) -> TurnTransitionResult {
        match self {
            Self::Idle | Self::Fulfilled(_) | Self::AuthRejected { .. } | Self::TransportFailed(_) => {
                Ok(Self::Idle)
            }
            Self::Composing | Self::Dispatched(_) => Err(TurnTransitionRejection::TurnInFlight {
                active: self.active_turn(),
            }),
        }
    }
}
