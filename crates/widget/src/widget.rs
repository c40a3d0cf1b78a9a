use std::cell::RefCell;
use std::rc::Rc;

use crate::board::MessageBoard;
use crate::client::ChatClient;
use crate::config::WidgetConfig;
use crate::events::EventDispatcher;
use crate::message::{EntryId, Message, Sender};
use crate::runtime::Runtime;
use crate::session::SessionId;
use crate::surface::Surface;
use crate::turn::{
    SubmitOutcome, TurnId, TurnOutcome, TurnPhase, TurnTransition, TurnTransitionRejection,
};
use crate::visibility::Visibility;

/// Everything the widget mutates, touched only from the host event loop.
struct WidgetState {
    surface: Box<dyn Surface>,
    board: MessageBoard,
    visibility: Visibility,
    phase: TurnPhase,
    next_turn_id: u64,
}

impl WidgetState {
    fn alloc_turn_id(&mut self) -> TurnId {
        self.next_turn_id = self.next_turn_id.saturating_add(1);
        TurnId::new(self.next_turn_id)
    }
}

/// Turn accepted for dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingTurn {
    turn: TurnId,
    placeholder: EntryId,
    text: String,
}

/// One mounted widget instance: message board, turn lifecycle and visibility.
///
/// State sits behind a `RefCell` and no borrow is held across an `.await`, so
/// replies may land while the window is closed or while the user toggles it.
pub struct ChatWidget {
    config: WidgetConfig,
    client: ChatClient,
    runtime: Rc<dyn Runtime>,
    state: RefCell<WidgetState>,
}

impl ChatWidget {
    pub(crate) fn new(
        config: WidgetConfig,
        client: ChatClient,
        runtime: Rc<dyn Runtime>,
        surface: Box<dyn Surface>,
    ) -> Self {
        Self {
            config,
            client,
            runtime,
            state: RefCell::new(WidgetState {
                surface,
                board: MessageBoard::new(),
                visibility: Visibility::default(),
                phase: TurnPhase::default(),
                next_turn_id: 0,
            }),
        }
    }

    pub(crate) fn bind(&self, dispatcher: EventDispatcher) {
        self.state.borrow_mut().surface.bind(dispatcher);
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    pub fn session_id(&self) -> &SessionId {
        self.client.session().id()
    }

    pub fn runtime(&self) -> Rc<dyn Runtime> {
        Rc::clone(&self.runtime)
    }

    pub fn visibility(&self) -> Visibility {
        self.state.borrow().visibility
    }

    pub fn phase(&self) -> TurnPhase {
        self.state.borrow().phase.clone()
    }

    /// Committed messages, oldest first.
    pub fn messages(&self) -> Vec<Message> {
        self.state.borrow().board.messages().cloned().collect()
    }

    pub fn has_pending_placeholder(&self) -> bool {
        self.state.borrow().board.placeholder_count() > 0
    }

    /// Runs one turn for the raw input value.
    ///
    /// Empty input is ignored without touching the board. A submit while a turn
    /// is dispatched is refused rather than queued.
    pub async fn submit(&self, input: &str) -> SubmitOutcome {
        let text = input.trim();
        if text.is_empty() {
            return SubmitOutcome::Ignored;
        }

        let pending = match self.begin_turn(text) {
            Ok(pending) => pending,
            Err(rejection) => {
                tracing::debug!(?rejection, "submit refused while a turn is in flight");
                return SubmitOutcome::Busy;
            }
        };

        let outcome = self.client.exchange(&pending.text).await;
        self.complete_turn(pending.turn, pending.placeholder, outcome.clone());
        SubmitOutcome::Completed(outcome)
    }

    fn begin_turn(&self, text: &str) -> Result<PendingTurn, TurnTransitionRejection> {
        let mut state = self.state.borrow_mut();
        let composing = state.phase.apply(TurnTransition::Compose)?;
        let turn = state.alloc_turn_id();
        let dispatched = composing.apply(TurnTransition::Dispatch(turn))?;

        let WidgetState {
            surface,
            board,
            phase,
            ..
        } = &mut *state;

        board.append(surface.as_mut(), text, Sender::User);
        surface.clear_input();
        let placeholder = board.append_placeholder(surface.as_mut());
        surface.set_input_enabled(false);
        *phase = dispatched;

        tracing::debug!(turn = ?turn, session_id = %self.session_id(), "turn dispatched");

        Ok(PendingTurn {
            turn,
            placeholder,
            text: text.to_string(),
        })
    }

    /// Applies a resolved turn: the single path by which replies reach the board.
    ///
    /// Retracts the placeholder (tolerating a handle that is already gone),
    /// appends the bot reply, re-enables input and returns the phase to idle.
    /// Completions for a turn that is not the dispatched one are ignored.
    pub fn complete_turn(&self, turn: TurnId, placeholder: EntryId, outcome: TurnOutcome) {
        let mut state = self.state.borrow_mut();
        let WidgetState {
            surface,
            board,
            visibility,
            phase,
            ..
        } = &mut *state;

        let resolved = match phase.apply(TurnTransition::Resolve {
            turn,
            outcome: outcome.clone(),
        }) {
            Ok(resolved) => resolved,
            Err(rejection) => {
                tracing::warn!(turn = ?turn, ?rejection, "ignoring completion for an inactive turn");
                return;
            }
        };
        *phase = resolved;

        board.remove(surface.as_mut(), placeholder);
        board.append(surface.as_mut(), outcome.bot_text(), Sender::Bot);

        surface.set_input_enabled(true);
        if visibility.is_open() {
            surface.focus_input();
        }

        tracing::debug!(turn = ?turn, phase = ?phase, "turn resolved");
        *phase = phase.apply(TurnTransition::Settle).unwrap_or_default();
    }

    /// Appends a bot-authored message outside of any turn (the welcome line).
    pub fn post_bot_message(&self, text: &str) -> EntryId {
        let mut state = self.state.borrow_mut();
        let WidgetState { surface, board, .. } = &mut *state;
        board.append(surface.as_mut(), text, Sender::Bot)
    }

    /// Flips window visibility; opening moves focus to the input.
    pub fn toggle(&self) -> Visibility {
        let mut state = self.state.borrow_mut();
        let next = state.visibility.toggled();
        state.visibility = next;
        state.surface.set_window_visible(next.is_open());
        if next.is_open() {
            state.surface.focus_input();
        }
        next
    }
}
