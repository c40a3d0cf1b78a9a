use std::rc::{Rc, Weak};

use crate::widget::ChatWidget;

/// Input raised by the surface's listeners.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetEvent {
    /// Launcher bubble or close control activated.
    Toggle,
    /// Send control activated or Enter pressed with the current input value.
    Submit(String),
}

/// Routes surface events back into the widget.
///
/// Holds a weak reference: the surface owns its listeners and the widget owns
/// the surface, so a strong reference here would form a cycle.
#[derive(Clone)]
pub struct EventDispatcher {
    widget: Weak<ChatWidget>,
}

impl EventDispatcher {
    pub(crate) fn new(widget: &Rc<ChatWidget>) -> Self {
        Self {
            widget: Rc::downgrade(widget),
        }
    }

    pub fn dispatch(&self, event: WidgetEvent) {
        let Some(widget) = self.widget.upgrade() else {
            tracing::debug!(?event, "dropping event for an unmounted widget");
            return;
        };

        match event {
            WidgetEvent::Toggle => {
                widget.toggle();
            }
            WidgetEvent::Submit(input) => {
                let runtime = widget.runtime();
                runtime.spawn(Box::pin(async move {
                    let outcome = widget.submit(&input).await;
                    tracing::trace!(?outcome, "submit handled");
                }));
            }
        }
    }

    pub fn toggle(&self) {
        self.dispatch(WidgetEvent::Toggle);
    }

    pub fn submit(&self, input: impl Into<String>) {
        self.dispatch(WidgetEvent::Submit(input.into()));
    }
}
