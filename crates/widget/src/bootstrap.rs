use std::rc::Rc;
use std::time::Duration;

use crate::client::ChatClient;
use crate::config::{AttributeSource, WidgetConfig};
use crate::diagnostics::Diagnostics;
use crate::error::ConfigResult;
use crate::events::EventDispatcher;
use crate::runtime::Runtime;
use crate::session::Session;
use crate::styles::stylesheet;
use crate::surface::{MountSpec, Surface};
use crate::transport::ChatTransport;
use crate::turn::SubmitOutcome;
use crate::visibility::Visibility;
use crate::widget::ChatWidget;

pub const WELCOME_DELAY: Duration = Duration::from_millis(1000);
pub const WELCOME_MESSAGE: &str = "Hello! How can I assist you today?";

/// Host-provided collaborators.
pub struct HostBindings {
    pub surface: Box<dyn Surface>,
    pub transport: Rc<dyn ChatTransport>,
    pub runtime: Rc<dyn Runtime>,
    pub diagnostics: Rc<dyn Diagnostics>,
}

/// Mounted widget. `toggle` is the bound replacement for a page-global toggle.
#[derive(Clone)]
pub struct WidgetHandle {
    widget: Rc<ChatWidget>,
}

impl WidgetHandle {
    pub fn toggle(&self) -> Visibility {
        self.widget.toggle()
    }

    pub async fn submit(&self, input: &str) -> SubmitOutcome {
        self.widget.submit(input).await
    }

    pub fn dispatcher(&self) -> EventDispatcher {
        EventDispatcher::new(&self.widget)
    }

    pub fn widget(&self) -> &Rc<ChatWidget> {
        &self.widget
    }
}

/// Validates configuration, then styles, surface, listeners and the welcome line.
///
/// When configuration is rejected the surface is never touched: the host page
/// gets no chat bubble, only a diagnostic.
pub fn mount(attributes: &dyn AttributeSource, host: HostBindings) -> ConfigResult<WidgetHandle> {
    let HostBindings {
        mut surface,
        transport,
        runtime,
        diagnostics,
    } = host;

    let config = match WidgetConfig::load(attributes) {
        Ok(config) => config,
        Err(error) => {
            diagnostics.configuration_rejected(&error);
            return Err(error);
        }
    };

    surface.inject_styles(&stylesheet(&config.theme_color));
    surface.mount(&MountSpec::default());

    let session = Session::new();
    tracing::info!(
        session_id = %session.id(),
        endpoint = %config.endpoint_base_url,
        auth = ?config.auth,
        "mounting omni widget"
    );

    let client = ChatClient::new(&config, session, transport, diagnostics);
    let widget = Rc::new(ChatWidget::new(config, client, Rc::clone(&runtime), surface));
    widget.bind(EventDispatcher::new(&widget));
    schedule_welcome(&widget, runtime.as_ref());

    Ok(WidgetHandle { widget })
}

fn schedule_welcome(widget: &Rc<ChatWidget>, runtime: &dyn Runtime) {
    let delay = runtime.sleep(WELCOME_DELAY);
    let widget = Rc::clone(widget);
    runtime.spawn(Box::pin(async move {
        delay.await;
        widget.post_bot_message(WELCOME_MESSAGE);
    }));
}
