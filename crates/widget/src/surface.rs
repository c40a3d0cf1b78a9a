use crate::events::EventDispatcher;
use crate::message::{EntryId, EntryKind, Sender};
use crate::render::{self, Fragment};

/// Static copy used when the surface builds its chrome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountSpec {
    pub title: &'static str,
    pub input_placeholder: &'static str,
    pub launcher_label: &'static str,
    pub close_label: &'static str,
    pub send_label: &'static str,
}

impl Default for MountSpec {
    fn default() -> Self {
        Self {
            title: "AI Support Agent",
            input_placeholder: "Ask me anything...",
            launcher_label: "\u{1F4AC}",
            close_label: "\u{00D7}",
            send_label: "\u{27A4}",
        }
    }
}

/// Entry handed to the surface for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEntry<'a> {
    pub id: EntryId,
    pub sender: Sender,
    pub kind: EntryKind,
    pub text: &'a str,
}

impl RenderedEntry<'_> {
    pub fn fragments(&self) -> Vec<Fragment<'_>> {
        render::fragments(self.text)
    }

    pub fn html(&self) -> String {
        render::to_html(self.text)
    }
}

/// Rendering collaborator: the DOM in a browser, a terminal in the console host.
///
/// Every method must be safe to call while the window is hidden.
pub trait Surface {
    fn inject_styles(&mut self, stylesheet: &str);
    fn mount(&mut self, spec: &MountSpec);
    fn bind(&mut self, dispatcher: EventDispatcher);
    fn show_entry(&mut self, entry: RenderedEntry<'_>);
    fn drop_entry(&mut self, id: EntryId);
    fn scroll_to_latest(&mut self);
    fn set_window_visible(&mut self, visible: bool);
    fn set_input_enabled(&mut self, enabled: bool);
    fn clear_input(&mut self);
    fn focus_input(&mut self);
}
