use std::io::{self, Stdout, Write};

use omni_widget::{
    EntryId, EntryKind, EventDispatcher, Fragment, MountSpec, RenderedEntry, Sender, Surface,
};

const UNDERLINE: &str = "\x1b[4m";
const DIM: &str = "\x1b[2m";
const RESET: &str = "\x1b[0m";

/// Line-oriented rendering of the widget for a terminal.
///
/// Committed entries are printed as they arrive, even while the "window" is
/// closed; the placeholder is a dimmed line that later entries simply follow.
pub struct TerminalSurface<W = Stdout> {
    out: W,
    title: &'static str,
    input_enabled: bool,
}

impl TerminalSurface<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            title: "",
            input_enabled: true,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: &str) {
        if let Err(error) = writeln!(self.out, "{text}").and_then(|()| self.out.flush()) {
            tracing::warn!(error = %error, "failed to write to terminal");
        }
    }
}

fn sender_label(sender: Sender) -> &'static str {
    match sender {
        Sender::User => "you",
        Sender::Bot => "agent",
    }
}

fn terminal_text(entry: &RenderedEntry<'_>) -> String {
    entry
        .fragments()
        .into_iter()
        .map(|fragment| match fragment {
            Fragment::Text(text) => text.to_string(),
            Fragment::Link(url) => format!("{UNDERLINE}{url}{RESET}"),
        })
        .collect()
}

impl<W: Write> Surface for TerminalSurface<W> {
    fn inject_styles(&mut self, stylesheet: &str) {
        tracing::trace!(bytes = stylesheet.len(), "terminal surface ignores stylesheet");
    }

    fn mount(&mut self, spec: &MountSpec) {
        self.title = spec.title;
        let banner = format!("{} (/toggle to open or close, /quit to leave)", spec.title);
        self.line(&banner);
    }

    fn bind(&mut self, _dispatcher: EventDispatcher) {
        // stdin is read by the console loop, which holds its own dispatcher
    }

    fn show_entry(&mut self, entry: RenderedEntry<'_>) {
        let label = sender_label(entry.sender);
        let line = match entry.kind {
            EntryKind::Committed => format!("{label}> {}", terminal_text(&entry)),
            EntryKind::Placeholder => format!("{DIM}{label}> {}{RESET}", entry.text),
        };
        self.line(&line);
    }

    fn drop_entry(&mut self, id: EntryId) {
        tracing::trace!(entry = ?id, "placeholder retracted");
    }

    fn scroll_to_latest(&mut self) {}

    fn set_window_visible(&mut self, visible: bool) {
        let state = if visible { "opened" } else { "closed" };
        let line = format!("-- {} {state} --", self.title);
        self.line(&line);
    }

    fn set_input_enabled(&mut self, enabled: bool) {
        self.input_enabled = enabled;
    }

    fn clear_input(&mut self) {}

    fn focus_input(&mut self) {
        tracing::trace!(input_enabled = self.input_enabled, "input focused");
    }
}
