use crate::message::{EntryId, EntryKind, Message, Sender};
use crate::surface::{RenderedEntry, Surface};

pub const PLACEHOLDER_TEXT: &str = "...";

#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    id: EntryId,
    kind: EntryKind,
    message: Message,
}

/// Append-only ordered log of chat entries, oldest first.
///
/// Committed messages are never edited or removed. Placeholders are the only
/// entries `remove` accepts, and removal by a stale handle is a no-op because
/// a reply and a window toggle can interleave arbitrarily.
#[derive(Debug, Default)]
pub struct MessageBoard {
    entries: Vec<Entry>,
    next_entry_id: u64,
}

impl MessageBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(
        &mut self,
        surface: &mut dyn Surface,
        text: impl Into<String>,
        sender: Sender,
    ) -> EntryId {
        self.push(surface, Message::new(text, sender), EntryKind::Committed)
    }

    pub fn append_placeholder(&mut self, surface: &mut dyn Surface) -> EntryId {
        self.push(surface, Message::bot(PLACEHOLDER_TEXT), EntryKind::Placeholder)
    }

    /// Retracts a placeholder. Returns whether anything was removed.
    pub fn remove(&mut self, surface: &mut dyn Surface, id: EntryId) -> bool {
        let Some(index) = self.entries.iter().position(|entry| entry.id == id) else {
            tracing::debug!(entry = ?id, "ignoring removal of an entry that is already gone");
            return false;
        };

        if self.entries[index].kind != EntryKind::Placeholder {
            tracing::warn!(entry = ?id, "refusing to remove a committed message");
            return false;
        }

        self.entries.remove(index);
        surface.drop_entry(id);
        surface.scroll_to_latest();
        true
    }

    /// Committed messages in display order.
    pub fn messages(&self) -> impl Iterator<Item = &Message> {
        self.entries
            .iter()
            .filter(|entry| entry.kind == EntryKind::Committed)
            .map(|entry| &entry.message)
    }

    pub fn contains(&self, id: EntryId) -> bool {
        self.entries.iter().any(|entry| entry.id == id)
    }

    pub fn placeholder_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.kind == EntryKind::Placeholder)
            .count()
    }

    fn push(&mut self, surface: &mut dyn Surface, message: Message, kind: EntryKind) -> EntryId {
        let id = self.alloc_entry_id();
        surface.show_entry(RenderedEntry {
            id,
            sender: message.sender,
            kind,
            text: &message.text,
        });
        surface.scroll_to_latest();
        self.entries.push(Entry { id, kind, message });
        id
    }

    fn alloc_entry_id(&mut self) -> EntryId {
        self.next_entry_id = self.next_entry_id.saturating_add(1);
        EntryId::new(self.next_entry_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventDispatcher;
    use crate::surface::MountSpec;

    #[derive(Default)]
    struct CountingSurface {
        shown: Vec<(EntryId, String)>,
        dropped: Vec<EntryId>,
        scrolls: usize,
    }

    impl Surface for CountingSurface {
        fn inject_styles(&mut self, _stylesheet: &str) {}
        fn mount(&mut self, _spec: &MountSpec) {}
        fn bind(&mut self, _dispatcher: EventDispatcher) {}
        fn show_entry(&mut self, entry: RenderedEntry<'_>) {
            self.shown.push((entry.id, entry.html()));
        }
        fn drop_entry(&mut self, id: EntryId) {
            self.dropped.push(id);
        }
        fn scroll_to_latest(&mut self) {
            self.scrolls += 1;
        }
        fn set_window_visible(&mut self, _visible: bool) {}
        fn set_input_enabled(&mut self, _enabled: bool) {}
        fn clear_input(&mut self) {}
        fn focus_input(&mut self) {}
    }

    #[test]
    fn appends_keep_insertion_order_and_scroll_each_time() {
        let mut surface = CountingSurface::default();
        let mut board = MessageBoard::new();

        board.append(&mut surface, "first", Sender::User);
        board.append(&mut surface, "second", Sender::Bot);

        let texts = board
            .messages()
            .map(|message| message.text.as_str())
            .collect::<Vec<_>>();
        assert_eq!(texts, ["first", "second"]);
        assert_eq!(surface.scrolls, 2);
    }

    #[test]
    fn placeholder_is_not_part_of_the_log_and_removal_is_idempotent() {
        let mut surface = CountingSurface::default();
        let mut board = MessageBoard::new();

        board.append(&mut surface, "question", Sender::User);
        let placeholder = board.append_placeholder(&mut surface);
        assert_eq!(board.messages().count(), 1);
        assert_eq!(board.placeholder_count(), 1);

        assert!(board.remove(&mut surface, placeholder));
        assert!(!board.remove(&mut surface, placeholder));
        assert!(!board.contains(placeholder));
        assert_eq!(surface.dropped, vec![placeholder]);
        // two appends plus one effective removal
        assert_eq!(surface.scrolls, 3);
    }

    #[test]
    fn committed_messages_cannot_be_removed() {
        let mut surface = CountingSurface::default();
        let mut board = MessageBoard::new();

        let id = board.append(&mut surface, "keep me", Sender::Bot);
        assert!(!board.remove(&mut surface, id));
        assert!(board.contains(id));
        assert!(surface.dropped.is_empty());
    }

    #[test]
    fn rendered_html_is_escaped() {
        let mut surface = CountingSurface::default();
        let mut board = MessageBoard::new();

        board.append(&mut surface, "<img src=x>", Sender::User);
        assert_eq!(surface.shown[0].1, "&lt;img src=x&gt;");
    }
}
