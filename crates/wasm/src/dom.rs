use std::collections::HashMap;

use omni_widget::styles::{
    CLOSE_ID, CONTAINER_ID, HEADER_ID, INPUT_AREA_ID, INPUT_ID, LAUNCHER_ID, MESSAGE_CLASS,
    MESSAGES_ID, PLACEHOLDER_CLASS, SEND_ID, WINDOW_ID,
};
use omni_widget::{
    EntryId, EntryKind, EventDispatcher, Fragment, MountSpec, RenderedEntry, Surface,
};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlButtonElement, HtmlElement, HtmlInputElement};

const LINK_STYLE: &str = "color:inherit; text-decoration:underline;";

type Listener = Closure<dyn FnMut(web_sys::Event)>;

/// Elements created by `mount`.
struct Chrome {
    launcher: HtmlElement,
    window: HtmlElement,
    close: HtmlElement,
    messages: HtmlElement,
    input: HtmlInputElement,
    send: HtmlButtonElement,
}

/// DOM rendering of the widget, appended to the page body.
///
/// DOM calls that fail are logged and skipped; the widget keeps working with
/// whatever part of the tree exists.
pub struct DomSurface {
    document: Document,
    chrome: Option<Chrome>,
    entries: HashMap<EntryId, Element>,
    listeners: Vec<Listener>,
}

impl DomSurface {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            chrome: None,
            entries: HashMap::new(),
            listeners: Vec::new(),
        }
    }

    fn element<T: JsCast>(&self, tag: &str, id: Option<&str>) -> Result<T, JsValue> {
        let element = self.document.create_element(tag)?;
        if let Some(id) = id {
            element.set_id(id);
        }
        element.dyn_into::<T>().map_err(JsValue::from)
    }

    fn build_chrome(&self, spec: &MountSpec) -> Result<Chrome, JsValue> {
        let body = self
            .document
            .body()
            .ok_or_else(|| JsValue::from_str("document body is unavailable"))?;

        let container: HtmlElement = self.element("div", Some(CONTAINER_ID))?;

        let window: HtmlElement = self.element("div", Some(WINDOW_ID))?;
        let header: HtmlElement = self.element("div", Some(HEADER_ID))?;
        let title: HtmlElement = self.element("span", None)?;
        title.set_text_content(Some(spec.title));
        let close: HtmlElement = self.element("span", Some(CLOSE_ID))?;
        close.set_text_content(Some(spec.close_label));
        header.append_child(&title)?;
        header.append_child(&close)?;

        let messages: HtmlElement = self.element("div", Some(MESSAGES_ID))?;

        let input_area: HtmlElement = self.element("div", Some(INPUT_AREA_ID))?;
        let input: HtmlInputElement = self.element("input", Some(INPUT_ID))?;
        input.set_type("text");
        input.set_placeholder(spec.input_placeholder);
        let send: HtmlButtonElement = self.element("button", Some(SEND_ID))?;
        send.set_text_content(Some(spec.send_label));
        input_area.append_child(&input)?;
        input_area.append_child(&send)?;

        window.append_child(&header)?;
        window.append_child(&messages)?;
        window.append_child(&input_area)?;

        let launcher: HtmlElement = self.element("button", Some(LAUNCHER_ID))?;
        launcher.set_text_content(Some(spec.launcher_label));

        container.append_child(&window)?;
        container.append_child(&launcher)?;
        body.append_child(&container)?;

        Ok(Chrome {
            launcher,
            window,
            close,
            messages,
            input,
            send,
        })
    }

    fn build_entry(&self, entry: &RenderedEntry<'_>) -> Result<Element, JsValue> {
        let row: Element = self.element("div", None)?;
        let mut class = format!("{MESSAGE_CLASS} {}", entry.sender.css_class());
        if entry.kind == EntryKind::Placeholder {
            class.push(' ');
            class.push_str(PLACEHOLDER_CLASS);
        }
        row.set_class_name(&class);

        for fragment in entry.fragments() {
            match fragment {
                Fragment::Text(text) => {
                    row.append_child(&self.document.create_text_node(text))?;
                }
                Fragment::Link(url) => {
                    let anchor: Element = self.element("a", None)?;
                    anchor.set_attribute("href", url)?;
                    anchor.set_attribute("target", "_blank")?;
                    anchor.set_attribute("rel", "noopener noreferrer")?;
                    anchor.set_attribute("style", LINK_STYLE)?;
                    anchor.set_text_content(Some(url));
                    row.append_child(&anchor)?;
                }
            }
        }
        Ok(row)
    }

    fn listen(
        &mut self,
        target: &web_sys::EventTarget,
        event: &str,
        handler: impl FnMut(web_sys::Event) + 'static,
    ) {
        let callback = Listener::wrap(Box::new(handler));
        if let Err(error) =
            target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
        {
            tracing::warn!(event, error = ?error, "failed to attach widget listener");
            return;
        }
        self.listeners.push(callback);
    }
}

impl Surface for DomSurface {
    fn inject_styles(&mut self, stylesheet: &str) {
        let injected = self.element::<Element>("style", None).and_then(|style| {
            style.set_text_content(Some(stylesheet));
            let head = self
                .document
                .head()
                .ok_or_else(|| JsValue::from_str("document head is unavailable"))?;
            head.append_child(&style).map(|_| ())
        });
        if let Err(error) = injected {
            tracing::warn!(error = ?error, "failed to inject widget styles");
        }
    }

    fn mount(&mut self, spec: &MountSpec) {
        match self.build_chrome(spec) {
            Ok(chrome) => self.chrome = Some(chrome),
            Err(error) => tracing::error!(error = ?error, "failed to build widget surface"),
        }
    }

    fn bind(&mut self, dispatcher: EventDispatcher) {
        let Some(chrome) = self.chrome.as_ref() else {
            return;
        };
        let launcher = chrome.launcher.clone();
        let close = chrome.close.clone();
        let send = chrome.send.clone();
        let input = chrome.input.clone();

        let toggle = dispatcher.clone();
        self.listen(&launcher, "click", move |_event| toggle.toggle());

        let toggle = dispatcher.clone();
        self.listen(&close, "click", move |_event| toggle.toggle());

        let submit = dispatcher.clone();
        let field = input.clone();
        self.listen(&send, "click", move |_event| submit.submit(field.value()));

        let submit = dispatcher;
        let field = input.clone();
        self.listen(&input, "keydown", move |event| {
            let Some(event) = event.dyn_ref::<web_sys::KeyboardEvent>() else {
                return;
            };
            if event.key() == "Enter" {
                event.prevent_default();
                submit.submit(field.value());
            }
        });
    }

    fn show_entry(&mut self, entry: RenderedEntry<'_>) {
        let Some(chrome) = self.chrome.as_ref() else {
            return;
        };
        let shown = self
            .build_entry(&entry)
            .and_then(|row| chrome.messages.append_child(&row).map(|_| row));
        match shown {
            Ok(row) => {
                self.entries.insert(entry.id, row);
            }
            Err(error) => tracing::warn!(entry = ?entry.id, error = ?error, "failed to render entry"),
        }
    }

    fn drop_entry(&mut self, id: EntryId) {
        if let Some(row) = self.entries.remove(&id) {
            row.remove();
        }
    }

    fn scroll_to_latest(&mut self) {
        if let Some(chrome) = self.chrome.as_ref() {
            chrome
                .messages
                .set_scroll_top(chrome.messages.scroll_height());
        }
    }

    fn set_window_visible(&mut self, visible: bool) {
        if let Some(chrome) = self.chrome.as_ref() {
            let display = if visible { "flex" } else { "none" };
            if let Err(error) = chrome.window.style().set_property("display", display) {
                tracing::warn!(error = ?error, "failed to toggle chat window");
            }
        }
    }

    fn set_input_enabled(&mut self, enabled: bool) {
        if let Some(chrome) = self.chrome.as_ref() {
            chrome.input.set_disabled(!enabled);
            chrome.send.set_disabled(!enabled);
        }
    }

    fn clear_input(&mut self) {
        if let Some(chrome) = self.chrome.as_ref() {
            chrome.input.set_value("");
        }
    }

    fn focus_input(&mut self) {
        if let Some(chrome) = self.chrome.as_ref()
            && let Err(error) = chrome.input.focus()
        {
            tracing::trace!(error = ?error, "failed to focus widget input");
        }
    }
}
