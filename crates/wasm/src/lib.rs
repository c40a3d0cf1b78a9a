//! Browser host for the Omni chat widget.
//!
//! The page includes the generated script with `data-*` attributes; the start
//! hook reads them, builds the DOM surface and mounts the widget.

#[cfg(target_arch = "wasm32")]
mod attributes;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod runtime;
#[cfg(any(target_arch = "wasm32", test))]
mod slot;

#[cfg(target_arch = "wasm32")]
mod wasm {
    use std::rc::Rc;

    use omni_widget::{
        ConfigError, HostBindings, ReqwestTransport, TracingDiagnostics, Visibility,
        WidgetHandle, mount,
    };
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element};

    use crate::attributes::ScriptAttributes;
    use crate::dom::DomSurface;
    use crate::runtime::BrowserRuntime;
    use crate::slot::MountSlot;

    const EMBED_SELECTOR: &str = "script[data-api-url]";

    thread_local! {
        static MOUNTED: MountSlot<WidgetHandle> = const { MountSlot::new() };
    }

    /// Mounted widget exposed to page scripts.
    #[wasm_bindgen]
    pub struct OmniWidget {
        handle: WidgetHandle,
    }

    #[wasm_bindgen]
    impl OmniWidget {
        /// Opens or closes the chat window; returns whether it is now open.
        pub fn toggle(&self) -> bool {
            self.handle.toggle() == Visibility::Open
        }

        #[wasm_bindgen(js_name = isOpen)]
        pub fn is_open(&self) -> bool {
            self.handle.widget().visibility().is_open()
        }

        #[wasm_bindgen(js_name = sessionId)]
        pub fn session_id(&self) -> String {
            self.handle.widget().session_id().to_string()
        }
    }

    #[wasm_bindgen(start)]
    pub fn start() {
        console_error_panic_hook::set_once();
        wasm_logger::init(wasm_logger::Config::default());

        let Some(document) = web_sys::window().and_then(|window| window.document()) else {
            log::error!("omni widget: document is unavailable");
            return;
        };
        let Some(script) = embedding_script(&document) else {
            log::warn!("omni widget: no embedding script with data attributes found");
            return;
        };

        // Rejections are already reported through the diagnostics sink.
        let _ = mount_on(&document, script);
    }

    /// Handle for the widget mounted by the start hook, if any.
    #[wasm_bindgen(js_name = omniWidget)]
    pub fn mounted_widget() -> Option<OmniWidget> {
        MOUNTED.with(|slot| slot.current().map(|handle| OmniWidget { handle }))
    }

    /// Mounts from an explicit configuration element carrying the `data-*` attributes.
    ///
    /// Once a widget is mounted, its handle is returned and `element` is ignored.
    #[wasm_bindgen(js_name = mountOmniWidget)]
    pub fn mount_from_element(element: Element) -> Result<OmniWidget, JsValue> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| JsValue::from_str("document is unavailable"))?;
        let handle =
            mount_on(&document, element).map_err(|error| JsValue::from_str(&error.to_string()))?;
        Ok(OmniWidget { handle })
    }

    fn embedding_script(document: &Document) -> Option<Element> {
        // currentScript is null for module scripts, so fall back to the attribute lookup.
        document
            .current_script()
            .map(Element::from)
            .or_else(|| document.query_selector(EMBED_SELECTOR).ok().flatten())
    }

    fn mount_on(document: &Document, element: Element) -> Result<WidgetHandle, ConfigError> {
        MOUNTED.with(|slot| {
            slot.get_or_mount(|| {
                let host = HostBindings {
                    surface: Box::new(DomSurface::new(document.clone())),
                    transport: Rc::new(ReqwestTransport::new()),
                    runtime: Rc::new(BrowserRuntime),
                    diagnostics: Rc::new(TracingDiagnostics),
                };
                mount(&ScriptAttributes::new(element), host)
            })
        })
    }
}
