use omni_widget::AttributeSource;
use web_sys::Element;

/// `data-*` attributes of the element that embedded the widget.
pub struct ScriptAttributes {
    element: Element,
}

impl ScriptAttributes {
    pub fn new(element: Element) -> Self {
        Self { element }
    }
}

impl AttributeSource for ScriptAttributes {
    fn attribute(&self, name: &str) -> Option<String> {
        self.element.get_attribute(name)
    }
}
