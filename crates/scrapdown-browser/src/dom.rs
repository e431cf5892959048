//! DOM-backed text fields, buttons and the theme attribute.

use scrapdown_core::{Affordance, TextSlot, Theme, ThemeMarker};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlInputElement, HtmlTextAreaElement};

use crate::error::MountError;

/// Attribute on `<html>` that styling keys off.
pub const THEME_ATTRIBUTE: &str = "data-theme";

/// Get the page's document.
pub fn document() -> Result<Document, MountError> {
    let window = web_sys::window().ok_or(MountError::NoWindow)?;
    window.document().ok_or(MountError::NoDocument)
}

/// Look up an element by id and cast it.
pub fn element_by_id<T: JsCast>(
    document: &Document,
    id: &str,
    expected: &'static str,
) -> Result<T, MountError> {
    let element = document
        .get_element_by_id(id)
        .ok_or_else(|| MountError::MissingElement(id.to_string()))?;
    element
        .dyn_into::<T>()
        .map_err(|_| MountError::WrongElementType {
            id: id.to_string(),
            expected,
        })
}

/// A `<textarea>` or `<input>` used as a text slot.
#[derive(Debug, Clone)]
pub enum DomTextSlot {
    Area(HtmlTextAreaElement),
    Input(HtmlInputElement),
}

impl DomTextSlot {
    pub fn from_id(document: &Document, id: &str) -> Result<Self, MountError> {
        let element: Element = element_by_id(document, id, "element")?;
        let element = match element.dyn_into::<HtmlTextAreaElement>() {
            Ok(area) => return Ok(Self::Area(area)),
            Err(element) => element,
        };
        element
            .dyn_into::<HtmlInputElement>()
            .map(Self::Input)
            .map_err(|_| MountError::WrongElementType {
                id: id.to_string(),
                expected: "textarea or input",
            })
    }

    /// The underlying element, for event registration.
    pub fn element(&self) -> &HtmlElement {
        match self {
            Self::Area(area) => area,
            Self::Input(input) => input,
        }
    }
}

impl TextSlot for DomTextSlot {
    fn text(&self) -> String {
        match self {
            Self::Area(area) => area.value(),
            Self::Input(input) => input.value(),
        }
    }

    fn set_text(&self, text: &str) {
        match self {
            Self::Area(area) => area.set_value(text),
            Self::Input(input) => input.set_value(text),
        }
    }
}

/// A button whose `textContent` is the label and whose class list holds
/// the marker.
#[derive(Debug, Clone)]
pub struct DomButton {
    element: HtmlElement,
}

impl DomButton {
    pub fn new(element: HtmlElement) -> Self {
        Self { element }
    }

    pub fn from_id(document: &Document, id: &str) -> Result<Self, MountError> {
        element_by_id::<HtmlElement>(document, id, "HTML element").map(Self::new)
    }

    pub fn element(&self) -> &HtmlElement {
        &self.element
    }
}

impl Affordance for DomButton {
    fn set_label(&self, label: &str) {
        self.element.set_text_content(Some(label));
    }

    fn set_marker(&self, marker: &str, active: bool) {
        let class_list = self.element.class_list();
        let result = if active {
            class_list.add_1(marker)
        } else {
            class_list.remove_1(marker)
        };
        if let Err(e) = result {
            tracing::warn!("Failed to toggle class {marker:?}: {:?}", e);
        }
    }
}

/// `data-theme` on the document element.
#[derive(Debug, Clone)]
pub struct DocumentThemeMarker {
    root: Element,
}

impl DocumentThemeMarker {
    pub fn new(root: Element) -> Self {
        Self { root }
    }

    pub fn from_document(document: &Document) -> Result<Self, MountError> {
        document
            .document_element()
            .map(Self::new)
            .ok_or(MountError::NoDocument)
    }
}

impl ThemeMarker for DocumentThemeMarker {
    fn current(&self) -> Option<String> {
        self.root.get_attribute(THEME_ATTRIBUTE)
    }

    fn set(&self, theme: Theme) {
        if let Err(e) = self.root.set_attribute(THEME_ATTRIBUTE, theme.as_str()) {
            tracing::warn!("Failed to set {THEME_ATTRIBUTE}: {:?}", e);
        }
    }
}
