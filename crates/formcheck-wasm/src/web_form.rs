//! [`FormDom`] over a live `HTMLFormElement`

use formcheck::{DomError, FieldKind, FieldState, FormDom};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Element, HtmlButtonElement, HtmlFormElement, HtmlInputElement, HtmlSelectElement,
    HtmlTextAreaElement,
};

/// A form in the page
pub struct WebForm {
    form: HtmlFormElement,
}

impl WebForm {
    pub fn new(form: HtmlFormElement) -> Self {
        Self { form }
    }
}

fn dom_error(context: &str, err: JsValue) -> DomError {
    DomError::new(format!("{}: {:?}", context, err))
}

impl FormDom for WebForm {
    type Node = Element;

    fn fields(&self) -> Vec<Element> {
        let elements = self.form.elements();
        (0..elements.length())
            .filter_map(|i| elements.item(i))
            .collect()
    }

    fn field_state(&self, field: &Element) -> FieldState {
        let (name, value, ty, checked) = if let Some(input) = field.dyn_ref::<HtmlInputElement>() {
            (input.name(), input.value(), input.type_(), input.checked())
        } else if let Some(select) = field.dyn_ref::<HtmlSelectElement>() {
            (select.name(), select.value(), select.type_(), false)
        } else if let Some(area) = field.dyn_ref::<HtmlTextAreaElement>() {
            (area.name(), area.value(), area.type_(), false)
        } else if let Some(button) = field.dyn_ref::<HtmlButtonElement>() {
            (button.name(), button.value(), button.type_(), false)
        } else {
            // fieldset, output, object
            (
                field.get_attribute("name").unwrap_or_default(),
                String::new(),
                field.tag_name().to_ascii_lowercase(),
                false,
            )
        };

        FieldState {
            name,
            value,
            kind: FieldKind::parse(&ty),
            checked,
        }
    }

    fn has_class(&self, node: &Element, class: &str) -> bool {
        node.class_list().contains(class)
    }

    fn add_class(&mut self, node: &Element, class: &str) -> Result<(), DomError> {
        node.class_list()
            .add_1(class)
            .map_err(|e| dom_error("add class", e))
    }

    fn remove_class(&mut self, node: &Element, class: &str) -> Result<(), DomError> {
        node.class_list()
            .remove_1(class)
            .map_err(|e| dom_error("remove class", e))
    }

    fn next_element_sibling(&self, node: &Element) -> Option<Element> {
        node.next_element_sibling()
    }

    fn set_text(&mut self, node: &Element, text: &str) -> Result<(), DomError> {
        node.set_text_content(Some(text));
        Ok(())
    }

    fn insert_message_after(
        &mut self,
        node: &Element,
        class: &str,
        text: &str,
    ) -> Result<Element, DomError> {
        let document = node
            .owner_document()
            .ok_or_else(|| DomError::new("field is not part of a document"))?;

        let span = document
            .create_element("span")
            .map_err(|e| dom_error("create message element", e))?;
        span.class_list()
            .add_1(class)
            .map_err(|e| dom_error("add class", e))?;
        span.set_text_content(Some(text));

        node.insert_adjacent_element("afterend", &span)
            .map_err(|e| dom_error("insert message element", e))?;
        Ok(span)
    }

    fn remove(&mut self, node: &Element) -> Result<(), DomError> {
        node.remove();
        Ok(())
    }
}
