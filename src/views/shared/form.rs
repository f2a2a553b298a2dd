// ============================================================================
// FORM HELPERS - grupos label + input compartidos por las vistas
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::dom::{ElementBuilder, append_child, on_input_value, set_attribute};

/// Label + input. `on_value` recibe cada cambio del input.
pub fn create_form_group<F>(
    id: &str,
    label_text: &str,
    input_type: &str,
    placeholder: &str,
    initial: &str,
    on_value: F,
) -> Result<Element, JsValue>
where
    F: FnMut(String) + 'static,
{
    let group = ElementBuilder::new("div")?
        .class("form-group")
        .build();

    let label = ElementBuilder::new("label")?
        .attr("for", id)?
        .text(label_text)
        .build();

    let input = ElementBuilder::new("input")?
        .class("form-input")
        .attr("type", input_type)?
        .attr("id", id)?
        .attr("name", id)?
        .attr("placeholder", placeholder)?
        .build();
    if !initial.is_empty() {
        set_attribute(&input, "value", initial)?;
    }
    on_input_value(&input, on_value)?;

    append_child(&group, &label)?;
    append_child(&group, &input)?;
    Ok(group)
}

/// Mensaje de error, oculto hasta que `show_message` le pone texto
pub fn create_error_message(id: &str, message: Option<&str>) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("p")?
        .class("form-error")
        .id(id)?
        .attr("role", "alert")?
        .text(message.unwrap_or(""))
        .flag("hidden", message.is_none())?
        .build())
}
