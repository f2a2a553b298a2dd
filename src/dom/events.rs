// ============================================================================
// EVENT HANDLING - Sistema de eventos
// ============================================================================
// Los closures de cada render se guardan en LISTENERS en vez de hacer
// forget(). App::render los libera después de vaciar el root, así cada
// re-render completo suelta los handlers del árbol anterior.
// ============================================================================

use std::any::Any;
use std::cell::RefCell;
use wasm_bindgen::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, HtmlInputElement, InputEvent, MouseEvent};

thread_local! {
    static LISTENERS: RefCell<Vec<Box<dyn Any>>> = RefCell::new(Vec::new());
}

/// Mantener vivo un handler hasta el próximo `release_listeners`
fn retain_listener<T: 'static>(listener: T) {
    LISTENERS.with(|listeners| listeners.borrow_mut().push(Box::new(listener)));
}

/// Soltar los handlers del render anterior. Solo llamar con su DOM ya desmontado.
pub fn release_listeners() -> usize {
    let released = LISTENERS.with(|listeners| std::mem::take(&mut *listeners.borrow_mut()));
    released.len()
}

/// Helper para crear click handler simple
pub fn on_click<F>(element: &Element, handler: F) -> Result<(), JsValue>
where
    F: FnMut(MouseEvent) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(MouseEvent)>);
    element.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
    retain_listener(closure);
    Ok(())
}

/// Input handler que entrega el valor actual del input
pub fn on_input_value<F>(input: &Element, mut handler: F) -> Result<(), JsValue>
where
    F: FnMut(String) + 'static,
{
    let closure = Closure::wrap(Box::new(move |e: InputEvent| {
        if let Some(target) = e.target().and_then(|t| t.dyn_into::<HtmlInputElement>().ok()) {
            handler(target.value());
        }
    }) as Box<dyn FnMut(InputEvent)>);
    input.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref())?;
    retain_listener(closure);
    Ok(())
}

/// Submit handler; el evento por defecto (recargar página) se cancela
pub fn on_submit<F>(form: &Element, mut handler: F) -> Result<(), JsValue>
where
    F: FnMut() + 'static,
{
    let closure = Closure::wrap(Box::new(move |e: Event| {
        e.prevent_default();
        handler();
    }) as Box<dyn FnMut(Event)>);
    form.add_event_listener_with_callback("submit", closure.as_ref().unchecked_ref())?;
    retain_listener(closure);
    Ok(())
}
