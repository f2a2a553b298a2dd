// ============================================================================
// DASHBOARD VIEW - sidebar con la sesión + CRUD de posiciones
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;
use crate::dom::{ElementBuilder, append_child, on_click, on_submit};
use crate::models::{Claims, Position};
use crate::state::AppState;
use crate::viewmodels::{PositionAction, PositionsViewModel, SessionViewModel};
use crate::views::shared::{create_error_message, create_form_group};

/// Lanzar una acción de posiciones en background
fn spawn_action(state: &AppState, action: PositionAction) {
    let state = state.clone();
    spawn_local(async move {
        PositionsViewModel::new().dispatch(action, &state).await;
    });
}

pub fn render_dashboard(state: &AppState) -> Result<Element, JsValue> {
    log::info!("🎬 [DASHBOARD] render_dashboard()");

    let layout = ElementBuilder::new("div")?
        .class("dashboard-layout")
        .build();

    append_child(&layout, &render_sidebar(state)?)?;
    append_child(&layout, &render_main(state)?)?;
    Ok(layout)
}

fn render_sidebar(state: &AppState) -> Result<Element, JsValue> {
    let sidebar = ElementBuilder::new("aside")?
        .class("sidebar")
        .child(ElementBuilder::new("h2")?.class("sidebar-title").text("Dashboard").build())?
        .build();

    if let Some(claims) = state.auth.get_claims() {
        append_child(&sidebar, &render_user_card(&claims)?)?;
    }

    let nav = ElementBuilder::new("nav")?
        .class("sidebar-nav")
        .child(ElementBuilder::new("span")?.class("nav-item active").text("Overview").build())?
        .build();
    append_child(&sidebar, &nav)?;

    let logout_btn = ElementBuilder::button("button", "btn-logout", "Logout")?
        .build();
    {
        let state = state.clone();
        on_click(&logout_btn, move |_| {
            SessionViewModel::new().logout();
            state.reset_to_login();
        })?;
    }
    append_child(&sidebar, &logout_btn)?;

    Ok(sidebar)
}

/// Líneas de la tarjeta de usuario: (clase, texto)
fn user_card_lines(claims: &Claims) -> Vec<(&'static str, String)> {
    let mut lines = vec![("user-name", claims.display_name())];
    if let Some(role) = &claims.role {
        lines.push(("user-role", role.clone()));
    }
    if let Some(issued) = claims.issued_at() {
        lines.push(("user-issued", format!("Signed in {}", issued.format("%Y-%m-%d %H:%M UTC"))));
    }
    if let Some(expires) = claims.expires_at() {
        lines.push(("user-expiry", format!("Session expires {}", expires.format("%Y-%m-%d %H:%M UTC"))));
    }
    lines
}

fn render_user_card(claims: &Claims) -> Result<Element, JsValue> {
    let card = ElementBuilder::new("div")?
        .class("user-card")
        .build();

    for (class, text) in user_card_lines(claims) {
        append_child(&card, &ElementBuilder::new("p")?.class(class).text(&text).build())?;
    }
    Ok(card)
}

fn render_main(state: &AppState) -> Result<Element, JsValue> {
    let main = ElementBuilder::new("main")?
        .class("dashboard-main")
        .child(ElementBuilder::new("h1")?.text("Positions Dashboard").build())?
        .build();

    append_child(&main, &render_position_form(state)?)?;

    if let Some(error) = state.positions.get_error() {
        append_child(&main, &create_error_message("positions-error", Some(error.as_str()))?)?;
    }
    if state.positions.is_loading() {
        append_child(&main, &ElementBuilder::new("p")?.class("loading").text("Loading...").build())?;
    }

    append_child(&main, &render_position_list(state)?)?;
    Ok(main)
}

fn render_position_form(state: &AppState) -> Result<Element, JsValue> {
    let form_state = state.positions.get_form();

    let form = ElementBuilder::new("form")?
        .class("position-form")
        .build();

    // Los inputs escriben en el estado sin notificar (no re-render por tecla)
    let code_group = {
        let state = state.clone();
        create_form_group(
            "position-code",
            "Position Code",
            "text",
            "Position Code",
            &form_state.code,
            move |v| state.positions.set_form_code(v),
        )?
    };
    let name_group = {
        let state = state.clone();
        create_form_group(
            "position-name",
            "Position Name",
            "text",
            "Position Name",
            &form_state.name,
            move |v| state.positions.set_form_name(v),
        )?
    };
    append_child(&form, &code_group)?;
    append_child(&form, &name_group)?;

    let label = if form_state.is_editing() { "Update Position" } else { "Add Position" };
    let submit_btn = ElementBuilder::button("submit", "btn-primary", label)?
        .flag("disabled", state.positions.is_loading())?
        .build();
    append_child(&form, &submit_btn)?;

    {
        let state = state.clone();
        on_submit(&form, move || {
            if state.positions.is_loading() {
                return;
            }
            spawn_action(&state, PositionAction::Submit);
        })?;
    }

    if form_state.is_editing() {
        let cancel_btn = ElementBuilder::button("button", "btn-secondary", "Cancel")?
            .build();
        let state = state.clone();
        on_click(&cancel_btn, move |_| {
            state.positions.cancel_edit();
            state.notify_subscribers();
        })?;
        append_child(&form, &cancel_btn)?;
    }

    Ok(form)
}

fn render_position_list(state: &AppState) -> Result<Element, JsValue> {
    let list = ElementBuilder::new("div")?
        .class("position-list")
        .build();

    let items = state.positions.get_items();
    if items.is_empty() && !state.positions.is_loading() {
        append_child(&list, &ElementBuilder::new("p")?.class("empty").text("No positions yet").build())?;
    }

    for position in &items {
        append_child(&list, &render_position_card(state, position)?)?;
    }
    Ok(list)
}

fn render_position_card(state: &AppState, position: &Position) -> Result<Element, JsValue> {
    let card = ElementBuilder::new("div")?
        .class("position-card")
        .attr("data-id", &position.id.to_string())?
        .child(ElementBuilder::new("h3")?.text(&position.position_code).build())?
        .child(ElementBuilder::new("p")?.text(&position.position_name).build())?
        .build();

    let edit_btn = ElementBuilder::button("button", "btn-secondary", "Edit")?
        .build();
    {
        let state = state.clone();
        let id = position.id;
        on_click(&edit_btn, move |_| {
            state.positions.start_edit(id);
            state.notify_subscribers();
        })?;
    }

    let delete_btn = ElementBuilder::button("button", "btn-danger", "Delete")?
        .build();
    {
        let state = state.clone();
        let id = position.id;
        on_click(&delete_btn, move |_| spawn_action(&state, PositionAction::Delete(id)))?;
    }

    let actions = ElementBuilder::new("div")?
        .class("card-actions")
        .child(edit_btn)?
        .child(delete_btn)?
        .build();
    append_child(&card, &actions)?;

    Ok(card)
}
