// ============================================================================
// LOGIN VIEW
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;
use crate::dom::{ElementBuilder, append_child, on_click, on_submit, set_button_busy, show_message};
use crate::state::{AppState, Route};
use crate::viewmodels::SessionViewModel;
use crate::views::shared::{create_error_message, create_form_group};

const ERROR_ID: &str = "login-error";

/// Renderizar vista de login
pub fn render_login(state: &AppState) -> Result<Element, JsValue> {
    log::info!("🎬 [LOGIN] render_login()");

    // Estado local del formulario (en closures)
    let username = Rc::new(RefCell::new(String::new()));
    let password = Rc::new(RefCell::new(String::new()));
    let loading = Rc::new(RefCell::new(false));

    let screen = ElementBuilder::new("div")?
        .class("auth-screen")
        .build();

    let card = ElementBuilder::new("div")?
        .class("auth-card")
        .child(ElementBuilder::new("h1")?.text("Login").build())?
        .build();

    let form = ElementBuilder::new("form")?
        .class("auth-form")
        .build();

    let username_group = {
        let username = username.clone();
        create_form_group("username", "Username", "text", "Username", "", move |v| *username.borrow_mut() = v)?
    };
    let password_group = {
        let password = password.clone();
        create_form_group("password", "Password", "password", "Password", "", move |v| *password.borrow_mut() = v)?
    };

    let submit_btn = ElementBuilder::button("submit", "btn-primary", "Login")?
        .build();

    {
        let state = state.clone();
        let submit_btn = submit_btn.clone();
        on_submit(&form, move || {
            if *loading.borrow() {
                return;
            }
            *loading.borrow_mut() = true;
            set_button_busy(&submit_btn, true, "Logging in...");
            show_message(ERROR_ID, None);

            let username_val = username.borrow().clone();
            let password_val = password.borrow().clone();
            let state = state.clone();
            let loading = loading.clone();
            let submit_btn = submit_btn.clone();

            spawn_local(async move {
                let vm = SessionViewModel::new();
                match vm.login(&username_val, &password_val).await {
                    Ok(status) => {
                        state.auth.set_status(status);
                        crate::app::enter_dashboard(&state);
                    }
                    Err(message) => {
                        show_message(ERROR_ID, Some(message.as_str()));
                    }
                }
                *loading.borrow_mut() = false;
                set_button_busy(&submit_btn, false, "Login");
            });
        })?;
    }

    append_child(&form, &username_group)?;
    append_child(&form, &password_group)?;
    append_child(&form, &create_error_message(ERROR_ID, None)?)?;
    append_child(&form, &submit_btn)?;

    let register_link = ElementBuilder::button("button", "btn-link", "Create an account")?
        .build();
    {
        let state = state.clone();
        on_click(&register_link, move |_| state.navigate(Route::Register))?;
    }

    append_child(&card, &form)?;
    append_child(&card, &register_link)?;
    append_child(&screen, &card)?;

    Ok(screen)
}
