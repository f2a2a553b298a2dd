// ============================================================================
// REGISTER VIEW
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

const ERROR_ID: &str = "register-error";

pub fn render_register(state: &AppState) -> Result<Element, JsValue> {
    log::info!("🎬 [REGISTER] render_register()");

    let username = Rc::new(RefCell::new(String::new()));
    let password = Rc::new(RefCell::new(String::new()));
    let loading = Rc::new(RefCell::new(false));

    let screen = ElementBuilder::new("div")?
        .class("auth-screen")
        .build();

    let card = ElementBuilder::new("div")?
        .class("auth-card")
        .child(ElementBuilder::new("h1")?.text("Create Account").build())?
        .build();

    let form = ElementBuilder::new("form")?
        .class("auth-form")
        .build();

    let username_group = {
        let username = username.clone();
        create_form_group("reg-username", "Username", "text", "Username", "", move |v| *username.borrow_mut() = v)?
    };
    let password_group = {
        let password = password.clone();
        create_form_group("reg-password", "Password", "password", "Password", "", move |v| *password.borrow_mut() = v)?
    };

    let submit_btn = ElementBuilder::button("submit", "btn-primary", "Register")?
        .build();

    {
        let state = state.clone();
        let submit_btn = submit_btn.clone();
        on_submit(&form, move || {
            if *loading.borrow() {
                return;
            }
            *loading.borrow_mut() = true;
            set_button_busy(&submit_btn, true, "Registering...");
            show_message(ERROR_ID, None);

            let username_val = username.borrow().clone();
            let password_val = password.borrow().clone();
            let state = state.clone();
            let loading = loading.clone();
            let submit_btn = submit_btn.clone();

            spawn_local(async move {
                let vm = SessionViewModel::new();
                match vm.register(&username_val, &password_val).await {
                    Ok(()) => state.navigate(Route::Login),
                    Err(message) => show_message(ERROR_ID, Some(message.as_str())),
                }
                *loading.borrow_mut() = false;
                set_button_busy(&submit_btn, false, "Register");
            });
        })?;
    }

    append_child(&form, &username_group)?;
    append_child(&form, &password_group)?;
    append_child(&form, &create_error_message(ERROR_ID, None)?)?;
    append_child(&form, &submit_btn)?;

    let back_link = ElementBuilder::button("button", "btn-link", "Back to Login")?
        .build();
    {
        let state = state.clone();
        on_click(&back_link, move |_| state.navigate(Route::Login))?;
    }

    append_child(&card, &form)?;
    append_child(&card, &back_link)?;
    append_child(&screen, &card)?;

    Ok(screen)
}
