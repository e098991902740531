// ============================================================================
// LOGIN VIEWS - Staff (usuario) y Cliente (email)
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{input_value, ElementBuilder};
use crate::models::{ActorKind, Client, ClientCredentials, Staff, StaffCredentials};
use crate::routing::Route;
use crate::state::app_state::{AppState, Notice};
use crate::state::AuthSessionManager;
use crate::views::shared::{render_link, render_notice};

fn render_field(id: &str, label: &str, input_type: &str, placeholder: &str) -> Result<Element, JsValue> {
    let input = ElementBuilder::new("input")?
        .id(id)?
        .attr("name", id)?
        .attr("type", input_type)?
        .attr("placeholder", placeholder)?
        .attr("required", "true")?
        .build();

    Ok(ElementBuilder::new("div")?
        .class("form-group")
        .child(
            ElementBuilder::new("label")?
                .attr("for", id)?
                .text(label)
                .build(),
        )?
        .child(input)?
        .build())
}

/// Login -> manager.login -> landing. Errores quedan en `notice`.
fn submit_login<K, F>(state: &AppState, manager: &AuthSessionManager<K>, read_credentials: F)
where
    K: ActorKind,
    F: Fn() -> K::Credentials,
{
    if state.busy.get() {
        return;
    }
    let credentials = read_credentials();
    let state = state.clone();
    let manager = manager.clone();

    state.busy.set(true);
    state.set_notice(None);
    wasm_bindgen_futures::spawn_local(async move {
        let result = state.auth_viewmodel().sign_in(&manager, &credentials).await;
        state.busy.set(false);
        match result {
            Ok(landing) => state.router.navigate(landing),
            Err(e) => state.set_notice(Some(Notice::error(e.to_string()))),
        }
    });
}

fn render_form(
    state: &AppState,
    title: &str,
    fields: Vec<Element>,
    on_submit: impl FnMut(web_sys::Event) + 'static,
    switch_to: (Route, &str),
) -> Result<Element, JsValue> {
    let submit_label = if state.busy.get() { "⏳ Signing in..." } else { "Sign in" };
    let mut submit = ElementBuilder::new("button")?
        .class("btn-login")
        .attr("type", "submit")?
        .text(submit_label);
    if state.busy.get() {
        submit = submit.attr("disabled", "true")?;
    }

    let form = ElementBuilder::new("form")?
        .class("login-form")
        .children(fields)?
        .child(submit.build())?
        .on_submit(on_submit)?
        .build();

    let mut container = ElementBuilder::new("div")?
        .class("login-screen")
        .child(ElementBuilder::new("h2")?.text(title).build())?
        .child(form)?;
    if let Some(notice) = render_notice(state.notice.get().as_ref())? {
        container = container.child(notice)?;
    }
    container = container.child(render_link(&state.router, switch_to.0, switch_to.1)?)?;
    Ok(container.build())
}

pub fn render_staff_login(state: &AppState) -> Result<Element, JsValue> {
    let fields = vec![
        render_field("username", "Username", "text", "Your username")?,
        render_field("password", "Password", "password", "Your password")?,
    ];
    let state_for_submit = state.clone();
    render_form(
        state,
        "🔐 Staff sign in",
        fields,
        move |_| {
            submit_login::<Staff, _>(&state_for_submit, &state_for_submit.staff, || StaffCredentials {
                username: input_value("username").trim().to_string(),
                password: input_value("password"),
            })
        },
        (Route::ClientLogin, "Are you a client? Sign in here"),
    )
}

pub fn render_client_login(state: &AppState) -> Result<Element, JsValue> {
    let fields = vec![
        render_field("email", "Email", "email", "you@company.com")?,
        render_field("password", "Password", "password", "Your password")?,
    ];
    let state_for_submit = state.clone();
    render_form(
        state,
        "🔐 Client sign in",
        fields,
        move |_| {
            submit_login::<Client, _>(&state_for_submit, &state_for_submit.client, || ClientCredentials {
                email: input_value("email").trim().to_string(),
                password: input_value("password"),
            })
        },
        (Route::StaffLogin, "Staff member? Sign in here"),
    )
}
