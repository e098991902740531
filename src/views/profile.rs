// ============================================================================
// PROFILE VIEW - Datos de la sesión + cambio de contraseña
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{input_value, ElementBuilder};
use crate::models::ActorKind;
use crate::state::app_state::{AppState, Notice};
use crate::state::AuthSessionManager;
use crate::viewmodels::PasswordForm;
use crate::views::shared::render_notice;

fn password_input(id: &str, label: &str) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("div")?
        .class("form-group")
        .child(ElementBuilder::new("label")?.attr("for", id)?.text(label).build())?
        .child(
            ElementBuilder::new("input")?
                .id(id)?
                .attr("type", "password")?
                .attr("autocomplete", "new-password")?
                .build(),
        )?
        .build())
}

fn submit_password<K: ActorKind>(state: &AppState, manager: &AuthSessionManager<K>) {
    let form = PasswordForm {
        current: input_value("current-password"),
        new_password: input_value("new-password"),
        confirm: input_value("confirm-password"),
    };
    let state = state.clone();
    let manager = manager.clone();

    wasm_bindgen_futures::spawn_local(async move {
        match state.auth_viewmodel().change_password(&manager, &form).await {
            Ok(()) => state.set_notice(Some(Notice::success("Password updated"))),
            Err(e) => state.set_notice(Some(Notice::error(e.to_string()))),
        }
    });
}

/// Perfil genérico: pide la contraseña actual solo si `K` la exige
pub fn render_profile<K: ActorKind>(
    state: &AppState,
    manager: &AuthSessionManager<K>,
) -> Result<Element, JsValue> {
    let snapshot = manager.state();
    let name = snapshot
        .identity
        .as_ref()
        .map(K::display_name)
        .unwrap_or_default();
    let role = snapshot.role.unwrap_or_default();

    let mut fields = Vec::new();
    if K::REQUIRES_CURRENT_SECRET {
        fields.push(password_input("current-password", "Current password")?);
    }
    fields.push(password_input("new-password", "New password")?);
    fields.push(password_input("confirm-password", "Confirm new password")?);

    let for_submit = state.clone();
    let manager_for_submit = manager.clone();
    let form = ElementBuilder::new("form")?
        .class("password-form")
        .children(fields)?
        .child(
            ElementBuilder::new("button")?
                .attr("type", "submit")?
                .text("🔑 Update password")
                .build(),
        )?
        .on_submit(move |_| submit_password(&for_submit, &manager_for_submit))?
        .build();

    let mut page = ElementBuilder::new("section")?
        .class("profile-page")
        .child(ElementBuilder::new("h2")?.text(&format!("👤 {}", name)).build())?
        .child(
            ElementBuilder::new("p")?
                .class("profile-role")
                .text(&format!("Role: {}", role))
                .build(),
        )?;
    if let Some(notice) = render_notice(state.notice.get().as_ref())? {
        page = page.child(notice)?;
    }
    Ok(page.child(form)?.build())
}
