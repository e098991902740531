// ============================================================================
// HEADER VIEW - Navegación + logout por tipo de actor
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::ElementBuilder;
use crate::models::{ActorKind, Client, Staff};
use crate::routing::{Route, Router};
use crate::state::app_state::AppState;
use crate::state::AuthSessionManager;

/// <a> que navega in-app (sin recarga)
pub fn render_link(router: &Router, route: Route, label: &str) -> Result<Element, JsValue> {
    let router = router.clone();
    let link = ElementBuilder::new("a")?
        .class("nav-link")
        .attr("href", route.path())?
        .text(label)
        .on_click(move |e| {
            e.prevent_default();
            router.navigate(route);
        })?
        .build();
    Ok(link)
}

fn render_session_badge<K: ActorKind>(
    manager: &AuthSessionManager<K>,
    router: &Router,
    profile: Route,
) -> Result<Option<Element>, JsValue> {
    let identity = match manager.identity() {
        Some(identity) => identity,
        None => return Ok(None),
    };

    let manager = manager.clone();
    let logout = ElementBuilder::new("button")?
        .class("btn-logout")
        .attr("type", "button")?
        .text("🚪 Logout")
        .on_click(move |_| manager.logout())?
        .build();

    let badge = ElementBuilder::new("div")?
        .class("session-badge")
        .child(
            ElementBuilder::new("span")?
                .class("session-name")
                .text(&K::display_name(&identity))
                .build(),
        )?
        .child(render_link(router, profile, "👤 Profile")?)?
        .child(logout)?
        .build();
    Ok(Some(badge))
}

pub fn render_header(state: &AppState) -> Result<Element, JsValue> {
    let nav = ElementBuilder::new("nav")?
        .class("app-nav")
        .child(render_link(&state.router, Route::Home, "🏠 Home")?)?;

    let nav = match render_session_badge::<Staff>(&state.staff, &state.router, Route::Profile)? {
        Some(badge) => nav
            .child(render_link(&state.router, Route::Tickets, "🎫 Tickets")?)?
            .child(badge)?,
        None => nav.child(render_link(&state.router, Route::StaffLogin, "Staff login")?)?,
    };

    let nav = match render_session_badge::<Client>(&state.client, &state.router, Route::ClientProfile)? {
        Some(badge) => nav
            .child(render_link(&state.router, Route::ClientDashboard, "📋 My tickets")?)?
            .child(badge)?,
        None => nav.child(render_link(&state.router, Route::ClientLogin, "Client login")?)?,
    };

    let header = ElementBuilder::new("header")?
        .class("app-header")
        .child(ElementBuilder::new("h1")?.text("🎫 Ticket Desk").build())?
        .child(nav.build())?
        .build();
    Ok(header)
}
