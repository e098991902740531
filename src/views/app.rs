// ============================================================================
// APP VIEW - Layout + dispatch de pantallas
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::ElementBuilder;
use crate::routing::Route;
use crate::state::app_state::{AppState, Screen};
use crate::views::client_dashboard::render_client_dashboard;
use crate::views::home::render_home;
use crate::views::login::{render_client_login, render_staff_login};
use crate::views::profile::render_profile;
use crate::views::shared::{render_checking, render_header};
use crate::views::tickets::render_tickets;

pub fn render_screen(state: &AppState, screen: Screen) -> Result<Element, JsValue> {
    match screen {
        Screen::Checking => render_checking(),
        Screen::Page(Route::Home) => render_home(state),
        Screen::Page(Route::StaffLogin) => render_staff_login(state),
        Screen::Page(Route::ClientLogin) => render_client_login(state),
        Screen::Page(Route::Tickets) => render_tickets(state),
        Screen::Page(Route::Profile) => render_profile(state, &state.staff),
        Screen::Page(Route::ClientDashboard) => render_client_dashboard(state),
        Screen::Page(Route::ClientProfile) => render_profile(state, &state.client),
    }
}

pub fn render_app(state: &AppState, screen: Screen) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("div")?
        .class("app-shell")
        .child(render_header(state)?)?
        .child(
            ElementBuilder::new("main")?
                .class("app-main")
                .child(render_screen(state, screen)?)?
                .build(),
        )?
        .build())
}
