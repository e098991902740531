// ============================================================================
// CLIENT DASHBOARD VIEW - Tickets propios del cliente (solo lectura)
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::ElementBuilder;
use crate::models::{ActorKind, Client};
use crate::state::app_state::AppState;
use crate::views::shared::render_notice;
use crate::views::tickets::{render_ticket_card, render_ticket_list};

pub fn render_client_dashboard(state: &AppState) -> Result<Element, JsValue> {
    let greeting = state
        .client
        .identity()
        .map(|client| format!("👋 Welcome, {}", Client::display_name(&client)))
        .unwrap_or_default();

    let tickets = state.client_tickets.get();
    let mut cards = Vec::with_capacity(tickets.len());
    for ticket in &tickets {
        cards.push(render_ticket_card(ticket, None)?);
    }

    let mut page = ElementBuilder::new("section")?
        .class("client-dashboard")
        .child(ElementBuilder::new("h2")?.text(&greeting).build())?;
    if let Some(notice) = render_notice(state.notice.get().as_ref())? {
        page = page.child(notice)?;
    }
    Ok(page.child(render_ticket_list(&tickets, cards)?)?.build())
}
