// ============================================================================
// TICKETS VIEW - Listado staff con botones del workflow
// ============================================================================
// Los botones salen de `permitted_actions`; un status desconocido se pinta
// como error de datos, sin botones. Los filtros de alcance salen de
// `TicketQuery::available_views` (un employee solo ve su división).
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::ElementBuilder;
use crate::models::{
    permitted_actions, StaffUser, StatusFilter, Ticket, TicketAction, TicketQuery, TicketView,
};
use crate::state::app_state::{AppState, Notice};
use crate::viewmodels::{ActionOutcome, BrowserConfirmer};
use crate::views::shared::render_notice;

fn run_action(state: &AppState, ticket: &Ticket, action: TicketAction) {
    let state = state.clone();
    let ticket = ticket.clone();
    wasm_bindgen_futures::spawn_local(async move {
        let result = state
            .ticket_viewmodel()
            .apply(&state.staff, &ticket, action, &BrowserConfirmer)
            .await;
        match result {
            Ok(ActionOutcome::Applied(status)) => state.set_notice(Some(Notice::success(format!(
                "Ticket #{} is now {}",
                ticket.id, status
            )))),
            Ok(ActionOutcome::Cancelled) => {}
            Err(e) => state.set_notice(Some(Notice::error(e.to_string()))),
        }
    });
}

fn change_view(state: &AppState, view: TicketView) {
    let state = state.clone();
    wasm_bindgen_futures::spawn_local(async move {
        if let Err(e) = state.ticket_viewmodel().set_view(&state.staff, view).await {
            log::error!("❌ [TICKETS] Error cambiando el alcance: {}", e);
            state.set_notice(Some(Notice::error(e.to_string())));
        }
    });
}

fn filter_button(label: &str, active: bool) -> Result<ElementBuilder, JsValue> {
    let class = if active { "btn-filter btn-filter--active" } else { "btn-filter" };
    Ok(ElementBuilder::new("button")?
        .class(class)
        .attr("type", "button")?
        .text(label))
}

fn render_filters(
    state: &AppState,
    user: &StaffUser,
    query: &TicketQuery,
) -> Result<Element, JsValue> {
    let mut views = Vec::new();
    for view in TicketQuery::available_views(user) {
        let active = query.view() == &view;
        let state = state.clone();
        let label = view.label();
        views.push(
            filter_button(&label, active)?
                .on_click(move |_| change_view(&state, view.clone()))?
                .build(),
        );
    }

    let mut statuses = Vec::with_capacity(StatusFilter::OPTIONS.len());
    for status in StatusFilter::OPTIONS {
        let active = query.status() == status;
        let state = state.clone();
        statuses.push(
            filter_button(status.label(), active)?
                .on_click(move |_| state.ticket_viewmodel().set_status_filter(&state.staff, status))?
                .build(),
        );
    }

    Ok(ElementBuilder::new("div")?
        .class("ticket-filters")
        .child(
            ElementBuilder::new("div")?
                .class("ticket-filters-scope")
                .children(views)?
                .build(),
        )?
        .child(
            ElementBuilder::new("div")?
                .class("ticket-filters-status")
                .children(statuses)?
                .build(),
        )?
        .build())
}

fn render_actions(state: &AppState, ticket: &Ticket) -> Result<Element, JsValue> {
    let container = ElementBuilder::new("div")?.class("ticket-actions");

    let actions = match permitted_actions(ticket) {
        Ok(actions) => actions,
        Err(e) => {
            return Ok(container
                .child(
                    ElementBuilder::new("span")?
                        .class("ticket-data-error")
                        .text(&format!("⚠️ {}", e))
                        .build(),
                )?
                .build());
        }
    };

    let mut buttons = Vec::with_capacity(actions.len());
    for &action in actions {
        let state = state.clone();
        let for_click = ticket.clone();
        buttons.push(
            ElementBuilder::new("button")?
                .class(&format!("btn-action btn-action--{}", action.as_str()))
                .attr("type", "button")?
                .text(action.label())
                .on_click(move |_| run_action(&state, &for_click, action))?
                .build(),
        );
    }
    Ok(container.children(buttons)?.build())
}

/// Tarjeta de ticket; `actions` = None en vistas de solo lectura
pub fn render_ticket_card(ticket: &Ticket, actions: Option<Element>) -> Result<Element, JsValue> {
    let mut card = ElementBuilder::new("li")?
        .class(&format!("ticket-card ticket-card--{}", ticket.status))
        .child(
            ElementBuilder::new("div")?
                .class("ticket-title")
                .text(&format!("#{} {}", ticket.id, ticket.title))
                .build(),
        )?
        .child(
            ElementBuilder::new("span")?
                .class("ticket-status")
                .text(&ticket.status)
                .build(),
        )?;

    if let Some(description) = &ticket.description {
        card = card.child(
            ElementBuilder::new("p")?
                .class("ticket-description")
                .text(description)
                .build(),
        )?;
    }
    let meta: Vec<&str> = [&ticket.division, &ticket.assigned_to, &ticket.created_at]
        .into_iter()
        .filter_map(|v| v.as_deref())
        .collect();
    if !meta.is_empty() {
        card = card.child(
            ElementBuilder::new("small")?
                .class("ticket-meta")
                .text(&meta.join(" · "))
                .build(),
        )?;
    }
    if let Some(actions) = actions {
        card = card.child(actions)?;
    }
    Ok(card.build())
}

pub fn render_ticket_list(tickets: &[Ticket], cards: Vec<Element>) -> Result<Element, JsValue> {
    if tickets.is_empty() {
        return Ok(ElementBuilder::new("p")?
            .class("ticket-empty")
            .text("No tickets yet.")
            .build());
    }
    Ok(ElementBuilder::new("ul")?.class("ticket-list").children(cards)?.build())
}

pub fn render_tickets(state: &AppState) -> Result<Element, JsValue> {
    let viewmodel = state.ticket_viewmodel();
    let tickets = viewmodel.visible_tickets();
    let mut cards = Vec::with_capacity(tickets.len());
    for ticket in &tickets {
        cards.push(render_ticket_card(ticket, Some(render_actions(state, ticket)?))?);
    }

    let mut page = ElementBuilder::new("section")?
        .class("tickets-page")
        .child(ElementBuilder::new("h2")?.text("🎫 Tickets").build())?;
    if let Some(user) = state.staff.identity() {
        let query = viewmodel
            .query()
            .filter(|q| q.belongs_to(&user))
            .unwrap_or_else(|| TicketQuery::default_for(&user));
        page = page.child(render_filters(state, &user, &query)?)?;
    }
    if let Some(notice) = render_notice(state.notice.get().as_ref())? {
        page = page.child(notice)?;
    }
    Ok(page.child(render_ticket_list(&tickets, cards)?)?.build())
}
