// ============================================================================
// TICKET VIEWMODEL - Listado + ejecución de acciones del workflow
// ============================================================================
// El gate (models::ticket) decide qué botones existen; aquí se ejecutan:
// gate -> confirmación (solo close) -> PATCH -> refetch del cache
// El listado staff se pide con la TicketQuery vigente.
// ============================================================================

use crate::errors::WorkflowError;
use crate::models::{
    permitted_actions, Client, Staff, StaffUser, StatusFilter, Ticket, TicketAction, TicketQuery,
    TicketStatus, TicketView,
};
use crate::services::TicketApi;
use crate::state::{AuthSessionManager, ReactiveState};
use crate::utils::constants::CLOSE_TICKET_PROMPT;

/// Pregunta sí/no al usuario
pub trait Confirmer {
    fn confirm(&self, message: &str) -> bool;
}

/// `window.confirm()`
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserConfirmer;

impl Confirmer for BrowserConfirmer {
    fn confirm(&self, message: &str) -> bool {
        web_sys::window()
            .and_then(|w| w.confirm_with_message(message).ok())
            .unwrap_or(false)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionOutcome {
    Applied(TicketStatus),
    /// El usuario no confirmó: no se envió nada
    Cancelled,
}

pub struct TicketViewModel<A> {
    api: A,
    tickets: ReactiveState<Vec<Ticket>>,
    query: ReactiveState<Option<TicketQuery>>,
}

impl<A: TicketApi> TicketViewModel<A> {
    pub fn new(api: A, tickets: ReactiveState<Vec<Ticket>>) -> Self {
        Self {
            api,
            tickets,
            query: ReactiveState::new(None),
        }
    }

    /// Comparte la query con el estado global para que sobreviva re-renders
    pub fn with_query(mut self, query: ReactiveState<Option<TicketQuery>>) -> Self {
        self.query = query;
        self
    }

    pub fn tickets(&self) -> Vec<Ticket> {
        self.tickets.get()
    }

    /// Cache filtrado por el status de la query vigente
    pub fn visible_tickets(&self) -> Vec<Ticket> {
        let filter = self.query.get().map(|q| q.status()).unwrap_or_default();
        self.tickets
            .get()
            .into_iter()
            .filter(|ticket| filter.keeps(ticket))
            .collect()
    }

    pub fn query(&self) -> Option<TicketQuery> {
        self.query.get()
    }

    /// Query vigente de `user`; la de otro usuario se descarta
    pub fn query_for(&self, user: &StaffUser) -> TicketQuery {
        match self.query.get() {
            Some(query) if query.belongs_to(user) => query,
            _ => {
                let query = TicketQuery::default_for(user);
                self.query.set(Some(query.clone()));
                query
            }
        }
    }

    /// Recarga el listado staff con la query vigente
    pub async fn load(&self, manager: &AuthSessionManager<Staff>) -> Result<usize, WorkflowError> {
        let (token, user) = manager
            .token()
            .zip(manager.identity())
            .ok_or(WorkflowError::NotAuthenticated)?;
        let query = self.query_for(&user);
        let tickets = self.api.fetch_tickets(&token, &query).await?;
        let count = tickets.len();
        self.tickets.set(tickets);
        Ok(count)
    }

    /// Cambia el alcance y refetch; fuera de alcance no se envía nada
    pub async fn set_view(
        &self,
        manager: &AuthSessionManager<Staff>,
        view: TicketView,
    ) -> Result<usize, WorkflowError> {
        let user = manager.identity().ok_or(WorkflowError::NotAuthenticated)?;
        let status = self.query_for(&user).status();
        let query = TicketQuery::for_staff(&user, view, status)?;
        self.query.set(Some(query));
        self.load(manager).await
    }

    /// Filtro de status: solo local, sin request
    pub fn set_status_filter(&self, manager: &AuthSessionManager<Staff>, status: StatusFilter) {
        if let Some(user) = manager.identity() {
            let query = self.query_for(&user).with_status(status);
            self.query.set(Some(query));
        }
    }

    /// Tickets propios del cliente (solo lectura)
    pub async fn load_for_client(
        &self,
        manager: &AuthSessionManager<Client>,
    ) -> Result<usize, WorkflowError> {
        let (token, client) = manager
            .token()
            .zip(manager.identity())
            .ok_or(WorkflowError::NotAuthenticated)?;
        let tickets = self.api.fetch_client_tickets(&token, client.client_id).await?;
        let count = tickets.len();
        self.tickets.set(tickets);
        Ok(count)
    }

    pub async fn apply<C: Confirmer>(
        &self,
        manager: &AuthSessionManager<Staff>,
        ticket: &Ticket,
        action: TicketAction,
        confirmer: &C,
    ) -> Result<ActionOutcome, WorkflowError> {
        let token = manager.token().ok_or(WorkflowError::NotAuthenticated)?;

        if !permitted_actions(ticket)?.contains(&action) {
            return Err(WorkflowError::NotPermitted {
                action: action.to_string(),
                status: ticket.status.clone(),
            });
        }

        if action.requires_confirmation() && !confirmer.confirm(CLOSE_TICKET_PROMPT) {
            log::info!("🚫 [TICKETS] {} de #{} cancelado por el usuario", action, ticket.id);
            return Ok(ActionOutcome::Cancelled);
        }

        let target = action.target();
        self.api.update_ticket_status(&token, ticket.id, target).await?;
        log::info!("✅ [TICKETS] #{} {} -> {}", ticket.id, ticket.status, target);

        // La mutación ya se aplicó; un refetch fallido solo deja el cache viejo
        if let Err(e) = self.load(manager).await {
            log::warn!("⚠️ [TICKETS] Refetch tras {} falló: {}", action, e);
        }
        Ok(ActionOutcome::Applied(target))
    }
}
