// ============================================================================
// API TRAITS - Contratos HTTP que consumen managers y viewmodels
// ============================================================================
// Implementados por `ApiClient` (gloo-net) y por fakes en tests.
// ============================================================================

use crate::errors::ApiError;
use crate::models::{ActorKind, LoginGrant, Ticket, TicketQuery, TicketStatus};

#[allow(async_fn_in_trait)]
pub trait AuthApi {
    /// Intercambia credenciales por `{token, user}`
    async fn login<K: ActorKind>(
        &self,
        credentials: &K::Credentials,
    ) -> Result<LoginGrant<K::Identity>, ApiError>;

    /// `body` ya validado por `K::credential_body`
    async fn update_credential<K: ActorKind>(
        &self,
        token: &str,
        body: serde_json::Value,
    ) -> Result<(), ApiError>;
}

#[allow(async_fn_in_trait)]
pub trait TicketApi {
    /// Alcance según `query` (assigned_to / created_by / division)
    async fn fetch_tickets(&self, token: &str, query: &TicketQuery) -> Result<Vec<Ticket>, ApiError>;

    async fn fetch_client_tickets(&self, token: &str, client_id: i64) -> Result<Vec<Ticket>, ApiError>;

    async fn update_ticket_status(
        &self,
        token: &str,
        ticket_id: i64,
        status: TicketStatus,
    ) -> Result<(), ApiError>;
}
