// ============================================================================
// API CLIENT - SOLO COMUNICACIÓN HTTP (Stateless)
// ============================================================================
// NO tiene lógica de negocio, solo hace requests HTTP
// ============================================================================

use gloo_net::http::{Request, RequestBuilder};
use serde_json::json;

use crate::config::CONFIG;
use crate::errors::ApiError;
use crate::models::{ActorKind, HttpMethod, LoginGrant, Ticket, TicketQuery, TicketStatus};
use crate::services::api::{AuthApi, TicketApi};
use crate::services::http::{self, decode_json};
use crate::utils::constants::{CLIENT_TICKETS_PATH, TICKETS_PATH};

const LOGIN_FAILED: &str = "Login failed";
const PASSWORD_UPDATE_FAILED: &str = "Password update failed";
const TICKETS_FAILED: &str = "Could not load tickets";
const STATUS_UPDATE_FAILED: &str = "Could not update ticket status";

/// Cliente API - SOLO comunicación HTTP (stateless)
#[derive(Clone, Debug)]
pub struct ApiClient {
    base_url: String,
    timeout_ms: u32,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiClient {
    pub fn new() -> Self {
        Self::with_base_url(CONFIG.api_base_url.clone(), CONFIG.request_timeout_ms)
    }

    pub fn with_base_url(base_url: impl Into<String>, timeout_ms: u32) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout_ms,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(builder: RequestBuilder, token: &str) -> RequestBuilder {
        builder.header("Authorization", &format!("Bearer {}", token))
    }
}

impl AuthApi for ApiClient {
    async fn login<K: ActorKind>(
        &self,
        credentials: &K::Credentials,
    ) -> Result<LoginGrant<K::Identity>, ApiError> {
        let url = self.url(K::LOGIN_PATH);
        let body = serde_json::to_value(credentials)
            .map_err(|e| ApiError::InvalidResponse(format!("Serialization error: {}", e)))?;

        log::info!("🔐 [API] Login {} -> {}", K::LABEL, K::LOGIN_PATH);

        let raw = http::send(Request::post(&url), Some(&body), self.timeout_ms)
            .await?
            .into_success(LOGIN_FAILED)?;
        let grant: LoginGrant<K::Identity> = decode_json(&raw)?;

        if grant.token.is_empty() {
            return Err(ApiError::InvalidResponse("login response without token".to_string()));
        }
        Ok(grant)
    }

    async fn update_credential<K: ActorKind>(
        &self,
        token: &str,
        body: serde_json::Value,
    ) -> Result<(), ApiError> {
        let url = self.url(K::CREDENTIAL_PATH);
        let builder = match K::CREDENTIAL_METHOD {
            HttpMethod::Post => Request::post(&url),
            HttpMethod::Patch => Request::patch(&url),
        };

        log::info!("🔑 [API] Cambio de contraseña {}", K::LABEL);

        http::send(Self::authorized(builder, token), Some(&body), self.timeout_ms)
            .await?
            .into_success(PASSWORD_UPDATE_FAILED)?;
        Ok(())
    }
}

impl TicketApi for ApiClient {
    async fn fetch_tickets(&self, token: &str, query: &TicketQuery) -> Result<Vec<Ticket>, ApiError> {
        let url = self.url(TICKETS_PATH);
        let params = query.query_params();
        log::debug!("📋 [API] GET {} {:?}", TICKETS_PATH, params);

        let builder = Request::get(&url).query(params.iter().map(|(k, v)| (*k, v.as_str())));
        let raw = http::send(Self::authorized(builder, token), None, self.timeout_ms)
            .await?
            .into_success(TICKETS_FAILED)?;
        let tickets: Vec<Ticket> = decode_json(&raw)?;

        log::info!("📋 [API] {} tickets recibidos", tickets.len());
        Ok(tickets)
    }

    async fn fetch_client_tickets(&self, token: &str, client_id: i64) -> Result<Vec<Ticket>, ApiError> {
        let url = self.url(&format!("{}/{}", CLIENT_TICKETS_PATH, client_id));
        let raw = http::send(Self::authorized(Request::get(&url), token), None, self.timeout_ms)
            .await?
            .into_success(TICKETS_FAILED)?;
        let tickets: Vec<Ticket> = decode_json(&raw)?;

        log::info!("📋 [API] {} tickets del cliente {}", tickets.len(), client_id);
        Ok(tickets)
    }

    async fn update_ticket_status(
        &self,
        token: &str,
        ticket_id: i64,
        status: TicketStatus,
    ) -> Result<(), ApiError> {
        let url = self.url(&format!("{}/{}/status", TICKETS_PATH, ticket_id));
        let body = json!({ "status": status.as_str() });

        log::info!("🔄 [API] Ticket #{} -> {}", ticket_id, status);

        http::send(Self::authorized(Request::patch(&url), token), Some(&body), self.timeout_ms)
            .await?
            .into_success(STATUS_UPDATE_FAILED)?;
        Ok(())
    }
}
