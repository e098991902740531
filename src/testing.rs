// Fakes compartidos por los tests (storage, navegación, confirmación, HTTP)

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::errors::ApiError;
use crate::models::{
    ActorKind, ClientUser, HttpMethod, LoginGrant, StaffRole, StaffUser, Ticket, TicketQuery,
    TicketStatus,
};
use crate::routing::{Navigator, Route};
use crate::services::{AuthApi, TicketApi};
use crate::utils::constants::{CLIENT_TICKETS_PATH, TICKETS_PATH};
use crate::viewmodels::Confirmer;

pub fn alice() -> StaffUser {
    StaffUser {
        username: "alice".to_string(),
        division: "cloud".to_string(),
        role: StaffRole::Employee,
    }
}

pub fn bob() -> ClientUser {
    ClientUser {
        id: 7,
        email: "bob@acme.test".to_string(),
        name: "Bob".to_string(),
        role: "client".to_string(),
        client_id: 42,
        company_name: "Acme".to_string(),
    }
}

pub fn ticket(id: i64, status: &str) -> Ticket {
    Ticket {
        id,
        title: format!("Ticket {}", id),
        description: None,
        division: Some("cloud".to_string()),
        status: status.to_string(),
        assigned_to: None,
        client_name: None,
        created_at: None,
    }
}

#[derive(Clone)]
pub struct RecordingNavigator {
    current: Rc<Cell<Route>>,
    log: Rc<RefCell<Vec<String>>>,
}

impl RecordingNavigator {
    pub fn at(route: Route) -> Self {
        Self {
            current: Rc::new(Cell::new(route)),
            log: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn log(&self) -> Vec<String> {
        self.log.borrow().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn current(&self) -> Route {
        self.current.get()
    }

    fn push(&self, route: Route) {
        self.current.set(route);
        self.log.borrow_mut().push(format!("push {}", route.path()));
    }

    fn replace(&self, route: Route) {
        self.current.set(route);
        self.log.borrow_mut().push(format!("replace {}", route.path()));
    }
}

/// Responde siempre lo mismo y cuenta las preguntas
#[derive(Clone, Default)]
pub struct ScriptedConfirmer {
    answer: bool,
    asked: Rc<RefCell<Vec<String>>>,
}

impl ScriptedConfirmer {
    pub fn answering(answer: bool) -> Self {
        Self {
            answer,
            asked: Rc::default(),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.asked.borrow().clone()
    }
}

impl Confirmer for ScriptedConfirmer {
    fn confirm(&self, message: &str) -> bool {
        self.asked.borrow_mut().push(message.to_string());
        self.answer
    }
}

#[derive(Default)]
struct FakeBackend {
    calls: Vec<String>,
    next_error: Option<ApiError>,
    login_response: Option<serde_json::Value>,
    tickets: Vec<Ticket>,
}

/// Backend en memoria; registra cada request como "METHOD path ..."
#[derive(Clone, Default)]
pub struct FakeApi {
    backend: Rc<RefCell<FakeBackend>>,
}

impl FakeApi {
    pub fn with_login_response(response: serde_json::Value) -> Self {
        let api = Self::default();
        api.backend.borrow_mut().login_response = Some(response);
        api
    }

    pub fn with_tickets(tickets: Vec<Ticket>) -> Self {
        let api = Self::default();
        api.backend.borrow_mut().tickets = tickets;
        api
    }

    pub fn fail_next(&self, error: ApiError) {
        self.backend.borrow_mut().next_error = Some(error);
    }

    pub fn calls(&self) -> Vec<String> {
        self.backend.borrow().calls.clone()
    }

    fn record(&self, call: String) -> Result<(), ApiError> {
        let mut backend = self.backend.borrow_mut();
        backend.calls.push(call);
        match backend.next_error.take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

impl AuthApi for FakeApi {
    async fn login<K: ActorKind>(
        &self,
        _credentials: &K::Credentials,
    ) -> Result<LoginGrant<K::Identity>, ApiError> {
        self.record(format!("POST {}", K::LOGIN_PATH))?;
        let response = self
            .backend
            .borrow()
            .login_response
            .clone()
            .ok_or_else(|| ApiError::Transport("no scripted login".to_string()))?;
        serde_json::from_value(response).map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }

    async fn update_credential<K: ActorKind>(
        &self,
        token: &str,
        body: serde_json::Value,
    ) -> Result<(), ApiError> {
        let method = match K::CREDENTIAL_METHOD {
            HttpMethod::Post => "POST",
            HttpMethod::Patch => "PATCH",
        };
        let mut fields: Vec<String> = body
            .as_object()
            .map(|map| {
                map.iter()
                    .map(|(k, v)| format!("{}={}", k, v.as_str().unwrap_or_default()))
                    .collect()
            })
            .unwrap_or_default();
        fields.sort();
        self.record(format!(
            "{} {} token={} {}",
            method,
            K::CREDENTIAL_PATH,
            token,
            fields.join(" ")
        ))
    }
}

impl TicketApi for FakeApi {
    async fn fetch_tickets(&self, token: &str, query: &TicketQuery) -> Result<Vec<Ticket>, ApiError> {
        let params: Vec<String> = query
            .query_params()
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect();
        self.record(format!("GET {}?{} token={}", TICKETS_PATH, params.join("&"), token))?;
        Ok(self.backend.borrow().tickets.clone())
    }

    async fn fetch_client_tickets(&self, token: &str, client_id: i64) -> Result<Vec<Ticket>, ApiError> {
        self.record(format!("GET {}/{} token={}", CLIENT_TICKETS_PATH, client_id, token))?;
        Ok(self.backend.borrow().tickets.clone())
    }

    async fn update_ticket_status(
        &self,
        token: &str,
        ticket_id: i64,
        status: TicketStatus,
    ) -> Result<(), ApiError> {
        self.record(format!(
            "PATCH {}/{}/status token={} status={}",
            TICKETS_PATH, ticket_id, token, status
        ))?;
        let mut backend = self.backend.borrow_mut();
        if let Some(ticket) = backend.tickets.iter_mut().find(|t| t.id == ticket_id) {
            ticket.status = status.as_str().to_string();
        }
        Ok(())
    }
}
