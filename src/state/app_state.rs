// ============================================================================
// APP STATE - Estado global de la aplicación
// ============================================================================
// Dos managers independientes (staff / client) sobre el mismo SessionStore,
// el router, el cliente HTTP y los caches de tickets.
// ============================================================================

use std::rc::Rc;

use crate::models::{Client, Staff, Ticket, TicketQuery};
use crate::routing::{Audience, BrowserNavigator, GuardDecision, Navigator, Route, Router};
use crate::services::ApiClient;
use crate::state::reactivity::ReactiveState;
use crate::state::session_state::AuthSessionManager;
use crate::stores::SessionStore;
use crate::utils::storage::{default_backend, StorageBackend};
use crate::viewmodels::{AuthViewModel, TicketViewModel};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Error,
    Success,
}

/// Mensaje de feedback bajo los formularios
#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn error(text: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Error, text: text.into() }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Success, text: text.into() }
    }
}

/// Qué pintar tras aplicar guards
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    /// "Verificando autenticación..." mientras hidrata
    Checking,
    Page(Route),
}

/// Estado global de la aplicación
#[derive(Clone)]
pub struct AppState {
    pub staff: AuthSessionManager<Staff>,
    pub client: AuthSessionManager<Client>,
    pub router: Router,
    pub api: ApiClient,

    // Caches (se invalidan tras cada mutación)
    pub tickets: ReactiveState<Vec<Ticket>>,
    pub client_tickets: ReactiveState<Vec<Ticket>>,
    /// Alcance + filtro del listado staff
    pub ticket_query: ReactiveState<Option<TicketQuery>>,

    // UI State
    pub notice: ReactiveState<Option<Notice>>,
    pub busy: ReactiveState<bool>,
}

impl AppState {
    pub fn new() -> Self {
        Self::with_parts(default_backend(), Rc::new(BrowserNavigator), ApiClient::new())
    }

    pub fn with_parts(
        backend: Rc<dyn StorageBackend>,
        navigator: Rc<dyn Navigator>,
        api: ApiClient,
    ) -> Self {
        let store = SessionStore::new(backend);
        let state = Self {
            staff: AuthSessionManager::new(store.clone()),
            client: AuthSessionManager::new(store),
            router: Router::new(navigator),
            api,
            tickets: ReactiveState::new(Vec::new()),
            client_tickets: ReactiveState::new(Vec::new()),
            ticket_query: ReactiveState::new(None),
            notice: ReactiveState::new(None),
            busy: ReactiveState::new(false),
        };

        state.router.follow_logout(&state.staff);
        state.router.follow_logout(&state.client);

        // Al cerrar sesión los caches dejan de ser de nadie
        let tickets = state.tickets.clone();
        let ticket_query = state.ticket_query.clone();
        state.staff.subscribe(move |event| {
            if *event == crate::state::SessionEvent::LoggedOut {
                tickets.set(Vec::new());
                ticket_query.set(None);
            }
        });
        let client_tickets = state.client_tickets.clone();
        state.client.subscribe(move |event| {
            if *event == crate::state::SessionEvent::LoggedOut {
                client_tickets.set(Vec::new());
            }
        });

        state
    }

    /// Arranca la hidratación de ambas sesiones
    pub fn start(&self) {
        self.staff.start_hydration();
        self.client.start_hydration();
    }

    /// Un único callback para cualquier cambio que requiera re-render
    pub fn subscribe_to_changes<F>(&self, callback: F)
    where
        F: Fn() + Clone + 'static,
    {
        let cb = callback.clone();
        self.staff.subscribe(move |_| cb());
        let cb = callback.clone();
        self.client.subscribe(move |_| cb());
        let cb = callback.clone();
        self.router.on_change(move |_| cb());
        self.tickets.subscribe(callback.clone());
        self.client_tickets.subscribe(callback.clone());
        self.ticket_query.subscribe(callback.clone());
        self.notice.subscribe(callback.clone());
        self.busy.subscribe(callback);
    }

    /// Resuelve la ruta actual contra el guard que le corresponde.
    /// Un redirect se aplica aquí (history replace) y se pinta el destino.
    pub fn screen(&self) -> Screen {
        let route = self.router.current();
        let decision = match route.audience() {
            Audience::Public => GuardDecision::Render,
            Audience::Staff => self.router.enforce(&self.staff),
            Audience::Client => self.router.enforce(&self.client),
        };

        match decision {
            GuardDecision::Pending => Screen::Checking,
            GuardDecision::Redirect(target) => Screen::Page(target),
            GuardDecision::Render => Screen::Page(route),
        }
    }

    pub fn auth_viewmodel(&self) -> AuthViewModel<ApiClient> {
        AuthViewModel::new(self.api.clone())
    }

    pub fn ticket_viewmodel(&self) -> TicketViewModel<ApiClient> {
        TicketViewModel::new(self.api.clone(), self.tickets.clone())
            .with_query(self.ticket_query.clone())
    }

    pub fn client_ticket_viewmodel(&self) -> TicketViewModel<ApiClient> {
        TicketViewModel::new(self.api.clone(), self.client_tickets.clone())
    }

    pub fn set_notice(&self, notice: Option<Notice>) {
        self.notice.set(notice);
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
