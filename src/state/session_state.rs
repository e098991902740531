// ============================================================================
// SESSION STATE - Auth Session Manager (uno por tipo de actor)
// ============================================================================
// - Memoria: `Session<I>` (token e identidad van juntos o no van)
// - Storage: SessionStore, hidratado una sola vez al arrancar
// - `hydrated` = false mientras no termine la lectura inicial; los guards
//   no redirigen hasta entonces
// ============================================================================

use std::cell::RefCell;
use std::marker::PhantomData;
use std::rc::Rc;

use crate::errors::AuthError;
use crate::models::{ActorKind, CredentialUpdate};
use crate::services::AuthApi;
use crate::state::reactivity::Subscribers;
use crate::stores::SessionStore;

/// Sesión en memoria
#[derive(Clone, Debug, PartialEq)]
pub enum Session<I> {
    Anonymous,
    Authenticated { identity: I, token: String },
}

impl<I> Session<I> {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Session::Authenticated { .. })
    }
}

/// Vista síncrona del estado (lo que consumen guards y vistas)
#[derive(Clone, Debug, PartialEq)]
pub struct AuthSnapshot<I> {
    pub identity: Option<I>,
    pub token: Option<String>,
    pub role: Option<String>,
    pub hydrated: bool,
}

impl<I> AuthSnapshot<I> {
    /// Ausente si falta cualquiera de los dos
    pub fn has_session(&self) -> bool {
        self.identity.is_some() && self.token.is_some()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum SessionEvent {
    Hydrated,
    LoggedIn,
    LoggedOut,
}

struct ManagerState<I> {
    session: Session<I>,
    hydrated: bool,
}

pub struct AuthSessionManager<K: ActorKind> {
    store: SessionStore,
    state: Rc<RefCell<ManagerState<K::Identity>>>,
    subscribers: Subscribers<SessionEvent>,
    _kind: PhantomData<K>,
}

impl<K: ActorKind> Clone for AuthSessionManager<K> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            state: self.state.clone(),
            subscribers: self.subscribers.clone(),
            _kind: PhantomData,
        }
    }
}

impl<K: ActorKind> AuthSessionManager<K> {
    /// Manager vacío y sin hidratar; llamar `start_hydration` al arrancar
    pub fn new(store: SessionStore) -> Self {
        Self {
            store,
            state: Rc::new(RefCell::new(ManagerState {
                session: Session::Anonymous,
                hydrated: false,
            })),
            subscribers: Subscribers::new(),
            _kind: PhantomData,
        }
    }

    /// Programa la hidratación en el event loop del navegador
    pub fn start_hydration(&self) {
        let manager = self.clone();
        wasm_bindgen_futures::spawn_local(async move {
            manager.hydrate();
        });
    }

    /// Lee storage una sola vez. Devuelve false si ya estaba hidratado.
    pub fn hydrate(&self) -> bool {
        if self.state.borrow().hydrated {
            return false;
        }
        self.load_from_store();
        true
    }

    /// Re-chequeo explícito: vuelve a leer storage aunque ya esté hidratado
    pub fn recheck(&self) {
        self.load_from_store();
    }

    fn load_from_store(&self) {
        let session = match self.store.read::<K>() {
            Some(stored) => {
                log::info!(
                    "✅ [AUTH] Sesión {} restaurada: {}",
                    K::LABEL,
                    K::display_name(&stored.identity)
                );
                Session::Authenticated {
                    identity: stored.identity,
                    token: stored.token,
                }
            }
            None => {
                log::info!("ℹ️ [AUTH] Sin sesión {} guardada", K::LABEL);
                Session::Anonymous
            }
        };

        self.set_session(session);
        self.subscribers.notify(&SessionEvent::Hydrated);
    }

    pub fn state(&self) -> AuthSnapshot<K::Identity> {
        let state = self.state.borrow();
        match &state.session {
            Session::Authenticated { identity, token } => AuthSnapshot {
                identity: Some(identity.clone()),
                token: Some(token.clone()),
                role: Some(K::role(identity)),
                hydrated: state.hydrated,
            },
            Session::Anonymous => AuthSnapshot {
                identity: None,
                token: None,
                role: None,
                hydrated: state.hydrated,
            },
        }
    }

    pub fn session(&self) -> Session<K::Identity> {
        self.state.borrow().session.clone()
    }

    pub fn is_hydrated(&self) -> bool {
        self.state.borrow().hydrated
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().session.is_authenticated()
    }

    pub fn token(&self) -> Option<String> {
        match &self.state.borrow().session {
            Session::Authenticated { token, .. } => Some(token.clone()),
            Session::Anonymous => None,
        }
    }

    pub fn identity(&self) -> Option<K::Identity> {
        match &self.state.borrow().session {
            Session::Authenticated { identity, .. } => Some(identity.clone()),
            Session::Anonymous => None,
        }
    }

    /// El caller ya hizo el intercambio con el backend; no navega
    pub fn login(&self, identity: K::Identity, token: String) {
        if let Err(e) = self.store.write::<K>(&token, &identity) {
            // La sesión vive solo en memoria hasta el próximo reload
            log::warn!("⚠️ [AUTH] Sesión {} no persistida: {}", K::LABEL, e);
        }
        log::info!("🔐 [AUTH] Login {}: {}", K::LABEL, K::display_name(&identity));
        self.set_session(Session::Authenticated { identity, token });
        self.subscribers.notify(&SessionEvent::LoggedIn);
    }

    /// Idempotente. La navegación a "/" la hace el router al recibir LoggedOut.
    pub fn logout(&self) {
        self.store.clear::<K>();
        let was_authenticated = self.is_authenticated();
        self.set_session(Session::Anonymous);
        if was_authenticated {
            log::info!("👋 [AUTH] Logout {}", K::LABEL);
        }
        self.subscribers.notify(&SessionEvent::LoggedOut);
    }

    /// No modifica token ni identidad
    pub async fn update_credential<A: AuthApi>(
        &self,
        api: &A,
        update: &CredentialUpdate,
    ) -> Result<(), AuthError> {
        let token = self.token().ok_or(AuthError::NotAuthenticated)?;
        let body = K::credential_body(update)?;

        match api.update_credential::<K>(&token, body).await {
            Ok(()) => {
                log::info!("🔑 [AUTH] Contraseña {} actualizada", K::LABEL);
                Ok(())
            }
            Err(e) => {
                log::error!("❌ [AUTH] Error actualizando contraseña {}: {}", K::LABEL, e);
                Err(e.into())
            }
        }
    }

    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn(&SessionEvent) + 'static,
    {
        self.subscribers.subscribe(callback);
    }

    /// Fin de vida explícito: suelta todos los subscribers
    pub fn dispose(&self) {
        self.subscribers.clear();
    }

    // Único punto de mutación de la sesión en memoria. Cualquier escritura
    // cuenta como hidratado: una hidratación tardía no pisa un login/logout.
    fn set_session(&self, session: Session<K::Identity>) {
        let mut state = self.state.borrow_mut();
        state.session = session;
        state.hydrated = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ApiError;
    use crate::models::{Client, Staff, StaffRole, StaffUser};
    use crate::testing::{alice, bob, FakeApi};
    use crate::utils::storage::{MemoryStorage, StorageBackend};
    use futures::executor::block_on;
    use std::cell::Cell;

    fn manager_with_storage() -> (AuthSessionManager<Staff>, MemoryStorage) {
        let memory = MemoryStorage::new();
        let store = SessionStore::new(Rc::new(memory.clone()));
        (AuthSessionManager::new(store), memory)
    }

    fn assert_paired<I>(snapshot: &AuthSnapshot<I>) {
        assert_eq!(snapshot.identity.is_some(), snapshot.token.is_some());
        assert_eq!(snapshot.identity.is_some(), snapshot.role.is_some());
    }

    #[test]
    fn starts_empty_and_not_hydrated() {
        let (manager, _) = manager_with_storage();
        let state = manager.state();
        assert!(!state.hydrated);
        assert!(!state.has_session());
    }

    #[test]
    fn hydration_marks_hydrated_even_without_a_session() {
        let (manager, _) = manager_with_storage();
        assert!(manager.hydrate());
        let state = manager.state();
        assert!(state.hydrated);
        assert!(!state.has_session());
    }

    #[test]
    fn hydration_restores_the_stored_session() {
        let (manager, memory) = manager_with_storage();
        memory.set_item("token", "abc").unwrap();
        memory
            .set_item("user", r#"{"username":"alice","division":"cloud","role":"employee"}"#)
            .unwrap();

        manager.hydrate();

        let state = manager.state();
        assert_eq!(state.token.as_deref(), Some("abc"));
        assert_eq!(state.identity, Some(alice()));
        assert_eq!(state.role.as_deref(), Some("employee"));
    }

    #[test]
    fn hydration_happens_at_most_once_unless_rechecked() {
        let (manager, memory) = manager_with_storage();
        assert!(manager.hydrate());

        // Otra pestaña escribe una sesión después del arranque
        let store = SessionStore::new(Rc::new(memory.clone()));
        store.write::<Staff>("late", &alice()).unwrap();

        assert!(!manager.hydrate());
        assert!(!manager.is_authenticated());

        manager.recheck();
        assert_eq!(manager.token().as_deref(), Some("late"));
    }

    #[test]
    fn login_persists_and_is_visible_immediately() {
        let (manager, memory) = manager_with_storage();
        manager.hydrate();
        manager.login(alice(), "abc".to_string());

        let state = manager.state();
        assert_eq!(state.token.as_deref(), Some("abc"));
        assert_eq!(state.identity, Some(alice()));
        assert_eq!(memory.get_item("token").as_deref(), Some("abc"));
        let stored: StaffUser = serde_json::from_str(&memory.get_item("user").unwrap()).unwrap();
        assert_eq!(stored, alice());
    }

    #[test]
    fn login_survives_a_full_storage_in_memory() {
        let (manager, memory) = manager_with_storage();
        memory.set_read_only(true);

        manager.login(alice(), "abc".to_string());

        assert!(manager.is_authenticated());
        assert!(memory.is_empty());
    }

    #[test]
    fn pending_hydration_does_not_undo_a_memory_only_login() {
        let (manager, memory) = manager_with_storage();
        memory.set_read_only(true);

        manager.login(alice(), "abc".to_string());
        assert!(!manager.hydrate());

        assert!(manager.is_authenticated());
        assert_eq!(manager.token().as_deref(), Some("abc"));
        assert!(manager.state().hydrated);
    }

    #[test]
    fn logout_before_hydration_counts_as_hydrated() {
        let (manager, memory) = manager_with_storage();
        memory.set_item("token", "stale").unwrap();
        memory
            .set_item("user", r#"{"username":"alice","division":"cloud","role":"employee"}"#)
            .unwrap();

        manager.logout();
        assert!(!manager.hydrate());

        assert!(!manager.is_authenticated());
        assert!(memory.is_empty());
    }

    #[test]
    fn logout_twice_equals_logout_once() {
        let (manager, memory) = manager_with_storage();
        manager.hydrate();
        manager.login(alice(), "abc".to_string());

        manager.logout();
        let once = manager.state();
        manager.logout();
        let twice = manager.state();

        assert_eq!(once, twice);
        assert!(!twice.has_session());
        assert!(twice.hydrated);
        assert!(memory.is_empty());
    }

    #[test]
    fn token_and_identity_stay_paired_across_any_sequence() {
        let (manager, memory) = manager_with_storage();
        assert_paired(&manager.state());

        manager.hydrate();
        assert_paired(&manager.state());
        manager.login(alice(), "abc".to_string());
        assert_paired(&manager.state());
        manager.logout();
        assert_paired(&manager.state());

        // Storage con solo el token: sigue sin sesión
        memory.set_item("token", "orphan").unwrap();
        manager.recheck();
        assert_paired(&manager.state());
        assert!(!manager.is_authenticated());

        manager.login(
            StaffUser { role: StaffRole::Manager, ..alice() },
            "m-1".to_string(),
        );
        manager.login(alice(), "abc".to_string());
        let state = manager.state();
        assert_paired(&state);
        assert_eq!(state.token.as_deref(), Some("abc"));
        assert_eq!(state.role.as_deref(), Some("employee"));
    }

    #[test]
    fn subscribers_receive_lifecycle_events_until_disposed() {
        let (manager, _) = manager_with_storage();
        let logouts = Rc::new(Cell::new(0));
        let counter = logouts.clone();
        manager.subscribe(move |event| {
            if *event == SessionEvent::LoggedOut {
                counter.set(counter.get() + 1);
            }
        });

        manager.login(alice(), "abc".to_string());
        manager.logout();
        assert_eq!(logouts.get(), 1);

        manager.dispose();
        manager.logout();
        assert_eq!(logouts.get(), 1);
    }

    #[test]
    fn staff_and_client_managers_are_independent() {
        let memory = MemoryStorage::new();
        let store = SessionStore::new(Rc::new(memory));
        let staff: AuthSessionManager<Staff> = AuthSessionManager::new(store.clone());
        let client: AuthSessionManager<Client> = AuthSessionManager::new(store);

        staff.login(alice(), "abc".to_string());
        client.login(bob(), "xyz".to_string());
        staff.logout();

        assert!(!staff.is_authenticated());
        assert_eq!(client.token().as_deref(), Some("xyz"));
    }

    #[test]
    fn credential_update_requires_a_session() {
        let (manager, _) = manager_with_storage();
        let api = FakeApi::default();

        let result = block_on(manager.update_credential(&api, &crate::models::CredentialUpdate::new("n3w")));

        assert_eq!(result, Err(AuthError::NotAuthenticated));
        assert!(api.calls().is_empty());
    }

    #[test]
    fn credential_update_sends_bearer_token_and_keeps_the_session() {
        let (manager, _) = manager_with_storage();
        manager.login(alice(), "abc".to_string());
        let api = FakeApi::default();

        block_on(manager.update_credential(&api, &crate::models::CredentialUpdate::new("n3w"))).unwrap();

        assert_eq!(api.calls(), vec!["PATCH /api/users/update token=abc newPassword=n3w".to_string()]);
        assert_eq!(manager.token().as_deref(), Some("abc"));
        assert_eq!(manager.identity(), Some(alice()));
    }

    #[test]
    fn credential_update_failure_carries_backend_message() {
        let (manager, _) = manager_with_storage();
        manager.login(alice(), "abc".to_string());
        let api = FakeApi::default();
        api.fail_next(ApiError::Rejected {
            status: 400,
            message: "Password too short".to_string(),
        });

        let err = block_on(manager.update_credential(&api, &crate::models::CredentialUpdate::new("x")))
            .unwrap_err();

        assert_eq!(err.to_string(), "Password too short");
        assert!(manager.is_authenticated());
    }
}
