// ============================================================================
// AUTH VIEWMODEL - Login y cambio de contraseña
// ============================================================================
// Orden del login: HTTP -> manager.login -> ruta de destino.
// Si el HTTP falla no se toca la sesión.
// ============================================================================

use crate::errors::AuthError;
use crate::models::{ActorKind, CredentialUpdate};
use crate::routing::Route;
use crate::services::AuthApi;
use crate::state::AuthSessionManager;

/// Campos del formulario de contraseña
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PasswordForm {
    pub current: String,
    pub new_password: String,
    pub confirm: String,
}

impl PasswordForm {
    pub fn validate(&self) -> Result<CredentialUpdate, AuthError> {
        if self.new_password.trim().is_empty() {
            return Err(AuthError::InvalidCredentialUpdate(
                "New password must not be empty".to_string(),
            ));
        }
        if self.new_password != self.confirm {
            return Err(AuthError::InvalidCredentialUpdate(
                "Passwords do not match".to_string(),
            ));
        }

        let update = CredentialUpdate::new(self.new_password.clone());
        Ok(if self.current.is_empty() {
            update
        } else {
            update.with_current(self.current.clone())
        })
    }
}

pub struct AuthViewModel<A> {
    api: A,
}

impl<A: AuthApi> AuthViewModel<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    /// Devuelve la ruta a la que navegar tras el login
    pub async fn sign_in<K: ActorKind>(
        &self,
        manager: &AuthSessionManager<K>,
        credentials: &K::Credentials,
    ) -> Result<Route, AuthError> {
        log::info!("🔐 [AUTH] Iniciando login {}...", K::LABEL);

        let grant = match self.api.login::<K>(credentials).await {
            Ok(grant) => grant,
            Err(e) => {
                log::warn!("❌ [AUTH] Login {} rechazado: {}", K::LABEL, e);
                return Err(e.into());
            }
        };

        manager.login(grant.user, grant.token);
        Ok(K::LANDING_ROUTE)
    }

    pub async fn change_password<K: ActorKind>(
        &self,
        manager: &AuthSessionManager<K>,
        form: &PasswordForm,
    ) -> Result<(), AuthError> {
        let update = form.validate()?;
        manager.update_credential(&self.api, &update).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ApiError;
    use crate::models::{Client, ClientCredentials, Staff, StaffCredentials};
    use crate::stores::SessionStore;
    use crate::testing::{alice, bob, FakeApi};
    use crate::utils::storage::{MemoryStorage, StorageBackend};
    use futures::executor::block_on;
    use serde_json::json;
    use std::rc::Rc;

    fn staff_manager() -> (AuthSessionManager<Staff>, MemoryStorage) {
        let memory = MemoryStorage::new();
        let manager = AuthSessionManager::new(SessionStore::new(Rc::new(memory.clone())));
        manager.hydrate();
        (manager, memory)
    }

    fn credentials() -> StaffCredentials {
        StaffCredentials {
            username: "alice".to_string(),
            password: "pw".to_string(),
        }
    }

    #[test]
    fn successful_staff_login_stores_session_and_lands_on_tickets() {
        let (manager, memory) = staff_manager();
        let api = FakeApi::with_login_response(json!({
            "token": "abc",
            "user": { "username": "alice", "division": "cloud", "role": "employee" }
        }));
        let vm = AuthViewModel::new(api.clone());

        let landing = block_on(vm.sign_in(&manager, &credentials())).unwrap();

        assert_eq!(landing, Route::Tickets);
        let state = manager.state();
        assert_eq!(state.token.as_deref(), Some("abc"));
        assert_eq!(state.identity, Some(alice()));
        assert_eq!(state.role.as_deref(), Some("employee"));
        assert_eq!(memory.get_item("token").as_deref(), Some("abc"));
        assert_eq!(api.calls(), vec!["POST /api/auth/login".to_string()]);
    }

    #[test]
    fn rejected_login_surfaces_backend_message_and_keeps_state() {
        let (manager, memory) = staff_manager();
        let api = FakeApi::default();
        api.fail_next(ApiError::Rejected {
            status: 401,
            message: "Invalid credentials".to_string(),
        });
        let vm = AuthViewModel::new(api);

        let err = block_on(vm.sign_in(&manager, &credentials())).unwrap_err();

        assert_eq!(err.to_string(), "Invalid credentials");
        assert!(!manager.state().has_session());
        assert!(memory.is_empty());
    }

    #[test]
    fn client_login_lands_on_dashboard() {
        let memory = MemoryStorage::new();
        let manager: AuthSessionManager<Client> =
            AuthSessionManager::new(SessionStore::new(Rc::new(memory.clone())));
        let api = FakeApi::with_login_response(json!({
            "token": "xyz",
            "user": serde_json::to_value(bob()).unwrap()
        }));
        let vm = AuthViewModel::new(api);
        let credentials = ClientCredentials {
            email: "bob@acme.test".to_string(),
            password: "pw".to_string(),
        };

        let landing = block_on(vm.sign_in(&manager, &credentials)).unwrap();

        assert_eq!(landing, Route::ClientDashboard);
        assert_eq!(manager.identity(), Some(bob()));
        assert_eq!(memory.get_item("client_token").as_deref(), Some("xyz"));
    }

    #[test]
    fn password_form_rejects_mismatch_without_a_request() {
        let (manager, _) = staff_manager();
        manager.login(alice(), "abc".to_string());
        let api = FakeApi::default();
        let vm = AuthViewModel::new(api.clone());
        let form = PasswordForm {
            new_password: "one".to_string(),
            confirm: "two".to_string(),
            ..PasswordForm::default()
        };

        let err = block_on(vm.change_password(&manager, &form)).unwrap_err();

        assert_eq!(err.to_string(), "Passwords do not match");
        assert!(api.calls().is_empty());
    }

    #[test]
    fn client_password_change_sends_old_and_new_password() {
        let manager: AuthSessionManager<Client> =
            AuthSessionManager::new(SessionStore::new(Rc::new(MemoryStorage::new())));
        manager.login(bob(), "xyz".to_string());
        let api = FakeApi::default();
        let vm = AuthViewModel::new(api.clone());
        let form = PasswordForm {
            current: "old".to_string(),
            new_password: "n3w".to_string(),
            confirm: "n3w".to_string(),
        };

        block_on(vm.change_password(&manager, &form)).unwrap();

        assert_eq!(
            api.calls(),
            vec!["POST /api/clientAuth/change-password token=xyz newPassword=n3w oldPassword=old".to_string()]
        );
    }
}
