// ============================================================================
// ACTOR KINDS - Staff vs Client
// ============================================================================
// Cada tipo de actor define sus claves de storage, sus endpoints y sus rutas.
// El resto del núcleo (store, manager, guard) es genérico sobre `ActorKind`.
// ============================================================================

use std::fmt::Debug;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;

use crate::errors::AuthError;
use crate::models::auth::{ClientCredentials, ClientUser, CredentialUpdate, StaffCredentials, StaffUser};
use crate::routing::Route;
use crate::utils::constants::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    Post,
    Patch,
}

pub trait ActorKind: 'static {
    type Identity: Clone + Debug + PartialEq + Serialize + DeserializeOwned + 'static;
    type Credentials: Serialize + Debug;

    /// Etiqueta para logs
    const LABEL: &'static str;
    const TOKEN_KEY: &'static str;
    const IDENTITY_KEY: &'static str;
    const LOGIN_PATH: &'static str;
    const CREDENTIAL_PATH: &'static str;
    const CREDENTIAL_METHOD: HttpMethod;
    /// El cambio de contraseña exige la contraseña actual
    const REQUIRES_CURRENT_SECRET: bool;
    const LOGIN_ROUTE: Route;
    /// Destino después de un login correcto
    const LANDING_ROUTE: Route;

    fn role(identity: &Self::Identity) -> String;

    fn display_name(identity: &Self::Identity) -> String;

    fn credential_body(update: &CredentialUpdate) -> Result<serde_json::Value, AuthError>;
}

/// Valida el update para `K`; devuelve la contraseña actual si `K` la exige
fn checked_update<K: ActorKind>(update: &CredentialUpdate) -> Result<Option<&str>, AuthError> {
    if update.new_secret.trim().is_empty() {
        return Err(AuthError::InvalidCredentialUpdate(
            "New password must not be empty".to_string(),
        ));
    }
    if !K::REQUIRES_CURRENT_SECRET {
        return Ok(None);
    }
    update
        .current
        .as_deref()
        .filter(|c| !c.is_empty())
        .map(Some)
        .ok_or_else(|| AuthError::InvalidCredentialUpdate("Current password is required".to_string()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Staff;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Client;

impl ActorKind for Staff {
    type Identity = StaffUser;
    type Credentials = StaffCredentials;

    const LABEL: &'static str = "staff";
    const TOKEN_KEY: &'static str = STAFF_TOKEN_KEY;
    const IDENTITY_KEY: &'static str = STAFF_USER_KEY;
    const LOGIN_PATH: &'static str = STAFF_LOGIN_PATH;
    const CREDENTIAL_PATH: &'static str = STAFF_PASSWORD_PATH;
    const CREDENTIAL_METHOD: HttpMethod = HttpMethod::Patch;
    const REQUIRES_CURRENT_SECRET: bool = false;
    const LOGIN_ROUTE: Route = Route::StaffLogin;
    const LANDING_ROUTE: Route = Route::Tickets;

    fn role(identity: &StaffUser) -> String {
        identity.role.to_string()
    }

    fn display_name(identity: &StaffUser) -> String {
        format!("{} ({})", identity.username, identity.division)
    }

    fn credential_body(update: &CredentialUpdate) -> Result<serde_json::Value, AuthError> {
        checked_update::<Self>(update)?;
        Ok(json!({ "newPassword": update.new_secret }))
    }
}

impl ActorKind for Client {
    type Identity = ClientUser;
    type Credentials = ClientCredentials;

    const LABEL: &'static str = "client";
    const TOKEN_KEY: &'static str = CLIENT_TOKEN_KEY;
    const IDENTITY_KEY: &'static str = CLIENT_USER_KEY;
    const LOGIN_PATH: &'static str = CLIENT_LOGIN_PATH;
    const CREDENTIAL_PATH: &'static str = CLIENT_PASSWORD_PATH;
    const CREDENTIAL_METHOD: HttpMethod = HttpMethod::Post;
    const REQUIRES_CURRENT_SECRET: bool = true;
    const LOGIN_ROUTE: Route = Route::ClientLogin;
    const LANDING_ROUTE: Route = Route::ClientDashboard;

    fn role(identity: &ClientUser) -> String {
        identity.role.clone()
    }

    fn display_name(identity: &ClientUser) -> String {
        format!("{} - {}", identity.name, identity.company_name)
    }

    fn credential_body(update: &CredentialUpdate) -> Result<serde_json::Value, AuthError> {
        let current = checked_update::<Self>(update)?;
        Ok(json!({ "oldPassword": current, "newPassword": update.new_secret }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_keys_do_not_collide_between_actor_kinds() {
        let keys = [Staff::TOKEN_KEY, Staff::IDENTITY_KEY, Client::TOKEN_KEY, Client::IDENTITY_KEY];
        for (i, a) in keys.iter().enumerate() {
            for b in &keys[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn staff_password_body_only_carries_new_password() {
        let body = Staff::credential_body(&CredentialUpdate::new("s3cret")).unwrap();
        assert_eq!(body, json!({ "newPassword": "s3cret" }));
    }

    #[test]
    fn client_password_change_requires_current_password() {
        let err = Client::credential_body(&CredentialUpdate::new("s3cret")).unwrap_err();
        assert_eq!(err.to_string(), "Current password is required");

        let body = Client::credential_body(&CredentialUpdate::new("s3cret").with_current("old")).unwrap();
        assert_eq!(body, json!({ "oldPassword": "old", "newPassword": "s3cret" }));
    }

    #[test]
    fn blank_new_password_is_rejected_before_any_request() {
        assert!(matches!(
            Staff::credential_body(&CredentialUpdate::new("   ")),
            Err(AuthError::InvalidCredentialUpdate(_))
        ));
    }

    #[test]
    fn staff_ignores_a_current_password_it_does_not_need() {
        assert!(!Staff::REQUIRES_CURRENT_SECRET);
        let body = Staff::credential_body(&CredentialUpdate::new("s3cret").with_current("old")).unwrap();
        assert_eq!(body, json!({ "newPassword": "s3cret" }));
    }

    #[test]
    fn empty_current_password_counts_as_missing_for_clients() {
        assert!(Client::REQUIRES_CURRENT_SECRET);
        let err = Client::credential_body(&CredentialUpdate::new("s3cret").with_current("")).unwrap_err();
        assert_eq!(err.to_string(), "Current password is required");
    }
}
