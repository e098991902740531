use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StaffRole {
    Employee,
    Manager,
}

impl StaffRole {
    pub fn as_str(self) -> &'static str {
        match self {
            StaffRole::Employee => "employee",
            StaffRole::Manager => "manager",
        }
    }
}

impl fmt::Display for StaffRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Usuario interno (staff)
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct StaffUser {
    pub username: String,
    pub division: String,
    pub role: StaffRole,
}

/// Usuario cliente externo
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct ClientUser {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub role: String,
    pub client_id: i64,
    pub company_name: String,
}

#[derive(Clone, PartialEq, Serialize)]
pub struct StaffCredentials {
    pub username: String,
    pub password: String,
}

#[derive(Clone, PartialEq, Serialize)]
pub struct ClientCredentials {
    pub email: String,
    pub password: String,
}

// Las contraseñas nunca llegan a los logs
impl fmt::Debug for StaffCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaffCredentials")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for ClientCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientCredentials")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Respuesta de login: `{token, user}`
#[derive(Clone, PartialEq, Deserialize, Debug)]
pub struct LoginGrant<I> {
    pub token: String,
    pub user: I,
}

/// Cuerpo de error del backend: `{error}` o `{message}` según el endpoint
#[derive(Clone, PartialEq, Deserialize, Debug, Default)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    pub fn into_message(self) -> Option<String> {
        self.error
            .or(self.message)
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
    }
}

/// Cambio de contraseña; `current` solo lo exige el endpoint de clientes
#[derive(Clone, PartialEq)]
pub struct CredentialUpdate {
    pub current: Option<String>,
    pub new_secret: String,
}

impl CredentialUpdate {
    pub fn new(new_secret: impl Into<String>) -> Self {
        Self {
            current: None,
            new_secret: new_secret.into(),
        }
    }

    pub fn with_current(mut self, current: impl Into<String>) -> Self {
        self.current = Some(current.into());
        self
    }
}

impl fmt::Debug for CredentialUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialUpdate")
            .field("has_current", &self.current.is_some())
            .finish_non_exhaustive()
    }
}
