// Claves de localStorage (una pareja por tipo de actor, no deben colisionar)
pub const STAFF_TOKEN_KEY: &str = "token";
pub const STAFF_USER_KEY: &str = "user";
pub const CLIENT_TOKEN_KEY: &str = "client_token";
pub const CLIENT_USER_KEY: &str = "client_user";

// Endpoints del backend
pub const STAFF_LOGIN_PATH: &str = "/api/auth/login";
pub const CLIENT_LOGIN_PATH: &str = "/api/clientAuth/login";
pub const STAFF_PASSWORD_PATH: &str = "/api/users/update";
pub const CLIENT_PASSWORD_PATH: &str = "/api/clientAuth/change-password";
pub const TICKETS_PATH: &str = "/api/tickets";
pub const CLIENT_TICKETS_PATH: &str = "/api/clientAuth/client-tickets";

/// Mensaje de confirmación antes de cerrar un ticket
pub const CLOSE_TICKET_PROMPT: &str = "⚠️ Close this ticket for good? This cannot be undone.";

/// Divisiones del staff; un manager puede consultar cualquiera
pub const DIVISIONS: [&str; 3] = ["cloud", "networking", "it-care"];
