pub mod auth_viewmodel;
pub mod ticket_viewmodel;

pub use auth_viewmodel::{AuthViewModel, PasswordForm};
pub use ticket_viewmodel::{ActionOutcome, BrowserConfirmer, Confirmer, TicketViewModel};
