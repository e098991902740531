pub mod api;
pub mod api_client;
pub mod http;

pub use api::{AuthApi, TicketApi};
pub use api_client::ApiClient;
