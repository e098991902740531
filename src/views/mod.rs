pub mod app;
pub mod client_dashboard;
pub mod home;
pub mod login;
pub mod profile;
pub mod shared;
pub mod tickets;

pub use app::render_app;
