pub mod guard;
pub mod navigator;
pub mod router;
pub mod routes;

pub use guard::{GuardDecision, RouteGuard};
pub use navigator::{BrowserNavigator, Navigator};
pub use router::Router;
pub use routes::{Audience, Route};
