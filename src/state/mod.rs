// ============================================================================
// STATE MODULE - State Management con Rc<RefCell> + notificaciones
// ============================================================================

pub mod app_state;
pub mod reactivity;
pub mod session_state;

pub use app_state::{AppState, Notice, NoticeKind, Screen};
pub use reactivity::{ReactiveState, Subscribers};
pub use session_state::{AuthSessionManager, AuthSnapshot, Session, SessionEvent};
