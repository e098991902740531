// ============================================================================
// ROUTER - Navegación in-app + aplicación de guards
// ============================================================================
// - navigate: push (links, login correcto, logout)
// - redirect: replace (guards), para que "atrás" no vuelva a la ruta protegida
// ============================================================================

use std::rc::Rc;

use crate::models::ActorKind;
use crate::routing::guard::{GuardDecision, RouteGuard};
use crate::routing::navigator::Navigator;
use crate::routing::Route;
use crate::state::reactivity::Subscribers;
use crate::state::{AuthSessionManager, SessionEvent};

#[derive(Clone)]
pub struct Router {
    navigator: Rc<dyn Navigator>,
    listeners: Subscribers<Route>,
}

impl Router {
    pub fn new(navigator: Rc<dyn Navigator>) -> Self {
        Self {
            navigator,
            listeners: Subscribers::new(),
        }
    }

    pub fn current(&self) -> Route {
        self.navigator.current()
    }

    pub fn navigate(&self, route: Route) {
        if self.current() == route {
            return;
        }
        log::info!("🧭 [ROUTER] -> {}", route.path());
        self.navigator.push(route);
        self.listeners.notify(&route);
    }

    pub fn redirect(&self, route: Route) {
        log::info!("↪️ [ROUTER] redirect -> {}", route.path());
        self.navigator.replace(route);
        self.listeners.notify(&route);
    }

    /// Back/forward del navegador (popstate): la URL ya cambió
    pub fn location_changed(&self) {
        let route = self.current();
        log::debug!("🧭 [ROUTER] popstate {}", route.path());
        self.listeners.notify(&route);
    }

    pub fn on_change<F>(&self, callback: F)
    where
        F: Fn(&Route) + 'static,
    {
        self.listeners.subscribe(callback);
    }

    /// Logout de cualquier actor => navegación in-app a "/"
    pub fn follow_logout<K: ActorKind>(&self, manager: &AuthSessionManager<K>) {
        let router = self.clone();
        manager.subscribe(move |event| {
            if *event == SessionEvent::LoggedOut {
                router.navigate(Route::Home);
            }
        });
    }

    /// Evalúa el guard de `K` y aplica el redirect si corresponde
    pub fn enforce<K: ActorKind>(&self, manager: &AuthSessionManager<K>) -> GuardDecision {
        let decision = RouteGuard::<K>::evaluate(&manager.state());
        if let GuardDecision::Redirect(target) = decision {
            log::warn!("🔒 [ROUTER] Sin sesión {}, redirigiendo a {}", K::LABEL, target.path());
            self.redirect(target);
        }
        decision
    }
}
