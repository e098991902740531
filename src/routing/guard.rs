// ============================================================================
// ROUTE GUARD - Decide render / redirect / espera para rutas protegidas
// ============================================================================

use std::marker::PhantomData;

use crate::models::ActorKind;
use crate::routing::Route;
use crate::state::AuthSnapshot;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    /// Hidratación en curso: placeholder neutro, nunca redirigir
    Pending,
    /// Sin sesión: ir al login (history replace)
    Redirect(Route),
    Render,
}

pub struct RouteGuard<K: ActorKind>(PhantomData<K>);

impl<K: ActorKind> RouteGuard<K> {
    pub fn evaluate(snapshot: &AuthSnapshot<K::Identity>) -> GuardDecision {
        if !snapshot.hydrated {
            return GuardDecision::Pending;
        }
        if snapshot.has_session() {
            GuardDecision::Render
        } else {
            GuardDecision::Redirect(K::LOGIN_ROUTE)
        }
    }
}
