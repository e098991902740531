// ============================================================================
// ROUTES - Tabla de rutas de la SPA
// ============================================================================

/// Qué sesión protege una ruta
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Audience {
    Public,
    Staff,
    Client,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    StaffLogin,
    ClientLogin,
    Tickets,
    Profile,
    ClientDashboard,
    ClientProfile,
}

impl Route {
    pub const ALL: [Route; 7] = [
        Route::Home,
        Route::StaffLogin,
        Route::ClientLogin,
        Route::Tickets,
        Route::Profile,
        Route::ClientDashboard,
        Route::ClientProfile,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::StaffLogin => "/login",
            Route::ClientLogin => "/client-login",
            Route::Tickets => "/ticket",
            Route::Profile => "/profile",
            Route::ClientDashboard => "/client-dashboard",
            Route::ClientProfile => "/client-profile",
        }
    }

    /// Paths desconocidos resuelven a Home
    pub fn from_path(path: &str) -> Route {
        let trimmed = path.split(['?', '#']).next().unwrap_or("/");
        let trimmed = if trimmed.len() > 1 {
            trimmed.trim_end_matches('/')
        } else {
            trimmed
        };
        Route::ALL
            .into_iter()
            .find(|route| route.path() == trimmed)
            .unwrap_or(Route::Home)
    }

    pub fn audience(self) -> Audience {
        match self {
            Route::Home | Route::StaffLogin | Route::ClientLogin => Audience::Public,
            Route::Tickets | Route::Profile => Audience::Staff,
            Route::ClientDashboard | Route::ClientProfile => Audience::Client,
        }
    }
}
