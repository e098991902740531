// ============================================================================
// APP - Aplicación principal
// ============================================================================
// Re-render completo ante cualquier cambio de sesión, ruta o cache,
// agrupado con un Timeout(0) para no pintar N veces por evento.
// ============================================================================

use std::cell::Cell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{append_child, get_element_by_id};
use crate::routing::Route;
use crate::state::app_state::{AppState, Screen};
use crate::views::render_app;

/// Aplicación principal
pub struct App {
    state: AppState,
    root: Element,
    /// Ruta cuyo fetch inicial ya se lanzó
    loaded_for: Option<Route>,
}

impl App {
    pub fn new() -> Result<Self, JsValue> {
        let root = get_element_by_id("app").ok_or_else(|| JsValue::from_str("No #app element found"))?;
        let state = AppState::new();

        // Los mensajes de un formulario no sobreviven a la navegación
        let notice = state.notice.clone();
        state.router.on_change(move |_| {
            if notice.get().is_some() {
                notice.set(None);
            }
        });

        let scheduled = Rc::new(Cell::new(false));
        state.subscribe_to_changes(move || {
            if scheduled.replace(true) {
                return;
            }
            let scheduled = scheduled.clone();
            Timeout::new(0, move || {
                scheduled.set(false);
                crate::rerender_app();
            })
            .forget();
        });

        state.start();

        Ok(Self {
            state,
            root,
            loaded_for: None,
        })
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn render(&mut self) -> Result<(), JsValue> {
        let screen = self.state.screen();
        log::debug!("🎬 [APP] render {:?}", screen);

        self.root.set_inner_html("");
        let view = render_app(&self.state, screen)?;
        append_child(&self.root, &view)?;

        self.load_page_data(screen);
        Ok(())
    }

    fn load_page_data(&mut self, screen: Screen) {
        let route = match screen {
            Screen::Page(route) => route,
            Screen::Checking => return,
        };
        if self.loaded_for == Some(route) {
            return;
        }
        self.loaded_for = Some(route);

        let state = self.state.clone();
        match route {
            Route::Tickets => wasm_bindgen_futures::spawn_local(async move {
                if let Err(e) = state.ticket_viewmodel().load(&state.staff).await {
                    log::error!("❌ [TICKETS] Error cargando tickets: {}", e);
                    state.set_notice(Some(crate::state::Notice::error(e.to_string())));
                }
            }),
            Route::ClientDashboard => wasm_bindgen_futures::spawn_local(async move {
                if let Err(e) = state.client_ticket_viewmodel().load_for_client(&state.client).await {
                    log::error!("❌ [TICKETS] Error cargando tickets del cliente: {}", e);
                    state.set_notice(Some(crate::state::Notice::error(e.to_string())));
                }
            }),
            _ => {}
        }
    }
}
