// ============================================================================
// TICKET DESK - FRONTEND MVVM (RUST PURO + WASM)
// ============================================================================
// - Views: Funciones que renderizan DOM (sin lógica)
// - ViewModels: Lógica UI (login, workflow de tickets)
// - Services: SOLO comunicación API
// - State: Sesiones staff/cliente con Rc<RefCell> + subscribers
// - Stores: Persistencia de sesión en localStorage
// - Routing: Rutas, guards y navegación in-app
// ============================================================================

pub mod config;
pub mod errors;
pub mod models;
pub mod routing;
pub mod services;
pub mod state;
pub mod stores;
pub mod utils;
pub mod viewmodels;

mod app;
mod dom;
mod views;

#[cfg(test)]
mod testing;

use std::cell::RefCell;

use wasm_bindgen::prelude::*;
use wasm_logger::Config;

use crate::app::App;
use crate::config::CONFIG;

// Instancia global de la App
thread_local! {
    static APP: RefCell<Option<App>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    wasm_logger::init(Config::new(CONFIG.log_level()));
    log::info!("🚀 Ticket Desk ({}) -> {}", CONFIG.environment, CONFIG.api_base_url);

    let mut app = App::new()?;
    app.render()?;

    APP.with(|app_cell| {
        *app_cell.borrow_mut() = Some(app);
    });

    // Back/forward: registrar UNA sola vez
    dom::on_popstate(|_| {
        let router = APP.with(|app_cell| {
            app_cell
                .borrow()
                .as_ref()
                .map(|app| app.state().router.clone())
        });
        if let Some(router) = router {
            router.location_changed();
        }
    })?;

    Ok(())
}

/// Re-render completo de la app
pub fn rerender_app() {
    APP.with(|app_cell| {
        if let Some(app) = app_cell.borrow_mut().as_mut() {
            if let Err(e) = app.render() {
                log::error!("❌ [APP] Error re-renderizando: {:?}", e);
            }
        } else {
            log::warn!("⚠️ [APP] App no está inicializada");
        }
    });
}
