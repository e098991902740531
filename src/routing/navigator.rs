// ============================================================================
// NAVIGATOR - History API del navegador detrás de un trait
// ============================================================================

use wasm_bindgen::JsValue;

use crate::routing::Route;

pub trait Navigator {
    fn current(&self) -> Route;
    /// Nueva entrada en el historial
    fn push(&self, route: Route);
    /// Reemplaza la entrada actual (redirects de guards)
    fn replace(&self, route: Route);
}

/// `window.history` + `window.location`
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserNavigator;

impl BrowserNavigator {
    fn apply(route: Route, replace: bool) -> Result<(), JsValue> {
        let history = web_sys::window()
            .ok_or_else(|| JsValue::from_str("No window"))?
            .history()?;
        if replace {
            history.replace_state_with_url(&JsValue::NULL, "", Some(route.path()))
        } else {
            history.push_state_with_url(&JsValue::NULL, "", Some(route.path()))
        }
    }
}

impl Navigator for BrowserNavigator {
    fn current(&self) -> Route {
        web_sys::window()
            .and_then(|w| w.location().pathname().ok())
            .map(|path| Route::from_path(&path))
            .unwrap_or(Route::Home)
    }

    fn push(&self, route: Route) {
        if let Err(e) = Self::apply(route, false) {
            log::error!("❌ [ROUTER] pushState {} falló: {:?}", route.path(), e);
        }
    }

    fn replace(&self, route: Route) {
        if let Err(e) = Self::apply(route, true) {
            log::error!("❌ [ROUTER] replaceState {} falló: {:?}", route.path(), e);
        }
    }
}
