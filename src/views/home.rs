use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::ElementBuilder;
use crate::routing::Route;
use crate::state::app_state::AppState;
use crate::views::shared::render_link;

pub fn render_home(state: &AppState) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("section")?
        .class("home-page")
        .child(ElementBuilder::new("h2")?.text("Support tickets, handled.").build())?
        .child(
            ElementBuilder::new("p")?
                .text("Staff manage the ticket workflow; clients follow their own tickets.")
                .build(),
        )?
        .child(render_link(&state.router, Route::StaffLogin, "🔐 Staff sign in")?)?
        .child(render_link(&state.router, Route::ClientLogin, "🔐 Client sign in")?)?
        .build())
}
