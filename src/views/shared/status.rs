// ============================================================================
// STATUS VIEWS - Placeholder de hidratación + mensajes de feedback
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::ElementBuilder;
use crate::state::app_state::{Notice, NoticeKind};

/// Mientras la sesión no está hidratada: ni contenido protegido ni redirect
pub fn render_checking() -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("div")?
        .class("auth-checking")
        .text("⏳ Checking authentication...")
        .build())
}

pub fn render_notice(notice: Option<&Notice>) -> Result<Option<Element>, JsValue> {
    let notice = match notice {
        Some(notice) => notice,
        None => return Ok(None),
    };
    let class = match notice.kind {
        NoticeKind::Error => "notice notice--error",
        NoticeKind::Success => "notice notice--success",
    };
    Ok(Some(
        ElementBuilder::new("div")?
            .class(class)
            .attr("role", "alert")?
            .text(&notice.text)
            .build(),
    ))
}
