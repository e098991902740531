// ============================================================================
// HTTP - Envío con deadline + decodificación de respuestas
// ============================================================================
// Todo request compite contra un TimeoutFuture; si gana el timer se aborta
// el fetch vía AbortController.
// ============================================================================

use std::future::Future;

use futures::future::{select, Either};
use gloo_net::http::RequestBuilder;
use gloo_timers::future::TimeoutFuture;
use serde::de::DeserializeOwned;
use web_sys::AbortController;

use crate::errors::ApiError;
use crate::models::ErrorBody;

/// Respuesta cruda: status + body como texto
#[derive(Clone, Debug, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Convierte un status no-2xx en `ApiError`
    pub fn into_success(self, fallback: &str) -> Result<RawResponse, ApiError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(rejection(self.status, &self.body, fallback))
        }
    }
}

/// Mensaje del backend (`error` o `message`) o el genérico si no hay
pub fn rejection(status: u16, body: &str, fallback: &str) -> ApiError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(ErrorBody::into_message);

    match message {
        Some(message) => ApiError::Rejected { status, message },
        None if matches!(status, 502..=504) => ApiError::Unavailable(format!("HTTP {}", status)),
        None => ApiError::Rejected {
            status,
            message: fallback.to_string(),
        },
    }
}

pub fn decode_json<T: DeserializeOwned>(raw: &RawResponse) -> Result<T, ApiError> {
    serde_json::from_str(&raw.body).map_err(|e| ApiError::InvalidResponse(e.to_string()))
}

/// Envía el request; `body` se serializa como JSON si está presente
pub async fn send(
    builder: RequestBuilder,
    body: Option<&serde_json::Value>,
    timeout_ms: u32,
) -> Result<RawResponse, ApiError> {
    let controller =
        AbortController::new().map_err(|e| ApiError::Transport(format!("{:?}", e)))?;
    let builder = builder.abort_signal(Some(&controller.signal()));

    let request = match body {
        Some(json) => builder.json(json),
        None => builder.build(),
    }
    .map_err(|e| ApiError::Transport(e.to_string()))?;

    let exchange = async move {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let status = response.status();
        // Un body ilegible se trata como vacío; el status manda
        let body = response.text().await.unwrap_or_default();
        Ok::<_, ApiError>(RawResponse { status, body })
    };
    with_deadline(exchange, TimeoutFuture::new(timeout_ms), timeout_ms, || {
        controller.abort();
        log::warn!("⏱️ [API] Request abortado tras {} ms", timeout_ms);
    })
    .await
}

/// Corre `work` contra `deadline`; si vence primero llama `on_expire`
/// (abort del fetch) y devuelve `ApiError::Timeout`
pub async fn with_deadline<T, W, D, E>(
    work: W,
    deadline: D,
    timeout_ms: u32,
    on_expire: E,
) -> Result<T, ApiError>
where
    W: Future<Output = Result<T, ApiError>>,
    D: Future<Output = ()>,
    E: FnOnce(),
{
    futures::pin_mut!(work, deadline);
    match select(work, deadline).await {
        Either::Left((result, _)) => result,
        Either::Right(((), _)) => {
            on_expire();
            Err(ApiError::Timeout(timeout_ms))
        }
    }
}
