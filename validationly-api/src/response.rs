use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
struct Envelope<T> {
    ok: bool,
    #[serde(flatten)]
    data: T,
}

/// Success body: `{"ok": true, ...fields of T}`.
pub struct ApiResponse<T>(pub T);

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        Json(Envelope {
            ok: true,
            data: self.0,
        })
        .into_response()
    }
}

/// Payload for endpoints that only acknowledge.
#[derive(Serialize)]
pub struct Ack {}
