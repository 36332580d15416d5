use std::any::Any;

use axum::response::{IntoResponse, Response};
use tower_http::catch_panic::CatchPanicLayer;

use crate::error::AppError;

type PanicPayload = Box<dyn Any + Send + 'static>;

pub fn catch_panic_layer() -> CatchPanicLayer<fn(PanicPayload) -> Response> {
    CatchPanicLayer::custom(panic_response as fn(PanicPayload) -> Response)
}

fn panic_response(payload: PanicPayload) -> Response {
    let detail = payload
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| payload.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");

    // release builds keep the payload out of responses
    let message = if cfg!(debug_assertions) {
        format!("Internal server error: {detail}")
    } else {
        "Internal server error".to_string()
    };
    AppError::internal(message).into_response()
}
