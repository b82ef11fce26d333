use crate::errors::ServerError;
use crate::responses::html::html_response_with_status;
use crate::templates::components::error_page;
use astra::{Body, Response};
use tracing::{error, warn};

/// Convert a ServerError into an HTML error page. Server-side failures are
/// logged with their detail but shown to the visitor generically.
pub fn error_to_response(err: ServerError) -> Response {
    let status = err.status();
    let message = match &err {
        ServerError::NotFound => "Not Found".to_string(),
        ServerError::BadRequest(msg)
        | ServerError::Unauthorized(msg)
        | ServerError::Forbidden(msg) => {
            warn!(status, %msg, "request rejected");
            msg.clone()
        }
        ServerError::DbError(_)
        | ServerError::XlsxError(_)
        | ServerError::ConfigError(_)
        | ServerError::InternalError => {
            error!(status, error = %err, "request failed");
            "Internal Server Error".to_string()
        }
    };

    // The status always comes from ServerError::status, so building cannot fail.
    html_response_with_status(status, error_page(status, &message))
        .unwrap_or_else(|_| Response::new(Body::from("Internal Server Error")))
}
