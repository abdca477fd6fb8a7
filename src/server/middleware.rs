//! Request middleware

use super::host::ServerHost;
use crate::core::{ApiError, AuthOutcome, CurrentUser};
use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use std::sync::Arc;

/// Authentication gate for protected routes.
///
/// On success the caller is attached as a [`CurrentUser`] extension and the
/// wrapped handler runs. On rejection the handler is never invoked and the
/// caller gets a generic 401; the actual reason is only logged.
pub async fn require_authentication(
    State(host): State<Arc<ServerHost>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    match host.auth.authenticate(request.headers()).await? {
        AuthOutcome::Authenticated(user) => {
            tracing::debug!(user_id = %user.id, "request authenticated");
            request.extensions_mut().insert(CurrentUser(user));
            Ok(next.run(request).await)
        }
        AuthOutcome::Rejected(rejection) => {
            tracing::warn!(
                reason = rejection.reason(),
                method = %request.method(),
                path = %request.uri().path(),
                "authentication rejected"
            );
            Err(ApiError::unauthorized(host.realm()))
        }
    }
}
