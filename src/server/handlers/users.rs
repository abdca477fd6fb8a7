//! `/users`: sign-up and the caller's own profile

use crate::core::validation::Validated;
use crate::core::{ApiError, CurrentUser, Entity};
use crate::entities::{NewUser, User, UserProfile};
use crate::server::entity_registry::EntityDescriptor;
use crate::server::host::ServerHost;
use crate::server::middleware::require_authentication;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Extension, Json, Router, middleware};
use std::sync::Arc;

/// `GET /users`: the authenticated caller's name and email
pub async fn get_current_user(
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Json<UserProfile> {
    Json(UserProfile::from(&user))
}

/// `POST /users`: register a new account
pub async fn create_user(
    State(host): State<Arc<ServerHost>>,
    Validated(input): Validated<NewUser>,
) -> Result<Response, ApiError> {
    let password_hash = host.verifier.hash_blocking(input.password.clone()).await?;
    let user = host.users.create(User::new(input, password_hash)).await?;

    tracing::debug!(user_id = %user.id, "user created");

    Ok((StatusCode::CREATED, [(header::LOCATION, "/")]).into_response())
}

pub struct UserDescriptor;

impl EntityDescriptor for UserDescriptor {
    fn entity_type(&self) -> &str {
        User::resource_name_singular()
    }

    fn plural(&self) -> &str {
        User::resource_name()
    }

    fn build_routes(&self, host: Arc<ServerHost>) -> Router {
        let path = format!("/{}", self.plural());

        let public = Router::new().route(&path, post(create_user));
        let protected = Router::new()
            .route(&path, get(get_current_user))
            .route_layer(middleware::from_fn_with_state(
                host.clone(),
                require_authentication,
            ));

        public.merge(protected).with_state(host)
    }
}
