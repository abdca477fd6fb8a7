//! `/courses`: public reads, owner-only writes

use super::parse_id;
use crate::core::validation::Validated;
use crate::core::{ApiError, CurrentUser, Entity, can_mutate};
use crate::entities::{Course, CourseDetail, CourseInput};
use crate::server::entity_registry::EntityDescriptor;
use crate::server::host::ServerHost;
use crate::server::middleware::require_authentication;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Extension, Json, Router, middleware};
use serde_json::{Value, json};
use std::sync::Arc;

/// `GET /courses`
pub async fn list_courses(State(host): State<Arc<ServerHost>>) -> Result<Json<Value>, ApiError> {
    let courses = host.courses.list().await?;
    Ok(Json(json!({ "courses": courses })))
}

/// `GET /courses/{id}`, with the owner projected to a summary
pub async fn get_course(
    State(host): State<Arc<ServerHost>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id(&id)?;
    let course = host.courses.get(&id).await?.ok_or(ApiError::NotFound)?;
    let owner = host.users.get(&course.user_id).await?;

    Ok(Json(json!({ "course": CourseDetail::new(course, owner.as_ref()) })))
}

/// `POST /courses`: the caller becomes the owner
pub async fn create_course(
    State(host): State<Arc<ServerHost>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Validated(input): Validated<CourseInput>,
) -> Result<Response, ApiError> {
    let course = host.courses.create(Course::new(input, user.id)).await?;

    tracing::debug!(course_id = %course.id, owner = %user.id, "course created");

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, host.course_location(&course.id))],
    )
        .into_response())
}

/// `PUT /courses/{id}`: overwrite every field; owner only
pub async fn update_course(
    State(host): State<Arc<ServerHost>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<String>,
    Validated(input): Validated<CourseInput>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    let mut course = host.courses.get(&id).await?.ok_or(ApiError::NotFound)?;

    if !can_mutate(&user.id, &course) {
        tracing::warn!(course_id = %id, caller = %user.id, "update forbidden");
        return Err(ApiError::Forbidden);
    }

    course.apply(input, user.id);
    host.courses.update(&id, course).await?;

    tracing::debug!(course_id = %id, "course updated");

    Ok(StatusCode::NO_CONTENT)
}

/// `DELETE /courses/{id}`: owner only
pub async fn delete_course(
    State(host): State<Arc<ServerHost>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    let course = host.courses.get(&id).await?.ok_or(ApiError::NotFound)?;

    if !can_mutate(&user.id, &course) {
        tracing::warn!(course_id = %id, caller = %user.id, "delete forbidden");
        return Err(ApiError::Forbidden);
    }

    host.courses.delete(&id).await?;

    tracing::debug!(course_id = %id, "course deleted");

    Ok(StatusCode::NO_CONTENT)
}

pub struct CourseDescriptor;

impl EntityDescriptor for CourseDescriptor {
    fn entity_type(&self) -> &str {
        Course::resource_name_singular()
    }

    fn plural(&self) -> &str {
        Course::resource_name()
    }

    fn build_routes(&self, host: Arc<ServerHost>) -> Router {
        let collection = format!("/{}", self.plural());
        let item = format!("/{}/{{id}}", self.plural());

        let public = Router::new()
            .route(&collection, get(list_courses))
            .route(&item, get(get_course));
        let protected = Router::new()
            .route(&collection, post(create_course))
            .route(&item, put(update_course).delete(delete_course))
            .route_layer(middleware::from_fn_with_state(
                host.clone(),
                require_authentication,
            ));

        public.merge(protected).with_state(host)
    }
}
