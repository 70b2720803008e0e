use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{instrument, warn};

use crate::{
    error::{ApiError, ApiResult},
    state::AppState,
    users::{
        dto::{CreateUserRequest, CreatedUserResponse, MessageResponse, UpdateUserRequest},
        repo_types::PublicUser,
    },
};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route(
            "/users/:id",
            get(get_user).put(update_user).delete(delete_user),
        )
}

fn parse_id(raw: &str) -> ApiResult<i64> {
    raw.parse::<i64>().map_err(|_| {
        warn!(id = %raw, "invalid user id");
        ApiError::InvalidIdentifier(raw.to_string())
    })
}

fn decode<T>(payload: Result<Json<T>, JsonRejection>) -> ApiResult<T> {
    match payload {
        Ok(Json(body)) => Ok(body),
        Err(rejection) => {
            warn!(error = %rejection, "rejected payload");
            Err(ApiError::InvalidPayload(rejection.body_text()))
        }
    }
}

#[instrument(skip(state, payload))]
pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<CreatedUserResponse>)> {
    let body = decode(payload)?;
    body.validate().map_err(ApiError::InvalidPayload)?;

    let id = state
        .users
        .create(&body.name, &body.email, &body.password)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(CreatedUserResponse {
            id,
            message: "User created".into(),
        }),
    ))
}

#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<PublicUser>> {
    let id = parse_id(&id)?;
    let user = state.users.get(id).await?;
    Ok(Json(user))
}

#[instrument(skip(state, payload))]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let id = parse_id(&id)?;
    let body = decode(payload)?;
    body.validate().map_err(ApiError::InvalidPayload)?;

    state.users.update(id, &body.name, &body.email).await?;
    Ok(Json(MessageResponse::new("User updated")))
}

#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let id = parse_id(&id)?;
    state.users.delete(id).await?;
    Ok(Json(MessageResponse::new("User deleted")))
}

#[instrument(skip(state))]
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Vec<PublicUser>>> {
    let users = state.users.list().await?;
    Ok(Json(users))
}
