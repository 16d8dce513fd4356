use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use sea_orm::Set;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::entities::user;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct UpdateUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<CreateUserRequest>,
) -> ApiResult<(StatusCode, Json<user::Model>)> {
    // Pre-insert lookup mirrors the upstream behavior; the unique index on
    // email catches the race this check alone would leave open.
    if state
        .user_repo
        .find_by_email(&payload.email)
        .await?
        .is_some()
    {
        return Err(ApiError::EmailExists);
    }

    let now = chrono::Utc::now().naive_utc();
    let new_user = user::ActiveModel {
        name: Set(payload.name),
        email: Set(payload.email),
        password: Set(payload.password),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let user = state.user_repo.insert(new_user).await?;

    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Vec<user::Model>>> {
    let users = state.user_repo.find_all().await?;

    Ok(Json(users))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<user::Model>> {
    let user = state
        .user_repo
        .find_by_id(id)
        .await?
        .ok_or(ApiError::UserNotFound)?;

    Ok(Json(user))
}

/// Overwrites name, email and password unconditionally; partial updates are
/// not supported. Read-then-write, not transactional.
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateUserRequest>,
) -> ApiResult<Json<user::Model>> {
    let existing = state
        .user_repo
        .find_by_id(id)
        .await?
        .ok_or(ApiError::UserNotFound)?;

    let mut user: user::ActiveModel = existing.into();
    user.name = Set(payload.name);
    user.email = Set(payload.email);
    user.password = Set(payload.password);
    user.updated_at = Set(chrono::Utc::now().naive_utc());

    let updated = state.user_repo.update(user).await?;

    Ok(Json(updated))
}

pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<Value>> {
    let user = state
        .user_repo
        .find_by_id(id)
        .await?
        .ok_or(ApiError::UserNotFound)?;

    state.user_repo.delete(user).await?;

    Ok(Json(json!({
        "message": "user deleted successfully"
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::SeaOrmUserRepository;
    use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase, MockExecResult};
    use std::sync::Arc;

    fn state_for(db: DatabaseConnection) -> AppState {
        AppState {
            user_repo: Arc::new(SeaOrmUserRepository::new(Arc::new(db))),
        }
    }

    fn sample_user(id: i32, name: &str, email: &str) -> user::Model {
        user::Model {
            id,
            name: name.to_owned(),
            email: email.to_owned(),
            password: "p".to_owned(),
            created_at: chrono::Utc::now().naive_utc(),
            updated_at: chrono::Utc::now().naive_utc(),
        }
    }

    #[tokio::test]
    async fn create_user_with_unique_email_returns_created() {
        let created = sample_user(1, "Ann", "ann@x.com");
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([
                // Email pre-check finds nothing
                Vec::<user::Model>::new(),
                // Insert returns the new row
                vec![created.clone()],
            ])
            .into_connection();

        let request = CreateUserRequest {
            name: "Ann".to_string(),
            email: "ann@x.com".to_string(),
            password: "p".to_string(),
        };

        let (status, Json(body)) = create_user(State(state_for(db)), Json(request))
            .await
            .unwrap();

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body.id, 1);
        assert_eq!(body.name, "Ann");
        assert_eq!(body.email, "ann@x.com");
    }

    #[tokio::test]
    async fn create_user_with_taken_email_is_rejected() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![sample_user(1, "Ann", "ann@x.com")]])
            .into_connection();

        let request = CreateUserRequest {
            name: "Other".to_string(),
            email: "ann@x.com".to_string(),
            password: "q".to_string(),
        };

        let result = create_user(State(state_for(db)), Json(request)).await;

        assert!(matches!(result, Err(ApiError::EmailExists)));
    }

    #[tokio::test]
    async fn list_users_returns_every_record() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![
                sample_user(1, "Ann", "ann@x.com"),
                sample_user(2, "Bob", "bob@x.com"),
            ]])
            .into_connection();

        let Json(users) = list_users(State(state_for(db))).await.unwrap();

        assert_eq!(users.len(), 2);
        assert_eq!(users[0].email, "ann@x.com");
        assert_eq!(users[1].email, "bob@x.com");
    }

    #[tokio::test]
    async fn get_user_returns_matching_record() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![sample_user(7, "Ann", "ann@x.com")]])
            .into_connection();

        let Json(user) = get_user(State(state_for(db)), Path(7)).await.unwrap();

        assert_eq!(user.id, 7);
        assert_eq!(user.name, "Ann");
    }

    #[tokio::test]
    async fn get_unknown_user_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<user::Model>::new()])
            .into_connection();

        let result = get_user(State(state_for(db)), Path(99)).await;

        assert!(matches!(result, Err(ApiError::UserNotFound)));
    }

    #[tokio::test]
    async fn update_user_overwrites_all_fields() {
        let before = sample_user(1, "Ann", "ann@x.com");
        let mut after = sample_user(1, "Ann2", "ann2@x.com");
        after.password = "p2".to_owned();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![before], vec![after]])
            .into_connection();

        let request = UpdateUserRequest {
            name: "Ann2".to_string(),
            email: "ann2@x.com".to_string(),
            password: "p2".to_string(),
        };

        let Json(user) = update_user(State(state_for(db)), Path(1), Json(request))
            .await
            .unwrap();

        assert_eq!(user.name, "Ann2");
        assert_eq!(user.email, "ann2@x.com");
        assert_eq!(user.password, "p2");
    }

    #[tokio::test]
    async fn update_unknown_user_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<user::Model>::new()])
            .into_connection();

        let request = UpdateUserRequest {
            name: "X".to_string(),
            email: "x@x.com".to_string(),
            password: "x".to_string(),
        };

        let result = update_user(State(state_for(db)), Path(404), Json(request)).await;

        assert!(matches!(result, Err(ApiError::UserNotFound)));
    }

    #[tokio::test]
    async fn delete_user_returns_confirmation() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![sample_user(1, "Ann", "ann@x.com")]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();

        let Json(body) = delete_user(State(state_for(db)), Path(1)).await.unwrap();

        assert_eq!(body["message"], "user deleted successfully");
    }

    #[tokio::test]
    async fn delete_unknown_user_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<user::Model>::new()])
            .into_connection();

        let result = delete_user(State(state_for(db)), Path(1)).await;

        assert!(matches!(result, Err(ApiError::UserNotFound)));
    }
}
