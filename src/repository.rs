use async_trait::async_trait;
use sea_orm::*;
use std::sync::Arc;

use crate::entities::user;
use crate::error::{ApiError, ApiResult};

/// Data access for the users table. Handlers depend on this trait instead of
/// the connection itself, so tests can drive them through a mock connection
/// and the process-wide handle stays out of handler code.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_all(&self) -> ApiResult<Vec<user::Model>>;
    async fn find_by_id(&self, id: i32) -> ApiResult<Option<user::Model>>;
    async fn find_by_email(&self, email: &str) -> ApiResult<Option<user::Model>>;
    async fn insert(&self, user: user::ActiveModel) -> ApiResult<user::Model>;
    async fn update(&self, user: user::ActiveModel) -> ApiResult<user::Model>;
    async fn delete(&self, user: user::Model) -> ApiResult<()>;
}

pub struct SeaOrmUserRepository {
    conn: Arc<DatabaseConnection>,
}

impl SeaOrmUserRepository {
    pub fn new(conn: Arc<DatabaseConnection>) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn find_all(&self) -> ApiResult<Vec<user::Model>> {
        user::Entity::find()
            .all(self.conn.as_ref())
            .await
            .map_err(ApiError::Db)
    }

    async fn find_by_id(&self, id: i32) -> ApiResult<Option<user::Model>> {
        user::Entity::find_by_id(id)
            .one(self.conn.as_ref())
            .await
            .map_err(ApiError::Db)
    }

    async fn find_by_email(&self, email: &str) -> ApiResult<Option<user::Model>> {
        user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(self.conn.as_ref())
            .await
            .map_err(ApiError::Db)
    }

    async fn insert(&self, user: user::ActiveModel) -> ApiResult<user::Model> {
        user.insert(self.conn.as_ref()).await.map_err(ApiError::Db)
    }

    async fn update(&self, user: user::ActiveModel) -> ApiResult<user::Model> {
        user.update(self.conn.as_ref()).await.map_err(ApiError::Db)
    }

    async fn delete(&self, user: user::Model) -> ApiResult<()> {
        user.delete(self.conn.as_ref())
            .await
            .map_err(ApiError::Db)?;
        Ok(())
    }
}
