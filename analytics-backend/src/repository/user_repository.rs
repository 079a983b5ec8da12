// analytics-backend/src/repository/user_repository.rs
use crate::domain::user_model::Entity as UserEntity;
use sea_orm::{DbConn, DbErr, EntityTrait, PaginatorTrait};

pub struct UserRepository {
    db: DbConn,
}

impl UserRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    pub async fn count_all(&self) -> Result<u64, DbErr> {
        UserEntity::find().count(&self.db).await
    }
}
