use anyhow::anyhow;
use axum::async_trait;
use mongodb::bson::doc;
use mongodb::bson::oid::ObjectId;

use crate::models::user::{NewUser, User};

use super::Store;

#[async_trait]
pub trait UserService<E = anyhow::Error> {
    async fn create_user(&self, user: &NewUser) -> Result<User, E>;
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, E>;
    async fn find_user_by_id(&self, id: ObjectId) -> Result<Option<User>, E>;
}

#[async_trait]
impl UserService<anyhow::Error> for Store {
    async fn create_user(&self, user: &NewUser) -> anyhow::Result<User> {
        let inserted = self
            .users
            .clone_with_type::<NewUser>()
            .insert_one(user, None)
            .await?;
        let id = inserted
            .inserted_id
            .as_object_id()
            .ok_or_else(|| anyhow!("store generated a non-ObjectId key"))?;
        Ok(User {
            id,
            username: user.username.clone(),
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
        })
    }

    async fn find_user_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        Ok(self.users.find_one(doc! { "email": email }, None).await?)
    }

    async fn find_user_by_id(&self, id: ObjectId) -> anyhow::Result<Option<User>> {
        Ok(self.users.find_one(doc! { "_id": id }, None).await?)
    }
}
