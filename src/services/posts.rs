use anyhow::anyhow;
use axum::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::doc;
use mongodb::bson::oid::ObjectId;

use crate::models::post::{NewPost, Post};

use super::Store;

#[async_trait]
pub trait PostService<E = anyhow::Error> {
    async fn create_post(&self, post: &NewPost) -> Result<Post, E>;
    /// Every post, natural store order. No pagination.
    async fn list_posts(&self) -> Result<Vec<Post>, E>;
    async fn find_post_by_id(&self, id: ObjectId) -> Result<Option<Post>, E>;
}

#[async_trait]
impl PostService<anyhow::Error> for Store {
    async fn create_post(&self, post: &NewPost) -> anyhow::Result<Post> {
        let inserted = self
            .posts
            .clone_with_type::<NewPost>()
            .insert_one(post, None)
            .await?;
        let id = inserted
            .inserted_id
            .as_object_id()
            .ok_or_else(|| anyhow!("store generated a non-ObjectId key"))?;
        Ok(Post {
            id,
            title: post.title.clone(),
            content: post.content.clone(),
            user_id: post.user_id,
            tags: post.tags.clone(),
        })
    }

    async fn list_posts(&self) -> anyhow::Result<Vec<Post>> {
        let cursor = self.posts.find(None, None).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_post_by_id(&self, id: ObjectId) -> anyhow::Result<Option<Post>> {
        Ok(self.posts.find_one(doc! { "_id": id }, None).await?)
    }
}
