//! In-memory stand-in for the document store, backing the route tests.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::anyhow;
use axum::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::models::post::{NewPost, Post};
use crate::models::user::{NewUser, User};

use super::posts::PostService;
use super::users::UserService;

#[derive(Clone, Default)]
pub struct MemStore {
    users: Arc<Mutex<Vec<User>>>,
    posts: Arc<Mutex<Vec<Post>>>,
    unavailable: Arc<AtomicBool>,
}

impl MemStore {
    /// Make every subsequent operation fail, as if the store were down.
    pub fn set_unavailable(&self, value: bool) {
        self.unavailable.store(value, Ordering::SeqCst);
    }

    pub fn users_snapshot(&self) -> Vec<User> {
        self.users.lock().unwrap().clone()
    }

    pub fn posts_snapshot(&self) -> Vec<Post> {
        self.posts.lock().unwrap().clone()
    }

    /// Delete a user out from under any posts referencing it.
    pub fn remove_user_by_email(&self, email: &str) {
        self.users.lock().unwrap().retain(|user| user.email != email);
    }

    fn check_available(&self) -> anyhow::Result<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            Err(anyhow!("store unavailable"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl UserService<anyhow::Error> for MemStore {
    async fn create_user(&self, user: &NewUser) -> anyhow::Result<User> {
        self.check_available()?;
        let stored = User {
            id: ObjectId::new(),
            username: user.username.clone(),
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
        };
        self.users.lock().unwrap().push(stored.clone());
        Ok(stored)
    }

    async fn find_user_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        self.check_available()?;
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|user| user.email == email)
            .cloned())
    }

    async fn find_user_by_id(&self, id: ObjectId) -> anyhow::Result<Option<User>> {
        self.check_available()?;
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|user| user.id == id)
            .cloned())
    }
}

#[async_trait]
impl PostService<anyhow::Error> for MemStore {
    async fn create_post(&self, post: &NewPost) -> anyhow::Result<Post> {
        self.check_available()?;
        let stored = Post {
            id: ObjectId::new(),
            title: post.title.clone(),
            content: post.content.clone(),
            user_id: post.user_id,
            tags: post.tags.clone(),
        };
        self.posts.lock().unwrap().push(stored.clone());
        Ok(stored)
    }

    async fn list_posts(&self) -> anyhow::Result<Vec<Post>> {
        self.check_available()?;
        Ok(self.posts.lock().unwrap().clone())
    }

    async fn find_post_by_id(&self, id: ObjectId) -> anyhow::Result<Option<Post>> {
        self.check_available()?;
        Ok(self
            .posts
            .lock()
            .unwrap()
            .iter()
            .find(|post| post.id == id)
            .cloned())
    }
}
