use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

// insert shape for the `posts` collection
#[derive(Debug, Serialize)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub user_id: ObjectId,
    pub tags: Vec<String>,
}

/// A `posts` document. `user_id` is not checked against `users` at write
/// time, so the referenced author may be gone by the time the post is
/// rendered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub title: String,
    pub content: String,
    pub user_id: ObjectId,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Template-facing projection of a post; `content` stays Markdown source,
/// rendering happens at view time.
#[derive(Debug, Serialize)]
pub struct PostView {
    pub id: String,
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
}

impl From<&Post> for PostView {
    fn from(post: &Post) -> Self {
        Self {
            id: post.id.to_hex(),
            title: post.title.clone(),
            content: post.content.clone(),
            tags: post.tags.clone(),
        }
    }
}
