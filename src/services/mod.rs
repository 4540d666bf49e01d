pub mod posts;
pub mod users;

#[cfg(test)]
pub mod mem;

use mongodb::{Collection, Database};

use crate::models::post::Post;
use crate::models::user::User;

/// Document-store adapter backing the per-entity services. The driver
/// keeps its own connection pool; this handle is cheap to clone and share
/// across requests.
#[derive(Clone)]
pub struct Store {
    users: Collection<User>,
    posts: Collection<Post>,
}

impl Store {
    pub fn new(db: Database) -> Self {
        Self {
            users: db.collection("users"),
            posts: db.collection("posts"),
        }
    }
}
