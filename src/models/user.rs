use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

// insert shape for the `users` collection; the store generates `_id`
#[derive(Debug, Serialize)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

// a `users` document as read back from the store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

/// Template-facing projection of a user; neither the password hash nor
/// the email leaves the store boundary.
#[derive(Debug, Serialize)]
pub struct UserView {
    pub id: String,
    pub username: String,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_hex(),
            username: user.username.clone(),
        }
    }
}
