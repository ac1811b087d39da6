use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Default role assigned the first time an unseen verified email completes
/// identity resolution.
pub const DEFAULT_ROLE: &str = "analyst";

pub const ADMIN_ROLE: &str = "admin";

/// An authenticated principal. `email` is the identity key; `role` is an open
/// string tag set (`admin`, `analyst`, and whatever administrators assign) and
/// is the only field that mutates after creation.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    #[serde(skip_serializing, default)]
    pub id: i32,
    pub name: String,
    pub email: String,
    pub role: String,
}
