use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A company, keyed naturally by `name` (the ticker symbol). The parent
/// relation is an optional back-reference by id, not an owning pointer.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Company {
    #[serde(skip_serializing, default)]
    pub id: i32,
    pub name: String,
    pub industry: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_company_id: Option<i32>,
}
