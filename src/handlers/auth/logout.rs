use axum::response::Json;
use serde_json::{json, Value};

/// POST /auth/logout - stateless acknowledgment. Tokens are self-contained
/// with no revocation list; the client discards its copy.
pub async fn logout() -> Json<Value> {
    Json(json!({
        "success": true,
        "data": {
            "message": "Successfully logged out. Please delete the token on the client."
        }
    }))
}
