use sqlx::PgPool;

use crate::database::models::user::{User, ADMIN_ROLE, DEFAULT_ROLE};
use crate::error::ApiError;

/// Fold the bootstrap admin table into `users.role` at startup. After this
/// runs, `users.role` is the single source of truth for admin status; an
/// admin-table email always ends up with role `admin`, even when a previously
/// stored principal row disagrees.
pub async fn sync_admin_records(pool: &PgPool) -> Result<u64, ApiError> {
    let result = sqlx::query(
        "INSERT INTO users (name, email, role) \
         SELECT COALESCE(NULLIF(name, ''), email), email, $1 FROM admins \
         ON CONFLICT (email) DO UPDATE SET role = EXCLUDED.role",
    )
    .bind(ADMIN_ROLE)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, ApiError> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

/// Resolve the role for a verified identity, lazily provisioning a principal
/// with the default role on first sight. Idempotent: resolving the same email
/// twice creates nothing new and returns the stored role.
pub async fn resolve_principal(pool: &PgPool, name: &str, email: &str) -> Result<User, ApiError> {
    if let Some(user) = find_by_email(pool, email).await? {
        return Ok(user);
    }

    // Two concurrent first logins can both miss the lookup; the unique email
    // index makes the second insert a no-op, so re-read on conflict.
    let inserted = sqlx::query_as::<_, User>(
        "INSERT INTO users (name, email, role) VALUES ($1, $2, $3) \
         ON CONFLICT (email) DO NOTHING RETURNING *",
    )
    .bind(name)
    .bind(email)
    .bind(DEFAULT_ROLE)
    .fetch_optional(pool)
    .await?;

    match inserted {
        Some(user) => {
            tracing::info!(email = %user.email, "Provisioned new principal with default role");
            Ok(user)
        }
        None => find_by_email(pool, email)
            .await?
            .ok_or_else(|| ApiError::internal_server_error("Principal vanished during provisioning")),
    }
}

/// Admin-gated role mutation; the only principal lifecycle event after
/// creation. Returns the updated row, or None when the email is unknown.
pub async fn update_role(
    pool: &PgPool,
    email: &str,
    new_role: &str,
) -> Result<Option<User>, ApiError> {
    if new_role.trim().is_empty() {
        return Err(ApiError::bad_request("Role must not be empty"));
    }

    let user = sqlx::query_as::<_, User>("UPDATE users SET role = $2 WHERE email = $1 RETURNING *")
        .bind(email)
        .bind(new_role.trim())
        .fetch_optional(pool)
        .await?;

    Ok(user)
}
