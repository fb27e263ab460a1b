use sqlx::PgPool;
use uuid::Uuid;

use crate::core::config::BootstrapAdminConfig;
use crate::core::error::{AppError, Result};
use crate::features::users::models::{CreateUser, User, UserRole};
use crate::shared::constants::BCRYPT_COST;

const USER_COLUMNS: &str =
    "id, name, email, password_hash, role, photo_url, created_at, updated_at";

/// Service for the credential store: the sole authority on identity and role
pub struct UserService {
    pool: PgPool,
}

impl UserService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Hash the password off the async executor; bcrypt at cost 12 takes
    /// a noticeable fraction of a second.
    async fn hash_password(password: String) -> Result<String> {
        tokio::task::spawn_blocking(move || bcrypt::hash(password, BCRYPT_COST))
            .await
            .map_err(|e| AppError::Internal(format!("Hashing task failed: {}", e)))?
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
    }

    pub async fn verify_password(password: String, hash: String) -> Result<bool> {
        tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .map_err(|e| AppError::Internal(format!("Hashing task failed: {}", e)))?
            .map_err(|e| AppError::Internal(format!("Failed to verify password: {}", e)))
    }

    /// Create a new user; duplicate email fails with Conflict
    pub async fn create(&self, data: CreateUser) -> Result<User> {
        let password_hash = Self::hash_password(data.password).await?;

        let sql = format!(
            "INSERT INTO users (name, email, password_hash, role) \
             VALUES ($1, lower($2), $3, $4) \
             RETURNING {USER_COLUMNS}"
        );

        let user = sqlx::query_as::<_, User>(&sql)
            .bind(&data.name)
            .bind(&data.email)
            .bind(&password_hash)
            .bind(data.role)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    AppError::Conflict("Email already in use".to_string())
                } else {
                    tracing::error!("Failed to create user: {:?}", e);
                    AppError::Database(e)
                }
            })?;

        tracing::info!("Created user: {} (role: {})", user.id, user.role);
        Ok(user)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = lower($1)");

        sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch user by email: {:?}", e);
                AppError::Database(e)
            })
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<User> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");

        sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch user: {:?}", e);
                AppError::Database(e)
            })?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))
    }

    /// Change a user's role; the only path to staff/admin besides the
    /// bootstrap seed.
    pub async fn update_role(&self, id: Uuid, role: UserRole) -> Result<User> {
        let sql = format!(
            "UPDATE users SET role = $2, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {USER_COLUMNS}"
        );

        let user = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .bind(role)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to update user role: {:?}", e);
                AppError::Database(e)
            })?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))?;

        tracing::info!("Updated role for user {}: {}", user.id, user.role);
        Ok(user)
    }

    /// Seed the configured admin account if it does not exist yet.
    pub async fn ensure_bootstrap_admin(&self, config: &BootstrapAdminConfig) -> Result<()> {
        if let Some(existing) = self.find_by_email(&config.email).await? {
            if existing.role != UserRole::Admin {
                tracing::warn!(
                    "Bootstrap admin email {} exists with role {}; leaving it unchanged",
                    existing.email,
                    existing.role
                );
            }
            return Ok(());
        }

        let admin = self
            .create(CreateUser {
                name: config.name.clone(),
                email: config.email.clone(),
                password: config.password.clone(),
                role: UserRole::Admin,
            })
            .await?;

        tracing::info!("Seeded bootstrap admin: {}", admin.email);
        Ok(())
    }
}

fn is_unique_violation(error: &sqlx::Error) -> bool {
    matches!(
        error,
        sqlx::Error::Database(db) if db.code().as_deref() == Some("23505")
    )
}
