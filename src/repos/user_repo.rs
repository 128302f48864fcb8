/*
 * Responsibility
 * - persistence of users behind the UserStore trait
 * - PgUserStore: SQLx / Postgres (production)
 * - InMemoryUserStore: process memory (development without DATABASE_URL, tests)
 */
use std::collections::HashMap;
use std::fmt;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::repos::error::RepoError;

#[derive(Clone, FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl fmt::Debug for UserRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserRow")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("created_at", &self.created_at)
            .finish_non_exhaustive()
    }
}

/// A user about to be stored. `email` is expected to be normalized already.
#[derive(Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Store a new user. A taken email is `RepoError::Conflict`.
    async fn create(&self, user: NewUser) -> Result<UserRow, RepoError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRow>, RepoError>;

    async fn get(&self, id: Uuid) -> Result<Option<UserRow>, RepoError>;
}

#[derive(Clone, Debug)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn create(&self, user: NewUser) -> Result<UserRow, RepoError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (id, name, email, password_hash)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, email, password_hash, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(RepoError::from_sqlx)?;

        Ok(row)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRow>, RepoError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, name, email, password_hash, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn get(&self, id: Uuid) -> Result<Option<UserRow>, RepoError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, name, email, password_hash, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }
}

#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    users: RwLock<HashMap<Uuid, UserRow>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn create(&self, user: NewUser) -> Result<UserRow, RepoError> {
        let mut users = self.users.write().await;

        if users.values().any(|u| u.email == user.email) {
            return Err(RepoError::Conflict);
        }

        let row = UserRow {
            id: Uuid::new_v4(),
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            created_at: Utc::now(),
        };
        users.insert(row.id, row.clone());

        Ok(row)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRow>, RepoError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn get(&self, id: Uuid) -> Result<Option<UserRow>, RepoError> {
        Ok(self.users.read().await.get(&id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            name: "Diego".to_string(),
            email: email.to_string(),
            password_hash: "334542423".to_string(),
        }
    }

    #[tokio::test]
    async fn create_then_look_up() {
        let store = InMemoryUserStore::new();

        let user = store.create(new_user("diego@example.com")).await.unwrap();

        assert_eq!(user.email, "diego@example.com");
        let by_email = store.find_by_email("diego@example.com").await.unwrap().unwrap();
        assert_eq!(by_email.id, user.id);
        let by_id = store.get(user.id).await.unwrap().unwrap();
        assert_eq!(by_id.name, "Diego");
    }

    #[tokio::test]
    async fn duplicate_email_conflicts() {
        let store = InMemoryUserStore::new();
        store.create(new_user("diego@example.com")).await.unwrap();

        let err = store.create(new_user("diego@example.com")).await.unwrap_err();

        assert!(matches!(err, RepoError::Conflict));
    }

    #[tokio::test]
    async fn unknown_lookups_are_none() {
        let store = InMemoryUserStore::new();

        assert!(store.find_by_email("nobody@example.com").await.unwrap().is_none());
        assert!(store.get(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[test]
    fn debug_hides_password_hash() {
        let row = UserRow {
            id: Uuid::new_v4(),
            name: "Diego".to_string(),
            email: "diego@example.com".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            created_at: Utc::now(),
        };

        assert!(!format!("{:?}", row).contains("argon2id"));
    }
}
