/*
 * Responsibility
 * - SQLx access to the members table
 * - unique username/nickname violations surface as RepoError::Conflict
 */
use sqlx::{FromRow, PgPool};

use crate::repos::error::RepoError;
use crate::services::auth::{Principal, Role};

#[derive(Debug, Clone, FromRow)]
pub struct MemberRow {
    pub id: i64,
    pub username: String,
    pub nickname: String,
    pub password: Option<String>,
    pub social_id: Option<String>,
    pub authority: String,
}

impl MemberRow {
    pub fn role(&self) -> Role {
        Role::from_db(&self.authority)
    }

    /// Created through a social provider; such members have no local password.
    pub fn is_social(&self) -> bool {
        self.social_id.is_some()
    }

    pub fn into_principal(self) -> Principal {
        let role = self.role();
        Principal::for_member(self.id, self.username, self.nickname, role)
    }
}

pub async fn create(
    db: &PgPool,
    username: &str,
    nickname: &str,
    password_hash: &str,
    role: Role,
) -> Result<MemberRow, RepoError> {
    let row = sqlx::query_as::<_, MemberRow>(
        r#"
        INSERT INTO members (username, nickname, password, authority)
        VALUES ($1, $2, $3, $4)
        RETURNING id, username, nickname, password, social_id, authority
        "#,
    )
    .bind(username)
    .bind(nickname)
    .bind(password_hash)
    .bind(role.as_authority())
    .fetch_one(db)
    .await
    .map_err(RepoError::from_sqlx)?;

    Ok(row)
}

pub async fn find_by_username(db: &PgPool, username: &str) -> Result<Option<MemberRow>, RepoError> {
    let row = sqlx::query_as::<_, MemberRow>(
        r#"
        SELECT id, username, nickname, password, social_id, authority
        FROM members
        WHERE username = $1
        "#,
    )
    .bind(username)
    .fetch_optional(db)
    .await?;

    Ok(row)
}

pub async fn get(db: &PgPool, id: i64) -> Result<Option<MemberRow>, RepoError> {
    let row = sqlx::query_as::<_, MemberRow>(
        r#"
        SELECT id, username, nickname, password, social_id, authority
        FROM members
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(db)
    .await?;

    Ok(row)
}

pub async fn nickname_exists(db: &PgPool, nickname: &str) -> Result<bool, RepoError> {
    let exists = sqlx::query_scalar::<_, bool>(
        r#"
        SELECT EXISTS (SELECT 1 FROM members WHERE nickname = $1)
        "#,
    )
    .bind(nickname)
    .fetch_one(db)
    .await?;

    Ok(exists)
}

pub async fn username_exists(db: &PgPool, username: &str) -> Result<bool, RepoError> {
    let exists = sqlx::query_scalar::<_, bool>(
        r#"
        SELECT EXISTS (SELECT 1 FROM members WHERE username = $1)
        "#,
    )
    .bind(username)
    .fetch_one(db)
    .await?;

    Ok(exists)
}
