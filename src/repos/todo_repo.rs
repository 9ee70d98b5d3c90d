/*
 * Responsibility
 * - todos CRUD, always scoped to the owning member
 * - a todo owned by someone else behaves as missing (None / false)
 */
use chrono::NaiveDate;
use sqlx::{FromRow, PgPool};

use crate::repos::error::RepoError;

#[derive(Debug, Clone, FromRow)]
pub struct TodoRow {
    pub id: i64,
    pub content: String,
    pub is_complete: bool,
    pub add_date: NaiveDate,
}

pub async fn list_by_member(db: &PgPool, member_id: i64) -> Result<Vec<TodoRow>, RepoError> {
    let rows = sqlx::query_as::<_, TodoRow>(
        r#"
        SELECT id, content, is_complete, add_date
        FROM todos
        WHERE member_id = $1
        ORDER BY id
        "#,
    )
    .bind(member_id)
    .fetch_all(db)
    .await?;

    Ok(rows)
}

pub async fn create(
    db: &PgPool,
    member_id: i64,
    content: &str,
    add_date: NaiveDate,
) -> Result<TodoRow, RepoError> {
    let row = sqlx::query_as::<_, TodoRow>(
        r#"
        INSERT INTO todos (member_id, content, add_date)
        VALUES ($1, $2, $3)
        RETURNING id, content, is_complete, add_date
        "#,
    )
    .bind(member_id)
    .bind(content)
    .bind(add_date)
    .fetch_one(db)
    .await?;

    Ok(row)
}

pub async fn update(
    db: &PgPool,
    todo_id: i64,
    member_id: i64,
    content: Option<&str>,
    is_complete: Option<bool>,
) -> Result<Option<TodoRow>, RepoError> {
    let row = sqlx::query_as::<_, TodoRow>(
        r#"
        UPDATE todos
        SET
            content = COALESCE($3, content),
            is_complete = COALESCE($4, is_complete)
        WHERE id = $1 AND member_id = $2
        RETURNING id, content, is_complete, add_date
        "#,
    )
    .bind(todo_id)
    .bind(member_id)
    .bind(content)
    .bind(is_complete)
    .fetch_optional(db)
    .await?;

    Ok(row)
}

pub async fn delete(db: &PgPool, todo_id: i64, member_id: i64) -> Result<bool, RepoError> {
    let result = sqlx::query(
        r#"
        DELETE FROM todos
        WHERE id = $1 AND member_id = $2
        "#,
    )
    .bind(todo_id)
    .bind(member_id)
    .execute(db)
    .await?;

    Ok(result.rows_affected() > 0)
}
