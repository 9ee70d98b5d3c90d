/*
 * Responsibility
 * - read per-member todo stats for a date window
 * - store / list the ranking of a category
 */
use chrono::NaiveDate;
use sqlx::{FromRow, PgPool};

use crate::repos::error::RepoError;
use crate::services::rank::{MemberTodoStats, RankCategory, RankEntry};

#[derive(Debug, Clone, FromRow)]
pub struct RankRow {
    pub id: i64,
    pub ranking: i32,
    pub score: f64,
    pub nickname: String,
    pub category: String,
}

#[derive(Debug, FromRow)]
struct StatsRow {
    nickname: String,
    total: i64,
    completed: i64,
}

pub async fn member_stats(
    db: &PgPool,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<Vec<MemberTodoStats>, RepoError> {
    let rows = sqlx::query_as::<_, StatsRow>(
        r#"
        SELECT
            m.nickname,
            COUNT(t.id) AS total,
            COUNT(t.id) FILTER (WHERE t.is_complete) AS completed
        FROM members m
        JOIN todos t ON t.member_id = m.id
        WHERE t.add_date BETWEEN $1 AND $2
        GROUP BY m.nickname
        "#,
    )
    .bind(from)
    .bind(to)
    .fetch_all(db)
    .await?;

    Ok(rows
        .into_iter()
        .map(|r| MemberTodoStats {
            nickname: r.nickname,
            total: r.total,
            completed: r.completed,
        })
        .collect())
}

/// Replace the stored ranking of `category` in one transaction.
pub async fn replace(
    db: &PgPool,
    category: RankCategory,
    entries: &[RankEntry],
) -> Result<(), RepoError> {
    let mut tx = db.begin().await?;

    sqlx::query(
        r#"
        DELETE FROM ranks
        WHERE category = $1
        "#,
    )
    .bind(category.as_str())
    .execute(&mut *tx)
    .await?;

    for entry in entries {
        sqlx::query(
            r#"
            INSERT INTO ranks (ranking, score, nickname, category)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(entry.ranking)
        .bind(entry.score)
        .bind(&entry.nickname)
        .bind(category.as_str())
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(())
}

pub async fn list(db: &PgPool, category: RankCategory) -> Result<Vec<RankRow>, RepoError> {
    let rows = sqlx::query_as::<_, RankRow>(
        r#"
        SELECT id, ranking, score, nickname, category
        FROM ranks
        WHERE category = $1
        ORDER BY ranking, nickname
        "#,
    )
    .bind(category.as_str())
    .fetch_all(db)
    .await?;

    Ok(rows)
}
