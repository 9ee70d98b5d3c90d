use serde::Serialize;

use crate::repos::rank_repo::RankRow;

#[derive(Debug, Serialize)]
pub struct RankResponse {
    pub id: i64,
    pub ranking: i32,
    pub score: f64,
    pub nickname: String,
    pub category: String,
}

impl From<RankRow> for RankResponse {
    fn from(row: RankRow) -> Self {
        Self {
            id: row.id,
            ranking: row.ranking,
            score: row.score,
            nickname: row.nickname,
            category: row.category,
        }
    }
}
