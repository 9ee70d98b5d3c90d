/*
 * Responsibility
 * - rank categories and their date windows
 * - score (todo completion percentage) and dense ranking
 * - no DB access here; repos::rank_repo loads stats and stores the result
 */
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{Duration, NaiveDate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankCategory {
    Day,
    Week,
    Month,
}

impl RankCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            RankCategory::Day => "day",
            RankCategory::Week => "week",
            RankCategory::Month => "month",
        }
    }

    /// Inclusive `(from, to)` date window ending at `today`.
    pub fn window(&self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        let days = match self {
            RankCategory::Day => 0,
            RankCategory::Week => 6,
            RankCategory::Month => 29,
        };
        (today - Duration::days(days), today)
    }
}

impl FromStr for RankCategory {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "day" => Ok(RankCategory::Day),
            "week" => Ok(RankCategory::Week),
            "month" => Ok(RankCategory::Month),
            _ => Err(()),
        }
    }
}

impl fmt::Display for RankCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberTodoStats {
    pub nickname: String,
    pub total: i64,
    pub completed: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankEntry {
    pub ranking: i32,
    pub score: f64,
    pub nickname: String,
}

/// Completion percentage rounded to two decimals; 0 when there is nothing to do.
pub fn score(stats: &MemberTodoStats) -> f64 {
    if stats.total <= 0 {
        return 0.0;
    }
    let pct = stats.completed as f64 / stats.total as f64 * 100.0;
    (pct * 100.0).round() / 100.0
}

/// Highest score first, ties broken by nickname; equal scores share a ranking
/// and the next score takes the following number.
pub fn compute_ranks(stats: &[MemberTodoStats]) -> Vec<RankEntry> {
    let mut scored: Vec<(f64, &str)> = stats
        .iter()
        .map(|s| (score(s), s.nickname.as_str()))
        .collect();

    scored.sort_by(|a, b| {
        b.0.partial_cmp(&a.0)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.1.cmp(b.1))
    });

    let mut out = Vec::with_capacity(scored.len());
    let mut ranking = 0;
    let mut previous: Option<f64> = None;
    for (score, nickname) in scored {
        if previous != Some(score) {
            ranking += 1;
            previous = Some(score);
        }
        out.push(RankEntry {
            ranking,
            score,
            nickname: nickname.to_string(),
        });
    }
    out
}
