/*
 * Responsibility
 * - shared context bound to the Router (AppState)
 *   - db: PgPool, tokens: TokenProvider
 * - cheap to Clone (PgPool and Arc inside)
 */
use std::sync::Arc;

use crate::services::auth::TokenProvider;

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: sqlx::PgPool,
    pub tokens: Arc<TokenProvider>,
}

impl AppState {
    pub fn new(db: sqlx::PgPool, tokens: Arc<TokenProvider>) -> Self {
        Self { db, tokens }
    }
}
