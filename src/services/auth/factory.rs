/// Factory: build the process-wide `TokenProvider` from application `Config`.
use std::sync::Arc;

use crate::config::Config;
use crate::services::auth::TokenProvider;

pub fn build_token_provider(config: &Config) -> Arc<TokenProvider> {
    Arc::new(TokenProvider::new(&config.jwt))
}
