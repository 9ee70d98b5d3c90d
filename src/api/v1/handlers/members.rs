/*
 * Responsibility
 * - signup / login: create or verify the member, then issue the token pair
 * - nickname availability check
 * - /members/me for the authenticated principal
 */
use axum::{Json, extract::State, http::StatusCode};
use tracing::{info, warn};

use crate::{
    api::v1::{
        dto::members::{LoginRequest, MemberResponse, NicknameRequest, SignupRequest},
        extractors::AuthPrincipal,
    },
    error::AppError,
    repos::member_repo,
    services::auth::{Role, TokenBundle, password},
    state::AppState,
};

const NICKNAME_AVAILABLE: &str = "사용 가능한 닉네임입니다.";
const NICKNAME_TAKEN: &str = "이미 사용중인 닉네임입니다.";
const USERNAME_TAKEN: &str = "이미 사용중인 아이디입니다.";

// Argon2 is CPU-bound; keep it off the async workers.
async fn hash_password(password: String) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || password::hash_password(&password))
        .await
        .map_err(|_| AppError::Internal)?
        .map_err(AppError::from)
}

async fn verify_password(password: String, hash: String) -> Result<bool, AppError> {
    tokio::task::spawn_blocking(move || password::verify_password(&password, &hash))
        .await
        .map_err(|_| AppError::Internal)?
        .map_err(AppError::from)
}

async fn burn_password_check(password: String) -> Result<(), AppError> {
    tokio::task::spawn_blocking(move || password::verify_dummy(&password))
        .await
        .map_err(|_| AppError::Internal)?;
    Ok(())
}

pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> Result<(StatusCode, Json<TokenBundle>), AppError> {
    req.validate()
        .map_err(|m| AppError::bad_request("INVALID_REQUEST", m))?;

    let username = req.username.trim();
    let nickname = req.nickname.trim();

    if member_repo::username_exists(&state.db, username).await? {
        return Err(AppError::conflict("DUPLICATE_USERNAME", USERNAME_TAKEN));
    }
    if member_repo::nickname_exists(&state.db, nickname).await? {
        return Err(AppError::conflict("DUPLICATE_NICKNAME", NICKNAME_TAKEN));
    }

    let password_hash = hash_password(req.password).await?;
    let row = member_repo::create(&state.db, username, nickname, &password_hash, Role::User).await?;
    info!(member_id = row.id, "member registered");

    let tokens = state.tokens.issue_tokens(&row.into_principal())?;
    Ok((StatusCode::CREATED, Json(tokens)))
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<TokenBundle>, AppError> {
    req.validate()
        .map_err(|m| AppError::bad_request("INVALID_REQUEST", m))?;

    let Some(row) = member_repo::find_by_username(&state.db, req.username.trim()).await? else {
        // Same Argon2 cost as a real check.
        burn_password_check(req.password).await?;
        warn!("login for unknown username");
        return Err(AppError::Unauthorized);
    };

    let hash = match row.password.clone() {
        Some(hash) if !row.is_social() => hash,
        _ => {
            burn_password_check(req.password).await?;
            warn!(member_id = row.id, "password login for social member");
            return Err(AppError::Unauthorized);
        }
    };

    if !verify_password(req.password, hash).await? {
        warn!(member_id = row.id, "wrong password");
        return Err(AppError::Unauthorized);
    }

    let tokens = state.tokens.issue_tokens(&row.into_principal())?;
    Ok(Json(tokens))
}

pub async fn check_nickname(
    State(state): State<AppState>,
    Json(req): Json<NicknameRequest>,
) -> Result<String, AppError> {
    req.validate()
        .map_err(|m| AppError::bad_request("INVALID_REQUEST", m))?;

    if member_repo::nickname_exists(&state.db, req.nickname.trim()).await? {
        return Err(AppError::conflict("DUPLICATE_NICKNAME", NICKNAME_TAKEN));
    }

    Ok(NICKNAME_AVAILABLE.to_string())
}

pub async fn me(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
) -> Result<Json<MemberResponse>, AppError> {
    let row = member_repo::get(&state.db, principal.id)
        .await?
        .ok_or(AppError::not_found("member"))?;

    Ok(Json(MemberResponse::from(row.into_principal())))
}
