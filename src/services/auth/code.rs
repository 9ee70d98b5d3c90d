/*
 * Responsibility
 * - client-facing (code, message) catalog
 * - used by the JWT filter to classify failures and by the entry point to render them
 */
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    IndexNotFound,
    BoardNotFound,
    UnknownError,
    WrongTypeToken,
    ExpiredToken,
    UnsupportedToken,
    AccessDenied,
}

impl ErrorCode {
    pub const fn code(&self) -> &'static str {
        match self {
            ErrorCode::IndexNotFound => "1001",
            ErrorCode::BoardNotFound => "1002",
            ErrorCode::UnknownError
            | ErrorCode::WrongTypeToken
            | ErrorCode::ExpiredToken
            | ErrorCode::UnsupportedToken
            | ErrorCode::AccessDenied => "400",
        }
    }

    pub const fn message(&self) -> &'static str {
        match self {
            ErrorCode::IndexNotFound => "인덱스가 존재하지 않습니다.",
            ErrorCode::BoardNotFound => "게시글을 찾을 수 없습니다.",
            ErrorCode::UnknownError => "토큰이 존재하지 않습니다.",
            ErrorCode::WrongTypeToken => "변조된 토큰입니다.",
            ErrorCode::ExpiredToken => "만료된 토큰입니다.",
            ErrorCode::UnsupportedToken => "변조된 토큰입니다.",
            ErrorCode::AccessDenied => "권한이 없습니다.",
        }
    }

    /// Variant name in SCREAMING_SNAKE_CASE (the marker's string form).
    pub const fn name(&self) -> &'static str {
        match self {
            ErrorCode::IndexNotFound => "INDEX_NOT_FOUND",
            ErrorCode::BoardNotFound => "BOARD_NOT_FOUND",
            ErrorCode::UnknownError => "UNKNOWN_ERROR",
            ErrorCode::WrongTypeToken => "WRONG_TYPE_TOKEN",
            ErrorCode::ExpiredToken => "EXPIRED_TOKEN",
            ErrorCode::UnsupportedToken => "UNSUPPORTED_TOKEN",
            ErrorCode::AccessDenied => "ACCESS_DENIED",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
