pub mod code;
pub mod factory;
pub mod password;
pub mod principal;
pub mod token_provider;

pub use code::ErrorCode;
pub use factory::build_token_provider;
pub use principal::{Principal, Role};
pub use token_provider::{TokenBundle, TokenError, TokenProvider};
