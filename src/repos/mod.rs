pub mod error;
pub mod member_repo;
pub mod rank_repo;
pub mod todo_repo;
