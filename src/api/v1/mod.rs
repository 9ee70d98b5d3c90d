/*
 * Responsibility
 * - public surface of the API (routes() and the types handlers share)
 */
pub mod dto;
pub mod extractors;
pub mod handlers;
mod routes;

pub use routes::routes;
