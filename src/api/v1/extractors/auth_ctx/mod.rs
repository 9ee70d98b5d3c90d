/*!
 * Authenticated principal extractor
 *
 * Responsibility:
 * - hand the Principal installed by the JWT filter to handlers
 * - reject through the auth entry point when there is none
 */

mod core;

pub use core::AuthPrincipal;
