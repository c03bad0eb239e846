//! Bearer token storage and claim inspection.

pub mod claims;
pub mod store;

pub use claims::TokenClaims;
pub use store::{FileTokenStore, MemoryTokenStore, TokenStore};
