//! # carebridge-client
//!
//! Typed access to the platform's REST backend. The [`PlatformApi`] trait is
//! the seam the controllers in `carebridge-service` depend on;
//! [`HttpPlatformApi`] implements it over `reqwest`.
//!
//! Every authenticated call carries the bearer token held by a
//! [`TokenStore`]. A missing token is not checked before dispatch; the
//! server is relied upon to reject the call.

pub mod api;
pub mod envelope;
pub mod http;
pub mod token;

pub use api::{AvatarUpload, PlatformApi, RequestScope};
pub use http::HttpPlatformApi;
pub use token::{FileTokenStore, MemoryTokenStore, TokenClaims, TokenStore};
