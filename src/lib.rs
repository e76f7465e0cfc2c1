//! # msgraph-credentials
//!
//! Request authentication for mobile clients that sign in with Microsoft.
//!
//! The client sends two tokens: an ID token, whose `oid` claim says who the
//! user claims to be, and a Graph access token. The access token is checked by
//! calling Microsoft Graph's `/me` endpoint, and the returned user id must match
//! the ID token's claim. Verified profiles are cached per access token so that
//! a session does not hit Graph on every request.
//!
//! ## Features
//!
//! - Identity-token claim extraction (signature verification is left to the host)
//! - Microsoft Graph `/me` lookup with an explicit request timeout
//! - Normalized [`UserProfile`] with a post-processing hook
//! - Bounded LRU profile cache with optional TTL
//! - Plugin contract with pass-through for foreign credential types
//!
//! ## Example
//!
//! ```rust,no_run
//! use http::{HeaderMap, HeaderValue};
//! use msgraph_credentials::providers::microsoft::MicrosoftTokenAuthenticator;
//! use msgraph_credentials::{AuthenticationOutcome, CredentialsPlugin, TokenAuthConfig};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Trust verified tokens for 10 minutes
//!     let config = TokenAuthConfig::new().with_token_ttl(Duration::from_secs(600));
//!     let authenticator = MicrosoftTokenAuthenticator::from_config(config)?;
//!
//!     let mut headers = HeaderMap::new();
//!     headers.insert("x-token-type", HeaderValue::from_static("MicrosoftToken"));
//!     headers.insert("id_token", HeaderValue::from_static("eyJ0eXAiOiJKV1Qi..."));
//!     headers.insert("access_token", HeaderValue::from_static("EwBwA8l6BAAU..."));
//!
//!     match authenticator.authenticate(&headers).await {
//!         AuthenticationOutcome::Success(profile) => println!("User: {}", profile.id()),
//!         AuthenticationOutcome::Pass => println!("Not a Microsoft token"),
//!         _ => println!("Unauthorized"),
//!     }
//!
//!     Ok(())
//! }
//! ```

mod authenticator;
mod claims;
mod config;
mod error;
mod extractor;
mod profile;
mod profile_cache;
pub mod providers;

// Re-exports for public API
pub use authenticator::AuthenticationOutcome;
pub use authenticator::CredentialsPlugin;
pub use authenticator::TokenAuthenticator;
pub use authenticator::ACCESS_TOKEN_HEADER;
pub use authenticator::ID_TOKEN_HEADER;
pub use authenticator::TOKEN_TYPE_HEADER;
pub use claims::IdentityClaims;
pub use claims::MicrosoftIdTokenClaims;
pub use config::TokenAuthConfig;
pub use error::Error;
pub use error::ProviderError;
pub use error::Result;
pub use extractor::extract_user_identifier;
pub use extractor::IdentifierExtractor;
pub use extractor::MicrosoftExtractor;
pub use profile::UserProfile;
pub use profile::UserProfileDelegate;
pub use profile::UserProfileEmail;
pub use profile::UserProfileName;
pub use profile::UserProfilePhoto;
pub use profile_cache::ProfileCache;
