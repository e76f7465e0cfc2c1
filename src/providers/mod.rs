//! Identity providers that turn an access token into a [`UserProfile`]
//!
//! Each provider module includes:
//!
//! - **Client**: An implementation of [`ProfileProvider`] that calls the
//!   provider's "current user" endpoint
//! - **Mapping**: The rules turning the provider's response into a [`UserProfile`]
//! - **Authenticator alias**: A [`TokenAuthenticator`](crate::TokenAuthenticator)
//!   wired to the provider and its identity-token extractor
//!
//! ## Available Providers
//!
//! - [`microsoft`]: Microsoft Graph `/me`
//!
//! ## Example
//!
//! ```rust,no_run
//! use msgraph_credentials::providers::microsoft::GraphClient;
//! use msgraph_credentials::providers::ProfileProvider;
//! use msgraph_credentials::TokenAuthConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = GraphClient::from_config(&TokenAuthConfig::new())?;
//! let fetched = client.fetch_profile("EwBwA8l6BAAU...").await?;
//! println!("Graph user id: {}", fetched.profile.id());
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use serde_json::Map;
use serde_json::Value;

use crate::error::ProviderError;
use crate::profile::UserProfile;

pub mod microsoft;

/// A profile returned by a provider, together with the raw response document
#[derive(Debug, Clone)]
pub struct FetchedProfile {
    pub profile: UserProfile,
    pub document: Map<String, Value>,
}

/// Trait for the single outbound call that resolves an access token to a profile
#[async_trait]
pub trait ProfileProvider: Send + Sync {
    /// Fixed name of the authenticator backed by this provider; also stamped
    /// into [`UserProfile::provider`]
    fn name(&self) -> &str;

    /// Fetch the profile of the user owning `bearer_token`
    async fn fetch_profile(&self, bearer_token: &str) -> Result<FetchedProfile, ProviderError>;
}
