//! Microsoft Graph access token validation
//!
//! The access token is validated by presenting it to Graph's "current user"
//! endpoint. A successful response both proves the token is live and tells us
//! whose it is.
//!
//! ## Response Structure
//!
//! ```json
//! {
//!   "@odata.context": "https://graph.microsoft.com/v1.0/$metadata#users/$entity",
//!   "displayName": "Adele Vance",
//!   "surname": "Vance",
//!   "givenName": "Adele",
//!   "id": "87d349ed-44d7-43e1-9a83-5f2406dee5bd",
//!   "userPrincipalName": "adelev@contoso.com",
//!   "businessPhones": [],
//!   "jobTitle": null,
//!   "mail": null
//! }
//! ```
//!
//! ## Mapping
//!
//! `id` is required. `displayName`, `givenName` and `surname` fall back to an
//! empty string. `userPrincipalName`, when present, becomes the only email,
//! with an empty type. Graph has no middle name, so it is always empty.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::time::Duration;
//!
//! use http::HeaderMap;
//! use msgraph_credentials::providers::microsoft::MicrosoftTokenAuthenticator;
//! use msgraph_credentials::{AuthenticationOutcome, CredentialsPlugin, TokenAuthConfig};
//!
//! # async fn example(headers: HeaderMap) -> Result<(), Box<dyn std::error::Error>> {
//! let config = TokenAuthConfig::new().with_token_ttl(Duration::from_secs(600));
//! let authenticator = MicrosoftTokenAuthenticator::from_config(config)?;
//!
//! if let AuthenticationOutcome::Success(profile) = authenticator.authenticate(&headers).await {
//!     println!("Authenticated {}", profile.id());
//! }
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::Client;
use reqwest::StatusCode;
use reqwest::Url;
use serde_json::Map;
use serde_json::Value;

use crate::authenticator::TokenAuthenticator;
use crate::config::TokenAuthConfig;
use crate::error::read_body_error;
use crate::error::send_error;
use crate::error::Error;
use crate::error::ProviderError;
use crate::error::Result;
use crate::extractor::MicrosoftExtractor;
use crate::profile::UserProfile;
use crate::profile::UserProfileEmail;
use crate::profile::UserProfileName;
use crate::providers::FetchedProfile;
use crate::providers::ProfileProvider;

/// Name of the Microsoft token authenticator, matched against the token type header
pub const PLUGIN_NAME: &str = "MicrosoftToken";

const ME_PATH: &str = "v1.0/me";

/// Client for Graph's `/me` endpoint
#[derive(Debug, Clone)]
pub struct GraphClient {
    client: Client,
    me_url: Url,
}

impl GraphClient {
    /// Build a client from the Graph URL, timeout and HTTP client settings of `config`
    ///
    /// # Errors
    /// Returns `Error::InvalidGraphUrl` if the base URL does not parse, or
    /// `Error::Reqwest` if the default HTTP client cannot be built
    pub fn from_config(config: &TokenAuthConfig) -> Result<Self> {
        let base = config.graph_base_url.trim_end_matches('/');
        let me_url = Url::parse(&format!("{base}/{ME_PATH}"))
            .map_err(|error| Error::InvalidGraphUrl(format!("{base}: {error}")))?;

        let client = match &config.http_client {
            Some(client) => client.clone(),
            None => Client::builder().timeout(config.request_timeout).build()?,
        };

        Ok(Self { client, me_url })
    }

    pub fn me_url(&self) -> &Url {
        &self.me_url
    }
}

#[async_trait]
impl ProfileProvider for GraphClient {
    fn name(&self) -> &str {
        PLUGIN_NAME
    }

    async fn fetch_profile(
        &self,
        bearer_token: &str,
    ) -> std::result::Result<FetchedProfile, ProviderError> {
        let response = self
            .client
            .get(self.me_url.clone())
            .bearer_auth(bearer_token)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(send_error)?;

        // Drain the body before looking at the status so the connection can be reused
        let status = response.status();
        let body = response.bytes().await.map_err(read_body_error)?;

        if status != StatusCode::OK {
            return Err(ProviderError::StatusCode(status.as_u16()));
        }

        let document: Map<String, Value> =
            serde_json::from_slice(&body).map_err(|_| ProviderError::FailedSerialization)?;

        let profile = create_user_profile(&document, self.name())
            .ok_or(ProviderError::FailedCreatingProfile)?;

        Ok(FetchedProfile { profile, document })
    }
}

/// Map a Graph user document to a [`UserProfile`]
///
/// Returns `None` when the document has no non-empty string `id`.
pub fn create_user_profile(document: &Map<String, Value>, provider: &str) -> Option<UserProfile> {
    let id = string_field(document, "id")?;

    let emails = string_field(document, "userPrincipalName").map(|upn| {
        vec![UserProfileEmail {
            value: upn.to_owned(),
            kind: String::new(),
        }]
    });

    let name = UserProfileName {
        family_name: string_field(document, "surname").unwrap_or_default().to_owned(),
        given_name: string_field(document, "givenName").unwrap_or_default().to_owned(),
        middle_name: String::new(),
    };

    let profile = UserProfile::new(id, provider)
        .ok()?
        .with_display_name(string_field(document, "displayName").unwrap_or_default())
        .with_name(name)
        .with_emails(emails);

    Some(profile)
}

fn string_field<'a>(document: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    document.get(key).and_then(Value::as_str)
}

/// Convenience type alias for the Microsoft token authenticator
pub type MicrosoftTokenAuthenticator = TokenAuthenticator<MicrosoftExtractor, GraphClient>;

impl MicrosoftTokenAuthenticator {
    /// Create an authenticator that checks Microsoft ID tokens against Graph
    ///
    /// # Errors
    /// See [`GraphClient::from_config`]
    pub fn from_config(config: TokenAuthConfig) -> Result<Self> {
        let client = GraphClient::from_config(&config)?;
        Ok(Self::new(config, MicrosoftExtractor, client))
    }
}
