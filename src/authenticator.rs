use std::sync::Arc;
use std::time::Duration;
use std::time::Instant;

use async_trait::async_trait;
use http::HeaderMap;

use crate::config::TokenAuthConfig;
use crate::error::Error;
use crate::extractor::IdentifierExtractor;
use crate::profile::UserProfile;
use crate::profile::UserProfileDelegate;
use crate::profile_cache::ProfileCache;
use crate::providers::ProfileProvider;

/// Header naming the credential type; must equal the plugin name for it to engage
pub const TOKEN_TYPE_HEADER: &str = "x-token-type";
/// Header carrying the identity token (optionally prefixed with `Bearer `)
pub const ID_TOKEN_HEADER: &str = "id_token";
/// Header carrying the access token presented to the provider
pub const ACCESS_TOKEN_HEADER: &str = "access_token";

/// Result of running one credentials plugin against a request
#[derive(Debug)]
pub enum AuthenticationOutcome {
    /// The credentials were verified
    Success(UserProfile),
    /// The credentials were meant for this plugin but could not be verified.
    /// The error is for diagnostics and must not be echoed to the caller.
    Failure(Error),
    /// The credentials are not for this plugin; try the next one
    Pass,
    /// A redirecting plugin started an interactive flow. Never produced by
    /// token authenticators.
    InProgress,
}

impl AuthenticationOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        match self {
            Self::Success(profile) => Some(profile),
            _ => None,
        }
    }

    pub fn into_profile(self) -> Option<UserProfile> {
        match self {
            Self::Success(profile) => Some(profile),
            _ => None,
        }
    }
}

/// Trait for a plugin in an authentication chain
#[async_trait]
pub trait CredentialsPlugin: Send + Sync {
    /// Fixed name of the plugin
    fn name(&self) -> &str;

    /// Whether the plugin authenticates by redirecting the user agent
    fn redirecting(&self) -> bool;

    /// Authenticate a request from its headers
    async fn authenticate(&self, headers: &HeaderMap) -> AuthenticationOutcome;
}

/// Authenticator pairing an identity token with a provider access token
///
/// Generic over an `IdentifierExtractor`, which reads the claimed user id from
/// the identity token, and a `ProfileProvider`, which confirms the access token
/// and returns the profile of its owner. The two ids must agree.
///
/// Verified profiles are cached by access token, so repeated requests within
/// the TTL make no provider call.
pub struct TokenAuthenticator<E: IdentifierExtractor, P: ProfileProvider> {
    extractor: E,
    provider: P,
    cache: ProfileCache,
    token_ttl: Option<Duration>,
    profile_delegate: Option<Arc<dyn UserProfileDelegate>>,
}

impl<E: IdentifierExtractor, P: ProfileProvider> std::fmt::Debug for TokenAuthenticator<E, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenAuthenticator")
            .field("name", &self.provider.name())
            .field("token_ttl", &self.token_ttl)
            .field("profile_delegate", &self.profile_delegate.is_some())
            .finish_non_exhaustive()
    }
}

impl<E: IdentifierExtractor, P: ProfileProvider> TokenAuthenticator<E, P> {
    /// Create an authenticator with its own profile cache sized by `config`
    pub fn new(config: TokenAuthConfig, extractor: E, provider: P) -> Self {
        let cache = ProfileCache::new(config.cache_capacity);
        Self::with_cache(config, extractor, provider, cache)
    }

    /// Create an authenticator that takes ownership of the given cache
    pub fn with_cache(
        config: TokenAuthConfig,
        extractor: E,
        provider: P,
        cache: ProfileCache,
    ) -> Self {
        Self {
            extractor,
            provider,
            cache,
            token_ttl: config.token_ttl,
            profile_delegate: config.profile_delegate,
        }
    }

    pub fn cache(&self) -> &ProfileCache {
        &self.cache
    }

    pub fn token_ttl(&self) -> Option<Duration> {
        self.token_ttl
    }

    /// Verify a pair of tokens
    ///
    /// A cached profile for `access_token` is returned without comparing its
    /// id to the identity token. A client presenting a cached access token
    /// together with another user's identity token is therefore accepted as
    /// the cached user until the entry expires.
    pub async fn verify(
        &self,
        identity_token: &str,
        access_token: &str,
    ) -> Result<UserProfile, Error> {
        self.verify_with_delegate(identity_token, access_token, None)
            .await
    }

    /// Verify a pair of tokens, applying `delegate` to a freshly fetched
    /// profile when no delegate was configured
    ///
    /// The profile must still carry the identity token's user id after the
    /// delegate ran, otherwise verification fails and nothing is cached.
    pub async fn verify_with_delegate(
        &self,
        identity_token: &str,
        access_token: &str,
        delegate: Option<&dyn UserProfileDelegate>,
    ) -> Result<UserProfile, Error> {
        let expected_id = self
            .extractor
            .extract_user_identifier(identity_token)
            .ok_or(Error::NoIdentifier)?;

        if let Some(profile) = self
            .cache
            .lookup(access_token, self.token_ttl, Instant::now())
            .await
        {
            tracing::debug!(user_id = %profile.id(), "Profile served from cache");
            return Ok(profile);
        }

        tracing::debug!("Profile cache miss, fetching from provider");
        let fetched = self.provider.fetch_profile(access_token).await?;
        let mut profile = fetched.profile;

        if profile.id() != expected_id {
            return Err(Error::IdentityMismatch);
        }

        let delegate: Option<&dyn UserProfileDelegate> = match &self.profile_delegate {
            Some(configured) => Some(configured.as_ref()),
            None => delegate,
        };
        if let Some(delegate) = delegate {
            delegate.update(&mut profile, &fetched.document);
            if profile.id() != expected_id {
                tracing::debug!("Profile delegate changed the verified user id");
                return Err(Error::IdentityMismatch);
            }
        }

        self.cache
            .store(access_token, profile.clone(), Instant::now())
            .await;

        tracing::debug!(user_id = %profile.id(), "Profile verified and cached");
        Ok(profile)
    }

    /// Authenticate a request, with a per-request profile delegate used
    /// when none was configured
    pub async fn authenticate_with_delegate(
        &self,
        headers: &HeaderMap,
        delegate: Option<&dyn UserProfileDelegate>,
    ) -> AuthenticationOutcome {
        if header_str(headers, TOKEN_TYPE_HEADER) != Some(self.name()) {
            tracing::debug!(plugin = self.name(), "Token type not handled, passing");
            return AuthenticationOutcome::Pass;
        }

        let tokens = required_header(headers, ACCESS_TOKEN_HEADER).and_then(|access_token| {
            let identity_token = required_header(headers, ID_TOKEN_HEADER)?;
            Ok((strip_bearer(identity_token), access_token))
        });

        let result = match tokens {
            Ok((identity_token, access_token)) => {
                self.verify_with_delegate(identity_token, access_token, delegate)
                    .await
            }
            Err(error) => Err(error),
        };

        match result {
            Ok(profile) => AuthenticationOutcome::Success(profile),
            Err(error) => {
                tracing::warn!(plugin = self.name(), %error, "Authentication failed");
                AuthenticationOutcome::Failure(error)
            }
        }
    }
}

#[async_trait]
impl<E: IdentifierExtractor, P: ProfileProvider> CredentialsPlugin for TokenAuthenticator<E, P> {
    fn name(&self) -> &str {
        self.provider.name()
    }

    fn redirecting(&self) -> bool {
        false
    }

    async fn authenticate(&self, headers: &HeaderMap) -> AuthenticationOutcome {
        self.authenticate_with_delegate(headers, None).await
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

fn required_header<'a>(headers: &'a HeaderMap, name: &'static str) -> Result<&'a str, Error> {
    header_str(headers, name)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or(Error::MissingField(name))
}

fn strip_bearer(token: &str) -> &str {
    match token.split_once(' ') {
        Some((scheme, rest)) if scheme.eq_ignore_ascii_case("bearer") => rest.trim_start(),
        _ => token,
    }
}
