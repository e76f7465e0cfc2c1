use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;

use crate::profile::UserProfileDelegate;
use crate::profile_cache::DEFAULT_CACHE_CAPACITY;

pub(crate) const DEFAULT_GRAPH_BASE_URL: &str = "https://graph.microsoft.com";

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Configuration for the token authenticator and its Graph client
#[derive(Clone)]
pub struct TokenAuthConfig {
    /// How long after verification a cached profile is trusted.
    /// `None` trusts it until it is replaced or evicted.
    pub(crate) token_ttl: Option<Duration>,
    /// Maximum number of cached profiles
    pub(crate) cache_capacity: usize,
    /// Optional hook run on each freshly verified profile before caching
    pub(crate) profile_delegate: Option<Arc<dyn UserProfileDelegate>>,
    /// Scheme and host of the Graph API, without the version path
    pub(crate) graph_base_url: String,
    /// Timeout applied to the default HTTP client
    pub(crate) request_timeout: Duration,
    /// Optional custom HTTP client for the profile request.
    /// If provided, `request_timeout` is not applied to it.
    pub(crate) http_client: Option<Client>,
}

impl std::fmt::Debug for TokenAuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenAuthConfig")
            .field("token_ttl", &self.token_ttl)
            .field("cache_capacity", &self.cache_capacity)
            .field("profile_delegate", &self.profile_delegate.is_some())
            .field("graph_base_url", &self.graph_base_url)
            .field("request_timeout", &self.request_timeout)
            .field("http_client", &self.http_client.is_some())
            .finish()
    }
}

impl Default for TokenAuthConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenAuthConfig {
    /// Create a configuration that caches profiles until replaced and talks
    /// to the public Graph endpoint
    pub fn new() -> Self {
        Self {
            token_ttl: None,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            profile_delegate: None,
            graph_base_url: DEFAULT_GRAPH_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            http_client: None,
        }
    }

    /// Set how long a verified access token stays valid in the cache
    pub fn with_token_ttl(mut self, ttl: Duration) -> Self {
        self.token_ttl = Some(ttl);
        self
    }

    /// Set the maximum number of cached profiles
    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self
    }

    /// Set a hook that may adjust each freshly verified profile
    pub fn with_profile_delegate(mut self, delegate: Arc<dyn UserProfileDelegate>) -> Self {
        self.profile_delegate = Some(delegate);
        self
    }

    /// Point the client at a different Graph host, e.g. a national cloud or a test server
    pub fn with_graph_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.graph_base_url = base_url.into();
        self
    }

    /// Set the timeout of the profile request
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set a custom HTTP client
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }

    pub fn token_ttl(&self) -> Option<Duration> {
        self.token_ttl
    }
}
