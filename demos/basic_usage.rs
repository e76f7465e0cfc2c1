use std::sync::Arc;
use std::time::Duration;

use http::HeaderMap;
use http::HeaderValue;
use msgraph_credentials::providers::microsoft::MicrosoftTokenAuthenticator;
use msgraph_credentials::AuthenticationOutcome;
use msgraph_credentials::CredentialsPlugin;
use msgraph_credentials::TokenAuthConfig;
use msgraph_credentials::UserProfile;
use serde_json::Map;
use serde_json::Value;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Tokens come from the environment so real ones can be tried out
    let id_token = std::env::var("MS_ID_TOKEN").unwrap_or_else(|_| "eyJ0eXAiOiJKV1Qi...".into());
    let access_token = std::env::var("MS_ACCESS_TOKEN").unwrap_or_else(|_| "EwBwA8l6BAAU...".into());

    let mut headers = HeaderMap::new();
    headers.insert("x-token-type", HeaderValue::from_static("MicrosoftToken"));
    headers.insert("id_token", HeaderValue::from_str(&id_token)?);
    headers.insert("access_token", HeaderValue::from_str(&access_token)?);

    // Example 1: Default settings, profiles cached until replaced
    println!("=== Example 1: Simple Usage ===");
    let authenticator = MicrosoftTokenAuthenticator::from_config(TokenAuthConfig::new())?;
    report(authenticator.authenticate(&headers).await);

    println!();

    // Example 2: Token TTL and a profile delegate keeping the job title
    println!("=== Example 2: TTL and Profile Delegate ===");
    let keep_job_title = |profile: &mut UserProfile, document: &Map<String, Value>| {
        if let Some(title) = document.get("jobTitle").and_then(Value::as_str) {
            profile.display_name = format!("{}, {title}", profile.display_name);
        }
    };
    let config = TokenAuthConfig::new()
        .with_token_ttl(Duration::from_secs(600))
        .with_cache_capacity(10_000)
        .with_profile_delegate(Arc::new(keep_job_title));
    let authenticator = MicrosoftTokenAuthenticator::from_config(config)?;
    report(authenticator.authenticate(&headers).await);

    println!();

    // Example 3: Custom HTTP client
    println!("=== Example 3: Custom HTTP Client ===");
    let custom_client = reqwest::Client::builder()
        .timeout(Duration::from_secs(5))
        .user_agent("msgraph-credentials-demo")
        .build()?;
    let config = TokenAuthConfig::new().with_http_client(custom_client);
    let authenticator = MicrosoftTokenAuthenticator::from_config(config)?;
    report(authenticator.authenticate(&headers).await);

    Ok(())
}

fn report(outcome: AuthenticationOutcome) {
    match outcome {
        AuthenticationOutcome::Success(profile) => {
            println!("✓ Authenticated");
            println!("  Id: {}", profile.id());
            println!("  Name: {}", profile.display_name);
        }
        AuthenticationOutcome::Failure(error) => eprintln!("✗ Authentication failed: {error}"),
        AuthenticationOutcome::Pass => println!("- Not a Microsoft token"),
        AuthenticationOutcome::InProgress => println!("- Redirect in progress"),
    }
}
