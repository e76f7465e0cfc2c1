use jsonwebtoken::dangerous;
use serde::de::DeserializeOwned;

use crate::claims::IdentityClaims;
use crate::claims::MicrosoftIdTokenClaims;

/// Trait for extracting the claimed user identifier from an identity token
///
/// Extraction only decodes the claim set. Signature and trust verification of
/// the identity token is assumed to have happened elsewhere; the identifier is
/// only ever trusted after the provider confirms it.
pub trait IdentifierExtractor: Send + Sync {
    /// The claims structure decoded from the identity token
    type Claims: IdentityClaims + DeserializeOwned + Send;

    /// Extract the user identifier, or `None` if the token cannot be decoded
    /// or lacks the identifier claim
    fn extract_user_identifier(&self, identity_token: &str) -> Option<String> {
        let token_data = match dangerous::insecure_decode::<Self::Claims>(identity_token) {
            Ok(token_data) => token_data,
            Err(error) => {
                tracing::debug!(kind = ?error.kind(), "Identity token could not be decoded");
                return None;
            }
        };

        token_data.claims.user_identifier().map(str::to_owned)
    }
}

/// Extractor for Microsoft identity platform ID tokens, keyed on the `oid` claim
#[derive(Clone, Debug, Default)]
pub struct MicrosoftExtractor;

impl IdentifierExtractor for MicrosoftExtractor {
    type Claims = MicrosoftIdTokenClaims;
}

/// Extract the `oid` of a Microsoft ID token without verifying its signature
pub fn extract_user_identifier(identity_token: &str) -> Option<String> {
    MicrosoftExtractor.extract_user_identifier(identity_token)
}

#[cfg(test)]
mod tests {
    use jsonwebtoken::encode;
    use jsonwebtoken::EncodingKey;
    use jsonwebtoken::Header;
    use serde_json::json;

    use super::*;

    fn token(claims: serde_json::Value) -> String {
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"identity-test-secret"),
        )
        .unwrap()
    }

    #[test]
    fn extracts_oid() {
        let token = token(json!({ "oid": "U1", "sub": "pairwise", "tid": "T1" }));
        assert_eq!(extract_user_identifier(&token), Some("U1".to_string()));
    }

    #[test]
    fn missing_claim_yields_none() {
        let token = token(json!({ "sub": "pairwise" }));
        assert_eq!(extract_user_identifier(&token), None);
    }

    #[test]
    fn wrongly_typed_claim_yields_none() {
        let token = token(json!({ "oid": 42 }));
        assert_eq!(extract_user_identifier(&token), None);
    }

    #[test]
    fn garbage_yields_none() {
        assert_eq!(extract_user_identifier("not-a-jwt"), None);
        assert_eq!(extract_user_identifier(""), None);
        assert_eq!(extract_user_identifier("a.b.c"), None);
    }
}
