use serde::Deserialize;

/// Access to the claim that identifies the user in an identity token
///
/// Claims types decoded by an [`IdentifierExtractor`](crate::IdentifierExtractor)
/// implement this so the extractor can pull out the identifier generically.
pub trait IdentityClaims {
    /// The stable, provider-scoped user identifier, if the token carries one
    fn user_identifier(&self) -> Option<&str>;
}

/// Claims of a Microsoft identity platform ID token
///
/// Only the fields needed to identify the user are decoded. Every field is
/// optional so that a token missing one of them still decodes and the
/// absence is reported as "no identifier" instead of a parse failure.
#[derive(Debug, Default, Deserialize)]
pub struct MicrosoftIdTokenClaims {
    /// Object id of the user in the tenant; equal to the Graph `/me` `id`
    #[serde(default)]
    pub oid: Option<String>,
    /// Pairwise subject, unique per application
    #[serde(default)]
    pub sub: Option<String>,
    /// Tenant id
    #[serde(default)]
    pub tid: Option<String>,
    #[serde(default)]
    pub iss: Option<String>,
    #[serde(default)]
    pub preferred_username: Option<String>,
}

impl IdentityClaims for MicrosoftIdTokenClaims {
    // `sub` is pairwise per application and never matches the Graph id, so
    // it is not a fallback.
    fn user_identifier(&self) -> Option<&str> {
        self.oid.as_deref().filter(|oid| !oid.is_empty())
    }
}
