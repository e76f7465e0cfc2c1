use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

use crate::error::Error;
use crate::error::Result;

/// Normalized identity record produced by a successful authentication
///
/// The `id` is guaranteed to be non-empty. Profiles are built with
/// [`UserProfile::new`] or deserialized, and both reject an empty id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "UserProfileRecord")]
pub struct UserProfile {
    /// Provider-unique user id
    id: String,
    /// Display name, empty when the provider has none
    pub display_name: String,
    /// Name of the authenticator that produced this profile
    pub provider: String,
    pub name: UserProfileName,
    pub emails: Option<Vec<UserProfileEmail>>,
    pub photos: Option<Vec<UserProfilePhoto>>,
}

/// Structured user name, each part defaulting to an empty string
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfileName {
    pub family_name: String,
    pub given_name: String,
    pub middle_name: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserProfileRecord {
    id: String,
    display_name: String,
    provider: String,
    name: UserProfileName,
    emails: Option<Vec<UserProfileEmail>>,
    photos: Option<Vec<UserProfilePhoto>>,
}

impl TryFrom<UserProfileRecord> for UserProfile {
    type Error = Error;

    fn try_from(record: UserProfileRecord) -> Result<Self> {
        let mut profile = UserProfile::new(record.id, record.provider)?
            .with_display_name(record.display_name)
            .with_name(record.name)
            .with_emails(record.emails);
        profile.photos = record.photos;
        Ok(profile)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfileEmail {
    pub value: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfilePhoto {
    pub value: String,
}

impl UserProfile {
    /// Create a profile with the given id and provider and empty optional fields
    ///
    /// # Errors
    /// Returns `Error::EmptyProfileId` if `id` is empty
    pub fn new(id: impl Into<String>, provider: impl Into<String>) -> Result<Self> {
        let id = id.into();
        if id.is_empty() {
            return Err(Error::EmptyProfileId);
        }

        Ok(Self {
            id,
            display_name: String::new(),
            provider: provider.into(),
            name: UserProfileName::default(),
            emails: None,
            photos: None,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }

    pub fn with_name(mut self, name: UserProfileName) -> Self {
        self.name = name;
        self
    }

    pub fn with_emails(mut self, emails: Option<Vec<UserProfileEmail>>) -> Self {
        self.emails = emails;
        self
    }
}

/// Hook for adjusting a freshly fetched profile before it is cached
///
/// Called once per successful provider verification, after the identity
/// check and before the profile is stored. `document` is the raw JSON
/// object returned by the provider, so implementations can copy fields the
/// normalized profile does not carry.
pub trait UserProfileDelegate: Send + Sync {
    fn update(&self, profile: &mut UserProfile, document: &Map<String, Value>);
}

impl<F> UserProfileDelegate for F
where
    F: Fn(&mut UserProfile, &Map<String, Value>) + Send + Sync,
{
    fn update(&self, profile: &mut UserProfile, document: &Map<String, Value>) {
        self(profile, document)
    }
}
