use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Custom serde module for DateTime to ensure RFC3339 string format
mod datetime_format {
    use chrono::{DateTime, Utc};
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let s = date.to_rfc3339();
        serializer.serialize_str(&s)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<DateTime<Utc>>().map_err(serde::de::Error::custom)
    }
}

/// A friend as returned by the friends listing endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Friend {
    pub puid: String,
    pub display_name: String,
    #[serde(default)]
    pub profile_picture_url: Option<String>,
}

impl Friend {
    pub fn new(puid: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            puid: puid.into(),
            display_name: display_name.into(),
            profile_picture_url: None,
        }
    }
}

/// Body of `GET /friends`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FriendsResponse {
    #[serde(default)]
    pub friends: Vec<Friend>,
}

/// Tagged friend ids as stored on a post.
///
/// Older posts carry the ids as a JSON-encoded string (the raw form field),
/// newer ones as a plain array. Both shapes deserialize here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TaggedFriends {
    Ids(Vec<String>),
    Encoded(String),
}

impl Default for TaggedFriends {
    fn default() -> Self {
        TaggedFriends::Ids(Vec::new())
    }
}

impl From<Vec<String>> for TaggedFriends {
    fn from(ids: Vec<String>) -> Self {
        TaggedFriends::Ids(ids)
    }
}

impl From<Vec<&str>> for TaggedFriends {
    fn from(ids: Vec<&str>) -> Self {
        TaggedFriends::Ids(ids.into_iter().map(String::from).collect())
    }
}

impl From<String> for TaggedFriends {
    fn from(encoded: String) -> Self {
        TaggedFriends::Encoded(encoded)
    }
}

impl From<&str> for TaggedFriends {
    fn from(encoded: &str) -> Self {
        TaggedFriends::Encoded(encoded.to_string())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub author_username: String,
    pub content: String,
    #[serde(with = "datetime_format")]
    pub created_at: DateTime<Utc>,
    /// Friends tagged on this post (if any)
    #[serde(default)]
    pub tagged_friends: Option<TaggedFriends>,
    /// Free-text location attached to this post
    #[serde(default)]
    pub location: Option<String>,
}

// Request/Response types for API
#[derive(Debug, Serialize, Deserialize)]
pub struct CreatePostRequest {
    pub content: String,
    /// JSON array of tagged puids, exactly as held in the composer form
    pub tagged_friends: String,
    pub location: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdatePostRequest {
    pub content: String,
    /// JSON array of tagged puids, exactly as held in the composer form
    pub tagged_friends: String,
    pub location: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub details: Option<String>,
}
