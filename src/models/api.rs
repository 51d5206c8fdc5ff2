use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use utoipa::ToSchema;
use uuid::Uuid;

/// How clients authenticate against a listed API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
pub enum AuthType {
    #[default]
    #[serde(rename = "none")]
    None,
    #[serde(rename = "apiKey")]
    ApiKey,
    #[serde(rename = "oauth2")]
    OAuth2,
}

impl AuthType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthType::None => "none",
            AuthType::ApiKey => "apiKey",
            AuthType::OAuth2 => "oauth2",
        }
    }

    /// Strict parse, used for user input
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "none" => Some(AuthType::None),
            "apiKey" => Some(AuthType::ApiKey),
            "oauth2" => Some(AuthType::OAuth2),
            _ => None,
        }
    }

    /// Lenient parse for stored rows: anything unrecognized reads as `none`
    pub fn from_stored(value: &str) -> Self {
        Self::parse(value).unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Api {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub version: String,
    pub owner: String,
    pub base_url: String,
    pub documentation_url: Option<String>,
    pub category_id: Option<Uuid>,
    pub tags: Vec<String>,
    pub auth_type: AuthType,
    pub auth_description: Option<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct CreateApi {
    pub name: String,
    pub description: String,
    pub version: String,
    pub owner: String,
    pub base_url: String,
    pub documentation_url: Option<String>,
    pub category_id: Option<Uuid>,
    pub tags: Vec<String>,
    pub auth_type: AuthType,
    pub auth_description: Option<String>,
}
