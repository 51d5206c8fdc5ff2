use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub id: Uuid,
    pub api_id: Uuid,
    pub method: String, // GET, POST, PUT, DELETE, PATCH, etc.
    pub path: String,
    pub description: String,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct CreateEndpoint {
    pub method: String,
    pub path: String,
    pub description: String,
}
