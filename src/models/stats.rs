use time::OffsetDateTime;
use uuid::Uuid;

/// Uptime reported for listings that have no stats row yet
pub const DEFAULT_UPTIME: f64 = 99.9;

#[derive(Debug, Clone, PartialEq)]
pub struct ApiStats {
    pub id: Uuid,
    pub api_id: Uuid,
    pub total_calls: i64,
    pub last_week_calls: i64,
    pub uptime: f64,
    pub avg_response_time: f64,
    pub last_updated: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateStats {
    pub total_calls: i64,
    pub last_week_calls: i64,
    pub uptime: f64,
    pub avg_response_time: f64,
}

impl Default for CreateStats {
    fn default() -> Self {
        Self {
            total_calls: 0,
            last_week_calls: 0,
            uptime: DEFAULT_UPTIME,
            avg_response_time: 0.0,
        }
    }
}
