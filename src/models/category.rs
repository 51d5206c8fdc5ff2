use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    /// Display color, e.g. `#3b82f6`
    pub color: String,
}
