use serde::Serialize;

/// A tenant under which attendance is tracked.
/// Created on first reference by external id, immutable afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct Organization {
    pub id: i64,
    pub external_id: String,
    pub name: String,
}
