use serde::Serialize;

/// An individual whose attendance is tracked. Scoped globally; attendance
/// rows are always keyed per (organization, person).
#[derive(Debug, Clone, Serialize)]
pub struct Person {
    pub id: i64,
    pub external_id: String,
    pub name: String,
    pub is_bot: bool,
}

/// A roster entry: a person registered in an organization, with the role
/// identifiers they carry there.
#[derive(Debug, Clone, Serialize)]
pub struct Member {
    pub person_id: i64,
    pub external_id: String,
    pub name: String,
    pub roles: Vec<String>,
}

impl Member {
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}
