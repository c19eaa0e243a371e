use derive_more::{Display, From};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Identity of an employee as issued by the employee directory.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display, From,
    ToSchema,
)]
#[serde(transparent)]
#[schema(value_type = String, example = "EMP-001")]
pub struct EmployeeId(pub String);

impl EmployeeId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EmployeeId {
    fn from(value: &str) -> Self {
        EmployeeId(value.to_string())
    }
}

/// One visible roster member. Only the identity matters to the engine,
/// the name is carried for display ordering and logs.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(
    example = json!({
        "employee_id": "EMP-001",
        "name": "John Doe"
    })
)]
pub struct RosterEntry {
    #[schema(value_type = String, example = "EMP-001")]
    pub employee_id: EmployeeId,

    #[schema(example = "John Doe", nullable = true)]
    pub name: Option<String>,
}

impl RosterEntry {
    pub fn new(employee_id: impl Into<EmployeeId>) -> Self {
        Self {
            employee_id: employee_id.into(),
            name: None,
        }
    }
}
