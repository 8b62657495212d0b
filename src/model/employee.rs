use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "employee_id": "EMP001",
        "full_name": "Aarav Sharma",
        "email": "aarav@company.com",
        "department": "IT",
        "created_at": "2025-02-06T10:00:00Z"
    })
)]
pub struct Employee {
    #[schema(example = "EMP001")]
    pub employee_id: String,

    #[schema(example = "Aarav Sharma")]
    pub full_name: String,

    #[schema(example = "aarav@company.com", format = "email")]
    pub email: String,

    #[schema(example = "IT")]
    pub department: String,

    #[schema(
        example = "2025-02-06T10:00:00Z",
        value_type = String,
        format = "date-time"
    )]
    pub created_at: DateTime<Utc>,
}

/// Fields the caller supplies; the id and timestamp are assigned on create.
#[derive(Debug, Clone)]
pub struct NewEmployee {
    pub full_name: String,
    pub email: String,
    pub department: String,
}

impl NewEmployee {
    pub fn into_employee(self, employee_id: String, created_at: DateTime<Utc>) -> Employee {
        Employee {
            employee_id,
            full_name: self.full_name,
            email: self.email,
            department: self.department,
            created_at,
        }
    }
}
