//! Resource DTOs exchanged with the backend

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Resource identifier
///
/// The backend issues UUID strings, but integer ids are accepted as well.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResourceId {
    /// Numeric id
    Number(i64),
    /// String id (usually a UUID)
    Text(String),
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceId::Number(id) => write!(f, "{}", id),
            ResourceId::Text(id) => f.write_str(id),
        }
    }
}

impl From<i64> for ResourceId {
    fn from(id: i64) -> Self {
        ResourceId::Number(id)
    }
}

impl From<&str> for ResourceId {
    fn from(id: &str) -> Self {
        ResourceId::Text(id.to_string())
    }
}

/// A school
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct School {
    /// Identifier
    pub id: ResourceId,
    /// Display name
    pub name: String,
    /// Short unique code
    pub code: String,
    /// Street address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Contact phone
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Contact email
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Creation time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// Last update time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// An assignment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    /// Identifier
    pub id: ResourceId,
    /// Title
    pub title: String,
    /// Due date as sent by the backend
    pub due_date: String,
    /// Owning course
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_id: Option<ResourceId>,
    /// Longer description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Maximum attainable score
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_score: Option<i64>,
    /// Kind of assignment (e.g., "homework")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignment_type: Option<String>,
    /// Author
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<ResourceId>,
}

impl Assignment {
    /// Parse the due date as RFC 3339
    pub fn due_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.due_date).ok().map(|dt| dt.with_timezone(&Utc))
    }
}

/// Login credentials
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Username
    pub username: String,
    /// Password
    pub password: String,
}

impl LoginRequest {
    /// Create login credentials
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self { username: username.into(), password: password.into() }
    }
}

/// Registration details
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    /// Username
    pub username: String,
    /// Email address
    pub email: String,
    /// Password
    pub password: String,
}

/// Successful login response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Bearer token
    pub token: String,
}
