//! User model with role-based access control.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Access tier governing which handlers a user may invoke.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, Hash)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Visitor,
    Customer,
    Tech,
    Support,
    Ops,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Visitor => "visitor",
            Self::Customer => "customer",
            Self::Tech => "tech",
            Self::Support => "support",
            Self::Ops => "ops",
            Self::Admin => "admin",
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "visitor" => Ok(Self::Visitor),
            "customer" => Ok(Self::Customer),
            "tech" => Ok(Self::Tech),
            "support" => Ok(Self::Support),
            "ops" => Ok(Self::Ops),
            "admin" => Ok(Self::Admin),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

/// Full user row from database (includes password_hash — never serialize to API).
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub full_name: String,
    pub phone: Option<String>,
    pub role: UserRole,
    pub is_active: bool,
    pub failed_login_attempts: i32,
    pub locked_until: Option<DateTime<Utc>>,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User response DTO — excludes password_hash and internal fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub phone: Option<String>,
    pub role: UserRole,
    pub is_active: bool,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            email: u.email,
            full_name: u.full_name,
            phone: u.phone,
            role: u.role,
            is_active: u.is_active,
            last_login: u.last_login,
            created_at: u.created_at,
        }
    }
}

/// Public self-registration; the role is always `customer`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterCustomer {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
    #[validate(length(min = 1, max = 120))]
    pub full_name: String,
    #[validate(length(max = 32))]
    pub phone: Option<String>,
}

/// Admin-issued account of any role.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUser {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
    #[validate(length(min = 1, max = 120))]
    pub full_name: String,
    #[validate(length(max = 32))]
    pub phone: Option<String>,
    pub role: UserRole,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct UpdateUser {
    pub full_name: Option<String>,
    /// Absent leaves the number as is; `null` clears it.
    #[serde(default, deserialize_with = "present")]
    pub phone: Option<Option<String>>,
    pub role: Option<UserRole>,
    pub is_active: Option<bool>,
}

/// Maps a present key to `Some`, so a `null` value survives as `Some(None)`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_role_serialization() {
        let json = serde_json::to_string(&UserRole::Support).unwrap();
        assert_eq!(json, "\"support\"");
        let parsed: UserRole = serde_json::from_str("\"ops\"").unwrap();
        assert_eq!(parsed, UserRole::Ops);
    }

    #[test]
    fn user_role_from_str_matches_wire_names() {
        for role in [
            UserRole::Visitor,
            UserRole::Customer,
            UserRole::Tech,
            UserRole::Support,
            UserRole::Ops,
            UserRole::Admin,
        ] {
            assert_eq!(role.as_str().parse::<UserRole>().unwrap(), role);
        }
        assert!("superuser".parse::<UserRole>().is_err());
    }

    #[test]
    fn user_response_excludes_password() {
        let json = serde_json::to_string(&UserResponse {
            id: Uuid::nil(),
            email: "admin@test.com".to_string(),
            full_name: "Admin".to_string(),
            phone: None,
            role: UserRole::Admin,
            is_active: true,
            last_login: None,
            created_at: Utc::now(),
        })
        .unwrap();
        assert!(!json.contains("password"));
        assert!(!json.contains("hash"));
    }

    #[test]
    fn register_rejects_short_password_and_bad_email() {
        let input = RegisterCustomer {
            email: "not-an-email".to_string(),
            password: "short".to_string(),
            full_name: "Jane".to_string(),
            phone: None,
        };
        let errors = input.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("password"));
    }

    #[test]
    fn update_distinguishes_absent_phone_from_null() {
        let untouched: UpdateUser = serde_json::from_str(r#"{"full_name":"Ada"}"#).unwrap();
        assert_eq!(untouched.phone, None);

        let cleared: UpdateUser = serde_json::from_str(r#"{"phone":null}"#).unwrap();
        assert_eq!(cleared.phone, Some(None));

        let set: UpdateUser = serde_json::from_str(r#"{"phone":"+1 555 0100"}"#).unwrap();
        assert_eq!(set.phone, Some(Some("+1 555 0100".to_string())));
    }
}
