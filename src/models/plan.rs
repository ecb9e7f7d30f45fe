//! Internet service plans offered in the catalogue.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Plan {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub download_mbps: i32,
    pub upload_mbps: i32,
    pub monthly_price_cents: i64,
    pub installation_fee_cents: i64,
    pub data_cap_gb: Option<i32>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePlan {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    #[validate(length(min = 1, max = 80), custom(function = "validate_slug"))]
    pub slug: String,
    pub description: Option<String>,
    #[validate(range(min = 1))]
    pub download_mbps: i32,
    #[validate(range(min = 1))]
    pub upload_mbps: i32,
    #[validate(range(min = 0))]
    pub monthly_price_cents: i64,
    #[validate(range(min = 0))]
    #[serde(default)]
    pub installation_fee_cents: i64,
    #[validate(range(min = 1))]
    pub data_cap_gb: Option<i32>,
}

#[derive(Debug, Clone, Deserialize, Default, Validate)]
pub struct UpdatePlan {
    #[validate(length(min = 1, max = 120))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 1))]
    pub download_mbps: Option<i32>,
    #[validate(range(min = 1))]
    pub upload_mbps: Option<i32>,
    #[validate(range(min = 0))]
    pub monthly_price_cents: Option<i64>,
    #[validate(range(min = 0))]
    pub installation_fee_cents: Option<i64>,
    #[validate(range(min = 1))]
    pub data_cap_gb: Option<i32>,
    pub is_active: Option<bool>,
}

/// Slugs are lowercase ASCII words joined by single hyphens.
pub fn validate_slug(slug: &str) -> Result<(), ValidationError> {
    let well_formed = !slug.starts_with('-')
        && !slug.ends_with('-')
        && !slug.contains("--")
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    if well_formed {
        Ok(())
    } else {
        Err(ValidationError::new("slug"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_format() {
        assert!(validate_slug("fiber-500").is_ok());
        assert!(validate_slug("basic").is_ok());
        assert!(validate_slug("Fiber-500").is_err());
        assert!(validate_slug("-fiber").is_err());
        assert!(validate_slug("fiber--500").is_err());
        assert!(validate_slug("fiber 500").is_err());
    }

    #[test]
    fn create_plan_requires_positive_speeds() {
        let input = CreatePlan {
            name: "Fiber 500".to_string(),
            slug: "fiber-500".to_string(),
            description: None,
            download_mbps: 0,
            upload_mbps: 100,
            monthly_price_cents: 5999,
            installation_fee_cents: 0,
            data_cap_gb: None,
        };
        let errors = input.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("download_mbps"));
    }
}
