//! Business logic services.

pub mod account;
pub mod auth;
pub mod customer;
pub mod dashboard;
pub mod installation;
pub mod metrics;
pub mod order;
pub mod plan;
pub mod ticket;

/// Human-facing reference such as `ORD-1F3A9C0B`.
pub fn reference_number(prefix: &str) -> String {
    let id = uuid::Uuid::new_v4().simple().to_string();
    format!("{prefix}-{}", id[..8].to_ascii_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_number_shape() {
        let number = reference_number("TKT");
        assert_eq!(number.len(), 12);
        assert!(number.starts_with("TKT-"));
        assert!(number[4..]
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
    }
}
