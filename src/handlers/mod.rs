//! HTTP handlers for auth/approval, user profile, inventory and suppliers.

pub mod auth;
pub mod inventory;
pub mod supplier;
pub mod user;

/// Numeric path id. Anything unparseable can match no row, so it maps to `None` (404).
pub(crate) fn parse_id(id_str: &str) -> Option<i64> {
    id_str.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::parse_id;

    #[test]
    fn non_numeric_ids_match_nothing() {
        assert_eq!(parse_id("42"), Some(42));
        assert_eq!(parse_id("abc"), None);
        assert_eq!(parse_id(""), None);
    }
}
