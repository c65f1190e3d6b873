// Console access: only staff and admins see location data.

pub const ACCESS_DENIED: &str = "Access denied. This console is available to staff and administrators only.";

pub fn is_staff_authorized(role: Option<&str>) -> bool {
    matches!(role, Some("staff") | Some("admin"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn staff_and_admin_allowed() {
        assert!(is_staff_authorized(Some("staff")));
        assert!(is_staff_authorized(Some("admin")));
    }

    #[test]
    fn others_denied() {
        assert!(!is_staff_authorized(Some("customer")));
        assert!(!is_staff_authorized(Some("Staff")));
        assert!(!is_staff_authorized(Some("")));
        assert!(!is_staff_authorized(None));
    }
}
