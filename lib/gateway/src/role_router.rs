use ecoguard::Role;

pub const USER_PREFIX: &str = "/api/user";
pub const ADMIN_PREFIX: &str = "/api/admin";

/// Only an admin session reaches the admin namespace; anything else,
/// including no session at all, is served from the user namespace.
pub fn resolve_prefix(role: Option<Role>) -> &'static str {
    match role {
        Some(Role::Admin) => ADMIN_PREFIX,
        Some(Role::User) | None => USER_PREFIX,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_prefix() {
        assert_eq!(resolve_prefix(Some(Role::Admin)), "/api/admin");
    }

    #[test]
    fn test_user_prefix() {
        assert_eq!(resolve_prefix(Some(Role::User)), "/api/user");
        assert_eq!(resolve_prefix(None), "/api/user");
    }
}
