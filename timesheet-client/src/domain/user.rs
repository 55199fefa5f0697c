#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum AccessLevel {
    #[default]
    Anonymous = 0,
    Normal = 1,
    Admin = 2,
}

impl AccessLevel {
    pub fn from_level(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Anonymous),
            1 => Some(Self::Normal),
            2 => Some(Self::Admin),
            _ => None,
        }
    }

    /// Guess used when the server does not tell: only `admin` is an admin.
    pub fn for_username(username: &str) -> Self {
        if username.eq_ignore_ascii_case("admin") {
            Self::Admin
        } else {
            Self::Normal
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AccessLevel::Anonymous => "anonymous",
            AccessLevel::Normal => "normal",
            AccessLevel::Admin => "admin",
        }
    }
}

impl std::fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct User {
    pub username: String,
    pub level: AccessLevel,
}

impl User {
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// A logged in user. An empty name is treated as nobody.
    pub fn named(username: &str, level: Option<AccessLevel>) -> Self {
        if username.is_empty() {
            return Self::anonymous();
        }

        Self {
            username: username.to_string(),
            level: level.unwrap_or_else(|| AccessLevel::for_username(username)),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.level == AccessLevel::Admin
    }

    pub fn is_logged_in(&self) -> bool {
        matches!(self.level, AccessLevel::Normal | AccessLevel::Admin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anonymous_is_not_logged_in() {
        let user = User::anonymous();
        assert!(!user.is_logged_in());
        assert!(!user.is_admin());
    }

    #[test]
    fn admin_is_guessed_from_the_name() {
        assert!(User::named("Admin", None).is_admin());
        assert!(!User::named("michael", None).is_admin());
        assert!(User::named("michael", None).is_logged_in());
    }

    #[test]
    fn reported_level_wins() {
        let user = User::named("admin", Some(AccessLevel::Normal));
        assert!(!user.is_admin());
        assert!(user.is_logged_in());
    }

    #[test]
    fn empty_name_is_anonymous() {
        assert_eq!(User::named("", Some(AccessLevel::Admin)), User::anonymous());
    }
}
