//! Caller privilege.

/// Closed set of caller roles, from least to most privileged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CallerRole {
    Player,
    /// Admin or system caller
    Admin,
}

impl CallerRole {
    /// Role named by a token's `role` claim. Anything but `"admin"` is a player.
    pub fn from_claim(role: Option<&str>) -> Self {
        match role {
            Some("admin") => CallerRole::Admin,
            _ => CallerRole::Player,
        }
    }

    /// Whether this role meets `required`.
    pub fn satisfies(self, required: CallerRole) -> bool {
        self >= required
    }

    pub fn is_admin(self) -> bool {
        self == CallerRole::Admin
    }
}
