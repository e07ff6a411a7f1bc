//! Caller roles used as lookup keys for role-specific rules.

use serde::Serialize;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    Developer,
    Designer,
    ProductManager,
    ProjectOwner,
}

impl Role {
    pub const ALL: [Role; 4] = [
        Role::Developer,
        Role::Designer,
        Role::ProductManager,
        Role::ProjectOwner,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Developer => "developer",
            Role::Designer => "designer",
            Role::ProductManager => "product-manager",
            Role::ProjectOwner => "project-owner",
        }
    }

    /// Resolve a role token. Unknown or empty tokens yield `None` rather than an error.
    pub fn from_token(token: &str) -> Option<Role> {
        let t = token.trim();
        Role::ALL
            .into_iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(t))
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
