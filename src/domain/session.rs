use serde::{Deserialize, Serialize};

/// Role carried by the session collaborator. Anything other than "admin"
/// is treated as a regular member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[serde(other)]
    Member,
}

impl Role {
    pub fn parse(raw: &str) -> Self {
        if raw == "admin" {
            Role::Admin
        } else {
            Role::Member
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Member => "member",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub role: Role,
}

/// What the editor knows about the viewer. The editor trusts it as given.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub user: Option<User>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self { user: None }
    }

    pub fn user(name: impl Into<String>, role: Role) -> Self {
        Self {
            user: Some(User {
                name: name.into(),
                role,
            }),
        }
    }

    pub fn admin(name: impl Into<String>) -> Self {
        Self::user(name, Role::Admin)
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn is_admin(&self) -> bool {
        matches!(&self.user, Some(User { role: Role::Admin, .. }))
    }

    pub fn name(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.name.as_str())
    }
}
