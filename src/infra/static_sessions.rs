use crate::app::ports::SessionResolver;
use crate::config::SessionEntry;
use crate::domain::{Session, User};
use std::collections::HashMap;

/// Token table loaded from the `[[sessions]]` config entries.
#[derive(Debug, Default)]
pub struct StaticSessionResolver {
    users: HashMap<String, User>,
}

impl StaticSessionResolver {
    pub fn new(entries: &[SessionEntry]) -> Self {
        let users = entries
            .iter()
            .map(|e| {
                (
                    e.token.clone(),
                    User {
                        name: e.name.clone(),
                        role: e.role,
                    },
                )
            })
            .collect();
        Self { users }
    }
}

impl SessionResolver for StaticSessionResolver {
    fn resolve(&self, token: Option<&str>) -> Session {
        token
            .and_then(|t| self.users.get(t))
            .map(|user| Session {
                user: Some(user.clone()),
            })
            .unwrap_or_else(Session::anonymous)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Role;

    #[test]
    fn test_resolve_known_and_unknown_tokens() {
        let resolver = StaticSessionResolver::new(&[SessionEntry {
            token: "secret".to_string(),
            name: "Chef".to_string(),
            role: Role::Admin,
        }]);

        assert!(resolver.resolve(Some("secret")).is_admin());
        assert!(!resolver.resolve(Some("guess")).is_authenticated());
        assert!(!resolver.resolve(None).is_authenticated());
    }
}
