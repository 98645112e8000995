use crate::claims::JwtClaims;

/// Verified identity of the caller for one request.
///
/// Built from validated claims by the transport layer and passed explicitly
/// to whoever needs it. Anonymous requests carry no context at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    username: String,
    is_admin: bool,
}

impl AuthContext {
    pub fn new(username: impl Into<String>, is_admin: bool) -> Self {
        Self {
            username: username.into(),
            is_admin,
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn is_admin(&self) -> bool {
        self.is_admin
    }
}

impl From<JwtClaims> for AuthContext {
    fn from(claims: JwtClaims) -> Self {
        Self::new(claims.username, claims.is_admin)
    }
}
