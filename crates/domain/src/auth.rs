use crate::entities::UserRole;
use crate::errors::DomainError;

/// An already-authenticated caller, as handed over by the session layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub user_id: String,
    pub role: UserRole,
}

impl Principal {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

/// Role guard invoked at the top of every protected operation.
pub fn check_authentication(
    principal: &Principal,
    roles: &[UserRole],
) -> Result<(), DomainError> {
    if roles.iter().any(|role| principal.role == *role) {
        Ok(())
    } else {
        Err(DomainError::Unauthorized)
    }
}
