use async_trait::async_trait;

use crate::domain::error::DomainError;
use crate::domain::user::User;

/// A member as stored, with the argon2 PHC string used to check a login.
#[derive(Debug, Clone)]
pub(crate) struct MemberCredentials {
    pub(crate) user: User,
    pub(crate) password_hash: String,
}

/// Sign-up input after normalization; the password is already hashed.
#[derive(Debug, Clone)]
pub(crate) struct NewMember {
    pub(crate) username: String,
    pub(crate) email: String,
    pub(crate) password_hash: String,
}

/// Storage of board members.
///
/// Usernames and emails are unique; a clash surfaces as
/// `DomainError::AlreadyExists` naming the taken field.
#[async_trait]
pub(crate) trait UserRepository: Send + Sync {
    async fn create_user(&self, input: NewMember) -> Result<User, DomainError>;
    /// Lookup for sign-in. `None` when no member has that (normalized) username.
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<MemberCredentials>, DomainError>;
}
