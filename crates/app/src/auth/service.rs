//! Auth service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::PgPool;
use tracing::debug;

use crate::{
    auth::{
        ApiTokenId, AuthServiceError, IssuedApiToken, Principal, format_api_token,
        generate_api_token_secret, hash_api_token, parse_api_token, repository::PgAuthRepository,
    },
    domain::users::records::UserId,
};

#[derive(Debug, Clone)]
pub struct PgAuthService {
    repository: PgAuthRepository,
}

impl PgAuthService {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: PgAuthRepository::new(pool),
        }
    }

    /// Issue a new API token for the given user.
    ///
    /// The raw token is only available in the returned value.
    ///
    /// # Errors
    ///
    /// Returns [`AuthServiceError::InvalidReference`] if the user does not
    /// exist, or a storage error if the insert fails.
    pub async fn issue_api_token(&self, user: UserId) -> Result<IssuedApiToken, AuthServiceError> {
        let secret = generate_api_token_secret();
        let token = format_api_token(&secret);

        let metadata = self
            .repository
            .create_api_token(user, &hash_api_token(&token))
            .await?;

        Ok(IssuedApiToken { token, metadata })
    }

    /// Revoke a token by id. Returns `true` if the token was active.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn revoke_api_token(&self, token: ApiTokenId) -> Result<bool, AuthServiceError> {
        let revoked = self.repository.revoke_api_token(token).await?;

        Ok(revoked.is_some())
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<Principal, AuthServiceError> {
        parse_api_token(bearer_token).map_err(|_| AuthServiceError::NotFound)?;

        let token_hash = hash_api_token(bearer_token);

        let principal = self
            .repository
            .find_principal_by_token_hash(&token_hash)
            .await?
            .ok_or(AuthServiceError::NotFound)?;

        // Authentication does not depend on this write succeeding.
        if let Err(error) = self.repository.touch_api_token_last_used(&token_hash).await {
            debug!(error = %error, "failed to record api token use");
        }

        Ok(principal)
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Resolve a bearer token to the user it was issued for.
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<Principal, AuthServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::TestContext;

    use super::*;

    #[tokio::test]
    async fn issued_token_authenticates_as_user() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("token@example.com").await;

        let issued = ctx.auth.issue_api_token(user).await?;
        let principal = ctx.auth.authenticate_bearer(&issued.token).await?;

        assert_eq!(
            principal,
            Principal {
                user,
                is_admin: false
            }
        );
        assert_eq!(issued.metadata.user, user);

        Ok(())
    }

    #[tokio::test]
    async fn admin_flag_is_carried_into_principal() -> TestResult {
        let ctx = TestContext::new().await;
        let admin = ctx.create_admin("admin@example.com").await;

        let issued = ctx.auth.issue_api_token(admin).await?;
        let principal = ctx.auth.authenticate_bearer(&issued.token).await?;

        assert!(principal.is_admin);

        Ok(())
    }

    #[tokio::test]
    async fn unknown_token_is_not_found() {
        let ctx = TestContext::new().await;

        let token = format_api_token(&generate_api_token_secret());
        let result = ctx.auth.authenticate_bearer(&token).await;

        assert!(
            matches!(result, Err(AuthServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn malformed_token_is_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.auth.authenticate_bearer("not-a-token").await;

        assert!(
            matches!(result, Err(AuthServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn revoked_token_no_longer_authenticates() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("revoked@example.com").await;

        let issued = ctx.auth.issue_api_token(user).await?;

        assert!(ctx.auth.revoke_api_token(issued.metadata.id).await?);
        assert!(!ctx.auth.revoke_api_token(issued.metadata.id).await?);

        let result = ctx.auth.authenticate_bearer(&issued.token).await;

        assert!(
            matches!(result, Err(AuthServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn issuing_for_unknown_user_is_invalid_reference() {
        let ctx = TestContext::new().await;

        let result = ctx.auth.issue_api_token(UserId::from_i64(i64::MAX)).await;

        assert!(
            matches!(result, Err(AuthServiceError::InvalidReference)),
            "expected InvalidReference, got {result:?}"
        );
    }
}
