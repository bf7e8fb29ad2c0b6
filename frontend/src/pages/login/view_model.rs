use super::repository::LoginRepository;
use crate::api::{ApiError, Claims, LoginRequest};
use crate::router::Route;

#[derive(Clone)]
pub struct LoginViewModel {
    repo: LoginRepository,
}

impl LoginViewModel {
    pub fn new(repo: LoginRepository) -> Self {
        Self { repo }
    }

    /// Signs in and returns the claims of the new session together with the
    /// route the user lands on.
    pub async fn submit(&self, username: &str, password: &str) -> Result<(Claims, Route), ApiError> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(ApiError::validation("Username and password are required."));
        }

        self.repo
            .login(LoginRequest {
                user_name: username.to_string(),
                password: password.to_string(),
            })
            .await?;

        let claims = match self.repo.current_claims()? {
            Some(claims) => claims,
            None => {
                if let Err(err) = self.repo.logout() {
                    tracing::warn!(error = %err, "Failed to clear unreadable session");
                }
                return Err(ApiError::unknown(
                    "The login response did not contain a readable session token.",
                ));
            }
        };
        let landing = Route::MyRequests.resolve(Some(&claims));
        tracing::info!(user = claims.display_name(), route = landing.path(), "Signed in");
        Ok((claims, landing))
    }

    pub fn sign_out(&self) -> Result<(), ApiError> {
        self.repo.logout()
    }
}
