//! Provider authentication API
//!
//! Identity is fully delegated: the server never hashes passwords or
//! validates tokens itself. Sign-in exchanges credentials for a
//! provider-issued access token, and token verification asks the provider
//! who the token belongs to.

use serde::Deserialize;

use super::error::{ProviderResult, error_from_response};
use super::ProviderClient;

/// Authenticated user as reported by the provider
#[derive(Debug, Clone, Deserialize)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Session returned by a successful password sign-in
#[derive(Debug, Clone, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    pub user: AuthUser,
}

/// Auth sub-API, borrowed from a [`ProviderClient`]
pub struct AuthApi<'a> {
    client: &'a ProviderClient,
}

impl<'a> AuthApi<'a> {
    pub(super) fn new(client: &'a ProviderClient) -> Self {
        Self { client }
    }

    /// Exchange email + password for an access token
    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> ProviderResult<AuthSession> {
        let url = format!(
            "{}/auth/v1/token?grant_type=password",
            self.client.base_url()
        );

        let resp = self
            .client
            .http()
            .post(&url)
            .header("apikey", self.client.service_key())
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(error_from_response(resp).await);
        }

        Ok(resp.json().await?)
    }

    /// Verify a user's access token by asking the provider for its owner
    ///
    /// Any rejection (expired, malformed, revoked) comes back as a
    /// provider error; callers translate it to 401.
    pub async fn get_user(&self, token: &str) -> ProviderResult<AuthUser> {
        let url = format!("{}/auth/v1/user", self.client.base_url());

        let resp = self
            .client
            .http()
            .get(&url)
            .header("apikey", self.client.service_key())
            .bearer_auth(token)
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(error_from_response(resp).await);
        }

        Ok(resp.json().await?)
    }
}
