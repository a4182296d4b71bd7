//! Authentication and site settings endpoints.

use std::time::Instant;

use reqwest::Method;

use super::BlogClient;
use crate::error::Result;
use crate::settings_cache::SettingsCache;
use crate::types::{ChangePasswordRequest, LoginRequest, LoginResponse, Settings};

impl BlogClient {
    /// Log in and keep the returned token for subsequent requests.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse> {
        let req = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let resp: LoginResponse = self
            .send(self.request(Method::POST, "/auth/login").json(&req))
            .await?;
        self.set_token(resp.token.clone());
        tracing::info!("Logged in as {username}");
        Ok(resp)
    }

    /// Forget the stored token. The API has no server-side logout.
    pub fn logout(&self) {
        self.clear_token();
    }

    pub async fn change_password(&self, old_password: &str, new_password: &str) -> Result<()> {
        let req = ChangePasswordRequest {
            old_password: old_password.to_string(),
            new_password: new_password.to_string(),
        };
        self.send_unit(self.request(Method::POST, "/user/password").json(&req))
            .await
    }

    pub async fn settings(&self) -> Result<Settings> {
        self.send(self.request(Method::GET, "/settings")).await
    }

    /// Replace site settings. Callers holding a [`SettingsCache`] should
    /// clear it afterwards.
    pub async fn update_settings(&self, settings: &Settings) -> Result<()> {
        self.send_unit(self.request(Method::PUT, "/settings").json(settings))
            .await
    }

    /// Settings from `cache` while fresh, otherwise fetched and cached.
    pub async fn cached_settings(
        &self,
        cache: &SettingsCache,
        force_refresh: bool,
    ) -> Result<Settings> {
        let now = Instant::now();
        if !force_refresh {
            if let Some(settings) = cache.get(now) {
                return Ok(settings);
            }
        }
        let settings = self.settings().await?;
        cache.set(settings.clone(), now);
        Ok(settings)
    }
}
