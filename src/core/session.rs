use crate::core::api::ApiClient;
use crate::domain::ports::TokenStore;
use crate::utils::error::Result;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub const TOKEN_KEY: &str = "token";

/// API 客戶端加上本地儲存的 token
#[derive(Clone)]
pub struct Session {
    api: ApiClient,
    store: Arc<dyn TokenStore>,
}

impl Session {
    pub fn new(api: ApiClient, store: Arc<dyn TokenStore>) -> Self {
        Self { api, store }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// 沒有 token 時回傳空字串
    pub fn token(&self) -> Result<String> {
        Ok(self.store.get_item(TOKEN_KEY)?.unwrap_or_default())
    }

    pub fn is_authenticated(&self) -> Result<bool> {
        Ok(!self.token()?.is_empty())
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<()> {
        let token = self.api.login(email, password).await?;
        self.store.set_item(TOKEN_KEY, &token.access_token)?;
        tracing::info!("🔐 Logged in as {}", email);
        Ok(())
    }

    pub fn logout(&self) -> Result<()> {
        self.store.remove_item(TOKEN_KEY)?;
        tracing::info!("🔓 Token removed from local storage");
        Ok(())
    }
}

/// 行程內的儲存，適合測試或一次性的 session
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        let storage = Self::new();
        if let Ok(mut items) = storage.items.lock() {
            items.insert(TOKEN_KEY.to_string(), token.to_string());
        }
        storage
    }
}

impl TokenStore for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let items = self.items.lock().map_err(poisoned)?;
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let mut items = self.items.lock().map_err(poisoned)?;
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        let mut items = self.items.lock().map_err(poisoned)?;
        items.remove(key);
        Ok(())
    }
}

fn poisoned<T>(_: std::sync::PoisonError<T>) -> crate::utils::error::ClientError {
    crate::utils::error::ClientError::IoError(std::io::Error::new(
        std::io::ErrorKind::Other,
        "memory storage lock poisoned",
    ))
}
