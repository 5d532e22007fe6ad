use crate::core::router::Route;
use crate::core::session::Session;
use crate::domain::view::View;
use crate::utils::error::Result;
use async_trait::async_trait;

/// 鍵值儲存，相當於瀏覽器的 localStorage
pub trait TokenStore: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> Result<()>;
    fn remove_item(&self, key: &str) -> Result<()>;
}

pub trait ConfigProvider: Send + Sync {
    fn api_url(&self) -> &str;
    fn timeout_seconds(&self) -> u64;
    fn storage_path(&self) -> &str;
    fn intended_destination(&self) -> (f64, f64);
    fn intended_destination_address(&self) -> &str;
    fn backhaul_radius_km(&self) -> f64;
}

#[async_trait]
pub trait Page: Send + Sync {
    fn route(&self) -> Route;
    async fn render(&self, session: &Session) -> Result<View>;
}
