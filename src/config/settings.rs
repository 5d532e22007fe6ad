use crate::config::toml_config::TomlConfig;
use crate::domain::model::{DEFAULT_BACKHAUL_RADIUS_KM, DEFAULT_DEST, DEFAULT_DEST_ADDRESS};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_coordinates, validate_non_empty_string, validate_path, validate_range,
    validate_required_field, validate_url, Validate,
};
use std::path::{Path, PathBuf};

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
pub const DEFAULT_CONFIG_FILE: &str = "easytips.toml";

/// 命令列覆寫值，優先權最高
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub api_url: Option<String>,
    pub storage: Option<String>,
    pub timeout_seconds: Option<u64>,
}

/// 合併後的有效設定：命令列 > 環境變數 > TOML > 預設值
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub api_url: String,
    pub timeout_seconds: u64,
    pub storage_path: String,
    pub intended_dest_address: String,
    pub intended_dest: (f64, f64),
    pub backhaul_radius_km: f64,
}

impl Settings {
    pub fn layered<F>(overrides: &Overrides, file: Option<&TomlConfig>, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // 命令列已指定時不解析環境變數
        let env_timeout = match overrides.timeout_seconds {
            Some(_) => None,
            None => match env("EASYTIPS_TIMEOUT") {
                Some(raw) => Some(raw.trim().parse::<u64>().map_err(|_| {
                    crate::utils::error::ClientError::InvalidConfigValueError {
                        field: "EASYTIPS_TIMEOUT".to_string(),
                        value: raw.clone(),
                        reason: "expected a whole number of seconds".to_string(),
                    }
                })?),
                None => None,
            },
        };

        let api_url = overrides
            .api_url
            .clone()
            .or_else(|| env("EASYTIPS_API_URL"))
            .or_else(|| env("NEXT_PUBLIC_API_URL"))
            .or_else(|| file.and_then(|f| f.api_url()).map(str::to_string))
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let timeout_seconds = overrides
            .timeout_seconds
            .or(env_timeout)
            .or_else(|| file.and_then(|f| f.timeout_seconds()))
            .unwrap_or(DEFAULT_TIMEOUT_SECONDS);

        let storage_path = overrides
            .storage
            .clone()
            .or_else(|| env("EASYTIPS_STORAGE"))
            .or_else(|| file.and_then(|f| f.storage_path()).map(str::to_string))
            .unwrap_or_else(default_storage_path);

        let driver = file.and_then(|f| f.driver.clone()).unwrap_or_default();
        // 目的地座標要嘛都給，要嘛都不給
        let intended_dest = match (driver.intended_dest_lat, driver.intended_dest_lng) {
            (None, None) => DEFAULT_DEST,
            (lat, lng) => (
                *validate_required_field("driver.intended_dest_lat", &lat)?,
                *validate_required_field("driver.intended_dest_lng", &lng)?,
            ),
        };

        Ok(Self {
            api_url,
            timeout_seconds,
            storage_path,
            intended_dest_address: driver
                .intended_dest_address
                .unwrap_or_else(|| DEFAULT_DEST_ADDRESS.to_string()),
            intended_dest,
            backhaul_radius_km: driver.backhaul_radius_km.unwrap_or(DEFAULT_BACKHAUL_RADIUS_KM),
        })
    }

    /// 讀取 `--config` 指定的檔案；沒指定時若目前目錄有 `easytips.toml` 就使用它
    pub fn load(overrides: &Overrides, config_file: Option<&str>) -> Result<Self> {
        let path = match config_file {
            Some(path) => Some(path),
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => Some(DEFAULT_CONFIG_FILE),
            None => None,
        };
        let file = match path {
            Some(path) => {
                let file = TomlConfig::from_file(path)?;
                tracing::debug!("📁 Loaded configuration from {}", path);
                Some(file)
            }
            None => None,
        };
        Self::layered(overrides, file.as_ref(), |key| std::env::var(key).ok())
    }
}

fn default_storage_path() -> String {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".easytips")
        .join("storage.json")
        .to_string_lossy()
        .into_owned()
}

impl ConfigProvider for Settings {
    fn api_url(&self) -> &str {
        &self.api_url
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }

    fn storage_path(&self) -> &str {
        &self.storage_path
    }

    fn intended_destination(&self) -> (f64, f64) {
        self.intended_dest
    }

    fn intended_destination_address(&self) -> &str {
        &self.intended_dest_address
    }

    fn backhaul_radius_km(&self) -> f64 {
        self.backhaul_radius_km
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_url("api.url", &self.api_url)?;
        validate_range("api.timeout_seconds", self.timeout_seconds, 1, 600)?;
        validate_path("storage.path", &self.storage_path)?;
        validate_non_empty_string("driver.intended_dest_address", &self.intended_dest_address)?;
        validate_coordinates("driver.intended_dest", self.intended_dest.0, self.intended_dest.1)?;
        // 伺服器限制 radius_km <= 1000
        validate_range("driver.backhaul_radius_km", self.backhaul_radius_km, 1.0, 1000.0)?;
        Ok(())
    }
}
