use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    /// 伺服器回傳非 2xx 狀態
    #[error("API responded with status {status}{}", .detail.as_deref().map(|d| format!(": {}", d)).unwrap_or_default())]
    ResponseError { status: u16, detail: Option<String> },

    #[error("Unknown route: {path}")]
    UnknownRoute { path: String },
}

pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Network,
    Server,
    Authentication,
    Validation,
    Storage,
    Navigation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// 程序結束碼；任何錯誤都不是 0
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl ClientError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ClientError::HttpError(_) => ErrorCategory::Network,
            ClientError::IoError(_) => ErrorCategory::Storage,
            ClientError::SerializationError(_) => ErrorCategory::Server,
            ClientError::ConfigError { .. }
            | ClientError::ConfigValidationError { .. }
            | ClientError::InvalidConfigValueError { .. }
            | ClientError::MissingConfigError { .. } => ErrorCategory::Configuration,
            ClientError::ValidationError { .. } => ErrorCategory::Validation,
            ClientError::ResponseError { status, .. } if *status == 401 || *status == 403 => {
                ErrorCategory::Authentication
            }
            ClientError::ResponseError { status, .. } if *status >= 500 => ErrorCategory::Server,
            ClientError::ResponseError { .. } => ErrorCategory::Validation,
            ClientError::UnknownRoute { .. } => ErrorCategory::Navigation,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network | ErrorCategory::Server => ErrorSeverity::Medium,
            ErrorCategory::Authentication
            | ErrorCategory::Validation
            | ErrorCategory::Navigation => ErrorSeverity::High,
            ErrorCategory::Configuration | ErrorCategory::Storage => ErrorSeverity::Critical,
        }
    }

    /// 伺服器的 `detail` 欄位（若有）
    pub fn detail(&self) -> Option<&str> {
        match self {
            ClientError::ResponseError { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Configuration => {
                "Check --api-url, the TOML config file and EASYTIPS_* environment variables"
            }
            ErrorCategory::Network => "Make sure the API server is running and reachable",
            ErrorCategory::Server => "The API returned an unexpected response; try again later",
            ErrorCategory::Authentication => {
                "Log in again with `easytips login` or check that your role allows this action"
            }
            ErrorCategory::Validation => "Review the values you submitted",
            ErrorCategory::Storage => "Check that the local storage file is readable and writable",
            ErrorCategory::Navigation => "Run `easytips open /dashboard` to see the available pages",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ClientError::HttpError(e) if e.is_timeout() => "The API did not answer in time".to_string(),
            ClientError::HttpError(e) if e.is_connect() => "Could not connect to the API".to_string(),
            ClientError::ResponseError { detail: Some(detail), .. } => detail.clone(),
            ClientError::ResponseError { status, .. } => format!("Request failed (HTTP {})", status),
            ClientError::MissingConfigError { field } => format!("Missing setting: {}", field),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_error_display_includes_detail() {
        let err = ClientError::ResponseError {
            status: 401,
            detail: Some("Credenciais inválidas".to_string()),
        };
        assert_eq!(err.to_string(), "API responded with status 401: Credenciais inválidas");
        assert_eq!(err.detail(), Some("Credenciais inválidas"));
        assert_eq!(err.category(), ErrorCategory::Authentication);
        assert_eq!(err.user_friendly_message(), "Credenciais inválidas");
    }

    #[test]
    fn test_response_error_without_detail() {
        let err = ClientError::ResponseError {
            status: 502,
            detail: None,
        };
        assert_eq!(err.to_string(), "API responded with status 502");
        assert_eq!(err.category(), ErrorCategory::Server);
        assert_eq!(err.severity(), ErrorSeverity::Medium);
    }

    #[test]
    fn test_config_errors_are_critical() {
        let err = ClientError::MissingConfigError {
            field: "api.url".to_string(),
        };
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert_eq!(err.user_friendly_message(), "Missing setting: api.url");
    }

    #[test]
    fn test_unknown_route_fails_the_process() {
        let err = ClientError::UnknownRoute {
            path: "/admin".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Navigation);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert_ne!(err.severity().exit_code(), 0);
    }
}
