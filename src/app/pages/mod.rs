pub mod auth;
pub mod dashboard;
pub mod driver;
pub mod home;
pub mod shipper;

use crate::utils::error::{ClientError, Result};

pub const MSG_ERROR: &str = "Erro";

/// 非 2xx 回應交給頁面當作訊息顯示；網路、儲存等錯誤往上傳
pub(crate) fn settle<T>(result: Result<T>) -> Result<std::result::Result<T, ClientError>> {
    match result {
        Ok(value) => Ok(Ok(value)),
        Err(err @ ClientError::ResponseError { .. }) => {
            tracing::warn!("⚠️ {}", err);
            Ok(Err(err))
        }
        Err(err) => Err(err),
    }
}

/// 成功顯示 `ok`，API 拒絕時顯示 `Erro`
pub(crate) fn status_message<T>(result: Result<T>, ok: &str) -> Result<String> {
    Ok(match settle(result)? {
        Ok(_) => ok.to_string(),
        Err(_) => MSG_ERROR.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settle_only_absorbs_response_errors() {
        let rejected: Result<()> = Err(ClientError::ResponseError {
            status: 400,
            detail: None,
        });
        assert!(matches!(settle(rejected), Ok(Err(_))));

        let broken: Result<()> = Err(ClientError::ValidationError {
            message: "x".to_string(),
        });
        assert!(settle(broken).is_err());
    }

    #[test]
    fn test_status_message() {
        assert_eq!(status_message(Ok(()), "Salvo").unwrap(), "Salvo");
        let rejected: Result<()> = Err(ClientError::ResponseError {
            status: 403,
            detail: Some("Apenas caminhoneiro".to_string()),
        });
        assert_eq!(status_message(rejected, "Salvo").unwrap(), "Erro");
    }
}
