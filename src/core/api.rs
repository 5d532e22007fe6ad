use crate::domain::model::{
    BackhaulQuery, BackhaulSuggestion, DriverIntent, LoginRequest, NewOffer, NewService, Offer,
    RegisterRequest, Service, ServicePatch, ServiceQuery, StatusAck, TokenResponse, User,
};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{ClientError, Result};
use reqwest::header::{AUTHORIZATION, CACHE_CONTROL, CONTENT_TYPE};
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

/// 原始回應：狀態碼加上本文，是否成功由呼叫端判斷
#[derive(Debug, Clone)]
pub struct ApiResponse {
    status: StatusCode,
    body: String,
}

impl ApiResponse {
    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn is_ok(&self) -> bool {
        self.status.is_success()
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_str(&self.body)?)
    }

    /// FastAPI 的 `detail` 可能是字串，也可能是驗證錯誤陣列
    pub fn detail(&self) -> Option<String> {
        let value: serde_json::Value = serde_json::from_str(&self.body).ok()?;
        match value.get("detail")? {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Array(items) => {
                let messages: Vec<&str> = items
                    .iter()
                    .filter_map(|item| item.get("msg").and_then(|m| m.as_str()))
                    .collect();
                if messages.is_empty() {
                    None
                } else {
                    Some(messages.join("; "))
                }
            }
            _ => None,
        }
    }

    pub fn error_for_status(self) -> Result<Self> {
        if self.is_ok() {
            Ok(self)
        } else {
            Err(ClientError::ResponseError {
                status: self.status.as_u16(),
                detail: self.detail(),
            })
        }
    }
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    client: Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, timeout_seconds: u64) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()?;
        Ok(Self { base_url, client })
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        Self::new(config.api_url(), config.timeout_seconds())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// 唯一的 HTTP 出口：空 token 不送 Authorization，沒有 body 就不送本文
    pub async fn request(
        &self,
        path: &str,
        method: Method,
        token: &str,
        body: Option<serde_json::Value>,
    ) -> Result<ApiResponse> {
        let url = self.url(path);
        tracing::debug!("📡 {} {}", method, path);

        let mut request = self
            .client
            .request(method.clone(), &url)
            .header(CONTENT_TYPE, "application/json")
            .header(CACHE_CONTROL, "no-store");

        if !token.is_empty() {
            request = request.header(AUTHORIZATION, format!("Bearer {}", token));
        }

        if let Some(body) = body {
            request = request.body(serde_json::to_vec(&body)?);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        tracing::debug!("📡 {} {} -> {}", method, path, status);

        Ok(ApiResponse { status, body })
    }

    async fn call<T: DeserializeOwned>(
        &self,
        path: &str,
        method: Method,
        token: &str,
        body: Option<serde_json::Value>,
    ) -> Result<T> {
        self.request(path, method, token, body)
            .await?
            .error_for_status()?
            .json()
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<TokenResponse> {
        let payload = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        self.call("/auth/login", Method::POST, "", Some(to_body(&payload)?))
            .await
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<User> {
        self.call("/auth/register", Method::POST, "", Some(to_body(request)?))
            .await
    }

    pub async fn me(&self, token: &str) -> Result<User> {
        self.call("/me", Method::GET, token, None).await
    }

    pub async fn list_services(&self, query: &ServiceQuery) -> Result<Vec<Service>> {
        let path = with_query("/services", &query.to_pairs());
        self.call(&path, Method::GET, "", None).await
    }

    pub async fn get_service(&self, service_id: i64) -> Result<Service> {
        self.call(&format!("/services/{}", service_id), Method::GET, "", None)
            .await
    }

    pub async fn patch_service(
        &self,
        token: &str,
        service_id: i64,
        patch: &ServicePatch,
    ) -> Result<Service> {
        self.call(
            &format!("/services/{}", service_id),
            Method::PATCH,
            token,
            Some(to_body(patch)?),
        )
        .await
    }

    pub async fn my_services(&self, token: &str) -> Result<Vec<Service>> {
        self.call("/shipper/my-services", Method::GET, token, None)
            .await
    }

    pub async fn create_service(&self, token: &str, service: &NewService) -> Result<Service> {
        self.call("/services", Method::POST, token, Some(to_body(service)?))
            .await
    }

    pub async fn list_offers(&self, token: &str, service_id: i64) -> Result<Vec<Offer>> {
        self.call(
            &format!("/services/{}/offers", service_id),
            Method::GET,
            token,
            None,
        )
        .await
    }

    pub async fn create_offer(&self, token: &str, service_id: i64, offer: &NewOffer) -> Result<Offer> {
        self.call(
            &format!("/services/{}/offers", service_id),
            Method::POST,
            token,
            Some(to_body(offer)?),
        )
        .await
    }

    pub async fn accept_offer(&self, token: &str, offer_id: i64) -> Result<Offer> {
        self.call(
            &format!("/offers/{}/accept", offer_id),
            Method::POST,
            token,
            None,
        )
        .await
    }

    /// 沒有指派時伺服器回 JSON `null`
    pub async fn my_assignment(&self, token: &str) -> Result<Option<Service>> {
        self.call("/driver/my-assignment", Method::GET, token, None)
            .await
    }

    pub async fn collect(&self, token: &str, service_id: i64) -> Result<StatusAck> {
        self.call(
            &format!("/assignments/{}/collect", service_id),
            Method::POST,
            token,
            None,
        )
        .await
    }

    pub async fn deliver(&self, token: &str, service_id: i64) -> Result<StatusAck> {
        self.call(
            &format!("/assignments/{}/deliver", service_id),
            Method::POST,
            token,
            None,
        )
        .await
    }

    pub async fn set_intent(&self, token: &str, intent: &DriverIntent) -> Result<StatusAck> {
        self.call("/drivers/intent", Method::POST, token, Some(to_body(intent)?))
            .await
    }

    pub async fn backhaul_suggestions(
        &self,
        token: &str,
        driver_id: i64,
        query: &BackhaulQuery,
    ) -> Result<Vec<BackhaulSuggestion>> {
        let path = with_query(
            &format!("/drivers/{}/backhaul_suggestions", driver_id),
            &query.to_pairs(),
        );
        self.call(&path, Method::GET, token, None).await
    }
}

fn to_body<T: Serialize + ?Sized>(value: &T) -> Result<serde_json::Value> {
    Ok(serde_json::to_value(value)?)
}

pub fn with_query(path: &str, pairs: &[(&str, String)]) -> String {
    if pairs.is_empty() {
        return path.to_string();
    }
    let query = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs.iter().map(|(k, v)| (*k, v.as_str())))
        .finish();
    format!("{}?{}", path, query)
}
