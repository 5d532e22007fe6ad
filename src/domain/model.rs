use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Shipper,
    Driver,
    #[default]
    Both,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Shipper => "SHIPPER",
            UserRole::Driver => "DRIVER",
            UserRole::Both => "BOTH",
        }
    }

    pub fn is_shipper(&self) -> bool {
        matches!(self, UserRole::Shipper | UserRole::Both)
    }

    pub fn is_driver(&self) -> bool {
        matches!(self, UserRole::Driver | UserRole::Both)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SHIPPER" => Ok(UserRole::Shipper),
            "DRIVER" => Ok(UserRole::Driver),
            "BOTH" => Ok(UserRole::Both),
            other => Err(format!("unknown role '{}' (expected SHIPPER, DRIVER or BOTH)", other)),
        }
    }
}

/// 服務（貨運工作）的生命週期狀態，由遠端 API 驅動
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServiceStatus {
    #[default]
    Publicado,
    EmNegociacao,
    Aceito,
    Coletado,
    Entregue,
    Cancelado,
}

impl ServiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceStatus::Publicado => "PUBLICADO",
            ServiceStatus::EmNegociacao => "EM_NEGOCIACAO",
            ServiceStatus::Aceito => "ACEITO",
            ServiceStatus::Coletado => "COLETADO",
            ServiceStatus::Entregue => "ENTREGUE",
            ServiceStatus::Cancelado => "CANCELADO",
        }
    }
}

impl fmt::Display for ServiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OfferKind {
    Accept,
    Counter,
}

impl OfferKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OfferKind::Accept => "ACCEPT",
            OfferKind::Counter => "COUNTER",
        }
    }
}

impl fmt::Display for OfferKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OfferKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ACCEPT" => Ok(OfferKind::Accept),
            "COUNTER" => Ok(OfferKind::Counter),
            other => Err(format!("unknown offer kind '{}' (expected ACCEPT or COUNTER)", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OfferStatus {
    Pending,
    Accepted,
    Rejected,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: UserRole,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: UserRole,
}

/// 發布新服務時送出的內容，也是 `Service` 的主體欄位
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewService {
    pub title: String,
    pub description: String,
    pub service_type: String,
    pub origin_address: String,
    pub origin_lat: f64,
    pub origin_lng: f64,
    pub dest_address: String,
    pub dest_lat: f64,
    pub dest_lng: f64,
    #[serde(deserialize_with = "lenient_datetime::deserialize")]
    pub pickup_window_start: DateTime<Utc>,
    #[serde(deserialize_with = "lenient_datetime::deserialize")]
    pub pickup_window_end: DateTime<Utc>,
    #[serde(deserialize_with = "lenient_datetime::deserialize")]
    pub delivery_window_start: DateTime<Utc>,
    #[serde(deserialize_with = "lenient_datetime::deserialize")]
    pub delivery_window_end: DateTime<Utc>,
    pub offered_price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: i64,
    pub created_by_user_id: i64,
    #[serde(default)]
    pub status: ServiceStatus,
    #[serde(flatten)]
    pub details: NewService,
}

impl Service {
    pub fn title(&self) -> &str {
        &self.details.title
    }

    pub fn destination(&self) -> (f64, f64) {
        (self.details.dest_lat, self.details.dest_lng)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServicePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offered_price: Option<f64>,
}

impl ServicePatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.offered_price.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewOffer {
    pub kind: OfferKind,
    pub price: f64,
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Offer {
    pub id: i64,
    pub service_id: i64,
    pub driver_user_id: i64,
    pub kind: OfferKind,
    pub price: f64,
    #[serde(default)]
    pub message: Option<String>,
    pub status: OfferStatus,
}

/// 司機宣告的未來可用時段與目的地
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverIntent {
    pub current_lat: Option<f64>,
    pub current_lng: Option<f64>,
    pub intended_dest_lat: f64,
    pub intended_dest_lng: f64,
    pub intended_dest_address: String,
    #[serde(deserialize_with = "lenient_datetime::deserialize")]
    pub available_from: DateTime<Utc>,
    #[serde(deserialize_with = "lenient_datetime::deserialize")]
    pub available_to: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackhaulSuggestion {
    pub service_id: i64,
    pub title: String,
    pub offered_price: f64,
    pub pickup_distance_km: f64,
    pub detour_distance_km: f64,
    pub origin_to_dest_km: f64,
    pub score: f64,
}

/// `{"ok": true, "status": "..."}` 類型的確認回應
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusAck {
    pub ok: bool,
    #[serde(default)]
    pub status: Option<ServiceStatus>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ServiceQuery {
    pub status: ServiceStatus,
    pub near_lat: Option<f64>,
    pub near_lng: Option<f64>,
    pub radius_km: Option<f64>,
}

impl ServiceQuery {
    pub fn published() -> Self {
        Self::default()
    }

    pub fn near(mut self, lat: f64, lng: f64, radius_km: Option<f64>) -> Self {
        self.near_lat = Some(lat);
        self.near_lng = Some(lng);
        self.radius_km = radius_km;
        self
    }

    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("status", self.status.as_str().to_string())];
        // 伺服器只在經緯度同時存在時才做距離篩選
        if let (Some(lat), Some(lng)) = (self.near_lat, self.near_lng) {
            pairs.push(("near_lat", lat.to_string()));
            pairs.push(("near_lng", lng.to_string()));
            if let Some(radius) = self.radius_km {
                pairs.push(("radius_km", radius.to_string()));
            }
        }
        pairs
    }
}

/// 司機未宣告回程時的目的地與搜尋半徑
pub const DEFAULT_DEST_ADDRESS: &str = "São Paulo";
pub const DEFAULT_DEST: (f64, f64) = (-23.55, -46.63);
pub const DEFAULT_BACKHAUL_RADIUS_KM: f64 = 300.0;

#[derive(Debug, Clone, PartialEq)]
pub struct BackhaulQuery {
    pub from_lat: f64,
    pub from_lng: f64,
    pub intended_dest_lat: f64,
    pub intended_dest_lng: f64,
    pub radius_km: f64,
}

impl BackhaulQuery {
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("from_lat", self.from_lat.to_string()),
            ("from_lng", self.from_lng.to_string()),
            ("intended_dest_lat", self.intended_dest_lat.to_string()),
            ("intended_dest_lng", self.intended_dest_lng.to_string()),
            ("radius_km", self.radius_km.to_string()),
        ]
    }
}

/// 伺服器回傳的時間可能沒有時區（naive），視為 UTC
pub mod lenient_datetime {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer};

    pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
            .map(|naive| naive.and_utc())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {}", raw)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service_json() -> serde_json::Value {
        serde_json::json!({
            "id": 7,
            "created_by_user_id": 2,
            "status": "EM_NEGOCIACAO",
            "title": "Carga SP-Campinas",
            "description": "Paletes",
            "service_type": "LOTACAO",
            "origin_address": "São Paulo",
            "origin_lat": -23.55,
            "origin_lng": -46.63,
            "dest_address": "Campinas",
            "dest_lat": -22.9,
            "dest_lng": -47.06,
            "pickup_window_start": "2024-10-01T08:00:00",
            "pickup_window_end": "2024-10-01T10:00:00.123456",
            "delivery_window_start": "2024-10-01T11:00:00Z",
            "delivery_window_end": "2024-10-01T16:00:00-03:00",
            "offered_price": 1800.0
        })
    }

    #[test]
    fn test_service_deserializes_naive_and_offset_timestamps() {
        let service: Service = serde_json::from_value(service_json()).unwrap();
        assert_eq!(service.id, 7);
        assert_eq!(service.status, ServiceStatus::EmNegociacao);
        assert_eq!(service.title(), "Carga SP-Campinas");
        assert_eq!(service.destination(), (-22.9, -47.06));
        assert_eq!(
            service.details.pickup_window_start.to_rfc3339(),
            "2024-10-01T08:00:00+00:00"
        );
        assert_eq!(
            service.details.delivery_window_end.to_rfc3339(),
            "2024-10-01T19:00:00+00:00"
        );
    }

    #[test]
    fn test_service_status_wire_names() {
        let statuses: Vec<ServiceStatus> =
            serde_json::from_str(r#"["PUBLICADO","ACEITO","COLETADO","ENTREGUE","CANCELADO"]"#).unwrap();
        assert_eq!(statuses[0], ServiceStatus::Publicado);
        assert_eq!(statuses[4].as_str(), "CANCELADO");
        assert_eq!(ServiceStatus::EmNegociacao.to_string(), "EM_NEGOCIACAO");
    }

    #[test]
    fn test_role_parsing_and_capabilities() {
        assert_eq!("driver".parse::<UserRole>().unwrap(), UserRole::Driver);
        assert!("admin".parse::<UserRole>().is_err());
        assert!(UserRole::Both.is_driver() && UserRole::Both.is_shipper());
        assert!(!UserRole::Shipper.is_driver());
        assert_eq!(serde_json::to_string(&UserRole::Both).unwrap(), "\"BOTH\"");
    }

    #[test]
    fn test_service_patch_skips_absent_fields() {
        let patch = ServicePatch {
            offered_price: Some(2100.0),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&patch).unwrap(),
            serde_json::json!({"offered_price": 2100.0})
        );
        assert!(ServicePatch::default().is_empty());
    }

    #[test]
    fn test_service_query_only_sends_complete_proximity_filter() {
        let plain = ServiceQuery::published();
        assert_eq!(plain.to_pairs(), vec![("status", "PUBLICADO".to_string())]);

        let partial = ServiceQuery {
            near_lat: Some(-23.5),
            ..Default::default()
        };
        assert_eq!(partial.to_pairs().len(), 1);

        let near = ServiceQuery::published().near(-23.5, -46.6, Some(50.0));
        let keys: Vec<&str> = near.to_pairs().iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec!["status", "near_lat", "near_lng", "radius_km"]);
    }

    #[test]
    fn test_assignment_null_is_none() {
        let parsed: Option<Service> = serde_json::from_str("null").unwrap();
        assert!(parsed.is_none());
    }
}
