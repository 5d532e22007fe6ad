use super::{settle, status_message, MSG_ERROR};
use crate::core::router::Route;
use crate::core::session::Session;
use crate::domain::model::{NewService, ServicePatch};
use crate::domain::ports::Page;
use crate::domain::view::View;
use crate::utils::error::{ClientError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

pub struct MyServicesPage;

#[async_trait]
impl Page for MyServicesPage {
    fn route(&self) -> Route {
        Route::ShipperServices
    }

    async fn render(&self, session: &Session) -> Result<View> {
        let token = session.token()?;
        let mut view = View::new("Meus serviços");
        match settle(session.api().my_services(&token).await)? {
            Ok(services) => {
                tracing::info!("📦 Loaded {} services", services.len());
                for service in services {
                    view = view.link(
                        format!("{} - {}", service.title(), service.status),
                        Route::ShipperService(service.id),
                    );
                }
            }
            Err(_) => view = view.message(MSG_ERROR),
        }
        Ok(view)
    }
}

/// 新服務表單；未填的座標與價格使用預設值
#[derive(Debug, Clone, PartialEq)]
pub struct NewServiceForm {
    pub title: String,
    pub description: String,
    pub service_type: String,
    pub origin_address: String,
    pub origin_lat: f64,
    pub origin_lng: f64,
    pub dest_address: String,
    pub dest_lat: f64,
    pub dest_lng: f64,
    pub offered_price: f64,
}

impl Default for NewServiceForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            service_type: "LOTACAO".to_string(),
            origin_address: String::new(),
            origin_lat: -23.55,
            origin_lng: -46.63,
            dest_address: String::new(),
            dest_lat: -22.9,
            dest_lng: -47.06,
            offered_price: 1000.0,
        }
    }
}

impl NewServiceForm {
    /// 四個時間窗口都填入同一個時間點
    pub fn to_payload(&self, now: DateTime<Utc>) -> NewService {
        NewService {
            title: self.title.clone(),
            description: self.description.clone(),
            service_type: self.service_type.clone(),
            origin_address: self.origin_address.clone(),
            origin_lat: self.origin_lat,
            origin_lng: self.origin_lng,
            dest_address: self.dest_address.clone(),
            dest_lat: self.dest_lat,
            dest_lng: self.dest_lng,
            pickup_window_start: now,
            pickup_window_end: now,
            delivery_window_start: now,
            delivery_window_end: now,
            offered_price: self.offered_price,
        }
    }

    fn form_view(&self) -> View {
        View::new("Novo Serviço")
            .line(format!("Título: {}", self.title))
            .line(format!("Descrição: {}", self.description))
            .line(format!("Origem: {}", self.origin_address))
            .line(format!("Destino: {}", self.dest_address))
            .line(format!("Preço: {}", self.offered_price))
    }

    pub async fn submit(&self, session: &Session) -> Result<View> {
        self.submit_at(session, Utc::now()).await
    }

    pub async fn submit_at(&self, session: &Session, now: DateTime<Utc>) -> Result<View> {
        let token = session.token()?;
        let result = session
            .api()
            .create_service(&token, &self.to_payload(now))
            .await;
        if let Ok(service) = &result {
            tracing::info!("📦 Published service #{}", service.id);
        }
        Ok(self.form_view().message(status_message(result, "Criado!")?))
    }
}

#[async_trait]
impl Page for NewServiceForm {
    fn route(&self) -> Route {
        Route::ShipperNewService
    }

    async fn render(&self, _session: &Session) -> Result<View> {
        Ok(self.form_view())
    }
}

/// 某個服務收到的報價
pub struct ServiceOffersPage {
    service_id: i64,
}

impl ServiceOffersPage {
    pub fn new(service_id: i64) -> Self {
        Self { service_id }
    }

    pub async fn accept(&self, session: &Session, offer_id: i64) -> Result<View> {
        let token = session.token()?;
        let result = session.api().accept_offer(&token, offer_id).await;
        if result.is_ok() {
            tracing::info!("🤝 Accepted offer #{} on service #{}", offer_id, self.service_id);
        }
        Ok(View::new("Ofertas").message(status_message(result, "Aceita")?))
    }
}

#[async_trait]
impl Page for ServiceOffersPage {
    fn route(&self) -> Route {
        Route::ShipperService(self.service_id)
    }

    async fn render(&self, session: &Session) -> Result<View> {
        let token = session.token()?;
        let mut view = View::new("Ofertas");
        match settle(session.api().list_offers(&token, self.service_id).await)? {
            Ok(offers) => {
                for offer in offers {
                    view = view.line(format!(
                        "#{} {} R$ {} [Aceitar contraproposta: easytips shipper accept {} {}]",
                        offer.id, offer.kind, offer.price, self.service_id, offer.id
                    ));
                }
            }
            Err(_) => view = view.message(MSG_ERROR),
        }
        Ok(view)
    }
}

/// 編輯仍在議價中的服務（標題、描述、價格）
#[derive(Debug, Clone)]
pub struct EditServiceForm {
    pub service_id: i64,
    pub patch: ServicePatch,
}

impl EditServiceForm {
    pub async fn submit(&self, session: &Session) -> Result<View> {
        if self.patch.is_empty() {
            return Err(ClientError::ValidationError {
                message: "nothing to update: pass --title, --description or --price".to_string(),
            });
        }
        let token = session.token()?;
        let result = session
            .api()
            .patch_service(&token, self.service_id, &self.patch)
            .await;
        let mut view = View::new("Editar serviço");
        if let Ok(service) = &result {
            view = view.line(format!(
                "{} - R$ {} - {}",
                service.title(),
                service.details.offered_price,
                service.status
            ));
        }
        Ok(view.message(status_message(result, "Atualizado")?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::api::ApiClient;
    use crate::core::session::MemoryStorage;
    use chrono::TimeZone;
    use httpmock::prelude::*;
    use httpmock::Method::PATCH;
    use std::sync::Arc;

    fn session(server: &MockServer) -> Session {
        Session::new(
            ApiClient::new(server.base_url(), 5).unwrap(),
            Arc::new(MemoryStorage::with_token("shipper-token")),
        )
    }

    #[tokio::test]
    async fn test_new_service_posts_defaults_with_now_windows() {
        let server = MockServer::start();
        let now = Utc.with_ymd_and_hms(2024, 10, 1, 12, 0, 0).unwrap();
        let create_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/services")
                .header("authorization", "Bearer shipper-token")
                .json_body(serde_json::json!({
                    "title": "Carga SP-Campinas",
                    "description": "Paletes",
                    "service_type": "LOTACAO",
                    "origin_address": "São Paulo",
                    "origin_lat": -23.55,
                    "origin_lng": -46.63,
                    "dest_address": "Campinas",
                    "dest_lat": -22.9,
                    "dest_lng": -47.06,
                    "pickup_window_start": "2024-10-01T12:00:00Z",
                    "pickup_window_end": "2024-10-01T12:00:00Z",
                    "delivery_window_start": "2024-10-01T12:00:00Z",
                    "delivery_window_end": "2024-10-01T12:00:00Z",
                    "offered_price": 1000.0
                }));
            then.status(200).json_body(serde_json::json!({
                "id": 1,
                "created_by_user_id": 1,
                "status": "PUBLICADO",
                "title": "Carga SP-Campinas",
                "description": "Paletes",
                "service_type": "LOTACAO",
                "origin_address": "São Paulo",
                "origin_lat": -23.55,
                "origin_lng": -46.63,
                "dest_address": "Campinas",
                "dest_lat": -22.9,
                "dest_lng": -47.06,
                "pickup_window_start": "2024-10-01T12:00:00",
                "pickup_window_end": "2024-10-01T12:00:00",
                "delivery_window_start": "2024-10-01T12:00:00",
                "delivery_window_end": "2024-10-01T12:00:00",
                "offered_price": 1000.0
            }));
        });

        let form = NewServiceForm {
            title: "Carga SP-Campinas".to_string(),
            description: "Paletes".to_string(),
            origin_address: "São Paulo".to_string(),
            dest_address: "Campinas".to_string(),
            ..Default::default()
        };
        let view = form.submit_at(&session(&server), now).await.unwrap();

        create_mock.assert();
        assert_eq!(view.message.as_deref(), Some("Criado!"));
    }

    #[tokio::test]
    async fn test_new_service_rejected_shows_erro() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/services");
            then.status(403)
                .json_body(serde_json::json!({"detail": "Apenas embarcador"}));
        });

        let view = NewServiceForm::default().submit(&session(&server)).await.unwrap();
        assert_eq!(view.message.as_deref(), Some("Erro"));
    }

    #[tokio::test]
    async fn test_offers_page_lists_offers() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/services/1/offers");
            then.status(200).json_body(serde_json::json!([
                {"id": 5, "service_id": 1, "driver_user_id": 2, "kind": "COUNTER",
                 "price": 2000.0, "message": "faço por 2k", "status": "PENDING"}
            ]));
        });

        let view = ServiceOffersPage::new(1).render(&session(&server)).await.unwrap();
        assert_eq!(view.lines.len(), 1);
        assert!(view.lines[0].starts_with("#5 COUNTER R$ 2000"));
    }

    #[tokio::test]
    async fn test_edit_patches_only_given_fields() {
        let server = MockServer::start();
        let patch_mock = server.mock(|when, then| {
            when.method(PATCH)
                .path("/services/1")
                .header("authorization", "Bearer shipper-token")
                .json_body(serde_json::json!({"offered_price": 1500.0}));
            then.status(200).json_body(serde_json::json!({
                "id": 1,
                "created_by_user_id": 1,
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
                "pickup_window_start": "2024-10-01T12:00:00",
                "pickup_window_end": "2024-10-01T12:00:00",
                "delivery_window_start": "2024-10-01T12:00:00",
                "delivery_window_end": "2024-10-01T12:00:00",
                "offered_price": 1500.0
            }));
        });

        let form = EditServiceForm {
            service_id: 1,
            patch: ServicePatch {
                offered_price: Some(1500.0),
                ..Default::default()
            },
        };
        let view = form.submit(&session(&server)).await.unwrap();

        patch_mock.assert();
        assert_eq!(view.message.as_deref(), Some("Atualizado"));
        assert_eq!(view.lines, vec!["Carga SP-Campinas - R$ 1500 - EM_NEGOCIACAO".to_string()]);
    }

    #[tokio::test]
    async fn test_edit_requires_a_change() {
        let server = MockServer::start();
        let form = EditServiceForm {
            service_id: 1,
            patch: ServicePatch::default(),
        };
        assert!(matches!(
            form.submit(&session(&server)).await,
            Err(ClientError::ValidationError { .. })
        ));
    }
}
