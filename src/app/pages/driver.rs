use super::{settle, status_message, MSG_ERROR};
use crate::core::router::Route;
use crate::core::session::Session;
use crate::domain::model::{
    BackhaulQuery, DriverIntent, NewOffer, OfferKind, Service, ServiceQuery,
    DEFAULT_BACKHAUL_RADIUS_KM, DEFAULT_DEST, DEFAULT_DEST_ADDRESS,
};
use crate::domain::ports::{ConfigProvider, Page};
use crate::domain::view::View;
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// 已發布服務的列表，可選擇以座標與半徑篩選
#[derive(Debug, Clone, Default)]
pub struct FeedPage {
    pub query: ServiceQuery,
}

#[async_trait]
impl Page for FeedPage {
    fn route(&self) -> Route {
        Route::DriverFeed
    }

    async fn render(&self, session: &Session) -> Result<View> {
        let mut view = View::new("Feed");
        match settle(session.api().list_services(&self.query).await)? {
            Ok(services) => {
                tracing::info!("🚚 {} published services in feed", services.len());
                for service in services {
                    view = view.link(
                        format!("{} - R$ {}", service.title(), service.details.offered_price),
                        Route::DriverService(service.id),
                    );
                }
            }
            Err(_) => view = view.message(MSG_ERROR),
        }
        Ok(view)
    }
}

/// 對某個服務出價：直接接受或還價
#[derive(Debug, Clone)]
pub struct OfferForm {
    pub service_id: i64,
    pub price: f64,
    pub message: String,
}

impl OfferForm {
    pub fn new(service_id: i64) -> Self {
        Self {
            service_id,
            price: 0.0,
            message: String::new(),
        }
    }

    fn form_view(&self) -> View {
        View::new("Negociar serviço")
            .line(format!("preço: {}", self.price))
            .line(format!("mensagem: {}", self.message))
    }

    pub async fn send(&self, session: &Session, kind: OfferKind) -> Result<View> {
        let token = session.token()?;
        let offer = NewOffer {
            kind,
            price: self.price,
            message: Some(self.message.clone()),
        };
        let result = session
            .api()
            .create_offer(&token, self.service_id, &offer)
            .await;
        if let Ok(created) = &result {
            tracing::info!(
                "💬 Sent {} offer #{} on service #{} ({})",
                kind,
                created.id,
                self.service_id,
                self.price
            );
        }
        Ok(self.form_view().message(status_message(result, "Enviado")?))
    }
}

#[async_trait]
impl Page for OfferForm {
    fn route(&self) -> Route {
        Route::DriverService(self.service_id)
    }

    async fn render(&self, session: &Session) -> Result<View> {
        let mut view = self.form_view();
        // 顯示服務摘要；取不到時仍然可以出價
        if let Ok(service) = settle(session.api().get_service(self.service_id).await)? {
            view.lines.insert(
                0,
                format!(
                    "{} - R$ {} ({} → {})",
                    service.title(),
                    service.details.offered_price,
                    service.details.origin_address,
                    service.details.dest_address
                ),
            );
        }
        Ok(view)
    }
}

/// 宣告回程目的地
#[derive(Debug, Clone)]
pub struct IntentForm {
    pub address: String,
    pub dest_lat: f64,
    pub dest_lng: f64,
    pub current: Option<(f64, f64)>,
}

impl Default for IntentForm {
    fn default() -> Self {
        Self {
            address: DEFAULT_DEST_ADDRESS.to_string(),
            dest_lat: DEFAULT_DEST.0,
            dest_lng: DEFAULT_DEST.1,
            current: None,
        }
    }
}

impl IntentForm {
    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Self {
        let (dest_lat, dest_lng) = config.intended_destination();
        Self {
            address: config.intended_destination_address().to_string(),
            dest_lat,
            dest_lng,
            current: None,
        }
    }

    /// 可用時段的起訖都設為 `now`
    pub fn to_payload(&self, now: DateTime<Utc>) -> DriverIntent {
        DriverIntent {
            current_lat: self.current.map(|(lat, _)| lat),
            current_lng: self.current.map(|(_, lng)| lng),
            intended_dest_lat: self.dest_lat,
            intended_dest_lng: self.dest_lng,
            intended_dest_address: self.address.clone(),
            available_from: now,
            available_to: now,
        }
    }

    fn form_view(&self) -> View {
        View::new("Destino final pretendido").line(format!("destino: {}", self.address))
    }

    pub async fn submit(&self, session: &Session) -> Result<View> {
        self.submit_at(session, Utc::now()).await
    }

    pub async fn submit_at(&self, session: &Session, now: DateTime<Utc>) -> Result<View> {
        let token = session.token()?;
        let result = session.api().set_intent(&token, &self.to_payload(now)).await;
        Ok(self.form_view().message(status_message(result, "Salvo")?))
    }
}

#[async_trait]
impl Page for IntentForm {
    fn route(&self) -> Route {
        Route::DriverIntent
    }

    async fn render(&self, _session: &Session) -> Result<View> {
        Ok(self.form_view())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentAction {
    Collect,
    Deliver,
}

/// 目前的指派以及從其目的地出發的回程建議
#[derive(Debug, Clone)]
pub struct AssignmentPage {
    pub intended_dest: (f64, f64),
    pub radius_km: f64,
}

impl Default for AssignmentPage {
    fn default() -> Self {
        Self {
            intended_dest: DEFAULT_DEST,
            radius_km: DEFAULT_BACKHAUL_RADIUS_KM,
        }
    }
}

impl AssignmentPage {
    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Self {
        Self {
            intended_dest: config.intended_destination(),
            radius_km: config.backhaul_radius_km(),
        }
    }

    fn backhaul_query(&self, service: &Service) -> BackhaulQuery {
        let (from_lat, from_lng) = service.destination();
        BackhaulQuery {
            from_lat,
            from_lng,
            intended_dest_lat: self.intended_dest.0,
            intended_dest_lng: self.intended_dest.1,
            radius_km: self.radius_km,
        }
    }

    /// 只有 2xx 的 `null` 代表沒有指派；被拒絕時顯示錯誤訊息
    async fn current(
        &self,
        session: &Session,
        token: &str,
    ) -> Result<std::result::Result<Service, View>> {
        match settle(session.api().my_assignment(token).await)? {
            Ok(Some(service)) => Ok(Ok(service)),
            Ok(None) => Ok(Err(View::new("Minha viagem").line("Sem assignment."))),
            Err(_) => Ok(Err(View::new("Minha viagem").message(MSG_ERROR))),
        }
    }

    pub async fn act(&self, session: &Session, action: AssignmentAction) -> Result<View> {
        let token = session.token()?;
        let service = match self.current(session, &token).await? {
            Ok(service) => service,
            Err(view) => return Ok(view),
        };

        let result = match action {
            AssignmentAction::Collect => session.api().collect(&token, service.id).await,
            AssignmentAction::Deliver => session.api().deliver(&token, service.id).await,
        };
        if let Ok(ack) = &result {
            tracing::info!(
                "🚛 Service #{} is now {}",
                service.id,
                ack.status.map(|s| s.to_string()).unwrap_or_default()
            );
        }
        Ok(View::new(format!("Serviço atual: {}", service.title()))
            .message(status_message(result, "ok")?))
    }
}

#[async_trait]
impl Page for AssignmentPage {
    fn route(&self) -> Route {
        Route::DriverAssignment
    }

    async fn render(&self, session: &Session) -> Result<View> {
        let token = session.token()?;
        let service = match self.current(session, &token).await? {
            Ok(service) => service,
            Err(view) => return Ok(view),
        };

        let mut view = View::new(format!("Serviço atual: {}", service.title()))
            .line(format!("status: {}", service.status))
            .line("Sugestões de retorno");

        // 回程建議以登入司機的 id 查詢
        let suggestions = match settle(session.api().me(&token).await)? {
            Ok(me) => {
                settle(
                    session
                        .api()
                        .backhaul_suggestions(&token, me.id, &self.backhaul_query(&service))
                        .await,
                )?
            }
            Err(err) => Err(err),
        };

        match suggestions {
            Ok(suggestions) => {
                tracing::info!("🔁 {} backhaul suggestions", suggestions.len());
                for s in suggestions {
                    view = view.line(format!("{} score {}", s.title, s.score));
                }
            }
            Err(_) => view = view.message(MSG_ERROR),
        }
        Ok(view)
    }
}
