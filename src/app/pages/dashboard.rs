use crate::core::router::Route;
use crate::core::session::Session;
use crate::domain::ports::Page;
use crate::domain::view::View;
use crate::utils::error::Result;
use async_trait::async_trait;

pub struct DashboardPage;

#[async_trait]
impl Page for DashboardPage {
    fn route(&self) -> Route {
        Route::Dashboard
    }

    async fn render(&self, _session: &Session) -> Result<View> {
        Ok(View::new("Dashboard")
            .link("Novo frete", Route::ShipperNewService)
            .link("Meus fretes", Route::ShipperServices)
            .link("Feed motorista", Route::DriverFeed)
            .link("Intenção de retorno", Route::DriverIntent)
            .link("Minha viagem", Route::DriverAssignment))
    }
}
