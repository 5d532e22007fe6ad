use crate::core::router::Route;
use crate::core::session::Session;
use crate::domain::ports::Page;
use crate::domain::view::View;
use crate::utils::error::Result;
use async_trait::async_trait;

pub struct HomePage;

#[async_trait]
impl Page for HomePage {
    fn route(&self) -> Route {
        Route::Home
    }

    async fn render(&self, _session: &Session) -> Result<View> {
        Ok(View::new("Easy Tips")
            .line("MVP marketplace de fretes")
            .link("Entrar", Route::Login))
    }
}
