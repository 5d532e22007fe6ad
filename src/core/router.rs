use crate::app::pages;
use crate::core::session::Session;
use crate::domain::ports::{ConfigProvider, Page};
use crate::domain::view::View;
use crate::utils::error::{ClientError, Result};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Login,
    Register,
    Dashboard,
    ShipperServices,
    ShipperNewService,
    ShipperService(i64),
    DriverFeed,
    DriverService(i64),
    DriverIntent,
    DriverAssignment,
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Home => write!(f, "/"),
            Route::Login => write!(f, "/login"),
            Route::Register => write!(f, "/register"),
            Route::Dashboard => write!(f, "/dashboard"),
            Route::ShipperServices => write!(f, "/shipper/services"),
            Route::ShipperNewService => write!(f, "/shipper/services/new"),
            Route::ShipperService(id) => write!(f, "/shipper/services/{}", id),
            Route::DriverFeed => write!(f, "/driver/feed"),
            Route::DriverService(id) => write!(f, "/driver/services/{}", id),
            Route::DriverIntent => write!(f, "/driver/intent"),
            Route::DriverAssignment => write!(f, "/driver/assignment"),
        }
    }
}

impl FromStr for Route {
    type Err = ClientError;

    fn from_str(path: &str) -> Result<Self> {
        let unknown = || ClientError::UnknownRoute {
            path: path.to_string(),
        };
        let segments: Vec<&str> = path
            .split('?')
            .next()
            .unwrap_or_default()
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();

        let route = match segments.as_slice() {
            [] => Route::Home,
            ["login"] => Route::Login,
            ["register"] => Route::Register,
            ["dashboard"] => Route::Dashboard,
            ["shipper", "services"] => Route::ShipperServices,
            ["shipper", "services", "new"] => Route::ShipperNewService,
            ["shipper", "services", id] => Route::ShipperService(id.parse().map_err(|_| unknown())?),
            ["driver", "feed"] => Route::DriverFeed,
            ["driver", "services", id] => Route::DriverService(id.parse().map_err(|_| unknown())?),
            ["driver", "intent"] => Route::DriverIntent,
            ["driver", "assignment"] => Route::DriverAssignment,
            _ => return Err(unknown()),
        };
        Ok(route)
    }
}

/// 依路由掛載頁面並渲染
pub struct Shell {
    session: Session,
    config: Arc<dyn ConfigProvider>,
}

impl Shell {
    pub fn new(session: Session, config: Arc<dyn ConfigProvider>) -> Self {
        Self { session, config }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn page_for(&self, route: Route) -> Box<dyn Page> {
        match route {
            Route::Home => Box::new(pages::home::HomePage),
            Route::Login => Box::new(pages::auth::LoginForm::default()),
            Route::Register => Box::new(pages::auth::RegisterForm::default()),
            Route::Dashboard => Box::new(pages::dashboard::DashboardPage),
            Route::ShipperServices => Box::new(pages::shipper::MyServicesPage),
            Route::ShipperNewService => Box::new(pages::shipper::NewServiceForm::default()),
            Route::ShipperService(id) => Box::new(pages::shipper::ServiceOffersPage::new(id)),
            Route::DriverFeed => Box::new(pages::driver::FeedPage::default()),
            Route::DriverService(id) => Box::new(pages::driver::OfferForm::new(id)),
            Route::DriverIntent => {
                Box::new(pages::driver::IntentForm::from_config(self.config.as_ref()))
            }
            Route::DriverAssignment => {
                Box::new(pages::driver::AssignmentPage::from_config(self.config.as_ref()))
            }
        }
    }

    pub async fn open(&self, route: Route) -> Result<View> {
        let page = self.page_for(route);
        tracing::debug!("🧭 Opening {}", page.route());
        page.render(&self.session).await
    }

    pub async fn open_path(&self, path: &str) -> Result<View> {
        self.open(path.parse()?).await
    }
}
