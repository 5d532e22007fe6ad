use super::{settle, MSG_ERROR};
use crate::core::router::Route;
use crate::core::session::Session;
use crate::domain::model::{RegisterRequest, UserRole};
use crate::domain::ports::Page;
use crate::domain::view::View;
use crate::utils::error::Result;
use async_trait::async_trait;

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    fn form_view(&self) -> View {
        View::new("Login")
            .line(format!("email: {}", self.email))
            .line("senha: ********")
    }

    /// 成功時 token 已寫入本地儲存並導向 dashboard；失敗時顯示伺服器的 detail
    pub async fn submit(&self, session: &Session) -> Result<View> {
        match settle(session.login(&self.email, &self.password).await)? {
            Ok(()) => Ok(self.form_view().redirect(Route::Dashboard)),
            Err(err) => {
                let message = err.detail().unwrap_or("erro").to_string();
                Ok(self.form_view().message(message))
            }
        }
    }
}

#[async_trait]
impl Page for LoginForm {
    fn route(&self) -> Route {
        Route::Login
    }

    async fn render(&self, _session: &Session) -> Result<View> {
        Ok(self.form_view())
    }
}

#[derive(Debug, Clone, Default)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: UserRole,
}

impl RegisterForm {
    fn form_view(&self) -> View {
        View::new("Cadastro")
            .line(format!("nome: {}", self.name))
            .line(format!("email: {}", self.email))
            .line("senha: ********")
            .line(format!("perfil: {}", self.role))
    }

    pub async fn submit(&self, session: &Session) -> Result<View> {
        let request = RegisterRequest {
            name: self.name.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
            role: self.role,
        };
        match settle(session.api().register(&request).await)? {
            Ok(user) => {
                tracing::info!("👤 Registered user #{} ({})", user.id, user.role);
                Ok(self.form_view().redirect(Route::Login))
            }
            Err(_) => Ok(self.form_view().message(MSG_ERROR)),
        }
    }
}

#[async_trait]
impl Page for RegisterForm {
    fn route(&self) -> Route {
        Route::Register
    }

    async fn render(&self, _session: &Session) -> Result<View> {
        Ok(self.form_view())
    }
}
