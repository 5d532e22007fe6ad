use crate::core::router::Route;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub label: String,
    pub to: Route,
}

/// 頁面渲染結果：標題、內容行、連結、訊息與可能的跳轉
#[derive(Debug, Clone, PartialEq, Default)]
pub struct View {
    pub title: String,
    pub lines: Vec<String>,
    pub links: Vec<Link>,
    pub message: Option<String>,
    pub redirect: Option<Route>,
}

impl View {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn line(mut self, text: impl Into<String>) -> Self {
        self.lines.push(text.into());
        self
    }

    pub fn link(mut self, label: impl Into<String>, to: Route) -> Self {
        self.links.push(Link {
            label: label.into(),
            to,
        });
        self
    }

    pub fn message(mut self, text: impl Into<String>) -> Self {
        self.message = Some(text.into());
        self
    }

    pub fn redirect(mut self, to: Route) -> Self {
        self.redirect = Some(to);
        self
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        for line in &self.lines {
            writeln!(f, "  {}", line)?;
        }
        for link in &self.links {
            writeln!(f, "  → {} ({})", link.label, link.to)?;
        }
        if let Some(message) = &self.message {
            writeln!(f, "{}", message)?;
        }
        if let Some(to) = &self.redirect {
            writeln!(f, "↪ {}", to)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_display() {
        let view = View::new("Feed")
            .link("Carga SP-Campinas - R$ 1800", Route::DriverService(3))
            .message("Enviado");
        let rendered = view.to_string();
        assert!(rendered.starts_with("Feed\n"));
        assert!(rendered.contains("→ Carga SP-Campinas - R$ 1800 (/driver/services/3)"));
        assert!(rendered.ends_with("Enviado\n"));
    }
}
