//! HTML rendering with embedded Tera templates

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use once_cell::sync::OnceCell;
use serde::Serialize;
use tera::{Context, Tera};

use crate::domain::{DomainError, Overview};
use crate::forms::FormField;

static RENDERER: OnceCell<Renderer> = OnceCell::new();

const TEMPLATES: &[(&str, &str)] = &[
    ("base.html", include_str!("../../templates/base.html")),
    ("start.html", include_str!("../../templates/start.html")),
    ("form.html", include_str!("../../templates/form.html")),
    ("list.html", include_str!("../../templates/list.html")),
    ("confirm_delete.html", include_str!("../../templates/confirm_delete.html")),
    ("error.html", include_str!("../../templates/error.html")),
];

pub struct Renderer {
    tera: Tera,
}

/// Edit or create page
#[derive(Debug, Serialize)]
pub struct FormPage {
    pub title: String,
    pub action: String,
    pub submit_label: &'static str,
    pub cancel_url: &'static str,
    pub fields: Vec<FormField>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Cell {
    pub text: String,
    pub numeric: bool,
}

impl Cell {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            numeric: false,
        }
    }

    pub fn number(value: impl ToString) -> Self {
        Self {
            text: value.to_string(),
            numeric: true,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Link {
    pub href: String,
    pub label: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Row {
    pub cells: Vec<Cell>,
    pub links: Vec<Link>,
}

impl Row {
    /// Row with the usual edit and delete links for `/{prefix}/{id}/`.
    pub fn new(prefix: &str, id: i32, cells: Vec<Cell>) -> Self {
        Self {
            cells,
            links: vec![
                Link {
                    href: format!("/{}/{}/", prefix, id),
                    label: "Edit",
                },
                Link {
                    href: format!("/{}/{}/delete/", prefix, id),
                    label: "Delete",
                },
            ],
        }
    }

    pub fn link(mut self, href: String, label: &'static str) -> Self {
        self.links.push(Link { href, label });
        self
    }
}

#[derive(Debug, Serialize)]
pub struct ListPage {
    pub title: &'static str,
    pub add_url: Option<&'static str>,
    pub headers: Vec<&'static str>,
    pub rows: Vec<Row>,
    pub empty_message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ConfirmPage {
    pub title: String,
    pub object_label: String,
    pub action: String,
    pub cancel_url: &'static str,
    pub warning: Option<String>,
}

impl Renderer {
    pub fn new() -> Result<Self, DomainError> {
        let mut tera = Tera::default();
        tera.add_raw_templates(TEMPLATES.to_vec())
            .map_err(|e| DomainError::Render(format!("Failed to load templates: {}", e)))?;
        Ok(Self { tera })
    }

    /// Process-wide instance, parsed on first use
    pub fn global() -> Result<&'static Renderer, DomainError> {
        RENDERER.get_or_try_init(Renderer::new)
    }

    fn render<T: Serialize>(&self, template: &str, page: &T) -> Result<String, DomainError> {
        let context = Context::from_serialize(page)
            .map_err(|e| DomainError::Render(format!("Bad context for {}: {}", template, e)))?;
        self.tera
            .render(template, &context)
            .map_err(|e| DomainError::Render(format!("Failed to render {}: {}", template, e)))
    }

    pub fn start(&self, overview: &Overview) -> Result<Response, DomainError> {
        #[derive(Serialize)]
        struct StartPage<'a> {
            title: &'static str,
            overview: &'a Overview,
        }

        let body = self.render(
            "start.html",
            &StartPage {
                title: "Invoicer",
                overview,
            },
        )?;
        Ok(Html(body).into_response())
    }

    /// Forms are re-rendered with 200, as a browser expects after a failed post
    pub fn form(&self, page: &FormPage) -> Result<Response, DomainError> {
        Ok(Html(self.render("form.html", page)?).into_response())
    }

    pub fn list(&self, page: &ListPage) -> Result<Response, DomainError> {
        Ok(Html(self.render("list.html", page)?).into_response())
    }

    pub fn confirm_delete(&self, page: &ConfirmPage) -> Result<Response, DomainError> {
        Ok(Html(self.render("confirm_delete.html", page)?).into_response())
    }

    pub fn error(&self, status: StatusCode, message: &str) -> Result<Response, DomainError> {
        #[derive(Serialize)]
        struct ErrorPage<'a> {
            title: &'a str,
            message: &'a str,
        }

        let title = status.canonical_reason().unwrap_or("Error");
        let body = self.render("error.html", &ErrorPage { title, message })?;
        Ok((status, Html(body)).into_response())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_templates_parse() {
        assert!(Renderer::new().is_ok());
    }

    #[test]
    fn values_are_escaped() {
        let renderer = Renderer::new().unwrap();
        let page = ConfirmPage {
            title: "Delete address".to_string(),
            object_label: "<script>".to_string(),
            action: "/address/1/delete/".to_string(),
            cancel_url: "/addresses/",
            warning: None,
        };
        let html = renderer.render("confirm_delete.html", &page).unwrap();
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }
}
