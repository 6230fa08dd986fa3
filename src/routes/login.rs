use crate::configuration::Settings;
use crate::helpers::JsonResponse;
use crate::models;
use actix_web::{get, web, HttpResponse, Result};
use tera::{Context, Tera};

const LOGIN_TEMPLATE: &str = include_str!("../../templates/login.html");
const MIN_PASSWORD_LENGTH: usize = 4;

/// Server-rendered pages, parsed once at startup.
pub struct Pages {
    tera: Tera,
}

impl Pages {
    pub fn new() -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        tera.add_raw_template("login.html", LOGIN_TEMPLATE)?;

        Ok(Self { tera })
    }

    pub fn login(&self, login_url: &str) -> Result<String, tera::Error> {
        let mut context = Context::new();
        context.insert("login_url", login_url);
        context.insert("min_password_length", &MIN_PASSWORD_LENGTH);

        self.tera.render("login.html", &context)
    }
}

#[tracing::instrument(name = "Render login page.", skip(pages, settings))]
#[get("")]
pub async fn page(pages: web::Data<Pages>, settings: web::Data<Settings>) -> Result<HttpResponse> {
    let body = pages.login(&settings.auth.login_url).map_err(|err| {
        tracing::error!("Failed to render login page: {:?}", err);
        JsonResponse::<models::Product>::build().internal_server_error("")
    })?;

    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body))
}
