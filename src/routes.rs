use std::future::{Ready, ready};
use std::sync::Arc;

use actix_web::dev::Payload;
use actix_web::http::header::{AUTHORIZATION, ContentType};
use actix_web::{FromRequest, HttpRequest, HttpResponse, web};
use log::info;

use crate::auth::{AuthError, AuthManager, Claims};
use crate::error::ApiError;
use crate::presenter::{render_aggregate, render_snapshot};
use crate::store::RateStore;

pub struct AppState {
    pub store: Arc<dyn RateStore>,
    pub auth: Arc<AuthManager>,
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/auth", web::post().to(authenticate))
        .route("/rates/latest", web::get().to(latest_rates))
        .route("/rates/analyze", web::get().to(analyzed_rates))
        .route(
            r"/rates/{date:\d{4}-\d{2}-\d{2}}",
            web::get().to(rates_by_date),
        );
}

/// Guard for routes that need a valid bearer token.
pub struct Authorized(pub Claims);

impl FromRequest for Authorized {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let Some(state) = req.app_data::<web::Data<AppState>>() else {
            return ready(Err(ApiError::MissingState));
        };
        let header = match req.headers().get(AUTHORIZATION).map(|v| v.to_str()) {
            None => None,
            Some(Ok(value)) => Some(value),
            Some(Err(_)) => return ready(Err(AuthError::MalformedHeader.into())),
        };

        ready(
            state
                .auth
                .validate_header(header)
                .map(Authorized)
                .map_err(ApiError::from),
        )
    }
}

async fn authenticate(
    state: web::Data<AppState>,
    body: web::Bytes,
) -> Result<HttpResponse, ApiError> {
    let token = state.auth.authenticate(&body)?;
    let body = serde_json::to_string(&token)?;

    Ok(HttpResponse::Ok()
        .content_type(ContentType::json())
        .body(body))
}

async fn latest_rates(
    _auth: Authorized,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    info!("Request on getting latest rates started");

    let snapshot = state.store.get_latest().await?;
    info!(
        "Latest rates data available, sender name: {}",
        snapshot.sender_name
    );

    Ok(HttpResponse::Ok()
        .content_type(ContentType::json())
        .body(render_snapshot(&snapshot)))
}

async fn rates_by_date(
    _auth: Authorized,
    state: web::Data<AppState>,
    date: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let date = date.into_inner();
    info!("Request on getting rates by date: {} started", date);

    let snapshot = state.store.get_by_date(&date).await?;
    info!(
        "{} - rates data available, sender name: {}",
        date, snapshot.sender_name
    );

    Ok(HttpResponse::Ok()
        .content_type(ContentType::json())
        .body(render_snapshot(&snapshot)))
}

async fn analyzed_rates(
    _auth: Authorized,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    info!("Request on getting analyzed rates started");

    let report = state.store.get_aggregate().await?;
    let body = serde_json::to_string(&render_aggregate(&report))?;
    info!(
        "Analyzed rates data available, sender name: {}",
        report.base
    );

    Ok(HttpResponse::Ok()
        .content_type(ContentType::json())
        .body(body))
}
