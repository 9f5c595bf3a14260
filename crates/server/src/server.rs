use axum::{
    Router,
    extract::Request,
    http::{HeaderName, HeaderValue},
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
};
use axum_extra::{
    TypedHeader,
    headers::{Error as AxumError, Header},
};

use std::sync::Arc;

use crate::{checkins, guests};
use engine::Engine;

static VERSION_HEADER: HeaderName = HeaderName::from_static("hotelcheckin-version");

/// Version echoed back when the caller does not pin one.
const DEFAULT_API_VERSION: &str = "1.0";

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
}

/// `TypedHeader` for the API version header.
///
/// Requests may carry a "hotelcheckin-version" entry; every response
/// carries one back.
#[derive(Clone, Debug)]
struct ApiVersion(String);

impl Header for ApiVersion {
    fn name() -> &'static HeaderName {
        &VERSION_HEADER
    }

    fn decode<'i, I>(values: &mut I) -> Result<Self, AxumError>
    where
        Self: Sized,
        I: Iterator<Item = &'i HeaderValue>,
    {
        let value = values.next().ok_or_else(AxumError::invalid)?;
        let Ok(value) = value.to_str() else {
            return Err(AxumError::invalid());
        };

        Ok(ApiVersion(value.to_string()))
    }

    fn encode<E: Extend<HeaderValue>>(&self, values: &mut E) {
        match HeaderValue::from_str(&self.0) {
            Ok(value) => values.extend(std::iter::once(value)),
            Err(_) => tracing::error!("failed to encode hotelcheckin-version header"),
        }
    }
}

async fn version_header(
    version: Option<TypedHeader<ApiVersion>>,
    request: Request,
    next: Next,
) -> Response {
    let version = version
        .map(|header| header.0.0)
        .unwrap_or_else(|| DEFAULT_API_VERSION.to_string());

    let mut response = next.run(request).await;
    match HeaderValue::from_str(&version) {
        Ok(value) => {
            response.headers_mut().insert(&VERSION_HEADER, value);
        }
        Err(_) => tracing::error!("failed to encode hotelcheckin-version header"),
    }

    response
}

pub fn router(state: ServerState) -> Router {
    Router::new()
        .route("/hotel/guests", post(guests::create).get(guests::list))
        .route(
            "/hotel/guests/{id}",
            get(guests::get).put(guests::update).delete(guests::delete),
        )
        .route("/hotel/guests/byExit/{out}", get(guests::by_exit))
        .route("/hotel/checkins", post(checkins::create))
        .route("/hotel/checkins/{id}", get(checkins::get))
        .route("/hotel/checkins/byName/{name}", get(checkins::by_name))
        .route(
            "/hotel/checkins/byDocument/{document}",
            get(checkins::by_document),
        )
        .route("/hotel/checkins/byPhone/{phone}", get(checkins::by_phone))
        .route_layer(middleware::from_fn(version_header))
        .with_state(state)
}

pub async fn run(engine: Engine) {
    let listener = match tokio::net::TcpListener::bind("127.0.0.1:3000").await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener: {err}");
            return;
        }
    };
    if let Err(err) = run_with_listener(engine, listener).await {
        tracing::error!("server failed: {err}");
    }
}

pub async fn run_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    let state = ServerState {
        engine: Arc::new(engine),
    };

    axum::serve(listener, router(state)).await
}

pub fn spawn_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(engine, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}
