//! Settlement calculator HTTP server.

use std::{
    io, process,
    sync::{Arc, OnceLock},
    time,
};

use application::{api, config, graphql, Args, Config};
use axum::{
    extract::MatchedPath,
    routing::{on, MethodFilter},
    Extension, Router,
};
use axum_client_ip::InsecureClientIp;
use service::Service;
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing as log;
use tracing_subscriber::{
    filter::filter_fn,
    fmt::MakeWriter,
    layer::{Layer, SubscriberExt as _},
    registry::LookupSpan,
    util::SubscriberInitExt as _,
};

/// Levels written to stderr rather than stdout.
const STDERR_LEVELS: &[log::Level] = &[log::Level::WARN, log::Level::ERROR];

/// Configured maximum log level, set once the [`Config`] is loaded.
static LOG_LEVEL: OnceLock<log::Level> = OnceLock::new();

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(log_layer(io::stdout, false))
        .with(log_layer(io::stderr, true))
        .init();

    if run().await.is_err() {
        process::exit(1);
    }
}

/// Builds a compact log layer accepting either [`STDERR_LEVELS`] or all the
/// other levels, bounded by the configured [`LOG_LEVEL`].
fn log_layer<S, W>(writer: W, stderr: bool) -> impl Layer<S>
where
    S: log::Subscriber + for<'s> LookupSpan<'s>,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt::layer()
        .compact()
        .with_ansi(true)
        .with_thread_names(true)
        .with_writer(writer)
        .with_filter(filter_fn(move |meta| {
            let max = LOG_LEVEL.get().copied().unwrap_or(log::Level::INFO);
            meta.is_span()
                || STDERR_LEVELS.contains(meta.level()) == stderr
                    && max >= *meta.level()
        }))
}

async fn run() -> Result<(), ()> {
    let Args { config } = Args::parse().map_err(|e| {
        log::error!("failed to parse command line arguments: {e}");
    })?;

    let Config {
        server,
        service,
        log,
    } = Config::new(&config).map_err(|e| {
        log::error!("failed to load `Config` from `{config}`: {e}");
    })?;

    LOG_LEVEL
        .set(log.level.into())
        .unwrap_or_else(|_| unreachable!("first initialization"));

    let service = Service::new(service.into());
    log::debug!("`Service` configured: {:?}", service.config());

    let app = Router::new()
        .route(
            "/graphql",
            on(MethodFilter::GET.or(MethodFilter::POST), graphql),
        )
        .layer(Extension(Arc::new(api::schema())))
        .layer(Extension(service))
        .layer(cors_layer(&server.cors)?)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|r: &http::Request<_>| {
                    log::info_span!(
                        "HTTP request",
                        http.client_ip = InsecureClientIp::from(
                            r.headers(),
                            r.extensions(),
                        )
                        .map(|ip| ip.0.to_string())
                        .ok(),
                        http.method = r.method().as_str(),
                        http.route = r
                            .extensions()
                            .get::<MatchedPath>()
                            .map(MatchedPath::as_str),
                        http.target = r
                            .uri()
                            .path_and_query()
                            .map(http::uri::PathAndQuery::as_str),
                        http.user_agent = r
                            .headers()
                            .get(http::header::USER_AGENT)
                            .and_then(|h| h.to_str().ok()),
                        http.status_code = log::field::Empty,
                    )
                })
                .on_response(
                    |r: &http::Response<_>,
                     dur: time::Duration,
                     span: &log::Span| {
                        let status = r.status();
                        _ = span.record(
                            "http.status_code",
                            log::field::display(status.as_u16()),
                        );

                        let duration = format!("{}ms", dur.as_millis());
                        if status.is_server_error() {
                            log::error!(duration = %duration);
                        } else if status.is_client_error() {
                            log::warn!(duration = %duration);
                        } else {
                            log::info!(duration = %duration);
                        }
                    },
                ),
        );

    let addr = (server.host.as_str(), server.port);
    let listener = TcpListener::bind(addr).await.map_err(|e| {
        log::error!("failed to listen on `{}:{}`: {e}", addr.0, addr.1);
    })?;

    log::info!("listening on `{}:{}`", addr.0, addr.1);

    axum::serve(listener, app)
        .await
        .map_err(|e| log::error!("webserver failed: {e}"))
}

/// Builds a [`CorsLayer`] allowing the configured origins.
///
/// A `*` origin allows any origin.
fn cors_layer(cors: &config::Cors) -> Result<CorsLayer, ()> {
    let layer = CorsLayer::new()
        .allow_methods([
            http::Method::GET,
            http::Method::OPTIONS,
            http::Method::POST,
        ])
        .allow_headers([
            http::header::AUTHORIZATION,
            http::header::CONTENT_TYPE,
        ]);

    if cors.origins.iter().any(|o| o == "*") {
        return Ok(layer.allow_origin(AllowOrigin::any()));
    }

    let origins = cors
        .origins
        .iter()
        .map(|origin| {
            origin.parse::<http::header::HeaderValue>().map_err(|e| {
                log::error!("`{origin}` is not a valid CORS origin: {e}");
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(layer.allow_origin(AllowOrigin::list(origins)))
}
