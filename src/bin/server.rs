use std::{
    fs::OpenOptions,
    net::SocketAddr,
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};

use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware,
};
use axum_server::Handle;
use clap::Parser;
use tower_http::trace::TraceLayer;

#[cfg(debug_assertions)]
use tower_livereload::LiveReloadLayer;

use tracing_subscriber::{Layer, filter, layer::SubscriberExt, util::SubscriberInitExt};

use finsight::{
    AppState,
    backend::{DEFAULT_ANSWER_DELAY, DEFAULT_TIMEOUT, DemoBackend, HttpBackend},
    build_router, graceful_shutdown, logging_middleware,
};

/// The web frontend for the Finsight personal-finance service.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The port to serve the web pages from.
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// The base URL of the finance service.
    #[arg(long, env = "FINSIGHT_BACKEND_URL", default_value = "http://127.0.0.1:5000")]
    backend_url: String,

    /// Serve canned answers and sample transactions instead of calling the
    /// finance service.
    #[arg(long)]
    demo: bool,

    /// How long to wait for the finance service before giving up.
    #[arg(long, default_value_t = DEFAULT_TIMEOUT.as_secs())]
    timeout_secs: u64,

    /// How long the demo backend takes to answer a question.
    #[arg(long, default_value_t = DEFAULT_ANSWER_DELAY.as_millis() as u64)]
    answer_delay_ms: u64,

    /// File path for the debug log.
    #[arg(long, default_value = "debug.log")]
    log_file: PathBuf,

    /// Log the headers and bodies of every request and response.
    #[arg(long)]
    log_requests: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    setup_logging(&args.log_file);

    let addr = SocketAddr::from(([127, 0, 0, 1], args.port));

    let state = if args.demo {
        tracing::info!("Using the demo backend");
        AppState::new(DemoBackend::new(Duration::from_millis(args.answer_delay_ms)))
    } else {
        tracing::info!("Using the finance service at {}", args.backend_url);
        let backend =
            HttpBackend::new(&args.backend_url, Duration::from_secs(args.timeout_secs))
                .expect("Could not create the HTTP client for the finance service.");
        AppState::new(backend)
    };

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    let router = build_router(state);

    let router = if args.log_requests {
        router.layer(middleware::from_fn(logging_middleware))
    } else {
        router
    };

    let router = add_tracing_layer(router);

    #[cfg(debug_assertions)]
    let router = router.layer(LiveReloadLayer::new());

    tracing::info!("HTTP server listening on {}", addr);
    axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await
        .unwrap();
}

fn setup_logging(log_path: &Path) {
    let stdout_log = tracing_subscriber::fmt::layer().pretty();

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .expect("Could not create log file");

    let debug_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_writer(Arc::new(log_file));

    tracing_subscriber::registry()
        .with(
            stdout_log
                .with_filter(filter::LevelFilter::INFO)
                .and_then(debug_log)
                .with_filter(filter::LevelFilter::DEBUG),
        )
        .init();
}

fn add_tracing_layer(router: Router) -> Router {
    let tracing_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request| {
            let method = req.method();
            let uri = req.uri();

            let matched_path = req
                .extensions()
                .get::<MatchedPath>()
                .map(|matched_path| matched_path.as_str());

            tracing::debug_span!("request", %method, %uri, matched_path)
        })
        // By default, `TraceLayer` will log 5xx responses but the handlers
        // log their own errors.
        .on_failure(());

    router.layer(tracing_layer)
}
