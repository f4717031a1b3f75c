//! RakshaMitra - Link Safety Gateway
//!
//! This service judges whether a submitted URL looks safe, using a
//! configurable set of unsafe patterns and an HTTPS-only check.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;

mod alert;
mod api;
mod classifier;
mod config;
mod error;
mod logging;
mod protection;

use crate::alert::{AlertDispatcher, SmtpMailer, SuspiciousLinkAlerts};
use crate::api::build_router;
use crate::classifier::UrlClassifier;
use crate::config::{Config, MailConfig};
use crate::error::RakshaResult;
use crate::protection::RateLimiter;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// The link classifier.
    pub classifier: Arc<UrlClassifier>,
    /// Alerting on suspicious links, when enabled.
    pub alerts: Option<SuspiciousLinkAlerts>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    logging::init();

    tracing::info!("Starting RakshaMitra v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = Config::load().map_err(|e| {
        tracing::error!(error = %e, "Failed to load configuration");
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    tracing::info!(
        host = %config.server.host,
        port = %config.server.port,
        static_dir = %config.server.static_dir,
        rate_limit_enabled = %config.rate_limit.enabled,
        mail_enabled = %config.mail.enabled,
        "Configuration loaded"
    );

    // Compile the unsafe-pattern rules
    let classifier = UrlClassifier::from_config(&config.classifier).map_err(|e| {
        tracing::error!(error = %e, "Failed to compile unsafe patterns");
        anyhow::anyhow!("Classifier error: {}", e)
    })?;

    if classifier.rules().is_empty() {
        tracing::warn!("No unsafe patterns configured, only the HTTPS check applies");
    }
    tracing::info!(
        rules = ?classifier.rules().names().collect::<Vec<_>>(),
        "Classifier ready"
    );

    // Alert mail
    let alerts = build_alerts(&config.mail).map_err(|e| {
        tracing::error!(error = %e, "Failed to set up alert mail");
        anyhow::anyhow!("Mail error: {}", e)
    })?;

    // Rate limiting
    let rate_limiter = if config.rate_limit.enabled {
        let limiter = RateLimiter::from_config(&config.rate_limit);
        spawn_pruner(limiter.clone());
        tracing::info!(
            max_requests = config.rate_limit.max_requests,
            window_secs = config.rate_limit.window_secs,
            "Rate limiting enabled"
        );
        Some(limiter)
    } else {
        tracing::warn!("Rate limiting is DISABLED");
        None
    };

    let state = AppState {
        classifier: Arc::new(classifier),
        alerts,
    };

    // Build router
    let app = build_router(state, &config.server, rate_limiter);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;

    tracing::info!(address = %addr, "RakshaMitra backend listening");
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");

    Ok(())
}

/// Start the alert worker when alerting on suspicious links is configured.
fn build_alerts(config: &MailConfig) -> RakshaResult<Option<SuspiciousLinkAlerts>> {
    if !config.enabled {
        tracing::info!("Alert mail disabled");
        return Ok(None);
    }

    let mailer = SmtpMailer::from_config(config)?;
    let (dispatcher, _worker) = AlertDispatcher::spawn(mailer, config.queue_capacity);
    tracing::info!(relay = %config.relay, port = config.port, "Alert mail enabled");

    match (&config.alert_recipient, config.alert_on_suspicious) {
        (Some(recipient), true) => {
            tracing::info!(recipient = %recipient, "Alerting on suspicious links");
            Ok(Some(SuspiciousLinkAlerts::new(dispatcher, recipient.as_str())))
        }
        (None, true) => {
            tracing::warn!("mail.alert_on_suspicious is set without mail.alert_recipient");
            Ok(None)
        }
        _ => {
            tracing::info!("Alert mail configured, alerting on suspicious links is off");
            Ok(None)
        }
    }
}

/// Periodically drop expired rate-limit windows.
fn spawn_pruner(limiter: RateLimiter) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(limiter.window().max(Duration::from_secs(1)));
        loop {
            ticker.tick().await;
            let removed = limiter.prune();
            if removed > 0 {
                tracing::debug!(
                    removed,
                    tracked = limiter.tracked_clients(),
                    "Pruned expired rate-limit windows"
                );
            }
        }
    });
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
