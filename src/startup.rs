use crate::config::ChatbotConfig;
use crate::error::AppError;
use crate::handlers;
use crate::services::providers::gemini::{GeminiConfig, GeminiTextProvider};
use crate::services::providers::TextProvider;
use crate::services::{ConversationHistory, ReplyGenerator, UploadStore};
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::future::IntoFuture;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

/// Global request body ceiling; oversized uploads get a 413 before any
/// validation runs.
const MAX_BODY_BYTES: usize = 8 * 1024 * 1024;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: ChatbotConfig,
    pub reply_generator: ReplyGenerator,
    pub uploads: UploadStore,
    pub text_provider: Arc<dyn TextProvider>,
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    server: Box<dyn std::future::Future<Output = std::io::Result<()>> + Send + Unpin>,
}

impl Application {
    /// Build the application with the real Gemini provider.
    pub async fn build(config: ChatbotConfig) -> Result<Self, AppError> {
        let provider: Arc<dyn TextProvider> = Arc::new(GeminiTextProvider::new(GeminiConfig {
            api_key: config.google.api_key.clone(),
            model: config.models.text_model.clone(),
        }));

        tracing::info!(
            model = %config.models.text_model,
            "Initialized Gemini text provider"
        );

        Self::build_with_provider(config, provider).await
    }

    /// Build the application with an externally supplied text provider.
    ///
    /// Tests use this to swap in a mock instead of the Gemini client.
    pub async fn build_with_provider(
        config: ChatbotConfig,
        provider: Arc<dyn TextProvider>,
    ) -> Result<Self, AppError> {
        let static_dir = Path::new(&config.storage.static_dir).to_path_buf();
        let upload_dir = static_dir.join("uploads");

        let uploads = UploadStore::new(&upload_dir).await.map_err(|e| {
            tracing::error!(
                "Failed to initialize upload store at {}: {}",
                upload_dir.display(),
                e
            );
            e
        })?;

        let reply_generator = ReplyGenerator::new(provider.clone(), ConversationHistory::new());

        let state = AppState {
            config: config.clone(),
            reply_generator,
            uploads,
            text_provider: provider,
        };

        let app = Router::new()
            .route("/health", get(handlers::health_check))
            .route("/chat", post(handlers::chat))
            .route("/upload", post(handlers::upload))
            .route_service("/", ServeFile::new(static_dir.join("index.html")))
            .route_service("/chatbot", ServeFile::new(static_dir.join("chatbot.html")))
            .nest_service("/static", ServeDir::new(&static_dir))
            .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
            .layer(TraceLayer::new_for_http())
            .with_state(state);

        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Listening on {}", port);

        let server = axum::serve(listener, app);

        Ok(Self {
            port,
            server: Box::new(server.into_future()),
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        self.server.await
    }
}
