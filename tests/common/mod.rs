use chatbot_service::config::ChatbotConfig;
use chatbot_service::services::providers::mock::MockTextProvider;
use chatbot_service::services::providers::TextProvider;
use chatbot_service::startup::Application;
use std::sync::Arc;
use uuid::Uuid;

/// Reply every mock-backed test app produces by default.
pub const STUB_REPLY: &str = "Leaf healthy hai Boss";

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub static_dir: String,
}

impl TestApp {
    /// Spawn a test app backed by a mock provider with a fixed reply.
    pub async fn spawn() -> Self {
        Self::spawn_with_provider(Arc::new(MockTextProvider::replying(STUB_REPLY))).await
    }

    pub async fn spawn_with_provider(provider: Arc<dyn TextProvider>) -> Self {
        // The Gemini key is required by config loading even when the provider
        // is swapped out.
        std::env::set_var("GOOGLE_API_KEY", "test-key");

        let static_dir = format!("target/test-static-{}", Uuid::new_v4());

        let mut config = ChatbotConfig::load().expect("Failed to load configuration");
        config.common.port = 0; // Random port for testing
        config.storage.static_dir = static_dir.clone();

        let app = Application::build_with_provider(config, provider)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to be ready by polling the health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            static_dir,
        }
    }

    /// Cleanup test storage.
    pub async fn cleanup(&self) {
        let _ = tokio::fs::remove_dir_all(&self.static_dir).await;
    }
}
