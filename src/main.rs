//! Contact Intake - main entry point.
//!
//! Runs the intake pipeline as a line-oriented console session: each
//! stdin line is treated as one inbound chat message for a fixed demo
//! user, scanned for contact info, merged into the configured profile
//! store, and answered.

use anyhow::Result;
use contact_intake::{
    ApiStore, AsyncProfileClient, AsyncProfileClientImpl, Config, IntakeSession,
    MergeCoordinator, MessageContext, Metrics, ProfileApiClient, ProfileKey, ProfileStore,
    PromptResponder, StoreBackend,
};
use contact_intake::store::MemoryStore;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Logging goes to stderr; stdout carries the conversation.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match Config::from_env() {
        Ok(cfg) => {
            info!("configuration loaded");
            cfg
        }
        Err(e) => {
            error!("failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    let store: Arc<dyn ProfileStore> = match config.store_backend {
        StoreBackend::Memory => Arc::new(MemoryStore::new()),
        StoreBackend::Api => {
            info!("using profile service at {}", config.api_base_url);
            let sync_client = ProfileApiClient::new(&config);
            let client = Arc::new(AsyncProfileClientImpl::new(sync_client))
                as Arc<dyn AsyncProfileClient>;
            Arc::new(ApiStore::new(client))
        }
    };

    let metrics = Metrics::new();
    let coordinator = Arc::new(MergeCoordinator::new(
        store,
        metrics.clone(),
        config.merge_retry_attempts,
    ));
    let session = IntakeSession::new(
        coordinator,
        Arc::new(PromptResponder),
        metrics.clone(),
        config.conversation_ttl_minutes,
        config.max_history_messages,
    );

    let ctx = MessageContext {
        key: ProfileKey::new("console", "local-user")?,
        display_name: "Console User".to_string(),
        channel: "stdin".to_string(),
    };

    info!("contact intake session ready; type messages, Ctrl-D to exit");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    while let Some(line) = lines.next_line().await? {
        let text = line.trim();
        if text.is_empty() {
            continue;
        }

        let reply = session.handle_message(&ctx, text).await;
        stdout.write_all(format!("{}\n", reply).as_bytes()).await?;
        stdout.flush().await?;
    }

    let summary = metrics.summary();
    info!(
        messages = summary.messages_processed,
        emails = summary.emails_extracted,
        phones = summary.phones_extracted,
        saved = summary.merges_saved,
        rejected = summary.merges_rejected,
        failed = summary.merges_failed,
        "intake session finished"
    );

    Ok(())
}
