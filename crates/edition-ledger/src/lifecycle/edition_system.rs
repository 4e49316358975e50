use crate::clients::LineItemClient;
use crate::config::LedgerConfig;
use crate::line_item_store;
use crate::service::EditionService;
use std::sync::Arc;
use tracing::{error, info};

/// Runtime wiring for the ledger: the line-item table actor, its repository client
/// and the service on top of it.
///
/// # Example
///
/// ```ignore
/// let system = EditionSystem::new(&LedgerConfig::default());
///
/// let ingestion = system.service.on_order_ingested(order).await?;
/// system.service.revoke_line_item(ingestion.line_items[0]).await?;
///
/// system.shutdown().await?;
/// ```
pub struct EditionSystem {
    pub service: EditionService<LineItemClient>,

    /// Direct store access, for callers that need raw reads or to plant state.
    pub repository: LineItemClient,

    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl EditionSystem {
    /// Spawns the line-item table actor. Must be called inside a Tokio runtime.
    pub fn new(config: &LedgerConfig) -> Self {
        let (store_actor, table) = line_item_store::new(config.store_buffer);
        let store_handle = tokio::spawn(store_actor.run());

        let repository = LineItemClient::new(table);
        let service = EditionService::new(Arc::new(repository.clone()));
        info!(store_buffer = config.store_buffer, "Edition system started");

        Self {
            service,
            repository,
            handles: vec![store_handle],
        }
    }

    /// Drops every client, which closes the table's channel, then waits for the actor
    /// to drain and exit.
    ///
    /// Clones of the service or repository held elsewhere keep the table alive; drop
    /// them first or this waits for them.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down edition system...");
        drop(self.service);
        drop(self.repository);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("Edition system shutdown complete.");
        Ok(())
    }
}
