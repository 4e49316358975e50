use chrono::{Duration, TimeZone, Utc};
use edition_ledger::config::LedgerConfig;
use edition_ledger::lifecycle::{setup_tracing, EditionSystem};
use edition_ledger::model::{IncomingOrder, OrderId, OrderLine, ProductId, RevokeOutcome};
use tracing::{error, info, warn, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    let config = LedgerConfig::from_env().map_err(|e| e.to_string())?;
    setup_tracing(&config.log_filter);

    info!("Starting edition ledger demo");
    let system = EditionSystem::new(&config);

    let print = ProductId::new("harbor-at-dusk");
    let opened = Utc
        .with_ymd_and_hms(2024, 5, 1, 9, 0, 0)
        .single()
        .ok_or("invalid start time")?;

    // Three buyers, one of whom takes two prints
    let orders = vec![
        ("1001", 0, 1),
        ("1002", 5, 2),
        ("1003", 9, 1),
    ];
    let span = tracing::info_span!("order_ingestion");
    let ingested = async {
        let mut ingested = Vec::new();
        for (order_id, minutes, quantity) in orders {
            let order = IncomingOrder {
                order_id: OrderId::new(order_id),
                placed_at: opened + Duration::minutes(minutes),
                lines: vec![OrderLine {
                    product_id: print.clone(),
                    quantity,
                }],
            };
            let result = system
                .service
                .on_order_ingested(order)
                .await
                .map_err(|e| e.to_string())?;
            info!(order_id, line_items = result.line_items.len(), "Order ingested");
            ingested.push(result);
        }
        Ok::<_, String>(ingested)
    }
    .instrument(span)
    .await?;

    // Partial refund of the second buyer's first print
    let refunded = ingested[1].line_items[0];
    let span = tracing::info_span!("partial_refund");
    match system
        .service
        .revoke_line_item(refunded)
        .instrument(span)
        .await
    {
        Ok(RevokeOutcome::Revoked(run)) => {
            info!(line_item_id = %refunded, total = run.total, writes = run.writes, "Refund processed")
        }
        Ok(other) => warn!(?other, "Refund changed nothing"),
        Err(e) => error!(error = %e, "Refund failed"),
    }

    let span = tracing::info_span!("order_cancellation");
    let cancelled = system
        .service
        .on_order_cancelled(&OrderId::new("1001"))
        .instrument(span)
        .await
        .map_err(|e| e.to_string())?;
    info!(revoked = cancelled.revoked.len(), "Order cancelled");

    let span = tracing::info_span!("refund_reversal");
    let reinstated = system
        .service
        .reinstate_line_item(refunded)
        .instrument(span)
        .await
        .map_err(|e| e.to_string())?;
    info!(?reinstated, "Refund reversed");

    let report = system
        .service
        .audit_all()
        .instrument(tracing::info_span!("audit"))
        .await
        .map_err(|e| e.to_string())?;
    if report.is_consistent() {
        info!(checked = report.checked, "All products consistent");
    } else {
        warn!(drifted = report.drifted.len(), "Drift found");
    }

    system.shutdown().await?;
    info!("Demo completed successfully");
    Ok(())
}
