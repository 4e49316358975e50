//! # Consistency Verification
//!
//! Read-only drift detection. Recomputes the numbering each product should have from
//! its current active items and compares it with what is stored. Nothing here writes;
//! an operator decides whether to reconcile a drifted product.

use super::plan::expected_numbers;
use crate::error::EditionError;
use crate::model::{AuditReport, Drift, LineItem, ProductAudit, ProductId};
use crate::repository::LineItemRepository;
use tracing::{info, instrument, warn};

/// Compares stored numbering against the expected numbering for a set of items.
pub fn audit_items(product_id: &ProductId, items: &[LineItem]) -> ProductAudit {
    let expected = expected_numbers(items);
    let total = expected.len() as u32;
    let mut drift = Vec::new();

    for (item, number) in &expected {
        match item.edition_number {
            None => drift.push(Drift::MissingNumber {
                line_item_id: item.id,
                expected: *number,
            }),
            Some(stored) if stored != *number => drift.push(Drift::WrongNumber {
                line_item_id: item.id,
                expected: *number,
                stored,
            }),
            Some(_) => {}
        }
        if item.edition_total != Some(total) {
            drift.push(Drift::WrongTotal {
                line_item_id: item.id,
                expected: total,
                stored: item.edition_total,
            });
        }
    }

    for item in items.iter().filter(|item| !item.is_active()) {
        if let Some(stored) = item.edition_number {
            drift.push(Drift::NumberedWhileRemoved {
                line_item_id: item.id,
                stored,
            });
        }
    }

    ProductAudit {
        product_id: product_id.clone(),
        active: total,
        drift,
    }
}

#[instrument(skip(repo, product_id), fields(product_id = %product_id))]
pub async fn audit_product<R>(repo: &R, product_id: &ProductId) -> Result<ProductAudit, EditionError>
where
    R: LineItemRepository + ?Sized,
{
    let items = repo.product_items(product_id).await?;
    let audit = audit_items(product_id, &items);
    if !audit.is_consistent() {
        warn!(active = audit.active, drift = audit.drift.len(), "Edition drift detected");
    }
    Ok(audit)
}

/// Audits every product and reports the ones that drifted.
#[instrument(skip(repo))]
pub async fn audit_all<R>(repo: &R) -> Result<AuditReport, EditionError>
where
    R: LineItemRepository + ?Sized,
{
    let products = repo.product_ids().await?;
    let mut report = AuditReport::default();
    for product_id in &products {
        let audit = audit_product(repo, product_id).await?;
        report.checked += 1;
        if !audit.is_consistent() {
            report.drifted.push(audit);
        }
    }
    info!(checked = report.checked, drifted = report.drifted.len(), "Audit complete");
    Ok(report)
}
