//! Pure numbering computation shared by the assigner and the verifier.

use crate::model::{EditionUpdate, LineItem};

/// Numbering a product's active items should have, and the writes needed to get there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditionPlan {
    /// Count of active items, the edition total `N`.
    pub total: u32,
    /// Only rows whose stored number or total differs from the expected one.
    pub updates: Vec<EditionUpdate>,
}

/// Active items of `items` in edition order, each paired with its expected number.
///
/// Removed items are skipped; the input may be in any order.
pub fn expected_numbers(items: &[LineItem]) -> Vec<(&LineItem, u32)> {
    let mut active: Vec<&LineItem> = items.iter().filter(|item| item.is_active()).collect();
    active.sort_by(|a, b| LineItem::edition_order(a, b));
    active
        .into_iter()
        .zip(1u32..)
        .collect()
}

pub fn plan_editions(items: &[LineItem]) -> EditionPlan {
    let expected = expected_numbers(items);
    let total = expected.len() as u32;
    let updates = expected
        .into_iter()
        .filter(|(item, number)| {
            item.edition_number != Some(*number) || item.edition_total != Some(total)
        })
        .map(|(item, number)| EditionUpdate {
            line_item_id: item.id,
            edition_number: number,
            edition_total: total,
        })
        .collect();
    EditionPlan { total, updates }
}
