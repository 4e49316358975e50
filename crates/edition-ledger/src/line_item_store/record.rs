//! [`TableRecord`] implementation for [`LineItem`].
//!
//! The row enforces the parts of the numbering invariant that hold for a single
//! item regardless of what its siblings look like: removed items never carry a
//! number, and a number always lies within `1..=total`. Contiguity across the
//! product is the assigner's job.

use super::LineItemError;
use crate::model::{LineItem, LineItemId, LineItemPatch, LineItemStatus, NewLineItem, ProductId};
use table_actor::TableRecord;

impl TableRecord for LineItem {
    type Id = LineItemId;
    type Partition = ProductId;
    type Insert = NewLineItem;
    type Patch = LineItemPatch;
    type Error = LineItemError;

    fn from_insert(id: LineItemId, params: NewLineItem) -> Result<Self, Self::Error> {
        Ok(Self::new(
            id,
            params.order_id,
            params.product_id,
            params.created_at,
        ))
    }

    fn partition(&self) -> &ProductId {
        &self.product_id
    }

    /// # Patches
    /// - `Edition`: rejected on removed items and for numbers outside `1..=total`.
    /// - `Remove`: clears number and total; a no-op on removed items.
    /// - `Restore`: reactivates without a number; a no-op on active items.
    fn apply(&mut self, patch: &LineItemPatch) -> Result<bool, Self::Error> {
        match *patch {
            LineItemPatch::Edition { number, total } => {
                if !self.is_active() {
                    return Err(LineItemError::NotActive(self.id));
                }
                if number == 0 || number > total {
                    return Err(LineItemError::InvalidEditionNumber {
                        id: self.id,
                        number,
                        total,
                    });
                }
                let changed =
                    self.edition_number != Some(number) || self.edition_total != Some(total);
                self.edition_number = Some(number);
                self.edition_total = Some(total);
                Ok(changed)
            }
            LineItemPatch::Remove => {
                if !self.is_active() {
                    return Ok(false);
                }
                self.status = LineItemStatus::Removed;
                self.edition_number = None;
                self.edition_total = None;
                Ok(true)
            }
            LineItemPatch::Restore => {
                if self.is_active() {
                    return Ok(false);
                }
                self.status = LineItemStatus::Active;
                Ok(true)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::OrderId;
    use chrono::{TimeZone, Utc};

    fn item() -> LineItem {
        LineItem::new(
            LineItemId(1),
            OrderId::new("order_1"),
            ProductId::new("print"),
            Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_edition_patch_reports_change_once() {
        let mut item = item();
        let patch = LineItemPatch::Edition {
            number: 1,
            total: 3,
        };
        assert_eq!(item.apply(&patch), Ok(true));
        assert_eq!(item.apply(&patch), Ok(false));
        assert_eq!(item.edition_number, Some(1));
        assert_eq!(item.edition_total, Some(3));
    }

    #[test]
    fn test_edition_patch_rejects_out_of_range() {
        let mut item = item();
        let err = item
            .apply(&LineItemPatch::Edition {
                number: 4,
                total: 3,
            })
            .unwrap_err();
        assert!(matches!(err, LineItemError::InvalidEditionNumber { .. }));
        assert_eq!(item.edition_number, None);
    }

    #[test]
    fn test_removed_item_clears_and_refuses_numbers() {
        let mut item = item();
        item.apply(&LineItemPatch::Edition {
            number: 2,
            total: 2,
        })
        .unwrap();

        assert_eq!(item.apply(&LineItemPatch::Remove), Ok(true));
        assert_eq!(item.apply(&LineItemPatch::Remove), Ok(false));
        assert_eq!(item.edition_number, None);
        assert_eq!(item.edition_total, None);

        let err = item
            .apply(&LineItemPatch::Edition {
                number: 1,
                total: 1,
            })
            .unwrap_err();
        assert_eq!(err, LineItemError::NotActive(LineItemId(1)));

        assert_eq!(item.apply(&LineItemPatch::Restore), Ok(true));
        assert!(item.is_active());
        assert_eq!(item.edition_number, None);
    }
}
