use crate::model::{NewLineItem, OrderId, ProductId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An order as handed over by order ingestion.
///
/// Each `OrderLine` may carry a quantity greater than one; every unit becomes its
/// own line item and receives its own edition number.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomingOrder {
    pub order_id: OrderId,
    pub placed_at: DateTime<Utc>,
    pub lines: Vec<OrderLine>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLine {
    pub product_id: ProductId,
    pub quantity: u32,
}

impl IncomingOrder {
    /// One `NewLineItem` per purchased unit, in line order.
    pub fn units(&self) -> Vec<NewLineItem> {
        self.lines
            .iter()
            .flat_map(|line| {
                (0..line.quantity).map(move |_| NewLineItem {
                    order_id: self.order_id.clone(),
                    product_id: line.product_id.clone(),
                    created_at: self.placed_at,
                })
            })
            .collect()
    }
}
