//! Pure data structures: the line-item row, incoming orders, and the reports built
//! from them.

pub mod edition;
pub mod line_item;
pub mod order;

pub use edition::*;
pub use line_item::*;
pub use order::*;
