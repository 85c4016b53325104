pub mod column;
pub mod level;
pub mod role;
pub mod shift;
pub mod wire;
pub mod workshop;

pub use column::{COLUMN_COUNT, Column};
pub use level::Level;
pub use role::Role;
pub use shift::Shift;
pub use wire::WireRow;
pub use workshop::{RowId, RowKey, RowSet, Workshop};
