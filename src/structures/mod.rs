mod unit;
pub use unit::SlkUnit;

mod node;
pub use node::UnitNode;

/// The condensed name, icon and description tree
mod summary;
pub use summary::UnitSummary;
