use derive_more::{Display, Error};

use super::{
    parser::{Record, UnitTables},
    structures::SlkUnit,
    types::{Table, UnitId},
};

/// A submodule that merges the SLK tables into [SlkUnit] objects.
mod joiner;
use joiner::join_units;

/// A submodule that picks out the builders and resolves what they build.
mod classifier;
pub use classifier::find_builders;

/// A submodule that resolves upgrade chains into trees.
mod resolver;

/// An error that occurred while building the unit trees
#[derive(Debug, Display, Error)]
pub enum TreeError {
    /// A unit is, directly or not, its own upgrade
    #[display("cyclic build/upgrade graph: {}", chain.join(" -> "))]
    Cycle { chain: Vec<UnitId> },
}

/// Everything the tree building needs to know about the units.
/// Built once from the loaded tables, then only ever read.
pub struct UnitState {
    /// The joined SLK units, in unit data order
    units: Table<SlkUnit>,
    /// The unit functions
    functions: Table<Record>,
}

impl UnitState {
    pub fn new(tables: UnitTables) -> Self {
        let units = join_units(&tables);
        UnitState {
            units,
            functions: tables.functions,
        }
    }

    pub fn get_unit(&self, id: &str) -> Option<&SlkUnit> {
        self.units.get(id)
    }

    pub fn get_function(&self, id: &str) -> Option<&Record> {
        self.functions.get(id)
    }

    /// The joined units, in unit data order
    pub fn units(&self) -> &Table<SlkUnit> {
        &self.units
    }
}
