/// A submodule that provides the [Record] type every table is made of.
mod record;
pub use record::Record;

/// A submodule that reads the SYLK tables, like `UnitData.slk`.
mod slk;

/// A submodule that reads the unit function text files.
mod unit_func;

/// A submodule that reads every table from the input folder.
/// Modelled as a single pass over a fixed list of files, any of which may abort the load.
mod loader;
pub use loader::{LoaderError, UnitDataLoader, UnitTables};

#[cfg(test)]
pub(crate) use loader::tests::create_test_folder;
