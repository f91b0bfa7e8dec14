use std::{
    fs, io,
    path::{Path, PathBuf},
};

use derive_more::{Display, Error};
use indicatif::ProgressBar;
use tracing::info;

use super::{
    super::types::Table,
    slk::{parse_slk, SlkError},
    unit_func::parse_unit_func,
    Record,
};

// File system stuff

pub const UNIT_ABILITIES_FILE: &str = "UnitAbilities.slk";
pub const UNIT_DATA_FILE: &str = "UnitData.slk";
pub const UNIT_UI_FILE: &str = "UnitUI.slk";
pub const UNIT_WEAPONS_FILE: &str = "UnitWeapons.slk";
pub const UNIT_BALANCE_FILE: &str = "UnitBalance.slk";
pub const UNIT_FUNC_FILE: &str = "CampaignUnitFunc.txt";

/// Every file the loader reads, in the order it reads them
pub const INPUT_FILES: [&str; 6] = [
    UNIT_ABILITIES_FILE,
    UNIT_DATA_FILE,
    UNIT_UI_FILE,
    UNIT_WEAPONS_FILE,
    UNIT_BALANCE_FILE,
    UNIT_FUNC_FILE,
];

/// An error that occurred while loading the unit tables
#[derive(Debug, Display, Error)]
pub enum LoaderError {
    /// A file is missing or couldn't be read
    #[display("unable to read {file}: {source}")]
    Io { file: &'static str, source: io::Error },
    /// A table is malformed
    #[display("malformed table {file}: {source}")]
    Slk { file: &'static str, source: SlkError },
}

/// Every table the converter needs, as read from the input folder
#[derive(Debug, Default)]
pub struct UnitTables {
    pub abilities: Table<Record>,
    /// The core unit data, the authoritative set of units
    pub data: Table<Record>,
    pub ui: Table<Record>,
    pub weapons: Table<Record>,
    pub balance: Table<Record>,
    /// The unit functions, holding the build and upgrade relations
    pub functions: Table<Record>,
}

/// A loader for the unit tables in a folder
pub struct UnitDataLoader {
    folder: PathBuf,
}

impl UnitDataLoader {
    pub fn new<P: AsRef<Path>>(folder: P) -> Self {
        UnitDataLoader {
            folder: folder.as_ref().to_owned(),
        }
    }

    fn read(&self, file: &'static str, progress: &ProgressBar) -> Result<Vec<u8>, LoaderError> {
        progress.suspend(|| info!("Reading {}...", file));
        progress.set_message(file);
        let contents =
            fs::read(self.folder.join(file)).map_err(|source| LoaderError::Io { file, source })?;
        progress.inc(1);
        Ok(contents)
    }

    fn read_slk(
        &self,
        file: &'static str,
        progress: &ProgressBar,
    ) -> Result<Table<Record>, LoaderError> {
        let contents = self.read(file, progress)?;
        parse_slk(&contents).map_err(|source| LoaderError::Slk { file, source })
    }

    /// Read and parse all six files. The first file that can't be read or
    /// parsed aborts the load.
    pub fn load(&self, progress: &ProgressBar) -> Result<UnitTables, LoaderError> {
        progress.set_length(INPUT_FILES.len() as u64);
        let tables = UnitTables {
            abilities: self.read_slk(UNIT_ABILITIES_FILE, progress)?,
            data: self.read_slk(UNIT_DATA_FILE, progress)?,
            ui: self.read_slk(UNIT_UI_FILE, progress)?,
            weapons: self.read_slk(UNIT_WEAPONS_FILE, progress)?,
            balance: self.read_slk(UNIT_BALANCE_FILE, progress)?,
            functions: parse_unit_func(&self.read(UNIT_FUNC_FILE, progress)?),
        };
        progress.finish_with_message("Unit data loaded");
        Ok(tables)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    /// Write a minimal but complete set of input files into a fresh folder
    pub(crate) fn create_test_folder() -> TempDir {
        let dir = TempDir::new().unwrap();
        let slk = |header: &str, rows: &[(&str, &str)]| {
            let mut out = format!("ID;PWXL;N;E\nC;X1;Y1;K\"id\"\nC;X2;K\"{}\"\n", header);
            for (i, (id, value)) in rows.iter().enumerate() {
                out += &format!("C;X1;Y{};K\"{}\"\nC;X2;K\"{}\"\n", i + 2, id, value);
            }
            out + "E\n"
        };
        fs::write(
            dir.path().join(UNIT_ABILITIES_FILE),
            slk("abilList", &[("hpea", "Ahar,Arep")]),
        )
        .unwrap();
        fs::write(
            dir.path().join(UNIT_DATA_FILE),
            slk(
                "race",
                &[("hpea", "human"), ("htow", "human"), ("hkee", "human")],
            ),
        )
        .unwrap();
        fs::write(
            dir.path().join(UNIT_UI_FILE),
            slk("file", &[("hpea", "units\\human\\Peasant\\Peasant")]),
        )
        .unwrap();
        fs::write(
            dir.path().join(UNIT_WEAPONS_FILE),
            slk("weapTp1", &[("hpea", "normal")]),
        )
        .unwrap();
        fs::write(
            dir.path().join(UNIT_BALANCE_FILE),
            slk(
                "type",
                &[("hpea", "peon"), ("htow", "townhall"), ("hkee", "townhall")],
            ),
        )
        .unwrap();
        fs::write(
            dir.path().join(UNIT_FUNC_FILE),
            "[hpea]\nName=Peasant\nArt=BTNPeasant.blp\nBuilds=htow\n\n[htow]\nName=Town Hall\nUpgrade=hkee\n\n[hkee]\nName=Keep\n",
        )
        .unwrap();
        dir
    }

    #[test]
    fn test_load() {
        let dir = create_test_folder();
        let tables = UnitDataLoader::new(dir.path())
            .load(&ProgressBar::hidden())
            .unwrap();
        assert_eq!(tables.data.len(), 3);
        assert_eq!(tables.abilities.len(), 1);
        assert_eq!(tables.balance.get("hpea").unwrap().get_str("type"), "peon");
        assert_eq!(
            tables.functions.get("htow").unwrap().get_str("Upgrade"),
            "hkee"
        );
    }

    #[test]
    fn test_missing_file() {
        let dir = create_test_folder();
        fs::remove_file(dir.path().join(UNIT_WEAPONS_FILE)).unwrap();
        let err = UnitDataLoader::new(dir.path())
            .load(&ProgressBar::hidden())
            .unwrap_err();
        match err {
            LoaderError::Io { file, source } => {
                assert_eq!(file, UNIT_WEAPONS_FILE);
                assert_eq!(source.kind(), io::ErrorKind::NotFound);
            }
            _ => panic!("Expected an IO error"),
        }
    }

    #[test]
    fn test_malformed_table() {
        let dir = create_test_folder();
        fs::write(dir.path().join(UNIT_UI_FILE), "not a table").unwrap();
        let err = UnitDataLoader::new(dir.path())
            .load(&ProgressBar::hidden())
            .unwrap_err();
        assert!(matches!(err, LoaderError::Slk { file: UNIT_UI_FILE, .. }));
        assert!(err.to_string().contains(UNIT_UI_FILE));
    }
}
