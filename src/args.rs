use clap_derive::Parser;

use std::path::PathBuf;

/// A function to parse the input folder argument. The folder has to exist.
fn parse_dir_arg(input: &str) -> Result<PathBuf, &'static str> {
    let p = PathBuf::from(input);
    if !p.exists() {
        Err("Invalid path")
    } else if !p.is_dir() {
        Err("Not a directory")
    } else {
        Ok(p)
    }
}

/// The arguments to the program.
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Args {
    #[arg(value_parser = parse_dir_arg)]
    /// The folder holding the unit tables and `CampaignUnitFunc.txt`.
    pub input: PathBuf,
    /// The path of the JSON file to write.
    pub output: PathBuf,
    #[arg(short, long, default_value_t = false)]
    /// A flag that tells the program to write only the name, icon and description of every unit.
    pub summary: bool,
    #[arg(long, default_value = None)]
    /// A path to a file to dump the joined unit table to.
    pub dump: Option<PathBuf>,
}
