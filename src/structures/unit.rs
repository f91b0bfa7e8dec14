use serde::{Deserialize, Serialize};

use super::super::parser::Record;

/// A unit as described by the five SLK tables.
/// Each table may be missing the unit, in which case the field is [None].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SlkUnit {
    #[serde(rename = "UnitAbilities")]
    pub abilities: Option<Record>,
    #[serde(rename = "UnitData")]
    pub data: Option<Record>,
    #[serde(rename = "UnitUI")]
    pub ui: Option<Record>,
    #[serde(rename = "UnitWeapons")]
    pub weapons: Option<Record>,
    #[serde(rename = "UnitBalance")]
    pub balance: Option<Record>,
}

impl SlkUnit {
    /// The raw, comma separated `type` field of the balance table
    pub fn unit_type(&self) -> &str {
        self.balance.as_ref().map_or("", |b| b.get_str("type"))
    }
}
