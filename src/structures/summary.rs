use serde::{Deserialize, Serialize};

use super::{super::types::trim_quotes, UnitNode};

/// A condensed view of a [UnitNode], holding only what a tech tree page needs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UnitSummary {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Icon")]
    pub icon: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Builds", default)]
    pub builds: Vec<UnitSummary>,
    #[serde(rename = "Upgrades", default)]
    pub upgrades: Vec<UnitSummary>,
}

impl From<&UnitNode> for UnitSummary {
    fn from(node: &UnitNode) -> Self {
        // not every unit has the extended tooltip
        let description = match trim_quotes(node.function_field("Ubertip")) {
            "" => node.function_field("Tip"),
            ubertip => ubertip,
        };
        UnitSummary {
            name: trim_quotes(node.function_field("Name")).to_owned(),
            icon: trim_quotes(node.function_field("Art")).to_owned(),
            description: trim_quotes(description).to_owned(),
            builds: node.builds.iter().map(UnitSummary::from).collect(),
            upgrades: node.upgrades.iter().map(UnitSummary::from).collect(),
        }
    }
}
