use serde::{Deserialize, Serialize};

use super::{super::parser::Record, SlkUnit};

/// A node of the builder forest.
///
/// Builders have their [builds](UnitNode::builds) filled, everything a
/// builder can build and every upgrade below that has its
/// [upgrades](UnitNode::upgrades) filled. A node never has both.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UnitNode {
    #[serde(rename = "SLKUnit")]
    pub slk_unit: Option<SlkUnit>,
    #[serde(rename = "UnitFunc")]
    pub unit_func: Option<Record>,
    #[serde(rename = "Upgrades", default)]
    pub upgrades: Vec<UnitNode>,
    #[serde(rename = "Builds", default)]
    pub builds: Vec<UnitNode>,
}

impl UnitNode {
    /// Get a field of the unit function record, empty if there is none
    pub fn function_field(&self, key: &str) -> &str {
        self.unit_func.as_ref().map_or("", |f| f.get_str(key))
    }

    fn children(&self) -> impl Iterator<Item = &UnitNode> {
        self.builds.iter().chain(self.upgrades.iter())
    }

    /// The number of nodes in this tree, this node included
    pub fn node_count(&self) -> usize {
        1 + self.children().map(UnitNode::node_count).sum::<usize>()
    }

    /// The number of levels in this tree, 1 for a leaf
    pub fn depth(&self) -> usize {
        1 + self.children().map(UnitNode::depth).max().unwrap_or(0)
    }
}
