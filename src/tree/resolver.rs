use super::{
    super::{
        structures::UnitNode,
        types::{split_list, UnitId},
    },
    TreeError, UnitState,
};

/// The unit function field holding what a unit upgrades into
const UPGRADE_FIELD: &str = "Upgrade";

/// Resolve a unit a builder can build, along with its whole upgrade tree.
///
/// A unit missing from the tables still gets a node, just one with no
/// records. Upgrades are only followed if the `Upgrade` field is present, and
/// every entry of it becomes a child, so a unit can upgrade in more than one
/// direction.
pub fn resolve_build_node(state: &UnitState, id: &str) -> Result<UnitNode, TreeError> {
    resolve_upgrades(state, id, &mut Vec::new())
}

/// Resolve a node and its upgrades. `path` holds the units between the build
/// node and this one, to catch upgrade chains that loop back on themselves.
fn resolve_upgrades(
    state: &UnitState,
    id: &str,
    path: &mut Vec<UnitId>,
) -> Result<UnitNode, TreeError> {
    if path.iter().any(|p| p == id) {
        let mut chain = path.clone();
        chain.push(id.to_owned());
        return Err(TreeError::Cycle { chain });
    }
    let unit_func = state.get_function(id);
    let mut upgrades = Vec::new();
    if let Some(upgrade) = unit_func
        .and_then(|f| f.get(UPGRADE_FIELD))
        .filter(|u| u.is_valid())
    {
        path.push(id.to_owned());
        for entry in split_list(upgrade.as_str()) {
            upgrades.push(resolve_upgrades(state, entry, path)?);
        }
        path.pop();
    }
    Ok(UnitNode {
        slk_unit: state.get_unit(id).cloned(),
        unit_func: unit_func.cloned(),
        upgrades,
        builds: Vec::new(),
    })
}
