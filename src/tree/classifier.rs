use tracing::debug;

use super::{
    super::{
        structures::{SlkUnit, UnitNode},
        types::split_list,
    },
    resolver::resolve_build_node,
    TreeError, UnitState,
};

/// The unit type tag builders carry
const BUILDER_TYPE: &str = "peon";
/// The unit function field holding what a builder can build
const BUILDS_FIELD: &str = "Builds";

/// Whether the unit's type tags mark it as a builder
pub fn is_builder(unit: &SlkUnit) -> bool {
    split_list(unit.unit_type()).any(|tag| tag.eq_ignore_ascii_case(BUILDER_TYPE))
}

/// Find every builder and resolve everything it can build.
///
/// Builders are returned in unit data order. Each has its
/// [builds](UnitNode::builds) resolved through [resolve_build_node] and no
/// upgrades.
pub fn find_builders(state: &UnitState) -> Result<Vec<UnitNode>, TreeError> {
    let mut builders = Vec::new();
    for (id, unit) in state.units().iter() {
        if !is_builder(unit) {
            continue;
        }
        let unit_func = state.get_function(id);
        let builds = split_list(unit_func.map_or("", |f| f.get_str(BUILDS_FIELD)))
            .map(|build| resolve_build_node(state, build))
            .collect::<Result<Vec<_>, _>>()?;
        debug!("{} builds {} units", id, builds.len());
        builders.push(UnitNode {
            slk_unit: Some(unit.clone()),
            unit_func: unit_func.cloned(),
            upgrades: Vec::new(),
            builds,
        });
    }
    Ok(builders)
}
