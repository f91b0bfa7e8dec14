use super::super::{
    parser::UnitTables,
    structures::SlkUnit,
    types::{strip_quotes, Table},
};

/// Join the five SLK tables into one table of [SlkUnit] objects.
///
/// The unit data table decides which units exist, and in what order. A unit
/// that only appears in the other tables is dropped, while a unit missing from
/// one of the other tables simply has that part set to [None].
pub fn join_units(tables: &UnitTables) -> Table<SlkUnit> {
    let mut units = Table::new();
    for (key, data) in tables.data.iter() {
        let unit = SlkUnit {
            abilities: tables.abilities.get(key).cloned(),
            data: Some(data.clone()),
            ui: tables.ui.get(key).cloned(),
            weapons: tables.weapons.get(key).cloned(),
            balance: tables.balance.get(key).cloned(),
        };
        units.insert(strip_quotes(key), unit);
    }
    units
}
