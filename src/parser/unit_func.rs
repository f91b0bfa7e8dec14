use super::{
    super::types::{strip_quotes, NullString, Table, UnitId},
    Record,
};

/// The prefix of a comment line
const COMMENT: &str = "//";

/// Parse the contents of a unit function file, like `CampaignUnitFunc.txt`.
///
/// The file is split into `[unitId]` sections, each holding `Key=Value`
/// lines. Values are kept verbatim, quotes included. Keys outside of a section
/// and lines we can't make sense of are ignored, a repeated key overwrites the
/// earlier value and a repeated section is merged into the first one.
pub fn parse_unit_func(contents: &[u8]) -> Table<Record> {
    let text = String::from_utf8_lossy(contents);
    let mut table = Table::new();
    let mut current: Option<(UnitId, Record)> = None;
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with(COMMENT) {
            continue;
        }
        if let Some(id) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            if let Some((id, record)) = current.take() {
                table.insert_merged(id, record);
            }
            let id = strip_quotes(id.trim());
            if !id.is_empty() {
                current = Some((id, Record::default()));
            }
        } else if let Some((key, value)) = line.split_once('=') {
            if let Some((_, record)) = current.as_mut() {
                record.insert(key.trim(), NullString::from(value.trim()));
            }
        }
    }
    if let Some((id, record)) = current {
        table.insert_merged(id, record);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    const UNIT_FUNC: &str = "// Human units
Stray=value

[hpea]
Art=ReplaceableTextures\\CommandButtons\\BTNPeasant.blp
Builds=\"htow,hhou,hbar\"
Tip=Train |cffffcc00P|reasant

[htow]
// Town Hall
Name=Town Hall
Upgrade=hkee
upgrade=hkee,hcas

[hpea]
Name=Peasant
[]
Orphan=1
";

    #[test]
    fn test_parse() {
        let table = parse_unit_func(UNIT_FUNC.as_bytes());
        let keys: Vec<_> = table.keys().cloned().collect();
        assert_eq!(keys, vec!["hpea", "htow"]);
        let peasant = table.get("hpea").unwrap();
        assert_eq!(peasant.get_str("builds"), "\"htow,hhou,hbar\"");
        assert_eq!(peasant.get_str("Tip"), "Train |cffffcc00P|reasant");
        assert_eq!(peasant.get_str("Name"), "Peasant");
        assert!(peasant.get("Stray").is_none());
        assert!(peasant.get("Orphan").is_none());
        let town_hall = table.get("htow").unwrap();
        let fields = serde_json::to_value(town_hall).unwrap();
        assert_eq!(fields.as_object().unwrap().len(), 2);
        assert_eq!(town_hall.get_str("Upgrade"), "hkee,hcas");
    }

    #[test]
    fn test_value_with_equals() {
        let table = parse_unit_func(b"[hfoo]\r\nUbertip=a=b\r\n");
        assert_eq!(table.get("hfoo").unwrap().get_str("Ubertip"), "a=b");
    }

    #[test]
    fn test_empty() {
        assert!(parse_unit_func(b"").is_empty());
        assert!(parse_unit_func(b"// nothing here\n").is_empty());
    }
}
