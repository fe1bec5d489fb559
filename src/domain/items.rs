//! CPI item catalog: human-readable item names to BLS item codes.

const ITEMS: &[(&str, &str)] = &[
    ("All items", "SA0"),
    ("All items less food and energy", "SA0L1E"),
    ("All items less food", "SA0L1"),
    ("All items less energy", "SA0LE"),
    ("Food", "SAF1"),
    ("Food at home", "SAF11"),
    ("Food away from home", "SEFV"),
    ("Energy", "SA0E"),
    ("Shelter", "SAH1"),
    ("Medical care", "SAM"),
    ("Transportation", "SAT"),
    ("Apparel", "SAA"),
    ("Gasoline (all types)", "SETB01"),
    ("Services less energy services", "SASLE"),
    ("Commodities less food and energy commodities", "SACL1E"),
];

/// Look up the item code for a name. Case and surrounding whitespace are ignored.
pub fn item_code(name: &str) -> Option<&'static str> {
    let name = name.trim();
    ITEMS
        .iter()
        .find(|(item, _)| item.eq_ignore_ascii_case(name))
        .map(|(_, code)| *code)
}

/// All known item names, in catalog order.
pub fn item_names() -> impl Iterator<Item = &'static str> {
    ITEMS.iter().map(|(item, _)| *item)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_ignores_case_and_whitespace() {
        assert_eq!(item_code("  all ITEMS less food and energy "), Some("SA0L1E"));
        assert_eq!(item_code("Shelter"), Some("SAH1"));
        assert_eq!(item_code("Housing"), None);
    }

    #[test]
    fn codes_are_unique() {
        let mut codes: Vec<_> = item_names().filter_map(item_code).collect();
        let n = codes.len();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), n);
    }
}
