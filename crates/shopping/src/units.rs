/// Unit spellings that are interchangeable when merging quantities.
///
/// Normalization already folds most of these together; the groups are checked
/// independently so a spelling missing from the synonym table still merges.
pub const COMPATIBLE_UNIT_GROUPS: &[&[&str]] = &[
    &["cups", "cup"],
    &["lbs", "lb", "pound", "pounds"],
    &["oz", "ounce", "ounces"],
    &["pieces", "piece", "whole", "item"],
    &["tbsp", "tablespoon", "tablespoons"],
    &["tsp", "teaspoon", "teaspoons"],
];

/// Normalize a unit for comparison
///
/// Lowercases, trims, then maps known synonyms to their canonical spelling.
/// Unknown units are their own canonical form.
pub fn normalize_unit(unit: &str) -> String {
    let unit = unit.trim().to_lowercase();

    match unit.as_str() {
        "cup" | "c" => "cups".to_string(),
        "pound" | "lb" | "pounds" => "lbs".to_string(),
        "ounce" | "ounces" => "oz".to_string(),
        "piece" | "item" | "whole" => "pieces".to_string(),
        _ => unit,
    }
}

/// True when both (already normalized) units sit in the same compatibility group.
pub fn are_compatible_units(a: &str, b: &str) -> bool {
    COMPATIBLE_UNIT_GROUPS
        .iter()
        .any(|group| group.contains(&a) && group.contains(&b))
}
