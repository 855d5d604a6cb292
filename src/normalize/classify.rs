use crate::types::score::CanonicalField;

/// Substring rules checked in order; the first rule with a matching needle wins.
///
/// New spellings produced by a form version only need a needle here.
pub const CLASSIFICATION_TABLE: &[(&[&str], CanonicalField)] = &[
    (&["decor"], CanonicalField::Decoration),
    (&["item"], CanonicalField::Items),
    (&["dorm", "inside", "bed"], CanonicalField::Dorm),
    (&["fan", "tube"], CanonicalField::FanTube),
    (&["foot"], CanonicalField::Footpath),
    (&["grass"], CanonicalField::Grass),
    (&["surround"], CanonicalField::Surrounding),
    (&["total", "sum"], CanonicalField::Total),
];

/// Lowercases and strips whitespace, underscores and hyphens.
pub fn canonicalize_key(key: &str) -> String {
    key.chars()
        .filter(|ch| !ch.is_whitespace() && *ch != '_' && *ch != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

pub fn classify(key: &str) -> Option<CanonicalField> {
    let key = canonicalize_key(key);
    CLASSIFICATION_TABLE
        .iter()
        .find(|(needles, _)| needles.iter().any(|needle| key.contains(needle)))
        .map(|(_, field)| *field)
}
