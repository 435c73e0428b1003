//! Tag predicates shared by classification and source queries.

use crate::feature::Tags;

/// A test over a feature's tag set.
///
/// Predicates are `'static` so the rule table can be a plain constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagPredicate {
    /// Key is present with any value.
    Has(&'static str),
    /// Key is present with exactly this value.
    Equals(&'static str, &'static str),
    /// Key is present with one of these values.
    OneOf(&'static str, &'static [&'static str]),
    /// Every inner predicate holds.
    All(&'static [TagPredicate]),
}

impl TagPredicate {
    pub fn matches(&self, tags: &Tags) -> bool {
        match self {
            TagPredicate::Has(key) => tags.contains_key(*key),
            TagPredicate::Equals(key, value) => {
                tags.get(*key).is_some_and(|v| v.as_str() == *value)
            }
            TagPredicate::OneOf(key, values) => tags
                .get(*key)
                .is_some_and(|v| values.contains(&v.as_str())),
            TagPredicate::All(inner) => inner.iter().all(|p| p.matches(tags)),
        }
    }

    /// Render as an Overpass QL tag filter chain, e.g. `["landuse"~"^(forest|meadow)$"]`.
    pub fn to_overpass_filter(&self) -> String {
        match self {
            TagPredicate::Has(key) => format!("[\"{}\"]", key),
            TagPredicate::Equals(key, value) => format!("[\"{}\"=\"{}\"]", key, value),
            TagPredicate::OneOf(key, values) => {
                format!("[\"{}\"~\"^({})$\"]", key, values.join("|"))
            }
            TagPredicate::All(inner) => inner.iter().map(|p| p.to_overpass_filter()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::tags;

    #[test]
    fn test_has_matches_any_value() {
        let p = TagPredicate::Has("building");
        assert!(p.matches(&tags(tags::BUILDING)));
        assert!(p.matches(&tags(&[("building", "garage")])));
        assert!(!p.matches(&tags(tags::UNRELATED)));
    }

    #[test]
    fn test_one_of() {
        let p = TagPredicate::OneOf("landuse", &["forest", "meadow"]);
        assert!(p.matches(&tags(&[("landuse", "meadow")])));
        assert!(!p.matches(&tags(tags::INDUSTRIAL)));
    }

    #[test]
    fn test_all_requires_every_part() {
        const PARTS: &[TagPredicate] = &[
            TagPredicate::Equals("highway", "pedestrian"),
            TagPredicate::Equals("area", "yes"),
        ];
        let p = TagPredicate::All(PARTS);
        assert!(p.matches(&tags(tags::PEDESTRIAN_AREA)));
        assert!(!p.matches(&tags(&[("highway", "pedestrian")])));
    }

    #[test]
    fn test_overpass_rendering() {
        assert_eq!(TagPredicate::Has("building").to_overpass_filter(), "[\"building\"]");
        assert_eq!(
            TagPredicate::Equals("amenity", "parking").to_overpass_filter(),
            "[\"amenity\"=\"parking\"]"
        );
        assert_eq!(
            TagPredicate::OneOf("aeroway", &["apron", "runway"]).to_overpass_filter(),
            "[\"aeroway\"~\"^(apron|runway)$\"]"
        );
        const PARTS: &[TagPredicate] = &[
            TagPredicate::Equals("highway", "pedestrian"),
            TagPredicate::Equals("area", "yes"),
        ];
        assert_eq!(
            TagPredicate::All(PARTS).to_overpass_filter(),
            "[\"highway\"=\"pedestrian\"][\"area\"=\"yes\"]"
        );
    }
}
