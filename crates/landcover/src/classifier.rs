//! Tag-based sealed/unsealed classification.
//!
//! Classification walks [`RULES`] in order and the first matching rule
//! wins. The explicit `surface=*` refinement comes first, so a park tagged
//! `surface=asphalt` is sealed even though `leisure=park` alone would make
//! it unsealed.

use serde::{Deserialize, Serialize};

use crate::feature::Tags;
use crate::predicate::TagPredicate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SurfaceCategory {
    /// Impervious: built or paved.
    Sealed,
    /// Pervious: vegetated or natural.
    Unsealed,
    /// No rule matched; dropped from both outputs.
    Excluded,
}

/// `surface=*` values treated as sealed.
pub const PAVED_SURFACES: &[&str] = &[
    "paved",
    "asphalt",
    "chipseal",
    "concrete",
    "concrete:lanes",
    "concrete:plates",
    "paving_stones",
    "sett",
    "unhewn_cobblestone",
    "cobblestone",
    "bricks",
    "metal",
    "tartan",
    "artificial_turf",
];

/// `surface=*` values treated as unsealed.
pub const UNPAVED_SURFACES: &[&str] = &[
    "unpaved",
    "compacted",
    "fine_gravel",
    "gravel",
    "pebblestone",
    "rock",
    "ground",
    "dirt",
    "earth",
    "grass",
    "grass_paver",
    "mud",
    "sand",
    "woodchips",
    "wood",
];

/// One classification rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// `surface=*` refinement: paved values seal, unpaved values unseal,
    /// anything else falls through.
    SurfaceRefinement,
    /// Structural tag that implies a category.
    Structural {
        when: TagPredicate,
        category: SurfaceCategory,
    },
}

const PEDESTRIAN_AREA: &[TagPredicate] = &[
    TagPredicate::Equals("highway", "pedestrian"),
    TagPredicate::Equals("area", "yes"),
];

/// The ordered rule table.
pub const RULES: &[Rule] = &[
    Rule::SurfaceRefinement,
    // Structural sealed
    Rule::Structural {
        when: TagPredicate::Has("building"),
        category: SurfaceCategory::Sealed,
    },
    Rule::Structural {
        when: TagPredicate::Equals("amenity", "parking"),
        category: SurfaceCategory::Sealed,
    },
    Rule::Structural {
        when: TagPredicate::OneOf("landuse", &["industrial", "commercial", "retail"]),
        category: SurfaceCategory::Sealed,
    },
    Rule::Structural {
        when: TagPredicate::OneOf("aeroway", &["apron", "runway", "taxiway"]),
        category: SurfaceCategory::Sealed,
    },
    Rule::Structural {
        when: TagPredicate::All(PEDESTRIAN_AREA),
        category: SurfaceCategory::Sealed,
    },
    // Structural unsealed
    Rule::Structural {
        when: TagPredicate::OneOf(
            "natural",
            &["wood", "grassland", "scrub", "heath", "sand", "bare_rock", "wetland"],
        ),
        category: SurfaceCategory::Unsealed,
    },
    Rule::Structural {
        when: TagPredicate::OneOf(
            "landuse",
            &["forest", "farmland", "meadow", "grass", "orchard", "vineyard"],
        ),
        category: SurfaceCategory::Unsealed,
    },
    Rule::Structural {
        when: TagPredicate::Equals("leisure", "park"),
        category: SurfaceCategory::Unsealed,
    },
];

impl Rule {
    /// The category this rule assigns, or `None` if it does not apply.
    pub fn evaluate(&self, tags: &Tags) -> Option<SurfaceCategory> {
        match self {
            Rule::SurfaceRefinement => {
                let surface = tags.get("surface")?.as_str();
                if PAVED_SURFACES.contains(&surface) {
                    Some(SurfaceCategory::Sealed)
                } else if UNPAVED_SURFACES.contains(&surface) {
                    Some(SurfaceCategory::Unsealed)
                } else {
                    None
                }
            }
            Rule::Structural { when, category } => when.matches(tags).then_some(*category),
        }
    }
}

/// Classify a tag set. Pure and deterministic.
pub fn classify(tags: &Tags) -> SurfaceCategory {
    matching_rule(tags)
        .map(|(_, category)| category)
        .unwrap_or(SurfaceCategory::Excluded)
}

/// Index into [`RULES`] of the first matching rule, with its category.
pub fn matching_rule(tags: &Tags) -> Option<(usize, SurfaceCategory)> {
    RULES
        .iter()
        .enumerate()
        .find_map(|(idx, rule)| rule.evaluate(tags).map(|category| (idx, category)))
}

/// Tag filters for fetching candidates of one category from the source.
///
/// These are the structural predicates of that category. They narrow the
/// fetch only; the final category always comes from [`classify`].
pub fn fetch_filters(category: SurfaceCategory) -> Vec<TagPredicate> {
    RULES
        .iter()
        .filter_map(|rule| match rule {
            Rule::Structural { when, category: c } if *c == category => Some(*when),
            _ => None,
        })
        .collect()
}
