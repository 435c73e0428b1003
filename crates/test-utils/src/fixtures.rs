//! Common test fixtures for surface-layers tests.
//!
//! Pre-defined locations, tag sets and dates shared by unit and API tests.

/// Reference request locations as `(lat, lon)`.
pub mod locations {
    /// Duesseldorf south, the usual 2 km example.
    pub const DUESSELDORF_SOUTH: (f64, f64) = (51.1787, 6.8416);

    /// On the equator and prime meridian.
    pub const NULL_ISLAND: (f64, f64) = (0.0, 0.0);

    /// High latitude, where longitude degrees are short.
    pub const TROMSO: (f64, f64) = (69.6492, 18.9553);
}

/// Tag sets as `(key, value)` slices.
pub mod tags {
    pub const BUILDING: &[(&str, &str)] = &[("building", "yes")];
    pub const PARKING: &[(&str, &str)] = &[("amenity", "parking")];
    pub const INDUSTRIAL: &[(&str, &str)] = &[("landuse", "industrial")];
    pub const RUNWAY: &[(&str, &str)] = &[("aeroway", "runway")];
    pub const PEDESTRIAN_AREA: &[(&str, &str)] = &[("highway", "pedestrian"), ("area", "yes")];
    pub const PARK: &[(&str, &str)] = &[("leisure", "park")];
    pub const FOREST: &[(&str, &str)] = &[("landuse", "forest")];
    pub const WOOD: &[(&str, &str)] = &[("natural", "wood")];
    /// Matches no rule; water is neither sealed nor unsealed.
    pub const WATER: &[(&str, &str)] = &[("natural", "water")];
    /// Sealed structure, unsealed surface.
    pub const GRAVEL_PARKING: &[(&str, &str)] = &[("amenity", "parking"), ("surface", "gravel")];
    /// Unsealed structure, sealed surface.
    pub const PAVED_PARK: &[(&str, &str)] = &[("leisure", "park"), ("surface", "asphalt")];
    /// Matches no rule.
    pub const UNRELATED: &[(&str, &str)] = &[("shop", "bakery")];
}

/// Fixed dates for scene selection.
pub mod dates {
    use chrono::NaiveDate;

    /// The "today" every scene fixture is relative to: 2024-08-01.
    pub fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 8, 1).expect("valid fixture date")
    }

    /// `today()` minus `days`.
    pub fn days_ago(days: u64) -> NaiveDate {
        today() - chrono::Days::new(days)
    }
}

/// Landsat ST_B10 digital numbers for a few round temperatures.
pub mod digital_numbers {
    /// About 0 C.
    pub const FREEZING: u16 = 36_322;
    /// About 20 C.
    pub const MILD: u16 = 42_174;
    /// About 40 C.
    pub const HOT: u16 = 48_025;
    /// Band fill value.
    pub const FILL: u16 = 0;
}
