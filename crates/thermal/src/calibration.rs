//! Digital-number to physical temperature conversion.

/// Offset between Kelvin and degrees Celsius.
pub const KELVIN_TO_CELSIUS: f64 = 273.15;

/// Linear scale-and-offset calibration of one thermal band to Kelvin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandCalibration {
    /// Band name at the imagery source.
    pub band: &'static str,
    pub scale: f64,
    pub offset: f64,
    /// Raw value marking "no data".
    pub fill_value: u16,
}

impl BandCalibration {
    /// Landsat 8/9 Collection 2 Level-2 surface temperature.
    pub const LANDSAT_ST_B10: BandCalibration = BandCalibration {
        band: "ST_B10",
        scale: 0.00341802,
        offset: 149.0,
        fill_value: 0,
    };

    /// Known calibrations, looked up by band name.
    pub const KNOWN: &'static [BandCalibration] = &[Self::LANDSAT_ST_B10];

    pub fn for_band(band: &str) -> Option<BandCalibration> {
        Self::KNOWN.iter().copied().find(|c| c.band == band)
    }

    pub fn to_kelvin(&self, digital_number: f64) -> f64 {
        digital_number * self.scale + self.offset
    }

    pub fn to_celsius(&self, digital_number: f64) -> f64 {
        self.to_kelvin(digital_number) - KELVIN_TO_CELSIUS
    }

    pub fn is_fill(&self, digital_number: u16) -> bool {
        digital_number == self.fill_value
    }
}

impl Default for BandCalibration {
    fn default() -> Self {
        Self::LANDSAT_ST_B10
    }
}
