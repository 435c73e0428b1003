//! Surface temperature from satellite thermal imagery.
//!
//! Pipeline pieces, in order of use:
//! - [`selector`]: pick the newest scene under the cloud-cover ceiling
//! - [`grid`]: tile the bbox into fixed-size ground cells
//! - [`resample`]: average sample digital numbers per cell and calibrate
//! - [`stats`]: min/max/mean over valid cells

pub mod calibration;
pub mod grid;
pub mod resample;
pub mod scene;
pub mod selector;
pub mod stats;

pub use calibration::BandCalibration;
pub use grid::{GridCell, GridSpec, TemperatureGrid};
pub use resample::resample;
pub use scene::{SceneCandidate, SceneQuery, ThermalCandidateImage, ThermalSample};
pub use selector::{select_scene, SelectionPolicy};
pub use stats::{compute_stats, GridStats};
