//! Shapes pipeline results into the wire responses.

use landcover::{AssembledLayers, ClassifiedFeature};
use serde_json::Value;
use surface_protocol::{
    Feature, FeatureCollection, Geometry, LayerResponse, Properties, ResponseStatus,
    TemperatureResponse,
};
use thermal::GridCell;

use crate::pipeline::TemperatureProduct;

/// Decimal places of per-cell temperatures.
pub const CELL_DECIMALS: i32 = 1;

/// Decimal places of min/max/mean.
pub const STATS_DECIMALS: i32 = 2;

/// Round half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

fn feature_from_classified(feature: &ClassifiedFeature) -> Feature {
    let properties: Properties = feature
        .tags
        .iter()
        .map(|(k, v)| (k.clone(), Value::String(v.clone())))
        .collect();

    Feature::new(Geometry::polygon(vec![feature.ring.clone()]))
        .with_id(feature.id.to_string())
        .with_properties(properties)
}

/// Build the surface-layer response. Sealed and unsealed collections are
/// emitted in assembly order.
pub fn layer_response(layers: &AssembledLayers) -> LayerResponse {
    let sealed_geojson: FeatureCollection =
        layers.sealed.iter().map(feature_from_classified).collect();
    let unsealed_geojson: FeatureCollection =
        layers.unsealed.iter().map(feature_from_classified).collect();

    LayerResponse {
        sealed_count: sealed_geojson.len(),
        unsealed_count: unsealed_geojson.len(),
        sealed_geojson,
        unsealed_geojson,
        status: if layers.is_partial() {
            ResponseStatus::Partial
        } else {
            ResponseStatus::Success
        },
        dropped_features: layers.dropped.len(),
        warnings: layers.warnings(),
    }
}

/// A valid cell as a rectangle carrying its rounded temperature.
/// Invalid cells yield `None`.
fn feature_from_cell(cell: &GridCell) -> Option<Feature> {
    let temperature = cell.temperature_celsius?;
    let [west, south, east, north] = cell.bounds;
    Some(
        Feature::new(Geometry::rectangle(west, south, east, north))
            .with_property("temperature", round_to(temperature, CELL_DECIMALS))
            .with_property("row", cell.row)
            .with_property("col", cell.col),
    )
}

/// Build the temperature response from valid cells only.
pub fn temperature_response(product: &TemperatureProduct) -> TemperatureResponse {
    let temperature_data: FeatureCollection = product
        .grid
        .cells()
        .iter()
        .filter_map(feature_from_cell)
        .collect();

    TemperatureResponse {
        temperature_data,
        min_temp: round_to(product.stats.min, STATS_DECIMALS),
        max_temp: round_to(product.stats.max, STATS_DECIMALS),
        mean_temp: round_to(product.stats.mean, STATS_DECIMALS),
        valid_cells: product.stats.valid_cell_count,
        status: ResponseStatus::Success,
        image_date: product.image.image_date(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use landcover::assemble;
    use surface_common::{BoundingBox, SurfaceError};
    use test_utils::{scene, square_way, tags};
    use thermal::{
        compute_stats, resample, BandCalibration, GridSpec, ThermalCandidateImage, ThermalSample,
    };

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(21.349, 1), 21.3);
        assert_eq!(round_to(21.35, 2), 21.35);
        assert_eq!(round_to(-3.25, 1), -3.3);
        assert_eq!(round_to(7.0, 1), 7.0);
    }

    #[test]
    fn test_layer_response_features() {
        let layers = assemble(
            Ok(vec![square_way(1, tags::BUILDING)]),
            Ok(vec![square_way(2, tags::WOOD)]),
        )
        .unwrap();

        let response = layer_response(&layers);
        assert_eq!(response.status, ResponseStatus::Success);
        assert_eq!(response.sealed_count, 1);
        assert_eq!(response.unsealed_count, 1);

        let feature = &response.sealed_geojson.features[0];
        assert_eq!(feature.id.as_deref(), Some("way/1"));
        assert_eq!(feature.properties["building"], "yes");
        let Geometry::Polygon { coordinates } = &feature.geometry;
        assert_eq!(coordinates[0].len(), 5);
        assert_eq!(coordinates[0].first(), coordinates[0].last());
    }

    #[test]
    fn test_partial_layer_response() {
        let layers = assemble(
            Err(SurfaceError::timeout("sealed query")),
            Ok(vec![square_way(2, tags::WOOD)]),
        )
        .unwrap();

        let response = layer_response(&layers);
        assert_eq!(response.status, ResponseStatus::Partial);
        assert!(response.sealed_geojson.is_empty());
        assert_eq!(response.unsealed_count, 1);
        assert_eq!(response.warnings.len(), 1);
    }

    #[test]
    fn test_temperature_response_rounding_and_invalid_cells() {
        let bbox = BoundingBox::from_center(0.0, 0.0, 0.2).unwrap();
        let spec = GridSpec::new(bbox, 100.0).unwrap();
        let [w, s, e, n] = spec.cell_bounds(0, 0);
        let samples = vec![ThermalSample::new((w + e) / 2.0, (s + n) / 2.0, 44_000)];
        let grid = resample(spec, &samples, &BandCalibration::LANDSAT_ST_B10);
        let stats = compute_stats(grid.cells()).unwrap();

        let product = TemperatureProduct {
            image: ThermalCandidateImage {
                scene: scene("LC09_test", NaiveDate::from_ymd_opt(2024, 7, 4).unwrap(), 2.0),
                samples,
            },
            grid,
            stats,
        };

        let response = temperature_response(&product);
        assert_eq!(response.image_date, "2024-07-04");
        assert_eq!(response.temperature_data.len(), 1);
        assert_eq!(response.valid_cells, 1);
        // 44_000 DN = 26.24288 C
        assert_eq!(response.min_temp, 26.24);
        assert_eq!(response.max_temp, 26.24);
        assert_eq!(response.mean_temp, 26.24);

        let cell = &response.temperature_data.features[0];
        assert_eq!(cell.properties["temperature"], 26.2);
        assert_eq!(cell.properties["row"], 0);
        assert_eq!(cell.properties["col"], 0);
    }
}
