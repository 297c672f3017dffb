//! Merging and filtering of decoded tile sources.
//!
//! A tile request may be served from several stored blobs (for example a
//! store partitioned by an auxiliary dimension); their decoded layers are
//! merged per layer name before encoding the response.

use indexmap::IndexMap;

use crate::tile::{DEFAULT_EXTENT, Feature, Layer, VERSION};

/// Merge decoded layer sets from one or more sources.
///
/// Layers are matched by name case-insensitively and re-emitted under their
/// lowercased name with the fixed extent and version, keeping first-seen
/// group order. A non-empty `requested` set restricts the result to layers
/// whose name matches one of the requested names, compared
/// case-insensitively.
pub fn merge_layers(sources: Vec<Vec<Layer>>, requested: &[String]) -> Vec<Layer> {
    let mut groups: IndexMap<String, Vec<Feature>> = IndexMap::new();

    for layer in sources.into_iter().flatten() {
        if !requested.is_empty()
            && !requested.iter().any(|name| name.eq_ignore_ascii_case(&layer.name))
        {
            continue;
        }

        groups.entry(layer.name.to_lowercase()).or_default().extend(layer.features);
    }

    groups
        .into_iter()
        .map(|(name, features)| Layer {
            name,
            version: VERSION,
            extent: DEFAULT_EXTENT,
            features,
        })
        .collect()
}

/// Check whether any layer carries a feature with non-empty geometry.
///
/// An all-empty result is a valid "no content" outcome, distinct from a
/// decode failure; callers typically skip encoding entirely for it.
pub fn has_content(layers: &[Layer]) -> bool {
    layers.iter().any(|layer| layer.features.iter().any(|feature| !feature.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile::{Coordinate, GeomType};

    fn layer(name: &str, ids: &[&str]) -> Layer {
        let mut layer = Layer::new(name);
        layer.features = ids
            .iter()
            .map(|id| Feature {
                id: (*id).into(),
                geom_type: GeomType::Point,
                geometry: vec![vec![Coordinate::new(1, 1)]],
                attributes: Default::default(),
                extent: DEFAULT_EXTENT,
            })
            .collect();
        layer
    }

    #[test]
    fn merge_is_case_insensitive() {
        let sources = vec![vec![layer("water", &["1"])], vec![layer("Water", &["2"])]];

        let merged = merge_layers(sources, &["Water".into()]);

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].name, "water");
        assert_eq!(merged[0].version, VERSION);
        assert_eq!(merged[0].extent, DEFAULT_EXTENT);

        let ids: Vec<_> = merged[0].features.iter().map(|feature| feature.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[test]
    fn filter_drops_unrequested_layers() {
        let sources = vec![vec![layer("water", &["1"]), layer("roads", &["2"])]];

        let merged = merge_layers(sources, &["roads".into()]);

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].name, "roads");
    }

    #[test]
    fn empty_filter_keeps_everything() {
        let sources = vec![vec![layer("water", &["1"]), layer("roads", &["2"])]];

        let merged = merge_layers(sources, &[]);

        let names: Vec<_> = merged.iter().map(|layer| layer.name.as_str()).collect();
        assert_eq!(names, vec!["water", "roads"]);
    }

    #[test]
    fn content_check() {
        let mut empty = layer("water", &[]);
        assert!(!has_content(&[empty.clone()]));

        empty.features.push(Feature::default());
        assert!(!has_content(std::slice::from_ref(&empty)));

        assert!(has_content(&[layer("water", &["1"])]));
    }
}
