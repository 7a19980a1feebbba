use std::collections::{BTreeMap, HashMap};

use itertools::Itertools;

use super::container_image::ContainerImage;
use super::scan_report::ScanResult;

/// Folds the images of many workloads into per-namespace deduplicated sets.
///
/// Workloads must be fed in source-list order: within a namespace the first
/// image seen for an identity key is kept and later ones are dropped, even if
/// their reference differs.
#[derive(Debug, Default)]
pub struct NamespaceAggregator {
    buckets: HashMap<String, HashMap<String, ContainerImage>>,
}

impl NamespaceAggregator {
    pub fn add<I>(&mut self, namespace: &str, images: I)
    where
        I: IntoIterator<Item = ContainerImage>,
    {
        let bucket = self.buckets.entry(namespace.to_string()).or_default();
        for image in images {
            bucket.entry(image.identity_key()).or_insert(image);
        }
    }

    /// Namespaces with their images sorted by `(name, ref)`.
    pub fn finish(self) -> ScanResult {
        let namespaces: BTreeMap<String, Vec<ContainerImage>> = self
            .buckets
            .into_iter()
            .map(|(namespace, bucket)| {
                let images = bucket
                    .into_values()
                    .sorted_by(|a, b| {
                        (a.name(), a.reference()).cmp(&(b.name(), b.reference()))
                    })
                    .collect();
                (namespace, images)
            })
            .collect();

        ScanResult::from(namespaces)
    }
}
