pub mod container_image;
pub mod image_extractor;
pub mod image_reference;
pub mod namespace_aggregator;
pub mod scan_report;
pub mod workload;
