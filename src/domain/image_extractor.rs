use tracing::debug;

use super::container_image::ContainerImage;
use super::image_reference::{extract_digest, is_valid_reference, strip_transport_scheme};
use super::workload::{ReportedImage, StatusCategory, Workload};

/// Distinct images a workload runs, in collection order.
///
/// Images reported by the runtime statuses are taken from every category in
/// [`StatusCategory::ALL`] order. Only when none of them yields a valid image
/// (e.g. the pod is still pending) are the declared spec images used instead;
/// the fallback applies to the whole workload, never per container.
pub fn extract_images(workload: &Workload) -> Vec<ContainerImage> {
    let from_statuses: Vec<ContainerImage> = StatusCategory::ALL
        .into_iter()
        .flat_map(|category| workload.statuses(category))
        .filter_map(|status| image_from_status(workload, status))
        .collect();

    if !from_statuses.is_empty() {
        return from_statuses;
    }

    workload
        .declared_images
        .iter()
        .filter_map(|image| image_from_spec(workload, image))
        .collect()
}

fn image_from_status(workload: &Workload, status: &ReportedImage) -> Option<ContainerImage> {
    let image = strip_transport_scheme(&status.image);
    if !is_valid_reference(image) {
        debug!(
            "skipping invalid image ref from status of {}: {:?}",
            workload.display_name(),
            status.image
        );
        return None;
    }

    let image_id = strip_transport_scheme(&status.image_id);
    let digest = extract_digest([image_id, image]);
    Some(ContainerImage::new(image, digest))
}

fn image_from_spec(workload: &Workload, image: &str) -> Option<ContainerImage> {
    let image = strip_transport_scheme(image);
    if !is_valid_reference(image) {
        debug!(
            "skipping invalid image ref from spec of {}: {:?}",
            workload.display_name(),
            image
        );
        return None;
    }

    let digest = extract_digest([image]);
    Some(ContainerImage::new(image, digest))
}
