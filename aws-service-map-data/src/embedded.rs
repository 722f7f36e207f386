//! Snapshot of the regional services table compiled into the crate.

use std::time::Instant;

use aws_service_map_core::{Dataset, DatasetLoader, LoadError};
use log::debug;

static BUNDLED: &[u8] = include_bytes!("../data/aws-service-regions.json");

/// Loader serving a dataset document held in memory.
///
/// The default instance serves the snapshot bundled with this crate, so
/// loading never touches the network or the filesystem.
///
/// # Examples
///
/// ```
/// use aws_service_map_core::DatasetLoader;
/// use aws_service_map_data::EmbeddedDataset;
///
/// let dataset = EmbeddedDataset::new().load()?;
/// assert!(!dataset.is_empty());
///
/// let custom = EmbeddedDataset::from_bytes(br#"{"prices":[{"id":"s3:eu-west-1"}]}"#);
/// assert_eq!(custom.load()?.len(), 1);
/// # Ok::<(), aws_service_map_core::LoadError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmbeddedDataset {
    bytes: &'static [u8],
}

impl EmbeddedDataset {
    /// Serve the bundled snapshot.
    #[must_use]
    pub const fn new() -> Self {
        Self::from_bytes(BUNDLED)
    }

    /// Serve `bytes` instead of the bundled snapshot.
    #[must_use]
    pub const fn from_bytes(bytes: &'static [u8]) -> Self {
        Self { bytes }
    }

    /// Raw document served by this loader.
    #[must_use]
    pub const fn as_bytes(&self) -> &'static [u8] {
        self.bytes
    }
}

impl Default for EmbeddedDataset {
    fn default() -> Self {
        Self::new()
    }
}

impl DatasetLoader for EmbeddedDataset {
    fn load(&self) -> Result<Dataset, LoadError> {
        let started = Instant::now();
        let dataset = Dataset::from_slice(self.bytes)?;
        debug!(
            "decoded {} embedded bytes into {} entries in {:?}",
            self.bytes.len(),
            dataset.len(),
            started.elapsed()
        );
        Ok(dataset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_service_map_core::ServiceIndex;
    use rstest::{fixture, rstest};

    #[fixture]
    fn bundled_index() -> ServiceIndex {
        let dataset = EmbeddedDataset::new()
            .load()
            .expect("bundled snapshot should decode");
        ServiceIndex::build(&dataset)
    }

    static MIXED_FORMAT: &[u8] = include_bytes!("../tests/fixtures/mixed-format.json");

    #[fixture]
    fn mixed_index() -> ServiceIndex {
        let dataset = EmbeddedDataset::from_bytes(MIXED_FORMAT)
            .load()
            .expect("mixed-format fixture should decode");
        ServiceIndex::build(&dataset)
    }

    #[rstest]
    fn bundled_snapshot_has_no_malformed_records(bundled_index: ServiceIndex) {
        let dataset = EmbeddedDataset::default()
            .load()
            .expect("bundled snapshot should decode");
        assert_eq!(dataset.malformed(), 0);
        assert_eq!(bundled_index.all_services().len(), 24);
        assert_eq!(bundled_index.all_regions().len(), 21);
        assert_eq!(dataset.len(), 24 * 21);
    }

    #[rstest]
    #[case("ec2", "us-east-1")]
    #[case("s3", "eu-west-1")]
    #[case("rds", "ap-southeast-2")]
    #[case("apigateway", "sa-east-1")]
    #[case("secretsmanager", "us-east-1")]
    #[case("ssm", "eu-central-1")]
    #[case("lambda", "af-south-1")]
    fn bundled_snapshot_knows_core_services(
        bundled_index: ServiceIndex,
        #[case] service: &str,
        #[case] region: &str,
    ) {
        assert!(bundled_index.is_service_in_region(service, region));
    }

    #[rstest]
    fn bundled_snapshot_lists_each_service_once(bundled_index: ServiceIndex) {
        let services = bundled_index.all_services();
        assert!(services.contains("apigateway"));
        assert!(!services.contains("api-gateway"));
        assert!(services.contains("ssm"));
        assert!(!services.contains("systems-manager"));
    }

    #[rstest]
    fn mixed_records_merge_under_one_slug(mixed_index: ServiceIndex) {
        let regions: Vec<_> = mixed_index
            .regions_for_service("ec2")
            .iter()
            .map(String::as_str)
            .collect();
        assert_eq!(regions, ["ap-south-1", "eu-west-1", "us-east-1"]);
        assert_eq!(
            mixed_index.service_name("ec2"),
            Some("Amazon Elastic Compute Cloud (EC2)")
        );
        assert_eq!(mixed_index.service_name("autoscaling"), None);
        assert!(mixed_index.all_services().contains("autoscaling"));
    }

    #[rstest]
    fn mixed_records_answer_hashed_tokens(mixed_index: ServiceIndex) {
        assert!(mixed_index.is_service_in_region("f38ade3e01ba3147a02958b0a1c4a0d4", "us-east-1"));
        assert!(mixed_index.is_service_in_region("rds", "us-east-1"));
        assert!(!mixed_index.is_service_in_region("0a5f3e2d1c9b8a7f6e5d4c3b2a190817", "us-west-2"));
        assert!(mixed_index.services_for_region("us-west-2").is_empty());
    }

    #[rstest]
    fn global_services_list_a_single_region(mixed_index: ServiceIndex) {
        let regions: Vec<_> = mixed_index
            .regions_for_service("cloudfront")
            .iter()
            .map(String::as_str)
            .collect();
        assert_eq!(regions, ["us-east-1"]);
    }

    #[rstest]
    fn custom_bytes_replace_the_snapshot() {
        let loader = EmbeddedDataset::from_bytes(br#"{"prices":[{"id":"s3:eu-west-1"}]}"#);
        let dataset = loader.load().expect("custom document should decode");
        assert_eq!(dataset.len(), 1);
    }

    #[rstest]
    fn undecodable_bytes_fail_to_load() {
        let loader = EmbeddedDataset::from_bytes(b"not json");
        assert!(matches!(loader.load(), Err(LoadError::Decode { .. })));
    }
}
