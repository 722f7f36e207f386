//! Normalized lookup structures built from a [`Dataset`].

use std::collections::{BTreeMap, BTreeSet};

use log::debug;

use crate::Dataset;

static EMPTY: BTreeSet<String> = BTreeSet::new();

/// Counts describing how a dataset was normalized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndexSummary {
    /// Records present in the source document.
    pub entries_read: usize,
    /// Records that contributed to the index.
    pub entries_indexed: usize,
    /// Records dropped because their id was malformed.
    pub skipped_malformed: usize,
    /// Records dropped because no service slug could be derived.
    pub skipped_empty_slug: usize,
    /// Distinct service slugs.
    pub services: usize,
    /// Distinct region codes.
    pub regions: usize,
}

/// Immutable service and region lookups for one dataset snapshot.
///
/// # Examples
///
/// ```
/// use aws_service_map_core::{Dataset, RawEntry, ServiceIndex};
///
/// let dataset = Dataset::new(vec![
///     RawEntry::attributed("abc123", "us-east-1", "https://aws.amazon.com/ec2/"),
///     RawEntry::plain("ec2", "eu-west-1"),
/// ]);
/// let index = ServiceIndex::build(&dataset);
/// assert_eq!(index.regions_for_service("ec2").len(), 2);
/// assert!(index.is_service_in_region("abc123", "us-east-1"));
/// assert!(!index.is_service_in_region("ec2", "ap-south-1"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceIndex {
    regions_by_service: BTreeMap<String, BTreeSet<String>>,
    services_by_region: BTreeMap<String, BTreeSet<String>>,
    tokens_by_region: BTreeMap<String, BTreeSet<String>>,
    services: BTreeSet<String>,
    regions: BTreeSet<String>,
    service_names: BTreeMap<String, String>,
    summary: IndexSummary,
}

impl ServiceIndex {
    /// Normalize every entry in `dataset`.
    ///
    /// Entries without a derivable slug are dropped entirely, including from
    /// the exact token lookup, so every indexed region has at least one
    /// service.
    #[must_use]
    pub fn build(dataset: &Dataset) -> Self {
        let mut index = Self::default();
        let mut skipped_empty_slug = 0_usize;
        for entry in dataset.entries() {
            let Some(slug) = entry.slug() else {
                debug!(
                    "skipping {}:{}; no service slug could be derived",
                    entry.token(),
                    entry.region()
                );
                skipped_empty_slug += 1;
                continue;
            };
            let region = entry.region();
            index
                .regions_by_service
                .entry(slug.to_string())
                .or_default()
                .insert(region.to_owned());
            index
                .services_by_region
                .entry(region.to_owned())
                .or_default()
                .insert(slug.to_string());
            index
                .tokens_by_region
                .entry(region.to_owned())
                .or_default()
                .insert(entry.token().to_owned());
            if let Some(name) = entry.service_name() {
                index
                    .service_names
                    .entry(slug.into_owned())
                    .or_insert_with(|| name.to_owned());
            }
        }
        index.services = index.regions_by_service.keys().cloned().collect();
        index.regions = index.services_by_region.keys().cloned().collect();
        let skipped = dataset.malformed();
        index.summary = IndexSummary {
            entries_read: dataset.len() + skipped,
            entries_indexed: dataset.len() - skipped_empty_slug,
            skipped_malformed: skipped,
            skipped_empty_slug,
            services: index.services.len(),
            regions: index.regions.len(),
        };
        index
    }

    /// Every observed region code.
    #[must_use]
    pub const fn all_regions(&self) -> &BTreeSet<String> {
        &self.regions
    }

    /// Every derived service slug.
    #[must_use]
    pub const fn all_services(&self) -> &BTreeSet<String> {
        &self.services
    }

    /// Regions offering `slug`; empty when the slug is unknown.
    #[must_use]
    pub fn regions_for_service(&self, slug: &str) -> &BTreeSet<String> {
        self.regions_by_service.get(slug).unwrap_or(&EMPTY)
    }

    /// Service slugs available in `region`; empty when the region is unknown.
    #[must_use]
    pub fn services_for_region(&self, region: &str) -> &BTreeSet<String> {
        self.services_by_region.get(region).unwrap_or(&EMPTY)
    }

    /// Whether `service` is available in `region`.
    ///
    /// `service` may be either a derived slug or a raw identifier token, so
    /// callers holding tokens from older snapshots keep working. Only tokens
    /// of entries that yield a slug are indexed: an entry whose service URL
    /// has no usable path segment is unknown to every lookup, including this
    /// one, even when queried by its raw token.
    #[must_use]
    pub fn is_service_in_region(&self, service: &str, region: &str) -> bool {
        let token_match = self
            .tokens_by_region
            .get(region)
            .is_some_and(|tokens| tokens.contains(service));
        token_match || self.services_for_region(region).contains(service)
    }

    /// Human-readable name first supplied for `slug`, if any.
    #[must_use]
    pub fn service_name(&self, slug: &str) -> Option<&str> {
        self.service_names.get(slug).map(String::as_str)
    }

    /// Normalization counts for this snapshot.
    #[must_use]
    pub const fn summary(&self) -> &IndexSummary {
        &self.summary
    }

    /// Whether the snapshot contains no services.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}
