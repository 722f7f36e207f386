//! Dataset documents and their decoded entries.
//!
//! The published document looks like:
//!
//! ```json
//! {
//!   "metadata": { "...": "..." },
//!   "prices": [
//!     { "id": "ec2:eu-west-1" },
//!     {
//!       "id": "a1b2c3:us-east-1",
//!       "attributes": {
//!         "aws:region": "us-east-1",
//!         "aws:serviceName": "Amazon EC2",
//!         "aws:serviceUrl": "https://aws.amazon.com/ec2/"
//!       }
//!     }
//!   ]
//! }
//! ```
//!
//! Only `prices` is required. Records with a malformed identifier are counted
//! and dropped rather than failing the whole document.

use log::debug;
use serde::Deserialize;

use crate::entry::EntryError;
use crate::{LoadError, RawEntry};

/// Entries decoded from a single dataset document.
///
/// # Examples
///
/// ```
/// use aws_service_map_core::Dataset;
///
/// let dataset = Dataset::from_slice(br#"{"prices":[{"id":"s3:us-east-1"},{"id":"broken"}]}"#)?;
/// assert_eq!(dataset.len(), 1);
/// assert_eq!(dataset.malformed(), 1);
/// # Ok::<(), aws_service_map_core::LoadError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    entries: Vec<RawEntry>,
    malformed: usize,
}

impl Dataset {
    /// Wrap already-parsed entries.
    #[must_use]
    pub const fn new(entries: Vec<RawEntry>) -> Self {
        Self {
            entries,
            malformed: 0,
        }
    }

    /// Record how many source records were dropped for a malformed id.
    #[must_use]
    pub const fn with_malformed(mut self, malformed: usize) -> Self {
        self.malformed = malformed;
        self
    }

    /// Decode a dataset document.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Decode`] when `bytes` is not JSON or lacks a
    /// `prices` array.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, LoadError> {
        let document: Document =
            serde_json::from_slice(bytes).map_err(|err| LoadError::Decode {
                message: err.to_string(),
            })?;
        Ok(document.into_dataset())
    }

    /// Decoded entries in document order.
    #[must_use]
    pub const fn entries(&self) -> &[RawEntry] {
        self.entries.as_slice()
    }

    /// Consume the dataset and return its entries.
    #[must_use]
    pub fn into_entries(self) -> Vec<RawEntry> {
        self.entries
    }

    /// Number of records dropped because their id was malformed.
    #[must_use]
    pub const fn malformed(&self) -> usize {
        self.malformed
    }

    /// Number of decoded entries.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no entries were decoded.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<RawEntry> for Dataset {
    fn from_iter<I: IntoIterator<Item = RawEntry>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[derive(Debug, Deserialize)]
struct Document {
    prices: Vec<Record>,
}

#[derive(Debug, Deserialize)]
struct Record {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    attributes: Option<Attributes>,
}

#[derive(Debug, Default, Deserialize)]
struct Attributes {
    #[serde(rename = "aws:region", default)]
    region: Option<String>,
    #[serde(rename = "aws:serviceName", default)]
    service_name: Option<String>,
    #[serde(rename = "aws:serviceUrl", default)]
    service_url: Option<String>,
}

impl Document {
    fn into_dataset(self) -> Dataset {
        let mut malformed = 0_usize;
        let entries = self
            .prices
            .into_iter()
            .filter_map(|record| match record.into_entry() {
                Ok(entry) => Some(entry),
                Err(err) => {
                    debug!("skipping dataset record: {err}");
                    malformed += 1;
                    None
                }
            })
            .collect();
        Dataset::new(entries).with_malformed(malformed)
    }
}

impl Record {
    fn into_entry(self) -> Result<RawEntry, EntryError> {
        let id = self.id.ok_or(EntryError::MissingId)?;
        let attributes = self.attributes.unwrap_or_default();
        let entry = RawEntry::from_parts(
            &id,
            attributes.service_url.as_deref(),
            attributes.service_name.as_deref(),
        )?;
        if let Some(declared) = attributes.region.as_deref()
            && declared != entry.region()
        {
            debug!(
                "record {id:?} declares region {declared:?}; using {:?} from its id",
                entry.region()
            );
        }
        Ok(entry)
    }
}
