//! Raw dataset records and `token:region` identifier parsing.

use std::borrow::Cow;

use thiserror::Error;

use crate::slug::derive_slug;

const ID_SEPARATOR: char = ':';

/// One record from the regional services dataset.
///
/// The dataset identifies each record with `<token>:<region>`. Older
/// snapshots use the service code as the token ([`RawEntry::Plain`]); newer
/// snapshots use an opaque hash and describe the service in an attributes
/// block ([`RawEntry::Attributed`]).
///
/// # Examples
///
/// ```
/// use aws_service_map_core::RawEntry;
///
/// let entry = RawEntry::from_id("ec2:eu-west-1")?;
/// assert_eq!(entry.token(), "ec2");
/// assert_eq!(entry.region(), "eu-west-1");
/// assert_eq!(entry.slug().as_deref(), Some("ec2"));
/// # Ok::<(), aws_service_map_core::EntryError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RawEntry {
    /// A record whose token is the service code itself.
    Plain {
        /// Token portion of the identifier.
        token: String,
        /// Region portion of the identifier.
        region: String,
    },
    /// A record carrying a service URL from which the slug is derived.
    Attributed {
        /// Token portion of the identifier, usually an opaque hash.
        token: String,
        /// Region portion of the identifier.
        region: String,
        /// Marketing URL such as `https://aws.amazon.com/ec2/`.
        service_url: String,
        /// Human-readable service name, when the record supplied one.
        service_name: Option<String>,
    },
}

/// Reasons a dataset identifier cannot be split into a token and a region.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum EntryError {
    /// The record did not carry an identifier.
    #[error("entry has no id")]
    MissingId,
    /// The identifier contained no `:` separator.
    #[error("id {id:?} has no ':' separator")]
    MissingSeparator {
        /// Identifier as it appeared in the dataset.
        id: String,
    },
    /// The identifier contained more than one `:` separator.
    #[error("id {id:?} has more than one ':' separator")]
    ExtraSeparator {
        /// Identifier as it appeared in the dataset.
        id: String,
    },
    /// The token before the separator was empty.
    #[error("id {id:?} has an empty token")]
    EmptyToken {
        /// Identifier as it appeared in the dataset.
        id: String,
    },
    /// The region after the separator was empty.
    #[error("id {id:?} has an empty region")]
    EmptyRegion {
        /// Identifier as it appeared in the dataset.
        id: String,
    },
}

/// Split a dataset identifier into its token and region.
///
/// # Errors
///
/// Returns [`EntryError`] unless `id` contains exactly one `:` with a
/// non-empty value on each side.
pub(crate) fn split_id(id: &str) -> Result<(&str, &str), EntryError> {
    let Some((token, region)) = id.split_once(ID_SEPARATOR) else {
        return Err(EntryError::MissingSeparator { id: id.to_owned() });
    };
    if region.contains(ID_SEPARATOR) {
        return Err(EntryError::ExtraSeparator { id: id.to_owned() });
    }
    if token.is_empty() {
        return Err(EntryError::EmptyToken { id: id.to_owned() });
    }
    if region.is_empty() {
        return Err(EntryError::EmptyRegion { id: id.to_owned() });
    }
    Ok((token, region))
}

impl RawEntry {
    /// Construct a [`RawEntry::Plain`] record.
    #[must_use]
    pub fn plain(token: impl Into<String>, region: impl Into<String>) -> Self {
        Self::Plain {
            token: token.into(),
            region: region.into(),
        }
    }

    /// Construct a [`RawEntry::Attributed`] record without a display name.
    #[must_use]
    pub fn attributed(
        token: impl Into<String>,
        region: impl Into<String>,
        service_url: impl Into<String>,
    ) -> Self {
        Self::Attributed {
            token: token.into(),
            region: region.into(),
            service_url: service_url.into(),
            service_name: None,
        }
    }

    /// Attach a human-readable service name.
    ///
    /// Plain records have nowhere to keep a name, so they are returned
    /// unchanged.
    #[must_use]
    pub fn with_service_name(self, name: impl Into<String>) -> Self {
        match self {
            Self::Attributed {
                token,
                region,
                service_url,
                ..
            } => Self::Attributed {
                token,
                region,
                service_url,
                service_name: Some(name.into()),
            },
            plain @ Self::Plain { .. } => plain,
        }
    }

    /// Parse a `token:region` identifier into a plain record.
    ///
    /// # Errors
    ///
    /// Returns [`EntryError`] when the identifier is malformed.
    pub fn from_id(id: &str) -> Result<Self, EntryError> {
        let (token, region) = split_id(id)?;
        Ok(Self::plain(token, region))
    }

    /// Build a record from an identifier and optional attribute values.
    ///
    /// A blank `service_url` is treated as absent, producing a plain record.
    ///
    /// # Errors
    ///
    /// Returns [`EntryError`] when the identifier is malformed.
    pub fn from_parts(
        id: &str,
        service_url: Option<&str>,
        service_name: Option<&str>,
    ) -> Result<Self, EntryError> {
        let (token, region) = split_id(id)?;
        let mut entry = service_url
            .map(str::trim)
            .filter(|link| !link.is_empty())
            .map_or_else(
                || Self::plain(token, region),
                |link| Self::attributed(token, region, link),
            );
        if let Some(name) = service_name.map(str::trim).filter(|text| !text.is_empty()) {
            entry = entry.with_service_name(name);
        }
        Ok(entry)
    }

    /// Token portion of the identifier.
    #[must_use]
    pub fn token(&self) -> &str {
        match self {
            Self::Plain { token, .. } | Self::Attributed { token, .. } => token,
        }
    }

    /// Region portion of the identifier.
    #[must_use]
    pub fn region(&self) -> &str {
        match self {
            Self::Plain { region, .. } | Self::Attributed { region, .. } => region,
        }
    }

    /// Service URL carried by attributed records.
    #[must_use]
    pub fn service_url(&self) -> Option<&str> {
        match self {
            Self::Plain { .. } => None,
            Self::Attributed { service_url, .. } => Some(service_url),
        }
    }

    /// Human-readable service name carried by attributed records.
    #[must_use]
    pub fn service_name(&self) -> Option<&str> {
        match self {
            Self::Plain { .. } => None,
            Self::Attributed { service_name, .. } => service_name.as_deref(),
        }
    }

    /// Canonical service slug for this record. See [`derive_slug`].
    #[must_use]
    pub fn slug(&self) -> Option<Cow<'_, str>> {
        derive_slug(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("ec2:us-east-1", "ec2", "us-east-1")]
    #[case("3f9a1c:ap-southeast-4", "3f9a1c", "ap-southeast-4")]
    #[case("systems-manager:eu-central-2", "systems-manager", "eu-central-2")]
    fn splits_well_formed_ids(#[case] id: &str, #[case] token: &str, #[case] region: &str) {
        assert_eq!(split_id(id), Ok((token, region)));
    }

    #[rstest]
    fn rejects_id_without_separator() {
        assert!(matches!(
            split_id("ec2"),
            Err(EntryError::MissingSeparator { .. })
        ));
    }

    #[rstest]
    #[case("ec2:us-east-1:extra")]
    #[case("a:b:c:d")]
    fn rejects_id_with_extra_separators(#[case] id: &str) {
        assert!(matches!(
            split_id(id),
            Err(EntryError::ExtraSeparator { .. })
        ));
    }

    #[rstest]
    fn rejects_empty_components() {
        assert!(matches!(
            split_id(":us-east-1"),
            Err(EntryError::EmptyToken { .. })
        ));
        assert!(matches!(split_id("ec2:"), Err(EntryError::EmptyRegion { .. })));
    }

    #[rstest]
    fn blank_service_url_yields_plain_entry() {
        let entry = RawEntry::from_parts("ec2:us-east-1", Some("  "), Some("Amazon EC2"))
            .expect("id should parse");
        assert_eq!(entry, RawEntry::plain("ec2", "us-east-1"));
        assert_eq!(entry.service_name(), None);
    }

    #[rstest]
    fn attributed_entry_keeps_name_and_url() {
        let entry = RawEntry::from_parts(
            "abc123:us-east-1",
            Some("https://aws.amazon.com/ec2/"),
            Some("Amazon EC2"),
        )
        .expect("id should parse");
        assert_eq!(entry.token(), "abc123");
        assert_eq!(entry.service_url(), Some("https://aws.amazon.com/ec2/"));
        assert_eq!(entry.service_name(), Some("Amazon EC2"));
        assert_eq!(entry.slug().as_deref(), Some("ec2"));
    }
}
