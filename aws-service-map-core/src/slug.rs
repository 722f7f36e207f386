//! Canonical service slug derivation.
//!
//! A slug is taken from the service URL when a record carries one and from
//! the identifier token otherwise. For URLs the first path segment after the
//! host wins, so `https://aws.amazon.com/rds/mysql/` maps to `rds` and the
//! product-specific tail is ignored.

use std::borrow::Cow;

use url::{ParseError, Url};

use crate::RawEntry;

/// Derive the canonical service slug for `entry`.
///
/// Returns `None` when no usable slug exists, e.g. a service URL without a
/// path. Derivation is pure: the same entry always yields the same slug.
///
/// # Examples
///
/// ```
/// use aws_service_map_core::{RawEntry, derive_slug};
///
/// let hashed = RawEntry::attributed("9c1e", "us-east-1", "https://aws.amazon.com/ec2/");
/// assert_eq!(derive_slug(&hashed).as_deref(), Some("ec2"));
///
/// let plain = RawEntry::plain("lambda", "us-east-1");
/// assert_eq!(derive_slug(&plain).as_deref(), Some("lambda"));
/// ```
#[must_use]
pub fn derive_slug(entry: &RawEntry) -> Option<Cow<'_, str>> {
    match entry {
        RawEntry::Plain { token, .. } => {
            Some(token.as_str()).filter(|code| !code.is_empty()).map(Cow::Borrowed)
        }
        RawEntry::Attributed { service_url, .. } => {
            slug_from_service_url(service_url).map(Cow::Owned)
        }
    }
}

/// Extract the service slug from an AWS marketing URL.
///
/// Scheme-less URLs are read as `https://`. Query strings, fragments and
/// trailing slashes are ignored.
///
/// # Examples
///
/// ```
/// use aws_service_map_core::slug_from_service_url;
///
/// assert_eq!(slug_from_service_url("https://aws.amazon.com/ec2/").as_deref(), Some("ec2"));
/// assert_eq!(slug_from_service_url("https://aws.amazon.com/rds/mysql/").as_deref(), Some("rds"));
/// assert_eq!(slug_from_service_url("https://aws.amazon.com/"), None);
/// ```
#[must_use]
pub fn slug_from_service_url(raw: &str) -> Option<String> {
    let url = parse_service_url(raw.trim())?;
    url.host_str().filter(|host| !host.is_empty())?;
    url.path_segments()?
        .find(|segment| !segment.is_empty())
        .map(str::to_owned)
}

fn parse_service_url(raw: &str) -> Option<Url> {
    if raw.is_empty() {
        return None;
    }
    match Url::parse(raw) {
        Ok(url) => Some(url),
        Err(ParseError::RelativeUrlWithoutBase) => Url::parse(&format!("https://{raw}")).ok(),
        Err(_) => None,
    }
}
