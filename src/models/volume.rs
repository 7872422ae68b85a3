//! Typed model of one catalog record ("volume").
//!
//! The upstream payload is a loosely-typed document: any field may be
//! absent, and new fields appear without notice. Every field the
//! pipeline reads is typed here as an `Option` (or defaults to empty),
//! and each level carries a flattened passthrough map so a volume
//! survives a decode/encode round trip without losing unknown keys —
//! consolidated artifacts must preserve the upstream records verbatim.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// One record returned by the catalog search
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Volume {
    /// Catalog identifier of the volume
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Bibliographic metadata
    #[serde(default)]
    pub volume_info: VolumeInfo,

    /// Sale and licensing metadata
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sale_info: Option<SaleInfo>,

    /// Access and availability metadata
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_info: Option<AccessInfo>,

    #[serde(flatten)]
    pub other: BTreeMap<String, Value>,
}

impl Volume {
    /// Saleability status, uppercased for comparison; empty when absent
    pub fn saleability(&self) -> String {
        self.sale_info
            .as_ref()
            .and_then(|s| s.saleability.as_deref())
            .unwrap_or_default()
            .to_uppercase()
    }

    /// PDF availability record, when present
    pub fn pdf(&self) -> Option<&FormatAvailability> {
        self.access_info.as_ref().and_then(|a| a.pdf.as_ref())
    }

    /// True when the catalog advertises a downloadable PDF with a link
    pub fn has_downloadable_pdf(&self) -> bool {
        self.pdf()
            .map(|pdf| pdf.is_available && pdf.download_link.is_some())
            .unwrap_or(false)
    }
}

/// Bibliographic metadata of a volume
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub industry_identifiers: Vec<IndustryIdentifier>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_count: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_links: Option<ImageLinks>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info_link: Option<String>,

    #[serde(flatten)]
    pub other: BTreeMap<String, Value>,
}

/// An ISBN-style identifier attached to a volume
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndustryIdentifier {
    /// Identifier kind, e.g. "ISBN_10" or "ISBN_13"
    #[serde(rename = "type")]
    pub kind: String,

    #[serde(default)]
    pub identifier: String,
}

/// Cover image links at the advertised quality tiers
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageLinks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_large: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub large: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medium: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub small: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub small_thumbnail: Option<String>,
}

impl ImageLinks {
    /// Best available link in descending quality order
    pub fn best(&self) -> Option<&str> {
        self.extra_large
            .as_deref()
            .or(self.large.as_deref())
            .or(self.medium.as_deref())
            .or(self.small.as_deref())
            .or(self.thumbnail.as_deref())
            .or(self.small_thumbnail.as_deref())
            .filter(|link| !link.is_empty())
    }
}

/// Sale and licensing metadata
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saleability: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buy_link: Option<String>,

    #[serde(flatten)]
    pub other: BTreeMap<String, Value>,
}

/// Access and availability metadata
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdf: Option<FormatAvailability>,

    #[serde(flatten)]
    pub other: BTreeMap<String, Value>,
}

/// Availability of one delivery format (PDF, EPUB, ...)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatAvailability {
    #[serde(default)]
    pub is_available: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_link: Option<String>,

    #[serde(flatten)]
    pub other: BTreeMap<String, Value>,
}
