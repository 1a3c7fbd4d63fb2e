//! Upstream course shapes that carry prices.

use serde::{Deserialize, Serialize};

/// Course as returned by the Magento catalog endpoints.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MagentoCourse {
    /// Course SKU.
    #[serde(default)]
    pub sku: String,

    /// Display name.
    #[serde(default)]
    pub name: String,

    /// List price.
    #[serde(default)]
    pub price: f64,

    /// Price after catalog rules and promotions.
    #[serde(default)]
    pub final_price: f64,
}

impl MagentoCourse {
    /// Creates a course with the given SKU and prices.
    #[must_use]
    pub fn new(sku: impl Into<String>, price: f64, final_price: f64) -> Self {
        Self {
            sku: sku.into(),
            price,
            final_price,
            ..Default::default()
        }
    }
}

/// Compact course card used by the mobile listing screens.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PreviewCourse {
    /// Course SKU.
    #[serde(default)]
    pub sku: String,

    /// Card title.
    #[serde(default)]
    pub title: String,

    /// Price shown struck through.
    #[serde(default)]
    pub original_price: f64,

    /// Price shown as the selling price.
    #[serde(default)]
    pub discount_price: f64,
}

impl PreviewCourse {
    /// Creates a preview card with the given SKU and prices.
    #[must_use]
    pub fn new(sku: impl Into<String>, original_price: f64, discount_price: f64) -> Self {
        Self {
            sku: sku.into(),
            original_price,
            discount_price,
            ..Default::default()
        }
    }
}

/// A course-like record of any shape the upstream may hand back.
///
/// Batches passed to the price services mix these freely. Records of a shape
/// without price support are kept as raw JSON and left untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum CourseRecord {
    /// Catalog course.
    Magento(MagentoCourse),
    /// Mobile listing card.
    Preview(PreviewCourse),
    /// Any other payload.
    Unrecognized(serde_json::Value),
}

impl From<MagentoCourse> for CourseRecord {
    fn from(course: MagentoCourse) -> Self {
        Self::Magento(course)
    }
}

impl From<PreviewCourse> for CourseRecord {
    fn from(course: PreviewCourse) -> Self {
        Self::Preview(course)
    }
}
