//! Uniform price access over the upstream course shapes.

use chrono::{DateTime, Utc};
use eco_core::{CourseRecord, MagentoCourse, PreviewCourse, PriceRecord};

/// Reads and writes the price fields of one upstream course shape.
pub trait PriceConverter: Send + Sync {
    /// SKU of the wrapped course.
    fn sku(&self) -> &str;

    /// Current `(original, discount)` prices.
    fn prices(&self) -> (f64, f64);

    /// Overwrites the course's prices with the cached ones.
    fn apply_price(&mut self, record: &PriceRecord);

    /// Snapshot of the current prices stamped with `cached_at`.
    ///
    /// Returns `None` when the course has no usable SKU.
    fn to_price_record(&self, cached_at: DateTime<Utc>) -> Option<PriceRecord> {
        let sku = self.sku().trim();
        if sku.is_empty() {
            return None;
        }
        let (original_price, discount_price) = self.prices();
        Some(PriceRecord::new(sku, original_price, discount_price, cached_at))
    }
}

impl PriceConverter for MagentoCourse {
    fn sku(&self) -> &str {
        &self.sku
    }

    fn prices(&self) -> (f64, f64) {
        (self.price, self.final_price)
    }

    fn apply_price(&mut self, record: &PriceRecord) {
        self.price = record.original_price;
        self.final_price = record.discount_price;
    }
}

impl PriceConverter for PreviewCourse {
    fn sku(&self) -> &str {
        &self.sku
    }

    fn prices(&self) -> (f64, f64) {
        (self.original_price, self.discount_price)
    }

    fn apply_price(&mut self, record: &PriceRecord) {
        self.original_price = record.original_price;
        self.discount_price = record.discount_price;
    }
}

/// Picks the converter for a course record by its variant.
///
/// Unrecognized shapes resolve to `None`; callers skip them.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConversionRegistry;

impl ConversionRegistry {
    /// Create a registry.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Mutable converter for `record`, if its shape carries prices.
    pub fn resolve<'a>(&self, record: &'a mut CourseRecord) -> Option<&'a mut dyn PriceConverter> {
        match record {
            CourseRecord::Magento(course) => Some(course as &mut dyn PriceConverter),
            CourseRecord::Preview(course) => Some(course as &mut dyn PriceConverter),
            CourseRecord::Unrecognized(_) => None,
        }
    }

    /// Shared converter for `record`, if its shape carries prices.
    #[must_use]
    pub fn resolve_ref<'a>(&self, record: &'a CourseRecord) -> Option<&'a dyn PriceConverter> {
        match record {
            CourseRecord::Magento(course) => Some(course as &dyn PriceConverter),
            CourseRecord::Preview(course) => Some(course as &dyn PriceConverter),
            CourseRecord::Unrecognized(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_704_067_200, 0).unwrap()
    }

    #[test]
    fn test_magento_mapping() {
        let mut record = CourseRecord::from(MagentoCourse::new("C1", 100.0, 80.0));
        let registry = ConversionRegistry::new();

        let converter = registry.resolve(&mut record).unwrap();
        assert_eq!(converter.sku(), "C1");
        assert_eq!(converter.prices(), (100.0, 80.0));

        converter.apply_price(&PriceRecord::new("C1", 120.0, 60.0, now()));
        match record {
            CourseRecord::Magento(course) => {
                assert_eq!(course.price, 120.0);
                assert_eq!(course.final_price, 60.0);
            }
            other => panic!("Expected Magento course, got {:?}", other),
        }
    }

    #[test]
    fn test_preview_snapshot() {
        let record = CourseRecord::from(PreviewCourse::new("P1", 50.0, 45.0));
        let snapshot = ConversionRegistry::new()
            .resolve_ref(&record)
            .and_then(|converter| converter.to_price_record(now()))
            .unwrap();

        assert_eq!(snapshot, PriceRecord::new("P1", 50.0, 45.0, now()));
    }

    #[test]
    fn test_blank_sku_has_no_snapshot() {
        let course = MagentoCourse::new("  ", 10.0, 5.0);
        assert!(course.to_price_record(now()).is_none());
    }

    #[test]
    fn test_unrecognized_shape_is_skipped() {
        let mut record = CourseRecord::Unrecognized(json!({"sku": "X1", "price": 3}));
        let registry = ConversionRegistry::new();

        assert!(registry.resolve_ref(&record).is_none());
        assert!(registry.resolve(&mut record).is_none());
    }
}
