use crate::types::SalesRecord;

/// Dimension filters the analyst can set before generating reports. An empty
/// string means "no constraint" on that dimension; matching is exact.
#[derive(Debug, Clone, Default)]
pub struct Filters {
    pub region: String,
    pub category: String,
    pub segment: String,
}

impl Filters {
    pub fn is_active(&self) -> bool {
        !self.region.is_empty() || !self.category.is_empty() || !self.segment.is_empty()
    }

    pub fn matches(&self, r: &SalesRecord) -> bool {
        if !self.region.is_empty() && r.region != self.region {
            return false;
        }
        if !self.category.is_empty() && r.category != self.category {
            return false;
        }
        if !self.segment.is_empty() && r.segment != self.segment {
            return false;
        }
        true
    }

    /// Select the sub-collection the aggregation functions will see.
    pub fn apply(&self, data: &[SalesRecord]) -> Vec<SalesRecord> {
        data.iter().filter(|r| self.matches(r)).cloned().collect()
    }

    /// One-line description for the report headers, e.g.
    /// `Region=West, Segment=Consumer`.
    pub fn describe(&self) -> String {
        let mut parts = Vec::new();
        if !self.region.is_empty() {
            parts.push(format!("Region={}", self.region));
        }
        if !self.category.is_empty() {
            parts.push(format!("Category={}", self.category));
        }
        if !self.segment.is_empty() {
            parts.push(format!("Segment={}", self.segment));
        }
        if parts.is_empty() {
            "All records".to_string()
        } else {
            parts.join(", ")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(region: &str, category: &str, segment: &str) -> SalesRecord {
        SalesRecord {
            row_id: 1,
            order_id: "O1".to_string(),
            order_date: "5/3/2017".to_string(),
            ship_date: "8/3/2017".to_string(),
            ship_mode: "Standard Class".to_string(),
            customer_id: "C1".to_string(),
            customer_name: "Test Customer".to_string(),
            country: "United States".to_string(),
            city: "Seattle".to_string(),
            state: "Washington".to_string(),
            postal_code: "98103".to_string(),
            region: region.to_string(),
            product_id: "FUR-BO-10001798".to_string(),
            category: category.to_string(),
            sub_category: "Bookcases".to_string(),
            product_name: "Somerset Bookcase".to_string(),
            segment: segment.to_string(),
            sales: 1.0,
        }
    }

    #[test]
    fn empty_filters_pass_everything() {
        let f = Filters::default();
        assert!(!f.is_active());
        let data = vec![rec("West", "Furniture", "Consumer")];
        assert_eq!(f.apply(&data).len(), 1);
        assert_eq!(f.describe(), "All records");
    }

    #[test]
    fn filters_intersect() {
        let f = Filters {
            region: "West".to_string(),
            segment: "Consumer".to_string(),
            ..Default::default()
        };
        let data = vec![
            rec("West", "Furniture", "Consumer"),
            rec("West", "Furniture", "Corporate"),
            rec("East", "Furniture", "Consumer"),
        ];
        let kept = f.apply(&data);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].region, "West");
        assert_eq!(kept[0].segment, "Consumer");
        assert_eq!(f.describe(), "Region=West, Segment=Consumer");
    }

    #[test]
    fn exact_match_only() {
        let f = Filters {
            region: "West".to_string(),
            ..Default::default()
        };
        let data = vec![rec("west", "Furniture", "Consumer")];
        assert!(f.apply(&data).is_empty());
    }
}
