//! Garment category classification
//!
//! Categories are independent keyword predicates over the lower-cased
//! garment label. A label such as "hooded jacket" is both a top and
//! outerwear; a label that matches nothing belongs to no category.

use serde::Serialize;

/// Garment category used to fill outfit slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Top,
    Bottom,
    Outerwear,
    Footwear,
    Accessory,
}

impl Category {
    /// All categories in outfit slot order
    pub const ALL: [Category; 5] = [
        Category::Top,
        Category::Bottom,
        Category::Outerwear,
        Category::Footwear,
        Category::Accessory,
    ];

    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Category::Top => &["shirt", "t-shirt", "blouse", "sweater", "hoodie", "top"],
            Category::Bottom => &["pants", "jeans", "trousers", "shorts", "skirt", "bottom"],
            Category::Outerwear => &["jacket", "coat", "blazer", "cardigan", "outerwear"],
            Category::Footwear => &["shoes", "sneakers", "boots", "sandals", "heels", "footwear"],
            Category::Accessory => &["accessory", "hat", "scarf", "belt", "bag", "watch", "jewelry"],
        }
    }

    /// Whether a garment label contains any of this category's keywords
    pub fn matches(self, cloth_type: &str) -> bool {
        let label = cloth_type.to_lowercase();
        self.keywords().iter().any(|keyword| label.contains(keyword))
    }
}

/// Every category a garment label belongs to, in slot order
pub fn categories_of(cloth_type: &str) -> Vec<Category> {
    Category::ALL
        .into_iter()
        .filter(|category| category.matches(cloth_type))
        .collect()
}

/// First matching category in slot order, if any
pub fn classify(cloth_type: &str) -> Option<Category> {
    Category::ALL
        .into_iter()
        .find(|category| category.matches(cloth_type))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_category_labels() {
        assert_eq!(categories_of("Jeans"), vec![Category::Bottom]);
        assert_eq!(categories_of("running sneakers"), vec![Category::Footwear]);
        assert_eq!(categories_of("Wool Scarf"), vec![Category::Accessory]);
        assert_eq!(categories_of("trench coat"), vec![Category::Outerwear]);
    }

    #[test]
    fn test_membership_is_not_exclusive() {
        // "top" and "hat" both appear in "tophat"
        assert_eq!(
            categories_of("tophat"),
            vec![Category::Top, Category::Accessory]
        );
        // "coat" and "top" both appear in "topcoat"
        assert_eq!(
            categories_of("Topcoat"),
            vec![Category::Top, Category::Outerwear]
        );
        assert_eq!(classify("topcoat"), Some(Category::Top));
    }

    #[test]
    fn test_unmatched_label() {
        assert!(categories_of("kimono").is_empty());
        assert_eq!(classify("kimono"), None);
        assert_eq!(classify(""), None);
    }

    #[test]
    fn test_case_insensitive() {
        assert!(Category::Top.matches("T-SHIRT"));
        assert!(Category::Footwear.matches("Ankle BOOTS"));
        assert!(!Category::Bottom.matches("Blazer"));
    }
}
