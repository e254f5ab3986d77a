//! Delimiter patterns derived from example separators.

use crate::domain::category::{Category, Classifier, absorbs};

/// Category sequence describing the shape of a separator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelimiterPattern {
    separator: String,
    categories: Vec<Category>,
}

impl DelimiterPattern {
    pub fn new(separator: impl Into<String>) -> Self {
        Self::with_classifier(separator, &Classifier::default())
    }

    pub fn with_classifier(separator: impl Into<String>, classifier: &Classifier) -> Self {
        let separator = separator.into();
        let categories = category_order(&separator, classifier);
        Self {
            separator,
            categories,
        }
    }

    /// The literal text this pattern was built from.
    pub fn separator(&self) -> &str {
        &self.separator
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// Build a pattern with the default classifier.
pub fn build_pattern(separator: &str) -> DelimiterPattern {
    DelimiterPattern::new(separator)
}

fn category_order(separator: &str, classifier: &Classifier) -> Vec<Category> {
    let mut order: Vec<Category> = Vec::new();
    let mut current: Option<Category> = None;

    for ch in separator.chars() {
        let category = classifier.classify(ch);
        if current == Some(category) {
            continue;
        }

        match order.last().copied() {
            Some(last) if absorbs(last, category) => current = Some(last),
            _ => {
                order.push(category);
                current = Some(category);
            }
        }
    }

    order
}
