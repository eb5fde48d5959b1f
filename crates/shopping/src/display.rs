//! Grocery list presentation shared by the text and HTML emails.

use dinnerplan_shared::Ingredient;

use crate::aggregation::normalize_name;

/// Entries sharing one raw category value.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryGroup<'a> {
    /// `None` collects entries without a category (or with an empty one).
    pub category: Option<&'a str>,
    pub items: Vec<&'a Ingredient>,
}

impl CategoryGroup<'_> {
    /// Heading for HTML output: the category as written, or "Other".
    pub fn title(&self) -> &str {
        self.category.unwrap_or("Other")
    }

    /// Heading for plain text output: upper-cased, or "OTHER".
    pub fn heading(&self) -> String {
        match self.category {
            Some(category) => category.to_uppercase(),
            None => "OTHER".to_string(),
        }
    }
}

/// Format a quantity for display
///
/// Whole numbers drop the decimal point (2.0 -> "2"); anything else keeps its
/// shortest decimal form without rounding (1.5 -> "1.5").
pub fn format_quantity(quantity: f64) -> String {
    if quantity.is_finite() && quantity.fract() == 0.0 {
        // + 0.0 turns -0.0 into 0.0
        format!("{:.0}", quantity + 0.0)
    } else {
        format!("{quantity}")
    }
}

/// Group entries by raw category value
///
/// Categories are ordered case-insensitively with uncategorized entries last.
/// Categories differing only by case stay separate groups. Entries within a
/// group are ordered by normalized name.
pub fn group_by_category(grocery_list: &[Ingredient]) -> Vec<CategoryGroup<'_>> {
    let mut groups: Vec<CategoryGroup<'_>> = Vec::new();
    let mut uncategorized: Vec<&Ingredient> = Vec::new();

    for ingredient in grocery_list {
        let category = ingredient
            .category
            .as_deref()
            .filter(|category| !category.is_empty());

        let Some(category) = category else {
            uncategorized.push(ingredient);
            continue;
        };

        match groups
            .iter_mut()
            .find(|group| group.category == Some(category))
        {
            Some(group) => group.items.push(ingredient),
            None => groups.push(CategoryGroup {
                category: Some(category),
                items: vec![ingredient],
            }),
        }
    }

    groups.sort_by_cached_key(|group| group.category.map(str::to_lowercase));

    if !uncategorized.is_empty() {
        groups.push(CategoryGroup {
            category: None,
            items: uncategorized,
        });
    }

    for group in &mut groups {
        group
            .items
            .sort_by_cached_key(|ingredient| normalize_name(&ingredient.name));
    }

    groups
}

/// Format the grocery list as bullet lines under upper-cased category headings
///
/// ```text
///
/// MEAT:
///   • 1.5 lb chicken breast
///
/// PRODUCE:
///   • 2 cups broccoli
/// ```
pub fn format_grocery_list(grocery_list: &[Ingredient]) -> String {
    let mut lines = Vec::new();

    for group in group_by_category(grocery_list) {
        lines.push(format!("\n{}:", group.heading()));

        for ingredient in group.items {
            lines.push(format!(
                "  • {} {} {}",
                format_quantity(ingredient.quantity),
                ingredient.unit,
                ingredient.name
            ));
        }
    }

    lines.join("\n")
}
