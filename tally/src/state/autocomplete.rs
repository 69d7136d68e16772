use crate::state::category_tree::CategoryTree;
use tally_api::endpoints::categories::Category;

const MAX_SUGGESTIONS: usize = 10;

/// Display label for a category: "Parent: Child" for subcategories.
pub fn category_label(tree: &CategoryTree, category: &Category) -> String {
    match category
        .parent_id
        .as_ref()
        .and_then(|parent_id| tree.name_of(parent_id))
    {
        Some(parent_name) => format!("{}: {}", parent_name, category.name),
        None => category.name.clone(),
    }
}

/// Filter categories by query string for autocomplete.
/// Returns up to 10 matches in tree order, matching either the bare name or
/// the "Parent: Child" label.
pub fn filter_categories(tree: &CategoryTree, query: &str) -> Vec<Category> {
    let flattened = tree.flatten_for_search();
    if query.is_empty() {
        return flattened
            .into_iter()
            .take(MAX_SUGGESTIONS)
            .map(leaf)
            .collect();
    }

    let query_lower = query.to_lowercase();
    flattened
        .into_iter()
        .filter(|c| {
            c.name.to_lowercase().contains(&query_lower)
                || category_label(tree, c).to_lowercase().contains(&query_lower)
        })
        .take(MAX_SUGGESTIONS)
        .map(leaf)
        .collect()
}

/// Suggestions never carry their children along.
fn leaf(category: &Category) -> Category {
    Category {
        children: Vec::new(),
        ..category.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally_api::endpoints::Id;

    fn tree() -> CategoryTree {
        let mut utilities = Category::new("1", "Utilities", None);
        utilities.children = vec![
            Category::new("2", "Electricity", Some(Id::new("1"))),
            Category::new("3", "Water", Some(Id::new("1"))),
        ];
        let mut roots = vec![utilities, Category::new("4", "Groceries", None)];
        roots.extend((5i64..20).map(|i| Category::new(i, format!("Extra {}", i), None)));
        CategoryTree::new(roots)
    }

    #[test]
    fn test_empty_query_is_capped() {
        assert_eq!(filter_categories(&tree(), "").len(), 10);
    }

    #[test]
    fn test_matches_name_and_parent_label() {
        let tree = tree();
        let names: Vec<_> = filter_categories(&tree, "util")
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Utilities", "Electricity", "Water"]);

        let water = filter_categories(&tree, "utilities: wa");
        assert_eq!(water.len(), 1);
        assert_eq!(category_label(&tree, &water[0]), "Utilities: Water");
    }

    #[test]
    fn test_suggestions_have_no_children() {
        let suggestions = filter_categories(&tree(), "Utilities");
        assert!(suggestions[0].children.is_empty());
    }
}
