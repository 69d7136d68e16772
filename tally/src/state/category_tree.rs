//! Two-level category forest.
//!
//! Every operation borrows the current forest and returns a new one; nothing
//! is mutated in place. A failed remote call is reverted with a [`TreeUndo`]
//! describing only that change, so later edits survive the rollback.

use tally_api::endpoints::{categories::Category, Id};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("Cannot add subcategories to subcategories")]
    NestedSubcategory,
    #[error("Parent category not found")]
    ParentNotFound,
}

/// Inverse of a single optimistic change.
#[derive(Debug, Clone, PartialEq)]
pub enum TreeUndo {
    /// Drop a node the server never accepted.
    Remove { id: Id, parent_id: Option<Id> },
    /// Restore `previous` unless the node was renamed again meanwhile.
    Rename {
        id: Id,
        previous: String,
        attempted: String,
    },
    /// Put a deleted node (with its children) back at its old index.
    Reinsert { category: Category, index: usize },
}

/// One rendered line of the category table.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryRow {
    pub id: Id,
    pub name: String,
    pub parent_id: Option<Id>,
    pub depth: usize,
    pub child_count: usize,
    pub is_expanded: bool,
}

impl CategoryRow {
    fn from_category(category: &Category, depth: usize) -> Self {
        Self {
            id: category.id.clone(),
            name: category.name.clone(),
            parent_id: category.parent_id.clone(),
            depth,
            child_count: category.children.len(),
            is_expanded: category.is_expanded,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryTree {
    roots: Vec<Category>,
}

impl CategoryTree {
    /// Build a forest from a server listing. Children lists of subcategories
    /// are dropped so the two-level invariant always holds.
    pub fn new(mut roots: Vec<Category>) -> Self {
        for root in &mut roots {
            for child in &mut root.children {
                child.children.clear();
                if child.parent_id.is_none() {
                    child.parent_id = Some(root.id.clone());
                }
            }
        }
        Self { roots }
    }

    pub fn roots(&self) -> &[Category] {
        &self.roots
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Depth-first lookup across both levels.
    pub fn find(&self, id: &Id) -> Option<&Category> {
        self.roots.iter().find_map(|root| {
            if &root.id == id {
                Some(root)
            } else {
                root.children.iter().find(|child| &child.id == id)
            }
        })
    }

    /// Display name for an id, if it resolves.
    pub fn name_of(&self, id: &Id) -> Option<&str> {
        self.find(id).map(|c| c.name.as_str())
    }

    /// Top-level ancestor of a category (itself when top-level).
    pub fn root_of(&self, id: &Id) -> Option<&Category> {
        let category = self.find(id)?;
        match &category.parent_id {
            Some(parent_id) => self.roots.iter().find(|root| &root.id == parent_id),
            None => Some(category),
        }
    }

    fn map_nodes(&self, mut f: impl FnMut(&mut Category)) -> Self {
        let mut roots = self.roots.clone();
        for root in &mut roots {
            f(root);
            for child in &mut root.children {
                f(child);
            }
        }
        Self { roots }
    }

    pub fn toggle_expand(&self, id: &Id) -> Self {
        self.map_nodes(|node| {
            if &node.id == id {
                node.is_expanded = !node.is_expanded;
            }
        })
    }

    /// Rename a node. Unknown ids leave the forest unchanged.
    pub fn update_name(&self, id: &Id, name: &str) -> Self {
        self.map_nodes(|node| {
            if &node.id == id {
                node.name = name.to_string();
            }
        })
    }

    /// Swap a temporary id for the server-assigned category.
    pub fn replace(&self, temp_id: &Id, category: &Category) -> Self {
        self.map_nodes(|node| {
            if &node.id == temp_id {
                node.id = category.id.clone();
                node.name = category.name.clone();
            }
        })
    }

    pub fn add_main(&self, mut category: Category) -> Self {
        category.parent_id = None;
        let mut roots = self.roots.clone();
        roots.push(category);
        Self { roots }
    }

    /// Append a child under `parent_id` and expand the parent.
    pub fn add_subcategory(&self, parent_id: &Id, mut category: Category) -> Result<Self, TreeError> {
        let Some(parent) = self.find(parent_id) else {
            return Err(TreeError::ParentNotFound);
        };
        if parent.is_subcategory() {
            return Err(TreeError::NestedSubcategory);
        }

        category.parent_id = Some(parent_id.clone());
        category.children.clear();

        let mut roots = self.roots.clone();
        if let Some(parent) = roots.iter_mut().find(|root| &root.id == parent_id) {
            parent.children.push(category);
            parent.is_expanded = true;
        }
        Ok(Self { roots })
    }

    /// Remove a node. With a parent, only that parent's children are
    /// searched; otherwise the top level is filtered and children go along.
    pub fn remove(&self, id: &Id, parent_id: Option<&Id>) -> Self {
        let mut roots = self.roots.clone();
        match parent_id {
            Some(parent_id) => {
                if let Some(parent) = roots.iter_mut().find(|root| &root.id == parent_id) {
                    parent.children.retain(|child| &child.id != id);
                }
            }
            None => roots.retain(|root| &root.id != id),
        }
        Self { roots }
    }

    /// Keep expansion flags from a previous forest after a reload.
    pub fn with_expansion_from(&self, previous: &CategoryTree) -> Self {
        self.map_nodes(|node| {
            if previous.find(&node.id).is_some_and(|old| old.is_expanded) {
                node.is_expanded = true;
            }
        })
    }

    /// Index of a node among its siblings.
    pub fn position(&self, id: &Id) -> Option<usize> {
        let category = self.find(id)?;
        let siblings = match &category.parent_id {
            Some(parent_id) => &self.roots.iter().find(|root| &root.id == parent_id)?.children,
            None => &self.roots,
        };
        siblings.iter().position(|sibling| &sibling.id == id)
    }

    /// Re-insert a node at `index`, clamped to its sibling list. A node whose
    /// parent has gone, or whose id is already present, is not restored.
    pub fn insert_at(&self, category: Category, index: usize) -> Self {
        if self.find(&category.id).is_some() {
            return self.clone();
        }
        let mut roots = self.roots.clone();
        let siblings = match &category.parent_id {
            Some(parent_id) => match roots.iter_mut().find(|root| &root.id == parent_id) {
                Some(parent) => &mut parent.children,
                None => return self.clone(),
            },
            None => &mut roots,
        };
        siblings.insert(index.min(siblings.len()), category);
        Self { roots }
    }

    pub fn undo(&self, undo: &TreeUndo) -> Self {
        match undo {
            TreeUndo::Remove { id, parent_id } => self.remove(id, parent_id.as_ref()),
            TreeUndo::Rename {
                id,
                previous,
                attempted,
            } => match self.name_of(id) {
                Some(current) if current == attempted => self.update_name(id, previous),
                _ => self.clone(),
            },
            TreeUndo::Reinsert { category, index } => self.insert_at(category.clone(), *index),
        }
    }

    /// Depth-first pre-order over every node.
    pub fn flatten_for_search(&self) -> Vec<&Category> {
        self.roots
            .iter()
            .flat_map(|root| std::iter::once(root).chain(root.children.iter()))
            .collect()
    }

    /// Case-insensitive substring match on name or id.
    pub fn search(&self, term: &str) -> Vec<&Category> {
        let term = term.trim().to_lowercase();
        self.flatten_for_search()
            .into_iter()
            .filter(|c| {
                c.name.to_lowercase().contains(&term) || c.id.as_str().to_lowercase().contains(&term)
            })
            .collect()
    }

    /// Rows for the table. A non-empty search term shows a flat list of
    /// matches; otherwise children are listed under expanded parents.
    pub fn visible_rows(&self, search: &str) -> Vec<CategoryRow> {
        if !search.trim().is_empty() {
            return self
                .search(search)
                .into_iter()
                .map(|c| CategoryRow::from_category(c, 0))
                .collect();
        }

        let mut rows = Vec::new();
        for root in &self.roots {
            rows.push(CategoryRow::from_category(root, 0));
            if root.is_expanded {
                rows.extend(
                    root.children
                        .iter()
                        .map(|child| CategoryRow::from_category(child, 1)),
                );
            }
        }
        rows
    }

    /// Name given to a duplicated category.
    pub fn duplicate_name(category: &Category) -> String {
        format!("{} (Copy)", category.name)
    }
}
