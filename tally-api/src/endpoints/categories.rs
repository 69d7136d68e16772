use super::{Id, Status, StatusResponse, vec_or_null};
use crate::macros::{envelope, post, setter};
use serde::{Deserialize, Serialize};

// Common

/// A node of the two-level category forest.
///
/// Only top-level categories carry children; a child's own `children` is
/// always empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: Id,
    pub name: String,
    #[serde(rename = "parentId", default)]
    pub parent_id: Option<Id>,
    #[serde(default, deserialize_with = "vec_or_null")]
    pub children: Vec<Category>,
    /// UI-only expansion flag, never sent to the server.
    #[serde(skip)]
    pub is_expanded: bool,
}

impl Category {
    pub fn new(id: impl Into<Id>, name: impl Into<String>, parent_id: Option<Id>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            parent_id,
            children: Vec::new(),
            is_expanded: false,
        }
    }

    pub fn is_subcategory(&self) -> bool {
        self.parent_id.is_some()
    }
}

// Requests

#[derive(Default, Debug, Clone, Serialize)]
pub struct ListCategories {
    user_id: String,
}

impl ListCategories {
    pub fn new() -> Self {
        Self::default()
    }

    setter!(user_id: String);
}

post!(ListCategories => ListCategoriesResponse, "/categories");

#[derive(Debug, Clone, Serialize)]
pub struct AddCategory {
    user_id: String,
    name: String,
    #[serde(rename = "parentId")]
    parent_id: Option<Id>,
}

impl AddCategory {
    pub fn new(name: impl Into<String>, parent_id: Option<Id>) -> Self {
        Self {
            user_id: String::new(),
            name: name.into(),
            parent_id,
        }
    }

    setter!(user_id: String);
}

post!(AddCategory => CategoryResponse, "/categories/add");

/// Rename request. The backend routes renames through the add path.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateCategory {
    user_id: String,
    category_id: Id,
    name: String,
}

impl UpdateCategory {
    pub fn new(category_id: Id, name: impl Into<String>) -> Self {
        Self {
            user_id: String::new(),
            category_id,
            name: name.into(),
        }
    }

    setter!(user_id: String);
}

post!(UpdateCategory => CategoryResponse, "/categories/add");

/// Delete request. Children are removed server-side with their parent.
#[derive(Debug, Clone, Serialize)]
pub struct DeleteCategory {
    user_id: String,
    category_id: Id,
}

impl DeleteCategory {
    pub fn new(category_id: Id) -> Self {
        Self {
            user_id: String::new(),
            category_id,
        }
    }

    setter!(user_id: String);
}

post!(DeleteCategory => StatusResponse, "/categories/add");

// Responses

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListCategoriesResponse {
    #[serde(flatten)]
    pub status: Status,
    #[serde(default, deserialize_with = "vec_or_null")]
    pub data: Vec<Category>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryResponse {
    #[serde(flatten)]
    pub status: Status,
    #[serde(default)]
    pub data: Option<Category>,
}

envelope!(ListCategoriesResponse, CategoryResponse);

#[cfg(test)]
mod tests {
    use super::*;
    use tower_api_client::{Request, RequestData};

    #[test]
    fn test_list_response_normalizes_ids_and_children() {
        let json = r#"{
            "returncode": "200",
            "message": "ok",
            "data": [
                {"id": 1, "name": "Utilities", "parentId": null, "children": [
                    {"id": "2", "name": "Electricity", "parentId": 1, "children": null}
                ]},
                {"id": "3", "name": "Food", "parentId": null}
            ]
        }"#;

        let response: ListCategoriesResponse = serde_json::from_str(json).unwrap();
        assert!(response.status.is_success());
        assert_eq!(response.data.len(), 2);
        let utilities = &response.data[0];
        assert_eq!(utilities.id, "1");
        assert!(!utilities.is_expanded);
        assert_eq!(utilities.children[0].parent_id, Some(Id::new("1")));
        assert!(utilities.children[0].children.is_empty());
        assert!(response.data[1].children.is_empty());
    }

    #[test]
    fn test_add_body_uses_camel_case_parent() {
        let req = AddCategory::new("Electricity", Some(Id::new("1"))).user_id("me@example.com");
        assert_eq!(req.endpoint(), "/categories/add");
        let RequestData::Json(body) = req.data() else {
            panic!("expected JSON body");
        };
        let value = serde_json::to_value(body).unwrap();
        assert_eq!(value["parentId"], "1");
        assert_eq!(value["user_id"], "me@example.com");
        assert_eq!(value["name"], "Electricity");
    }

    #[test]
    fn test_expansion_flag_is_not_serialized() {
        let mut category = Category::new("1", "Food", None);
        category.is_expanded = true;
        let value = serde_json::to_value(&category).unwrap();
        assert!(value.get("is_expanded").is_none());
    }
}
