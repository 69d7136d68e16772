use super::{Amount, DateType, Id, Quantity, Status, StatusResponse, lenient_date, vec_or_null};
use crate::macros::{envelope, post, setter};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// Common

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: Id,
    pub category_id: Id,
    pub expense: Amount,
    #[serde(deserialize_with = "lenient_date")]
    pub date: NaiveDate,
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(rename = "breakdownItems", default, deserialize_with = "vec_or_null")]
    pub breakdown_items: Vec<BreakdownItem>,
}

impl Expense {
    /// Sum of breakdown prices. May differ from `expense` for records written
    /// by other clients.
    pub fn breakdown_subtotal(&self) -> Amount {
        self.breakdown_items.iter().map(|item| item.price).sum()
    }
}

/// One line of an expense. `price` is the line total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakdownItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Id>,
    pub name: String,
    pub price: Amount,
    #[serde(default)]
    pub quantity: Quantity,
}

/// Body shared by add and edit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewExpense {
    pub category_id: Id,
    pub expense: Amount,
    pub date: NaiveDate,
    pub detail: String,
    #[serde(rename = "breakdownItems")]
    pub breakdown_items: Vec<BreakdownItem>,
}

impl NewExpense {
    pub fn new(category_id: Id, date: NaiveDate) -> Self {
        Self {
            category_id,
            expense: Amount::ZERO,
            date,
            detail: String::new(),
            breakdown_items: Vec::new(),
        }
    }

    /// Sets the items and keeps `expense` equal to their sum.
    pub fn with_breakdown(mut self, items: Vec<BreakdownItem>) -> Self {
        self.expense = items.iter().map(|item| item.price).sum();
        self.breakdown_items = items;
        self
    }
}

// Requests

#[derive(Debug, Clone, Default, Serialize)]
pub struct ListExpenses {
    user_id: String,
    search_value: String,
    date_type: DateType,
    start_date: String,
    end_date: String,
    page: u32,
}

impl ListExpenses {
    pub fn new() -> Self {
        Self {
            page: 1,
            ..Default::default()
        }
    }

    setter!(user_id: String);
    setter!(search_value: String);
    setter!(page: u32);

    /// Restrict to an inclusive date range; `None` lists all dates.
    pub fn date_range(mut self, range: Option<(NaiveDate, NaiveDate)>) -> Self {
        match range {
            Some((start, end)) => {
                self.date_type = DateType::Custom;
                self.start_date = start.format("%Y-%m-%d").to_string();
                self.end_date = end.format("%Y-%m-%d").to_string();
            }
            None => {
                self.date_type = DateType::All;
                self.start_date.clear();
                self.end_date.clear();
            }
        }
        self
    }
}

post!(ListExpenses => ListExpensesResponse, "/expenses");

#[derive(Debug, Clone, Serialize)]
pub struct AddExpense {
    user_id: String,
    #[serde(flatten)]
    expense: NewExpense,
}

impl AddExpense {
    pub fn new(expense: NewExpense) -> Self {
        Self {
            user_id: String::new(),
            expense,
        }
    }

    setter!(user_id: String);
    setter!(expense.detail: String);
}

post!(AddExpense => ExpenseResponse, "/expenses/add");

#[derive(Debug, Clone, Serialize)]
pub struct EditExpense {
    user_id: String,
    id: Id,
    #[serde(flatten)]
    expense: NewExpense,
}

impl EditExpense {
    pub fn new(id: Id, expense: NewExpense) -> Self {
        Self {
            user_id: String::new(),
            id,
            expense,
        }
    }

    setter!(user_id: String);
}

post!(EditExpense => ExpenseResponse, "/expenses/edit");

/// Soft-delete one or more expenses in a single call.
#[derive(Debug, Clone, Serialize)]
pub struct DeleteExpenses {
    user_id: String,
    expense_ids: Vec<Id>,
}

impl DeleteExpenses {
    pub fn new(expense_ids: Vec<Id>) -> Self {
        Self {
            user_id: String::new(),
            expense_ids,
        }
    }

    setter!(user_id: String);
}

post!(DeleteExpenses => StatusResponse, "/expenses/delete");

#[derive(Debug, Clone, Serialize)]
pub struct DeleteBreakdownItem {
    user_id: String,
    breakdown_item_id: Id,
}

impl DeleteBreakdownItem {
    pub fn new(breakdown_item_id: Id) -> Self {
        Self {
            user_id: String::new(),
            breakdown_item_id,
        }
    }

    setter!(user_id: String);
}

post!(DeleteBreakdownItem => StatusResponse, "/expenses/breakdown/delete");

// Responses

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListExpensesResponse {
    #[serde(flatten)]
    pub status: Status,
    #[serde(default, deserialize_with = "vec_or_null")]
    pub data: Vec<Expense>,
    #[serde(rename = "totalPages", default)]
    pub total_pages: u32,
    #[serde(rename = "totalRows", default)]
    pub total_rows: u32,
    #[serde(rename = "totalAmount", default)]
    pub total_amount: Amount,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseResponse {
    #[serde(flatten)]
    pub status: Status,
    #[serde(default)]
    pub data: Option<Expense>,
}

envelope!(ListExpensesResponse, ExpenseResponse);

#[cfg(test)]
mod tests {
    use super::*;
    use tower_api_client::{Request, RequestData};

    fn body<R: Request>(req: &R) -> serde_json::Value {
        let RequestData::Json(data) = req.data() else {
            panic!("expected JSON body");
        };
        serde_json::to_value(data).unwrap()
    }

    #[test]
    fn test_list_request_with_range() {
        let start = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 4, 30).unwrap();
        let req = ListExpenses::new()
            .user_id("me@example.com")
            .search_value("rent")
            .page(2u32)
            .date_range(Some((start, end)));

        let value = body(&req);
        assert_eq!(value["date_type"], "custom");
        assert_eq!(value["start_date"], "2025-04-01");
        assert_eq!(value["end_date"], "2025-04-30");
        assert_eq!(value["page"], 2);
        assert_eq!(value["search_value"], "rent");
    }

    #[test]
    fn test_list_request_without_range() {
        let value = body(&ListExpenses::new().date_range(None));
        assert_eq!(value["date_type"], "all");
        assert_eq!(value["start_date"], "");
        assert_eq!(value["page"], 1);
    }

    #[test]
    fn test_list_response() {
        let json = r#"{
            "returncode": "200",
            "message": "",
            "data": [{
                "id": 12,
                "category_id": "4",
                "expense": 15,
                "date": "2025-04-15",
                "detail": "Groceries",
                "breakdownItems": [
                    {"id": 1, "name": "Milk", "price": 10, "quantity": 2},
                    {"name": "Bread", "price": "5", "quantity": "1pc"}
                ]
            }],
            "totalPages": 3,
            "totalRows": 21,
            "totalAmount": 1234.5
        }"#;

        let response: ListExpensesResponse = serde_json::from_str(json).unwrap();
        let expense = &response.data[0];
        assert_eq!(expense.id, "12");
        assert_eq!(expense.breakdown_items[0].quantity.as_str(), "2");
        assert_eq!(expense.breakdown_subtotal(), Amount::from_cents(1500));
        assert_eq!(response.total_pages, 3);
        assert_eq!(response.total_amount, Amount::from_cents(123450));
    }

    #[test]
    fn test_list_response_with_datetime_dates() {
        let json = r#"{"returncode": 200, "data": [
            {"id": 1, "category_id": 4, "expense": 9, "date": "2025-04-15T00:00:00.000Z"},
            {"id": 2, "category_id": 4, "expense": 3, "date": "2025-04-16"}
        ]}"#;
        let response: ListExpensesResponse = serde_json::from_str(json).unwrap();
        let dates: Vec<_> = response.data.iter().map(|e| e.date).collect();
        assert_eq!(
            dates,
            vec![
                NaiveDate::from_ymd_opt(2025, 4, 15).unwrap(),
                NaiveDate::from_ymd_opt(2025, 4, 16).unwrap()
            ]
        );
    }

    #[test]
    fn test_new_expense_total_follows_breakdown() {
        let date = NaiveDate::from_ymd_opt(2025, 4, 15).unwrap();
        let expense = NewExpense::new(Id::new("4"), date).with_breakdown(vec![
            BreakdownItem {
                id: None,
                name: "Milk".into(),
                price: Amount::from_cents(1000),
                quantity: Quantity::new("2"),
            },
            BreakdownItem {
                id: None,
                name: "Bread".into(),
                price: Amount::from_cents(500),
                quantity: Quantity::default(),
            },
        ]);
        assert_eq!(expense.expense, Amount::from_cents(1500));

        let value = body(&AddExpense::new(expense).user_id("me@example.com"));
        assert_eq!(value["expense"], 15.0);
        assert_eq!(value["breakdownItems"][1]["quantity"], "1");
        assert!(value["breakdownItems"][0].get("id").is_none());
    }

    #[test]
    fn test_delete_paths() {
        let req = DeleteExpenses::new(vec![Id::new("1"), Id::new("2")]);
        assert_eq!(req.endpoint(), "/expenses/delete");
        assert_eq!(body(&req)["expense_ids"], serde_json::json!(["1", "2"]));

        let req = DeleteBreakdownItem::new(Id::new("9"));
        assert_eq!(req.endpoint(), "/expenses/breakdown/delete");
    }
}
