use super::{Amount, Id, Status, StatusResponse, lenient_date, vec_or_null};
use crate::macros::{envelope, post, setter};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// Common

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Income {
    pub id: Id,
    pub amount: Amount,
    #[serde(deserialize_with = "lenient_date")]
    pub date: NaiveDate,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub payer: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewIncome {
    pub amount: Amount,
    pub date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payer: Option<String>,
}

impl NewIncome {
    pub fn new(amount: Amount, date: NaiveDate) -> Self {
        Self {
            amount,
            date,
            note: None,
            payer: None,
        }
    }
}

// Requests

#[derive(Default, Debug, Clone, Serialize)]
pub struct ListIncomes {
    user_id: String,
}

impl ListIncomes {
    pub fn new() -> Self {
        Self::default()
    }

    setter!(user_id: String);
}

post!(ListIncomes => ListIncomesResponse, "/incomes");

#[derive(Debug, Clone, Serialize)]
pub struct AddIncome {
    user_id: String,
    #[serde(flatten)]
    income: NewIncome,
}

impl AddIncome {
    pub fn new(income: NewIncome) -> Self {
        Self {
            user_id: String::new(),
            income,
        }
    }

    setter!(user_id: String);
    setter!(opt income.note: String);
    setter!(opt income.payer: String);
}

post!(AddIncome => IncomeResponse, "/incomes/add");

#[derive(Debug, Clone, Serialize)]
pub struct EditIncome {
    user_id: String,
    id: Id,
    #[serde(flatten)]
    income: NewIncome,
}

impl EditIncome {
    pub fn new(id: Id, income: NewIncome) -> Self {
        Self {
            user_id: String::new(),
            id,
            income,
        }
    }

    setter!(user_id: String);
}

post!(EditIncome => IncomeResponse, "/incomes/edit");

#[derive(Debug, Clone, Serialize)]
pub struct DeleteIncomes {
    user_id: String,
    income_ids: Vec<Id>,
}

impl DeleteIncomes {
    pub fn new(income_ids: Vec<Id>) -> Self {
        Self {
            user_id: String::new(),
            income_ids,
        }
    }

    setter!(user_id: String);
}

post!(DeleteIncomes => StatusResponse, "/incomes/delete");

// Responses

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListIncomesResponse {
    #[serde(flatten)]
    pub status: Status,
    #[serde(default, deserialize_with = "vec_or_null")]
    pub data: Vec<Income>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomeResponse {
    #[serde(flatten)]
    pub status: Status,
    #[serde(default)]
    pub data: Option<Income>,
}

envelope!(ListIncomesResponse, IncomeResponse);

#[cfg(test)]
mod tests {
    use super::*;
    use tower_api_client::{Request, RequestData};

    #[test]
    fn test_list_response() {
        let json = r#"{"returncode": "200", "data": [
            {"id": 1, "payer": "ABC Company", "amount": 5000, "date": "2025-04-01", "note": "Monthly salary"},
            {"id": 2, "amount": 500.25, "date": "2025-04-05T10:15:00Z"}
        ]}"#;
        let response: ListIncomesResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.data.len(), 2);
        assert_eq!(response.data[0].payer.as_deref(), Some("ABC Company"));
        assert_eq!(response.data[1].amount, Amount::from_cents(50025));
        assert_eq!(response.data[1].note, None);
        assert_eq!(response.data[1].date, NaiveDate::from_ymd_opt(2025, 4, 5).unwrap());
    }

    #[test]
    fn test_add_body_omits_empty_optionals() {
        let date = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap();
        let req = AddIncome::new(NewIncome::new(Amount::from_cents(1), date))
            .user_id("me@example.com")
            .payer("XYZ Client");
        assert_eq!(req.endpoint(), "/incomes/add");
        let RequestData::Json(body) = req.data() else {
            panic!("expected JSON body");
        };
        let value = serde_json::to_value(body).unwrap();
        assert_eq!(value["amount"], 0.01);
        assert_eq!(value["payer"], "XYZ Client");
        assert!(value.get("note").is_none());
    }
}
