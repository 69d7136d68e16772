use crate::events::{BackgroundJob, DataEvent, ExpenseQuery};
use crate::preferences::{Preferences, PreferencesStore};
use crate::report;
use crate::state::category_tree::TreeUndo;
use chrono::NaiveDate;
use std::sync::Arc;
use tally_api::{
    endpoints::{
        expenses::{Expense, NewExpense},
        incomes::NewIncome,
        Id,
    },
    Client, Request, TallyApiError,
};
use tokio::sync::mpsc;

/// Upper bound on expense pages fetched for the yearly dashboard.
const MAX_DASHBOARD_PAGES: u32 = 50;

/// Runs background jobs against the API and reports the outcome as
/// [`DataEvent`]s.
#[derive(Clone)]
pub struct DataLoader {
    pub api_client: Arc<Client>,
    pub user_id: String,
    pub preferences: Option<PreferencesStore>,
    pub data_tx: mpsc::UnboundedSender<DataEvent>,
}

impl DataLoader {
    pub fn new(
        api_client: Arc<Client>,
        user_id: impl Into<String>,
        preferences: Option<PreferencesStore>,
        data_tx: mpsc::UnboundedSender<DataEvent>,
    ) -> Self {
        Self {
            api_client,
            user_id: user_id.into(),
            preferences,
            data_tx,
        }
    }

    pub async fn run_job(&self, job: BackgroundJob) {
        match job {
            BackgroundJob::LoadDashboard { year } => self.load_dashboard(year).await,
            BackgroundJob::LoadCategories => self.load_categories().await,
            BackgroundJob::LoadExpenses { query } => self.load_expenses(query).await,
            BackgroundJob::LoadIncomes => self.load_incomes().await,
            BackgroundJob::AddCategory {
                temp_id,
                name,
                parent_id,
                undo,
            } => self.add_category(temp_id, name, parent_id, undo).await,
            BackgroundJob::RenameCategory { id, name, undo } => {
                self.rename_category(id, name, undo).await
            }
            BackgroundJob::DeleteCategory { id, undo } => self.delete_category(id, undo).await,
            BackgroundJob::SaveExpense {
                id,
                expense,
                removed_items,
                query,
            } => self.save_expense(id, expense, removed_items, query).await,
            BackgroundJob::DeleteExpenses { ids, query } => {
                self.delete_expenses(ids, query).await
            }
            BackgroundJob::SaveIncome { id, income } => self.save_income(id, income).await,
            BackgroundJob::DeleteIncomes { ids } => self.delete_incomes(ids).await,
            BackgroundJob::OpenReport { html } => self.open_report(html).await,
            BackgroundJob::SavePreferences(preferences) => {
                self.save_preferences(preferences).await
            }
        }
    }

    /// Send the session-expiry event or hand back the user-facing message.
    fn report_error(&self, context: &str, error: &TallyApiError) -> Option<String> {
        tracing::error!("{}: {}", context, error);
        if error.is_session_expired() {
            let _ = self.data_tx.send(DataEvent::SessionExpired);
            None
        } else {
            Some(error.user_message())
        }
    }

    fn send_load_error(&self, context: &str, error: &TallyApiError) {
        if let Some(error) = self.report_error(context, error) {
            let _ = self.data_tx.send(DataEvent::LoadError { error });
        }
    }

    /// Load the year's incomes, expenses and categories for the dashboard
    pub async fn load_dashboard(&self, year: i32) {
        tracing::info!("Loading dashboard for {}", year);

        let incomes_req = Request::incomes().with_user(&self.user_id).list();
        let categories_req = Request::categories().with_user(&self.user_id).list();
        let (incomes, expenses, categories) = tokio::join!(
            self.api_client.send(incomes_req),
            self.fetch_year_expenses(year),
            self.api_client.send(categories_req),
        );

        let result = incomes.and_then(|incomes| {
            let expenses = expenses?;
            let categories = categories?;
            Ok((incomes, expenses, categories))
        });

        match result {
            Ok((incomes, expenses, categories)) => {
                tracing::info!(
                    "Loaded dashboard: {} incomes, {} expenses, {} categories",
                    incomes.data.len(),
                    expenses.len(),
                    categories.data.len()
                );
                let _ = self.data_tx.send(DataEvent::DashboardLoaded {
                    expenses,
                    incomes: incomes.data,
                    categories: categories.data,
                    year,
                });
            }
            Err(e) => self.send_load_error("Failed to load dashboard", &e),
        }
    }

    async fn fetch_year_expenses(&self, year: i32) -> Result<Vec<Expense>, TallyApiError> {
        let range = NaiveDate::from_ymd_opt(year, 1, 1).zip(NaiveDate::from_ymd_opt(year, 12, 31));
        let mut expenses = Vec::new();
        let mut page = 1;

        loop {
            let req = Request::expenses()
                .with_user(&self.user_id)
                .list()
                .date_range(range)
                .page(page);
            let response = self.api_client.send(req).await?;
            tracing::debug!(
                "Fetched dashboard expense page {}/{}",
                page,
                response.total_pages
            );
            expenses.extend(response.data);

            if page >= response.total_pages || page >= MAX_DASHBOARD_PAGES {
                break;
            }
            page += 1;
        }

        Ok(expenses)
    }

    pub async fn load_categories(&self) {
        tracing::debug!("Fetching categories from API");
        let req = Request::categories().with_user(&self.user_id).list();
        match self.api_client.send(req).await {
            Ok(response) => {
                tracing::info!("Loaded {} categories from API", response.data.len());
                let _ = self.data_tx.send(DataEvent::CategoriesLoaded {
                    categories: response.data,
                });
            }
            Err(e) => self.send_load_error("Failed to load categories", &e),
        }
    }

    /// Fetch one page of expenses for the current search and date range
    pub async fn load_expenses(&self, query: ExpenseQuery) {
        tracing::info!(
            "Loading expenses page {} (search={:?}, range={:?})",
            query.page,
            query.search,
            query.range
        );
        let req = Request::expenses()
            .with_user(&self.user_id)
            .list()
            .search_value(query.search)
            .date_range(query.range.map(|range| range.as_tuple()))
            .page(query.page);
        match self.api_client.send(req).await {
            Ok(response) => {
                tracing::info!(
                    "Loaded {} expenses ({} rows over {} pages)",
                    response.data.len(),
                    response.total_rows,
                    response.total_pages
                );
                let _ = self.data_tx.send(DataEvent::ExpensesLoaded {
                    expenses: response.data,
                    total_pages: response.total_pages,
                    total_rows: response.total_rows,
                    total_amount: response.total_amount,
                });
            }
            Err(e) => self.send_load_error("Failed to load expenses", &e),
        }
    }

    pub async fn load_incomes(&self) {
        tracing::debug!("Fetching incomes from API");
        let req = Request::incomes().with_user(&self.user_id).list();
        match self.api_client.send(req).await {
            Ok(response) => {
                tracing::info!("Loaded {} incomes from API", response.data.len());
                let _ = self.data_tx.send(DataEvent::IncomesLoaded {
                    incomes: response.data,
                });
            }
            Err(e) => self.send_load_error("Failed to load incomes", &e),
        }
    }

    async fn add_category(
        &self,
        temp_id: Id,
        name: String,
        parent_id: Option<Id>,
        undo: TreeUndo,
    ) {
        tracing::info!("Adding category {:?} (parent={:?})", name, parent_id);
        let req = Request::categories()
            .with_user(&self.user_id)
            .add(name, parent_id);
        match self.api_client.send(req).await {
            Ok(response) => match response.data {
                Some(category) => {
                    tracing::info!("Category created: {}", category.id);
                    let _ = self
                        .data_tx
                        .send(DataEvent::CategoryAdded { temp_id, category });
                }
                None => {
                    tracing::debug!("Add returned no category, reloading the tree");
                    self.load_categories().await;
                }
            },
            Err(e) => self.category_failed("Failed to add category", &e, undo),
        }
    }

    async fn rename_category(&self, id: Id, name: String, undo: TreeUndo) {
        tracing::info!("Renaming category {} to {:?}", id, name);
        let req = Request::categories()
            .with_user(&self.user_id)
            .update(id.clone(), name);
        match self.api_client.send(req).await {
            Ok(_) => {
                let _ = self.data_tx.send(DataEvent::CategoryRenamed { id });
            }
            Err(e) => self.category_failed("Failed to rename category", &e, undo),
        }
    }

    async fn delete_category(&self, id: Id, undo: TreeUndo) {
        tracing::info!("Deleting category {}", id);
        let req = Request::categories()
            .with_user(&self.user_id)
            .delete(id.clone());
        match self.api_client.send(req).await {
            Ok(_) => {
                let _ = self.data_tx.send(DataEvent::CategoryDeleted { id });
            }
            Err(e) => self.category_failed("Failed to delete category", &e, undo),
        }
    }

    fn category_failed(&self, context: &str, error: &TallyApiError, undo: TreeUndo) {
        if let Some(error) = self.report_error(context, error) {
            let _ = self
                .data_tx
                .send(DataEvent::CategoryMutationFailed { undo, error });
        }
    }

    /// Save an expense, then drop the breakdown items removed in the form.
    /// Items are only deleted once the save itself went through.
    async fn save_expense(
        &self,
        id: Option<Id>,
        expense: NewExpense,
        removed_items: Vec<Id>,
        query: ExpenseQuery,
    ) {
        let created = id.is_none();
        let repository = Request::expenses().with_user(&self.user_id);
        let result = match id {
            Some(id) => {
                tracing::info!("Updating expense {}", id);
                self.api_client.send(repository.edit(id, expense)).await
            }
            None => {
                tracing::info!("Creating expense in category {}", expense.category_id);
                self.api_client.send(repository.add(expense)).await
            }
        };

        match result {
            Ok(_) => {
                for item_id in removed_items {
                    if let Err(e) = self.delete_breakdown_item(item_id).await {
                        match self.report_error("Failed to delete breakdown item", &e) {
                            Some(error) => {
                                let _ = self.data_tx.send(DataEvent::DeleteFailed { error });
                            }
                            None => return,
                        }
                    }
                }
                let _ = self.data_tx.send(DataEvent::ExpenseSaved { created });
            }
            Err(e) => {
                if let Some(error) = self.report_error("Failed to save expense", &e) {
                    let _ = self.data_tx.send(DataEvent::ExpenseSaveFailed { error });
                } else {
                    return;
                }
            }
        }
        self.load_expenses(query).await;
    }

    async fn delete_expenses(&self, ids: Vec<Id>, query: ExpenseQuery) {
        let count = ids.len();
        tracing::info!("Deleting {} expenses", count);
        let req = Request::expenses().with_user(&self.user_id).delete(ids);
        match self.api_client.send(req).await {
            Ok(_) => {
                let _ = self.data_tx.send(DataEvent::ExpensesDeleted { count });
            }
            Err(e) => match self.report_error("Failed to delete expenses", &e) {
                Some(error) => {
                    let _ = self.data_tx.send(DataEvent::DeleteFailed { error });
                }
                None => return,
            },
        }
        self.load_expenses(query).await;
    }

    async fn delete_breakdown_item(&self, item_id: Id) -> Result<(), TallyApiError> {
        tracing::info!("Deleting breakdown item {}", item_id);
        let req = Request::expenses()
            .with_user(&self.user_id)
            .delete_breakdown_item(item_id);
        self.api_client.send(req).await.map(|_| ())
    }

    async fn save_income(&self, id: Option<Id>, income: NewIncome) {
        let created = id.is_none();
        let repository = Request::incomes().with_user(&self.user_id);
        let result = match id {
            Some(id) => {
                tracing::info!("Updating income {}", id);
                self.api_client.send(repository.edit(id, income)).await
            }
            None => {
                tracing::info!("Creating income of {}", income.amount);
                self.api_client.send(repository.add(income)).await
            }
        };

        match result {
            Ok(_) => {
                let _ = self.data_tx.send(DataEvent::IncomeSaved { created });
            }
            Err(e) => match self.report_error("Failed to save income", &e) {
                Some(error) => {
                    let _ = self.data_tx.send(DataEvent::IncomeSaveFailed { error });
                }
                None => return,
            },
        }
        self.load_incomes().await;
    }

    async fn delete_incomes(&self, ids: Vec<Id>) {
        let count = ids.len();
        tracing::info!("Deleting {} incomes", count);
        let req = Request::incomes().with_user(&self.user_id).delete(ids);
        match self.api_client.send(req).await {
            Ok(_) => {
                let _ = self.data_tx.send(DataEvent::IncomesDeleted { count });
            }
            Err(e) => match self.report_error("Failed to delete incomes", &e) {
                Some(error) => {
                    let _ = self.data_tx.send(DataEvent::DeleteFailed { error });
                }
                None => return,
            },
        }
        self.load_incomes().await;
    }

    async fn open_report(&self, html: String) {
        let result = tokio::task::spawn_blocking(move || report::write_and_open(&html)).await;
        match result {
            Ok(Ok(path)) => {
                tracing::info!("Report written to {}", path.display());
                let _ = self.data_tx.send(DataEvent::ReportOpened {
                    path: path.display().to_string(),
                });
            }
            Ok(Err(e)) => {
                tracing::error!("Failed to open report: {}", e);
                let _ = self.data_tx.send(DataEvent::ReportFailed {
                    error: e.to_string(),
                });
            }
            Err(e) => {
                tracing::error!("Report task panicked: {}", e);
                let _ = self.data_tx.send(DataEvent::ReportFailed {
                    error: "Failed to generate report".to_string(),
                });
            }
        }
    }

    async fn save_preferences(&self, preferences: Preferences) {
        let Some(store) = &self.preferences else {
            return;
        };
        match store.save(&preferences).await {
            Ok(()) => tracing::debug!("Preferences saved to {}", store.path().display()),
            Err(e) => tracing::warn!("Failed to save preferences: {}", e),
        }
    }
}
