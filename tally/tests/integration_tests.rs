use chrono::NaiveDate;
use tally::events::{BackgroundJob, DataEvent};
use tally::input::{Key, KeyEvent};
use tally::state::category_tree::CategoryTree;
use tally::state::InputMode;
use tally::testing::TestApp;
use tally::ui::screens::{Screen, ScreenKind};
use tally_api::endpoints::{categories::Category, expenses::Expense, incomes::Income, Amount, Id};

fn date(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, month, day).unwrap()
}

fn categories() -> Vec<Category> {
    let mut utilities = Category::new("1", "Utilities", None);
    utilities.children = vec![Category::new("2", "Electricity", Some(Id::new("1")))];
    vec![utilities, Category::new("4", "Groceries", None)]
}

fn income(id: i64, cents: i64, day: NaiveDate, payer: &str) -> Income {
    Income {
        id: Id::from(id),
        amount: Amount::from_cents(cents),
        date: day,
        note: None,
        payer: Some(payer.to_string()),
    }
}

fn expense(id: i64, category: &str, cents: i64, day: NaiveDate) -> Expense {
    Expense {
        id: Id::from(id),
        category_id: Id::new(category),
        expense: Amount::from_cents(cents),
        date: day,
        detail: None,
        breakdown_items: Vec::new(),
    }
}

fn on_categories() -> TestApp {
    let mut app = TestApp::new();
    app.send_key(Key::Char('2'));
    app.send_data_event(DataEvent::CategoriesLoaded {
        categories: categories(),
    });
    app
}

fn on_incomes(incomes: Vec<Income>) -> TestApp {
    let mut app = TestApp::new();
    app.send_key(Key::Char('4'));
    app.send_data_event(DataEvent::IncomesLoaded { incomes });
    app
}

fn category_names(app: &TestApp) -> Vec<String> {
    let Screen::Categories(s) = app.state().current_screen() else {
        panic!("expected categories screen");
    };
    s.rows().into_iter().map(|row| row.name).collect()
}

fn category_tree(app: &TestApp) -> CategoryTree {
    let Screen::Categories(s) = app.state().current_screen() else {
        panic!("expected categories screen");
    };
    s.tree.clone()
}

fn visible_income_ids(app: &TestApp) -> Vec<Id> {
    let Screen::Incomes(s) = app.state().current_screen() else {
        panic!("expected incomes screen");
    };
    s.page_items().iter().map(|i| i.id.clone()).collect()
}

#[test]
fn test_quit_flow() {
    let mut app = TestApp::new();

    // Initially should not quit
    app.assert_not_quit();

    // Press 'q' to quit
    app.send_key(Key::Char('q'));

    // Assert app should quit
    app.assert_should_quit();
    assert!(!app.state().clear_session);
}

#[test]
fn test_sign_out_clears_session() {
    let mut app = TestApp::new();
    app.send_key(Key::Char('Q'));

    app.assert_should_quit();
    assert!(app.state().clear_session);
    assert_eq!(app.state().exit_message.as_deref(), Some("Signed out."));
}

#[test]
fn test_help_toggle() {
    let mut app = TestApp::new();

    // Initially help is hidden
    assert!(!app.state().help_visible);

    // Press '?' to show help
    app.send_key(Key::Char('?'));
    assert!(app.state().help_visible);

    // Screen keys are ignored while help is open
    app.send_key(Key::Char('3'));
    app.assert_screen(ScreenKind::Dashboard);

    // Press 'Esc' to hide
    app.send_key(Key::Esc);
    assert!(!app.state().help_visible);
}

#[test]
fn test_multi_key_sequence_gg() {
    let mut app = TestApp::new();

    // Initially no pending key
    assert_eq!(app.state().pending_key, None);

    // First 'g' sets pending key
    app.send_key(Key::Char('g'));
    assert_eq!(app.state().pending_key, Some('g'));

    // 'g' then 'c' opens categories and clears the pending key
    app.send_key(Key::Char('c'));
    app.assert_screen(ScreenKind::Categories);
    assert_eq!(app.state().pending_key, None);

    // Any unrelated key just clears it
    app.send_keys(&[Key::Char('g'), Key::Char('x')]);
    assert_eq!(app.state().pending_key, None);
    app.assert_screen(ScreenKind::Categories);
}

#[test]
fn test_switching_pages_requests_loads() {
    let mut app = TestApp::new();

    app.send_key(Key::Char('3'));
    app.assert_screen(ScreenKind::Expenses);
    let jobs = app.take_jobs();
    assert!(jobs.contains(&BackgroundJob::LoadCategories));
    assert!(jobs
        .iter()
        .any(|job| matches!(job, BackgroundJob::LoadExpenses { query } if query.page == 1)));

    app.send_key(Key::Char('4'));
    app.assert_screen(ScreenKind::Incomes);
    assert_eq!(app.take_jobs(), vec![BackgroundJob::LoadIncomes]);

    // Back returns to expenses and reloads it
    app.send_key(Key::Char('h'));
    app.assert_screen(ScreenKind::Expenses);
    assert!(app.jobs().contains(&BackgroundJob::LoadCategories));
}

#[test]
fn test_response_for_left_screen_is_dropped() {
    let mut app = TestApp::new();
    app.send_key(Key::Char('4'));
    app.send_key(Key::Char('1'));

    app.send_data_event(DataEvent::IncomesLoaded {
        incomes: vec![income(1, 100, date(4, 1), "Acme")],
    });

    app.assert_screen(ScreenKind::Dashboard);
    let Screen::Dashboard(s) = app.state().current_screen() else {
        panic!("expected dashboard");
    };
    assert!(s.summary.is_none());
}

#[test]
fn test_dashboard_summary() {
    let mut app = TestApp::new();
    app.send_data_event(DataEvent::DashboardLoaded {
        expenses: vec![
            expense(1, "2", 4_000, date(1, 10)),
            expense(2, "4", 6_000, date(2, 3)),
        ],
        incomes: vec![income(1, 25_000, date(1, 1), "Acme")],
        categories: categories(),
        year: 2025,
    });

    let Screen::Dashboard(s) = app.state().current_screen() else {
        panic!("expected dashboard");
    };
    let summary = s.summary.as_ref().unwrap();
    assert_eq!(summary.total_expense, Amount::from_cents(10_000));
    assert_eq!(summary.balance(), Amount::from_cents(15_000));
    assert_eq!(summary.by_category[0].name, "Groceries");
    assert_eq!(summary.by_category[1].name, "Utilities");
    assert_eq!(summary.recent[0].id, Id::from(2i64));
}

#[test]
fn test_category_tree_editing() {
    let mut app = on_categories();
    assert_eq!(category_names(&app), vec!["Utilities", "Groceries"]);

    // Expand Utilities and move onto Electricity
    app.send_key(Key::Enter);
    assert_eq!(
        category_names(&app),
        vec!["Utilities", "Electricity", "Groceries"]
    );
    app.send_key(Key::Char('j'));

    // Subcategories cannot have children
    app.take_jobs();
    app.send_key(Key::Char('s'));
    assert_eq!(app.state().input_mode(), InputMode::Normal);
    assert_eq!(
        app.last_notification().as_deref(),
        Some("Cannot add subcategories to subcategories")
    );
    assert!(app.jobs().is_empty());

    // Add Water under Utilities
    app.send_key(Key::Char('k'));
    app.send_key(Key::Char('s'));
    assert_eq!(app.state().input_mode(), InputMode::Form);
    app.type_text("Water");
    app.send_key(Key::Enter);

    let Some(BackgroundJob::AddCategory {
        temp_id,
        name,
        parent_id,
        ..
    }) = app.last_job().cloned()
    else {
        panic!("expected an add category job");
    };
    assert_eq!(name, "Water");
    assert_eq!(parent_id, Some(Id::new("1")));
    assert!(temp_id.as_str().starts_with("tmp-"));
    assert!(category_names(&app).contains(&"Water".to_string()));

    // The server id replaces the temporary one
    app.send_data_event(DataEvent::CategoryAdded {
        temp_id: temp_id.clone(),
        category: Category::new("9", "Water", Some(Id::new("1"))),
    });
    let tree = category_tree(&app);
    assert!(tree.find(&temp_id).is_none());
    assert_eq!(tree.find(&Id::new("9")).map(|c| c.name.as_str()), Some("Water"));
}

#[test]
fn test_failed_rename_rolls_back_only_itself() {
    let mut app = on_categories();

    // Rename Groceries
    app.send_key(Key::Char('j'));
    app.send_key(Key::Char('e'));
    app.type_text(" & Household");
    app.send_key(Key::Enter);
    assert_eq!(category_names(&app)[1], "Groceries & Household");
    let Some(BackgroundJob::RenameCategory { undo, .. }) = app.last_job().cloned() else {
        panic!("expected a rename job");
    };

    // Add Travel while the rename is still in flight, and let it succeed
    app.send_key(Key::Char('a'));
    app.type_text("Travel");
    app.send_key(Key::Enter);
    let Some(BackgroundJob::AddCategory { temp_id, .. }) = app.last_job().cloned() else {
        panic!("expected an add category job");
    };
    app.send_data_event(DataEvent::CategoryAdded {
        temp_id,
        category: Category::new("10", "Travel", None),
    });

    app.send_data_event(DataEvent::CategoryMutationFailed {
        undo,
        error: "Category already exists".to_string(),
    });
    assert_eq!(
        category_names(&app),
        vec!["Utilities", "Groceries", "Travel"]
    );
    assert!(category_tree(&app).find(&Id::new("10")).is_some());
    assert_eq!(
        app.last_notification().as_deref(),
        Some("Category already exists")
    );
}

#[test]
fn test_category_delete_needs_confirmation() {
    let mut app = on_categories();

    app.send_key(Key::Char('d'));
    assert_eq!(app.state().input_mode(), InputMode::DeleteConfirmation);

    // Any other key cancels
    app.send_key(Key::Char('n'));
    assert_eq!(category_names(&app), vec!["Utilities", "Groceries"]);

    app.send_keys(&[Key::Char('d'), Key::Char('y')]);
    assert_eq!(category_names(&app), vec!["Groceries"]);
    assert!(matches!(
        app.last_job(),
        Some(BackgroundJob::DeleteCategory { id, .. }) if *id == Id::new("1")
    ));
}

#[test]
fn test_expense_breakdown_sets_total() {
    let mut app = TestApp::new();
    app.send_key(Key::Char('3'));
    app.send_data_event(DataEvent::CategoriesLoaded {
        categories: categories(),
    });
    app.send_data_event(DataEvent::ExpensesLoaded {
        expenses: Vec::new(),
        total_pages: 0,
        total_rows: 0,
        total_amount: Amount::ZERO,
    });
    app.take_jobs();

    app.send_key(Key::Char('n'));
    assert_eq!(app.state().input_mode(), InputMode::Form);

    // Pick a category through the autocomplete
    app.type_text("groc");
    app.send_key(Key::Enter);

    app.send_key_event(KeyEvent::with_ctrl(Key::Char('a')));
    app.type_text("Milk");
    app.send_key(Key::Tab);
    app.type_text("10");

    app.send_key_event(KeyEvent::with_ctrl(Key::Char('a')));
    app.type_text("Bread");
    app.send_key(Key::Tab);
    app.type_text("5");

    let Screen::Expenses(s) = app.state().current_screen() else {
        panic!("expected expenses screen");
    };
    assert_eq!(s.form.as_ref().unwrap().total(), Amount::from_cents(1_500));

    app.send_key_event(KeyEvent::with_ctrl(Key::Char('s')));
    let Some(BackgroundJob::SaveExpense { id, expense, .. }) = app.last_job().cloned() else {
        panic!("expected a save job");
    };
    assert_eq!(id, None);
    assert_eq!(expense.category_id, Id::new("4"));
    assert_eq!(expense.expense, Amount::from_cents(1_500));
    assert_eq!(expense.breakdown_items.len(), 2);

    // The form stays open until the server answers
    assert_eq!(app.state().input_mode(), InputMode::Form);
    app.send_data_event(DataEvent::ExpenseSaved { created: true });
    assert_eq!(app.state().input_mode(), InputMode::Normal);
    assert_eq!(app.last_notification().as_deref(), Some("Expense added"));
}

#[test]
fn test_income_amount_must_be_positive() {
    let mut app = on_incomes(Vec::new());
    app.take_jobs();

    app.send_key(Key::Char('n'));
    app.type_text("0");
    app.send_key(Key::Enter);

    assert!(app.jobs().is_empty());
    let Screen::Incomes(s) = app.state().current_screen() else {
        panic!("expected incomes screen");
    };
    assert_eq!(
        s.form
            .as_ref()
            .and_then(|f| f.errors.get(tally::state::validators::Field::Amount)),
        Some("Amount must be positive")
    );

    app.type_text(".01");
    app.send_key(Key::Enter);
    let Some(BackgroundJob::SaveIncome { income, .. }) = app.last_job().cloned() else {
        panic!("expected a save job");
    };
    assert_eq!(income.amount, Amount::from_cents(1));
}

#[test]
fn test_delete_selected_incomes() {
    let mut app = on_incomes(vec![
        income(1, 100, date(4, 1), "Acme"),
        income(2, 200, date(4, 2), "Acme"),
        income(3, 300, date(4, 3), "Globex"),
    ]);
    app.take_jobs();

    // Newest first: 3, 2, 1
    assert_eq!(
        visible_income_ids(&app),
        vec![Id::from(3i64), Id::from(2i64), Id::from(1i64)]
    );
    app.send_keys(&[Key::Char(' '), Key::Char('j'), Key::Char(' ')]);
    app.send_key(Key::Char('D'));
    assert_eq!(app.state().input_mode(), InputMode::DeleteConfirmation);
    app.send_key(Key::Char('y'));

    assert_eq!(visible_income_ids(&app), vec![Id::from(1i64)]);
    let Some(BackgroundJob::DeleteIncomes { ids }) = app.last_job().cloned() else {
        panic!("expected a delete job");
    };
    assert_eq!(ids.len(), 2);

    app.send_data_event(DataEvent::IncomesDeleted { count: 2 });
    assert_eq!(app.last_notification().as_deref(), Some("2 incomes deleted"));
}

#[test]
fn test_delete_selected_with_nothing_selected() {
    let mut app = on_incomes(vec![income(1, 100, date(4, 1), "Acme")]);
    app.send_key(Key::Char('D'));

    assert_eq!(app.state().input_mode(), InputMode::Normal);
    assert_eq!(app.last_notification().as_deref(), Some("No items selected"));
}

#[test]
fn test_income_search_and_range_intersect() {
    let mut app = on_incomes(vec![
        income(1, 100, date(4, 10), "Acme"),
        income(2, 200, date(5, 10), "Acme"),
        income(3, 300, date(4, 12), "Globex"),
    ]);

    app.send_key(Key::Char('t'));
    app.type_text("2025-04-01 to 2025-04-30");
    app.send_key(Key::Enter);
    assert_eq!(visible_income_ids(&app).len(), 2);

    app.send_key(Key::Char('/'));
    app.type_text("acme");
    app.send_key(Key::Enter);
    assert_eq!(visible_income_ids(&app), vec![Id::from(1i64)]);

    // Clearing the range keeps the search
    app.send_key(Key::Char('T'));
    assert_eq!(visible_income_ids(&app).len(), 2);
}

#[test]
fn test_invalid_range_is_reported() {
    let mut app = on_incomes(Vec::new());
    app.send_key(Key::Char('t'));
    app.type_text("sometime");
    app.send_key(Key::Enter);

    assert_eq!(app.state().input_mode(), InputMode::DateRange);
    assert_eq!(
        app.last_notification().as_deref(),
        Some("Enter a range like 2025-04-01 to 2025-04-30")
    );
}

#[test]
fn test_expense_search_reloads_first_page() {
    let mut app = TestApp::new();
    app.send_key(Key::Char('3'));
    app.send_data_event(DataEvent::ExpensesLoaded {
        expenses: vec![expense(1, "4", 500, date(4, 1))],
        total_pages: 3,
        total_rows: 25,
        total_amount: Amount::from_cents(12_500),
    });
    app.send_key(Key::Char(']'));
    app.take_jobs();

    app.send_key(Key::Char('/'));
    app.type_text("milk");
    assert!(app.jobs().is_empty());
    app.send_key(Key::Enter);

    let Some(BackgroundJob::LoadExpenses { query }) = app.last_job().cloned() else {
        panic!("expected an expense load");
    };
    assert_eq!(query.search, "milk");
    assert_eq!(query.page, 1);
}

#[test]
fn test_session_expiry_signs_out() {
    let mut app = TestApp::new();
    app.send_data_event(DataEvent::SessionExpired);

    app.assert_should_quit();
    assert!(app.state().clear_session);
}

#[test]
fn test_theme_and_sidebar_are_persisted() {
    let mut app = TestApp::new();
    let theme = app.state().theme;

    app.send_key_event(KeyEvent::with_ctrl(Key::Char('t')));
    app.send_key_event(KeyEvent::with_ctrl(Key::Char('b')));

    assert_ne!(app.state().theme, theme);
    assert!(!app.state().sidebar_open);
    let Some(BackgroundJob::SavePreferences(preferences)) = app.last_job().cloned() else {
        panic!("expected preferences to be saved");
    };
    assert_eq!(preferences.theme, app.state().theme);
    assert!(!preferences.sidebar_open);
}
