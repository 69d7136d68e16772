pub mod autocomplete_input;
pub mod category_editor;
pub mod delete_confirmation;
pub mod empty_state;
pub mod expense_form;
pub mod filter_input;
pub mod form_field;
pub mod help_bar;
pub mod help_popup;
pub mod income_form;
pub mod loading_indicator;
pub mod notifications;
pub mod pagination_bar;
pub mod popup;
pub mod record_detail;
pub mod screen_title;
pub mod sidebar;
pub mod summary_cards;
