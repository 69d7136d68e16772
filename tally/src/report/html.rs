use super::{Report, ReportKind, ReportRow};
use crate::utils::dates;
use maud::{html, Markup, PreEscaped, DOCTYPE};

const STYLE: &str = r#"
body { font-family: Arial, sans-serif; margin: 24px; color: #1f2937; }
.header { text-align: center; margin-bottom: 24px; }
.header h1 { margin: 0; font-size: 24px; }
.header p { margin: 4px 0 0; color: #6b7280; }
.meta { display: flex; gap: 12px; margin-bottom: 24px; }
.card { flex: 1; border: 1px solid #e5e7eb; border-radius: 6px; padding: 10px; }
.card .label { font-size: 12px; color: #6b7280; }
.card .value { font-size: 16px; font-weight: bold; }
table { width: 100%; border-collapse: collapse; margin-bottom: 16px; }
th, td { border: 1px solid #e5e7eb; padding: 6px 8px; text-align: left; font-size: 13px; }
th { background: #f3f4f6; }
td.amount, th.amount { text-align: right; }
tr.notes td { font-style: italic; color: #4b5563; }
table.breakdown { margin: 4px 0 4px 24px; width: calc(100% - 24px); }
tr.subtotal td, tr.grand-total td { font-weight: bold; }
@media print { body { margin: 0; } }
"#;

const PRINT_SCRIPT: &str = "window.onload = function () { window.print(); window.close(); };";

pub(super) fn render(report: &Report) -> Markup {
    let (title, subtitle, label_header) = match report.kind {
        ReportKind::Expenses => (
            "Expense Report",
            "Detailed breakdown of all expenses",
            "Category",
        ),
        ReportKind::Incomes => ("Income Report", "Detailed breakdown of all income", "Payer"),
    };
    let period = report
        .period
        .map(|range| range.to_string())
        .unwrap_or_else(|| "All dates".to_string());
    let category_totals = report.category_totals();

    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                title { (title) }
                style { (PreEscaped(STYLE)) }
            }
            body {
                div class="header" {
                    h1 { (title) }
                    p { (subtitle) }
                }

                div class="meta" {
                    (meta_card("Report Period", &period))
                    (meta_card("Generated On", &report.generated_at.format("%b %-d, %Y %H:%M").to_string()))
                    (meta_card("Total Amount", &report.total().to_string()))
                    (meta_card("Items Count", &report.rows.len().to_string()))
                }

                @if !category_totals.is_empty() {
                    h2 { "Category Breakdown" }
                    table {
                        thead {
                            tr {
                                th { "Category" }
                                th class="amount" { "Amount" }
                                th class="amount" { "Percentage" }
                            }
                        }
                        tbody {
                            @for entry in &category_totals {
                                tr {
                                    td { (entry.name) }
                                    td class="amount" { (entry.amount) }
                                    td class="amount" { (format!("{:.1}%", entry.percent)) }
                                }
                            }
                        }
                    }
                }

                table {
                    thead {
                        tr {
                            th { "ID" }
                            th { (label_header) }
                            th { "Date" }
                            th class="amount" { "Amount" }
                        }
                    }
                    tbody {
                        @for row in &report.rows {
                            (record_rows(row))
                        }
                        tr class="grand-total" {
                            td colspan="3" { "Total Amount" }
                            td class="amount" { (report.total()) }
                        }
                    }
                }

                script { (PreEscaped(PRINT_SCRIPT)) }
            }
        }
    }
}

fn meta_card(label: &str, value: &str) -> Markup {
    html! {
        div class="card" {
            div class="label" { (label) }
            div class="value" { (value) }
        }
    }
}

fn record_rows(row: &ReportRow) -> Markup {
    let subtotal: tally_api::endpoints::Amount = row.breakdown.iter().map(|item| item.price).sum();

    html! {
        tr {
            td { (row.id) }
            td { (row.label) }
            td { (dates::format_display(row.date)) }
            td class="amount" { (row.amount) }
        }
        @if let Some(notes) = &row.notes {
            tr class="notes" {
                td colspan="4" { "Notes: " (notes) }
            }
        }
        @if !row.breakdown.is_empty() {
            tr {
                td colspan="4" {
                    table class="breakdown" {
                        thead {
                            tr {
                                th { "No" }
                                th { "Item Name" }
                                th { "Quantity" }
                                th class="amount" { "Total" }
                            }
                        }
                        tbody {
                            @for (index, item) in row.breakdown.iter().enumerate() {
                                tr {
                                    td { (index + 1) }
                                    td { (item.name) }
                                    td { (item.quantity) }
                                    td class="amount" { (item.price) }
                                }
                            }
                            tr class="subtotal" {
                                td colspan="3" { "Subtotal" }
                                td class="amount" { (subtotal) }
                            }
                        }
                    }
                }
            }
        }
    }
}
