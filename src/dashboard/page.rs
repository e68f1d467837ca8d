//! The dashboard page and the ledger partial that htmx swaps into it.

use maud::{Markup, PreEscaped, html};

use crate::{
    dashboard::{
        charts::{ChartRenderer, charts_script, charts_view},
        list::transaction_list_view,
        summary::{summary_view, warning_view},
    },
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, CARD_STYLE, ECHARTS_SCRIPT, FORM_LABEL_STYLE,
        FORM_TEXT_INPUT_STYLE, HeadElement, LINK_BUTTON_STYLE, PAGE_CONTAINER_STYLE, base,
    },
    ledger::{
        ALL_CATEGORIES, CATEGORIES, LedgerStore, TransactionFilter, TransactionType,
        category_expenses, filter_transactions, summarize, today_over_limit,
    },
    report::REPORT_FILE_NAME,
};

/// The ID of the element replaced after a transaction is added.
pub(super) const LEDGER_ID: &str = "ledger";

/// Renders the full dashboard page.
pub(super) fn dashboard_view(ledger: &LedgerStore, charts: &mut ChartRenderer, today: &str) -> Markup {
    let content = html!(
        div class=(PAGE_CONTAINER_STYLE)
        {
            h1 class="text-3xl font-bold mb-6" { "Smart Budget Buddy" }

            div class="grid grid-cols-1 lg:grid-cols-2 gap-4 w-full"
            {
                (transaction_form_view())
                (daily_limit_view(ledger.daily_limit()))
            }

            (filter_form_view())

            (ledger_view(ledger, charts, today))

            a
                href=(endpoints::REPORT_API)
                download=(REPORT_FILE_NAME)
                class=(LINK_BUTTON_STYLE)
            {
                "Export PDF"
            }
        }
    );

    base(
        "Dashboard",
        &[HeadElement::ScriptLink(ECHARTS_SCRIPT.to_owned())],
        &content,
    )
}

/// Renders the summary, warning, full transaction list and charts.
///
/// The charts are redrawn, which releases the previous chart handles.
pub(super) fn ledger_view(ledger: &LedgerStore, charts: &mut ChartRenderer, today: &str) -> Markup {
    let transactions = ledger.transactions();
    let totals = summarize(transactions);
    let over_limit = today_over_limit(transactions, ledger.daily_limit(), today);
    let all_transactions = filter_transactions(transactions, &TransactionFilter::default());
    let charts = charts.render(&category_expenses(transactions, &CATEGORIES));

    html!(
        div id=(LEDGER_ID) class="w-full"
        {
            (summary_view(&totals))
            (warning_view(over_limit))

            section class=(CARD_STYLE)
            {
                h2 class="text-xl font-semibold mb-2" { "Transactions" }
                (transaction_list_view(&all_transactions))
            }

            (charts_view(&charts))

            script { (PreEscaped(charts_script(&charts))) }
        }
    )
}

fn transaction_form_view() -> Markup {
    html!(
        section class=(CARD_STYLE)
        {
            h2 class="text-xl font-semibold mb-4" { "Add Transaction" }

            form
                id="transaction-form"
                method="post"
                action=(endpoints::TRANSACTIONS_API)
                hx-post=(endpoints::TRANSACTIONS_API)
                hx-target={ "#" (LEDGER_ID) }
                hx-target-error="#alert-container"
                hx-swap="outerHTML"
                "hx-on::after-request"="if (event.detail.successful) this.reset()"
                class="space-y-4"
            {
                div
                {
                    label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }
                    input
                        type="number"
                        id="amount"
                        name="amount"
                        step="0.01"
                        min="0.01"
                        placeholder="0.00"
                        required
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div
                {
                    label for="note" class=(FORM_LABEL_STYLE) { "Note" }
                    input
                        type="text"
                        id="note"
                        name="note"
                        placeholder="What was it for?"
                        required
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div
                {
                    label for="type" class=(FORM_LABEL_STYLE) { "Type" }
                    select id="type" name="type" class=(FORM_TEXT_INPUT_STYLE)
                    {
                        @for type_ in [TransactionType::Expense, TransactionType::Income] {
                            option value=(type_.as_str()) { (capitalize(type_.as_str())) }
                        }
                    }
                }

                div
                {
                    label for="category" class=(FORM_LABEL_STYLE) { "Category" }
                    select id="category" name="category" class=(FORM_TEXT_INPUT_STYLE)
                    {
                        @for category in CATEGORIES {
                            option value=(category) { (category) }
                        }
                    }
                }

                button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Add Transaction" }
            }
        }
    )
}

fn daily_limit_view(daily_limit: f64) -> Markup {
    html!(
        section class=(CARD_STYLE)
        {
            h2 class="text-xl font-semibold mb-4" { "Daily Limit" }

            label for="daily-limit" class=(FORM_LABEL_STYLE) { "Spending limit per day" }
            input
                type="number"
                id="daily-limit"
                name="daily_limit"
                step="0.01"
                min="0"
                value=(daily_limit)
                hx-put=(endpoints::DAILY_LIMIT_API)
                hx-trigger="change"
                hx-target="#warning"
                hx-target-error="#alert-container"
                hx-swap="outerHTML"
                class=(FORM_TEXT_INPUT_STYLE);
        }
    )
}

fn filter_form_view() -> Markup {
    html!(
        section class=(CARD_STYLE)
        {
            form
                id="filter-form"
                hx-get=(endpoints::TRANSACTIONS_API)
                hx-trigger="input changed delay:300ms, change"
                hx-target="#transaction-list"
                hx-target-error="#alert-container"
                hx-swap="outerHTML"
                class="grid grid-cols-1 md:grid-cols-2 gap-4"
            {
                div
                {
                    label for="keyword" class=(FORM_LABEL_STYLE) { "Search" }
                    input
                        type="search"
                        id="keyword"
                        name="keyword"
                        placeholder="Search notes"
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div
                {
                    label for="category-filter" class=(FORM_LABEL_STYLE) { "Category" }
                    select id="category-filter" name="category" class=(FORM_TEXT_INPUT_STYLE)
                    {
                        option value=(ALL_CATEGORIES) { "All" }

                        @for category in CATEGORIES {
                            option value=(category) { (category) }
                        }
                    }
                }
            }
        }
    )
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();

    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;
    use scraper::{Html, Selector};

    use crate::{
        dashboard::charts::ChartRenderer,
        db::initialize,
        ledger::{LedgerStore, TransactionType},
        test_utils::{assert_valid_html, must_select_text},
    };

    use super::{capitalize, dashboard_view, ledger_view};

    const TODAY: &str = "10/19/2026";

    fn get_test_store() -> LedgerStore {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();
        LedgerStore::load(connection).unwrap()
    }

    #[test]
    fn page_has_every_section() {
        let mut ledger = get_test_store();
        ledger
            .add(50.0, "lunch", TransactionType::Expense, "Food", TODAY.to_owned())
            .unwrap();
        ledger.set_limit("20").unwrap();
        let mut charts = ChartRenderer::new();

        let html = Html::parse_document(&dashboard_view(&ledger, &mut charts, TODAY).into_string());

        assert_valid_html(&html);
        for selector in [
            "form#transaction-form",
            "input[name=amount]",
            "input[name=note]",
            "select[name=type]",
            "select[name=category]",
            "input#daily-limit[value='20']",
            "input#keyword",
            "select#category-filter",
            "#ledger #transaction-list",
            "#pie-chart",
            "#bar-chart",
            "a[href='/api/report']",
        ] {
            let parsed = Selector::parse(selector).unwrap();
            assert!(
                html.select(&parsed).next().is_some(),
                "could not find {selector}"
            );
        }
        assert_eq!(must_select_text(&html, "#total-expense"), "50.00");
    }

    #[test]
    fn ledger_view_shows_warning_when_over_limit() {
        let mut ledger = get_test_store();
        ledger
            .add(150.0, "dinner", TransactionType::Expense, "Food", TODAY.to_owned())
            .unwrap();
        ledger.set_limit("100").unwrap();
        let mut charts = ChartRenderer::new();

        let html = Html::parse_fragment(&ledger_view(&ledger, &mut charts, TODAY).into_string());

        let warning = Selector::parse("#warning").unwrap();
        let style = html
            .select(&warning)
            .next()
            .and_then(|warning| warning.value().attr("style"));
        assert_eq!(style, Some("display: block"));
    }

    #[test]
    fn ledger_view_ignores_expenses_from_other_days() {
        let mut ledger = get_test_store();
        ledger
            .add(500.0, "flight", TransactionType::Expense, "Travel", "10/18/2026".to_owned())
            .unwrap();
        ledger.set_limit("100").unwrap();
        let mut charts = ChartRenderer::new();

        let html = ledger_view(&ledger, &mut charts, TODAY).into_string();

        assert!(html.contains("display: none"));
    }

    #[test]
    fn repeated_renders_keep_one_chart_per_kind() {
        let ledger = get_test_store();
        let mut charts = ChartRenderer::new();

        for _ in 0..5 {
            ledger_view(&ledger, &mut charts, TODAY);
        }

        assert_eq!(charts.live_handles(), 2);
    }

    #[test]
    fn capitalize_first_letter() {
        assert_eq!(capitalize("expense"), "Expense");
        assert_eq!(capitalize(""), "");
    }
}
