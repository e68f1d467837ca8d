//! The totals and the daily limit warning.

use maud::{Markup, html};

use crate::{html::CARD_STYLE, ledger::Totals};

/// Renders the income, expense and balance totals.
pub(super) fn summary_view(totals: &Totals) -> Markup {
    let [income, expense, balance] = totals.display();

    html!(
        section id="summary" class="grid grid-cols-1 md:grid-cols-3 gap-4 w-full"
        {
            div class=(CARD_STYLE)
            {
                h3 class="text-sm text-gray-500 dark:text-gray-400" { "Total Income" }
                p id="total-income" class="text-2xl font-bold text-green-600" { (income) }
            }

            div class=(CARD_STYLE)
            {
                h3 class="text-sm text-gray-500 dark:text-gray-400" { "Total Expense" }
                p id="total-expense" class="text-2xl font-bold text-red-600" { (expense) }
            }

            div class=(CARD_STYLE)
            {
                h3 class="text-sm text-gray-500 dark:text-gray-400" { "Balance" }
                p id="balance" class="text-2xl font-bold" { (balance) }
            }
        }
    )
}

/// Renders the warning shown when today's expenses are over the daily limit.
///
/// The element is always present so it can be swapped, it is only hidden.
pub(super) fn warning_view(over_limit: bool) -> Markup {
    let display = if over_limit {
        "display: block"
    } else {
        "display: none"
    };

    html!(
        div
            id="warning"
            role="status"
            style=(display)
            class="w-full p-4 mb-4 text-sm text-yellow-800 rounded-lg bg-yellow-50
                dark:bg-gray-800 dark:text-yellow-300"
        {
            "Warning: today's expenses are over your daily limit!"
        }
    )
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};

    use crate::{ledger::Totals, test_utils::must_select_text};

    use super::{summary_view, warning_view};

    #[test]
    fn summary_shows_totals_to_two_decimal_places() {
        let totals = Totals {
            income: 1000.0,
            expense: 50.0,
            balance: 950.0,
        };

        let html = Html::parse_fragment(&summary_view(&totals).into_string());

        assert_eq!(must_select_text(&html, "#total-income"), "1000.00");
        assert_eq!(must_select_text(&html, "#total-expense"), "50.00");
        assert_eq!(must_select_text(&html, "#balance"), "950.00");
    }

    fn get_warning_style(over_limit: bool) -> String {
        let html = Html::parse_fragment(&warning_view(over_limit).into_string());
        let selector = Selector::parse("#warning").unwrap();

        html.select(&selector)
            .next()
            .expect("No warning found")
            .value()
            .attr("style")
            .unwrap_or_default()
            .to_owned()
    }

    #[test]
    fn warning_is_shown_when_over_limit() {
        assert_eq!(get_warning_style(true), "display: block");
    }

    #[test]
    fn warning_is_hidden_when_under_limit() {
        assert_eq!(get_warning_style(false), "display: none");
    }
}
