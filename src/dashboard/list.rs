//! The list of transactions.

use maud::{Markup, html};

use crate::ledger::{Transaction, TransactionType};

/// Renders `transactions` as a list, one item per transaction in the given order.
pub(super) fn transaction_list_view(transactions: &[&Transaction]) -> Markup {
    html!(
        ul
            id="transaction-list"
            class="w-full divide-y divide-gray-200 dark:divide-gray-700"
        {
            @for transaction in transactions {
                @let colour = match transaction.type_ {
                    TransactionType::Income => "text-green-600 dark:text-green-400",
                    TransactionType::Expense => "text-red-600 dark:text-red-400",
                };

                li class={ "py-2 " (colour) } { (transaction.to_string()) }
            }
        }
    )
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};

    use crate::ledger::{Transaction, TransactionType};

    use super::transaction_list_view;

    fn get_list_items(transactions: &[&Transaction]) -> Vec<String> {
        let html = Html::parse_fragment(&transaction_list_view(transactions).into_string());
        let selector = Selector::parse("#transaction-list > li").unwrap();

        html.select(&selector)
            .map(|item| item.text().collect::<String>())
            .collect()
    }

    #[test]
    fn one_item_per_transaction_in_order() {
        let lunch = Transaction::new(
            50.0,
            "lunch",
            TransactionType::Expense,
            "Food",
            "1/2/2026".to_owned(),
        )
        .unwrap();
        let paycheck = Transaction::new(
            1000.0,
            "paycheck",
            TransactionType::Income,
            "Salary",
            "1/2/2026".to_owned(),
        )
        .unwrap();

        let items = get_list_items(&[&lunch, &paycheck]);

        assert_eq!(
            items,
            vec![
                "1/2/2026 - lunch (Food): 50 [expense]",
                "1/2/2026 - paycheck (Salary): 1000 [income]",
            ]
        );
    }

    #[test]
    fn notes_are_escaped() {
        let transaction = Transaction::new(
            1.0,
            "<script>alert(1)</script>",
            TransactionType::Expense,
            "Other",
            "1/2/2026".to_owned(),
        )
        .unwrap();

        let html = transaction_list_view(&[&transaction]).into_string();

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn empty_list_renders_container() {
        let html = Html::parse_fragment(&transaction_list_view(&[]).into_string());

        let selector = Selector::parse("#transaction-list").unwrap();
        assert!(html.select(&selector).next().is_some());
        assert!(get_list_items(&[]).is_empty());
    }
}
