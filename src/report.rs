//! Exports the transactions as a single-page PDF report.
//!
//! The report is an A4 page with a title followed by one line of text per
//! transaction. There are no page breaks, long ledgers run off the bottom of
//! the page.

use std::{
    fmt::Write,
    sync::{Arc, Mutex},
};

use axum::{
    extract::{FromRef, State},
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::{IntoResponse, Response},
};

use crate::{
    AppState, Error,
    ledger::{LedgerStore, Transaction},
};

/// The title printed at the top of the report.
pub const REPORT_TITLE: &str = "Smart Budget Buddy Report";
/// The file name the report is downloaded as.
pub const REPORT_FILE_NAME: &str = "budget-report.pdf";

const PAGE_WIDTH_PT: f64 = 595.28;
const PAGE_HEIGHT_PT: f64 = 841.89;
const FONT_SIZE_PT: u32 = 16;
const MARGIN_MM: f64 = 10.0;
const TITLE_Y_MM: f64 = 10.0;
const FIRST_LINE_Y_MM: f64 = 20.0;
const LINE_STEP_MM: f64 = 8.0;

/// Convert millimetres to PDF points.
fn mm_to_pt(mm: f64) -> f64 {
    mm * 72.0 / 25.4
}

/// Escape `text` for a PDF literal string in the WinAnsi encoding.
///
/// Characters outside Latin-1, and control characters, are replaced with `?`.
fn escape_pdf_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());

    for c in text.chars() {
        match c {
            '(' | ')' | '\\' => {
                escaped.push('\\');
                escaped.push(c);
            }
            ' '..='~' => escaped.push(c),
            '\u{a0}'..='\u{ff}' => {
                let _ = write!(escaped, "\\{:03o}", c as u32);
            }
            _ => escaped.push('?'),
        }
    }

    escaped
}

/// A PDF file built one object at a time.
#[derive(Debug, Default)]
struct PdfWriter {
    objects: Vec<String>,
}

impl PdfWriter {
    /// Add an object and return its object number.
    fn add_object(&mut self, body: String) -> usize {
        self.objects.push(body);
        self.objects.len()
    }

    /// Write the header, objects, cross-reference table and trailer.
    ///
    /// Object 1 must be the document catalog.
    fn finish(self) -> Vec<u8> {
        let mut output = String::from("%PDF-1.4\n");
        let mut offsets = Vec::with_capacity(self.objects.len());

        for (index, body) in self.objects.iter().enumerate() {
            offsets.push(output.len());
            let _ = write!(output, "{} 0 obj\n{body}\nendobj\n", index + 1);
        }

        let xref_offset = output.len();
        let _ = write!(
            output,
            "xref\n0 {}\n0000000000 65535 f \n",
            self.objects.len() + 1
        );
        for offset in offsets {
            let _ = write!(output, "{offset:010} 00000 n \n");
        }
        let _ = write!(
            output,
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_offset}\n%%EOF\n",
            self.objects.len() + 1
        );

        output.into_bytes()
    }
}

/// Render `transactions` as a PDF document.
///
/// The title is placed 10 mm from the top-left corner, then each transaction
/// is printed in order starting 20 mm from the top, 8 mm apart.
pub fn export_pdf(transactions: &[Transaction]) -> Vec<u8> {
    let lines = std::iter::once((TITLE_Y_MM, REPORT_TITLE.to_owned())).chain(
        transactions.iter().enumerate().map(|(index, transaction)| {
            (
                FIRST_LINE_Y_MM + LINE_STEP_MM * index as f64,
                transaction.to_string(),
            )
        }),
    );

    let mut content = String::new();
    for (y_mm, text) in lines {
        let _ = writeln!(
            content,
            "BT /F1 {FONT_SIZE_PT} Tf {:.2} {:.2} Td ({}) Tj ET",
            mm_to_pt(MARGIN_MM),
            PAGE_HEIGHT_PT - mm_to_pt(y_mm),
            escape_pdf_text(&text)
        );
    }

    let mut pdf = PdfWriter::default();
    pdf.add_object("<< /Type /Catalog /Pages 2 0 R >>".to_owned());
    pdf.add_object("<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_owned());
    pdf.add_object(format!(
        "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {PAGE_WIDTH_PT} {PAGE_HEIGHT_PT}] \
        /Resources << /Font << /F1 5 0 R >> >> /Contents 4 0 R >>"
    ));
    pdf.add_object(format!(
        "<< /Length {} >>\nstream\n{content}endstream",
        content.len()
    ));
    pdf.add_object(
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
            .to_owned(),
    );

    pdf.finish()
}

/// The state needed to export the report.
#[derive(Debug, Clone)]
pub struct ReportState {
    /// The transactions to export.
    pub ledger: Arc<Mutex<LedgerStore>>,
}

impl FromRef<AppState> for ReportState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            ledger: state.ledger.clone(),
        }
    }
}

/// A route handler that downloads the transactions as [REPORT_FILE_NAME].
pub async fn get_report(State(state): State<ReportState>) -> Result<Response, Error> {
    let pdf = {
        let ledger = state
            .ledger
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire ledger lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)?;

        export_pdf(ledger.transactions())
    };

    tracing::info!("exported report of {} bytes", pdf.len());

    Ok((
        [
            (CONTENT_TYPE, "application/pdf".to_owned()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename=\"{REPORT_FILE_NAME}\""),
            ),
        ],
        pdf,
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::extract::State;
    use rusqlite::Connection;

    use crate::{
        db::initialize,
        ledger::{LedgerStore, Transaction, TransactionType},
        test_utils::{assert_content_type, assert_status_ok, get_header},
    };

    use super::{
        LINE_STEP_MM, REPORT_TITLE, ReportState, escape_pdf_text, export_pdf, get_report,
        mm_to_pt,
    };

    fn create_test_transaction(amount: f64, note: &str) -> Transaction {
        Transaction::new(
            amount,
            note,
            TransactionType::Expense,
            "Food",
            "1/2/2026".to_owned(),
        )
        .unwrap()
    }

    /// The y coordinates of each text line, in points from the bottom of the page.
    fn text_line_positions(pdf: &str) -> Vec<f64> {
        pdf.lines()
            .filter(|line| line.starts_with("BT "))
            .map(|line| {
                let fields: Vec<&str> = line.split_whitespace().collect();
                let td = fields.iter().position(|&field| field == "Td").unwrap();
                fields[td - 1].parse().unwrap()
            })
            .collect()
    }

    #[test]
    fn empty_ledger_has_only_title() {
        let pdf = String::from_utf8(export_pdf(&[])).unwrap();

        assert!(pdf.starts_with("%PDF-"));
        assert!(pdf.trim_end().ends_with("%%EOF"));
        assert!(pdf.contains(&format!("({REPORT_TITLE}) Tj")));
        assert_eq!(pdf.matches(" Tj ").count(), 1);
    }

    #[test]
    fn one_line_per_transaction_in_order() {
        let transactions = vec![
            create_test_transaction(50.0, "lunch"),
            create_test_transaction(12.5, "coffee"),
            create_test_transaction(3.0, "bus"),
        ];

        let pdf = String::from_utf8(export_pdf(&transactions)).unwrap();

        assert_eq!(pdf.matches(" Tj ").count(), 4);
        let lunch = pdf.find("(1/2/2026 - lunch \\(Food\\): 50 [expense]) Tj").unwrap();
        let coffee = pdf.find("(1/2/2026 - coffee \\(Food\\): 12.5 [expense]) Tj").unwrap();
        let bus = pdf.find("(1/2/2026 - bus \\(Food\\): 3 [expense]) Tj").unwrap();
        assert!(lunch < coffee && coffee < bus);
    }

    #[test]
    fn lines_are_eight_millimetres_apart() {
        let transactions = vec![
            create_test_transaction(1.0, "a"),
            create_test_transaction(2.0, "b"),
            create_test_transaction(3.0, "c"),
        ];

        let pdf = String::from_utf8(export_pdf(&transactions)).unwrap();
        let positions = text_line_positions(&pdf);

        assert_eq!(positions.len(), 4);
        // Title at 10 mm, first line at 20 mm from the top.
        assert!((positions[0] - positions[1] - mm_to_pt(10.0)).abs() < 0.02);
        for pair in positions[1..].windows(2) {
            assert!((pair[0] - pair[1] - mm_to_pt(LINE_STEP_MM)).abs() < 0.02);
        }
    }

    #[test]
    fn long_ledgers_run_off_the_page() {
        let transactions: Vec<_> = (1..=200)
            .map(|i| create_test_transaction(i as f64, "item"))
            .collect();

        let pdf = String::from_utf8(export_pdf(&transactions)).unwrap();

        assert_eq!(pdf.matches("/Type /Page ").count(), 1);
        assert!(text_line_positions(&pdf).last().unwrap() < &0.0);
    }

    #[test]
    fn cross_reference_offsets_point_at_objects() {
        let pdf = export_pdf(&[create_test_transaction(1.0, "a")]);
        let text = String::from_utf8(pdf).unwrap();

        let xref_start = text.find("xref\n").unwrap();
        let offsets: Vec<usize> = text[xref_start..]
            .lines()
            .skip(3)
            .take(5)
            .map(|line| line[..10].parse().unwrap())
            .collect();

        for (index, offset) in offsets.into_iter().enumerate() {
            assert!(
                text[offset..].starts_with(&format!("{} 0 obj", index + 1)),
                "object {} not found at offset {offset}",
                index + 1
            );
        }

        let startxref: usize = text
            .lines()
            .skip_while(|&line| line != "startxref")
            .nth(1)
            .unwrap()
            .parse()
            .unwrap();
        assert_eq!(startxref, xref_start);
    }

    #[test]
    fn escapes_special_characters() {
        assert_eq!(escape_pdf_text(r"(a)\b"), r"\(a\)\\b");
        assert_eq!(escape_pdf_text("café"), r"caf\351");
        assert_eq!(escape_pdf_text("寿司"), "??");
        assert_eq!(escape_pdf_text("tab\there"), "tab?here");
    }

    #[tokio::test]
    async fn report_is_downloaded_as_attachment() {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();
        let mut ledger = LedgerStore::load(connection).unwrap();
        ledger
            .add(50.0, "lunch", TransactionType::Expense, "Food", "1/2/2026".to_owned())
            .unwrap();
        let state = ReportState {
            ledger: Arc::new(Mutex::new(ledger)),
        };

        let response = get_report(State(state)).await.unwrap();

        assert_status_ok(&response);
        assert_content_type(&response, "application/pdf");
        assert_eq!(
            get_header(&response, "content-disposition"),
            "attachment; filename=\"budget-report.pdf\""
        );
    }
}
