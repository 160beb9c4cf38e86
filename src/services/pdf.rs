//! Invoice PDF rendering
//!
//! The document is laid out as a list of text rows first and only then drawn
//! onto A4 pages, starting a new page whenever the next row would cross the
//! bottom margin.

use printpdf::{
    BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerIndex,
    PdfPageIndex,
};
use rust_decimal::Decimal;

use crate::domain::totals::tax_rate;
use crate::domain::{Address, DomainError, InvoiceDocument};

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN_LEFT: f32 = 20.0;
const MARGIN_TOP: f32 = 20.0;
const MARGIN_BOTTOM: f32 = 20.0;
const BODY_SIZE: f32 = 10.0;
/// Approximate characters per line of body text at the item name column width
const NAME_WIDTH: usize = 44;
const DESCRIPTION_WIDTH: usize = 70;

/// Item table columns: name, quantity, price, tax, net, total
const COLUMNS: [f32; 6] = [MARGIN_LEFT, 110.0, 125.0, 145.0, 160.0, 182.0];

#[derive(Debug, Clone, PartialEq)]
struct Span {
    x: f32,
    text: String,
    bold: bool,
}

/// One visual line; all spans share a baseline
#[derive(Debug, Clone, PartialEq)]
struct Row {
    size: f32,
    spans: Vec<Span>,
}

impl Row {
    fn text(x: f32, text: impl Into<String>) -> Self {
        Self {
            size: BODY_SIZE,
            spans: vec![Span {
                x,
                text: text.into(),
                bold: false,
            }],
        }
    }

    fn bold(x: f32, text: impl Into<String>) -> Self {
        let mut row = Self::text(x, text);
        row.spans[0].bold = true;
        row
    }

    fn blank() -> Self {
        Self {
            size: BODY_SIZE,
            spans: Vec::new(),
        }
    }

    fn columns(cells: Vec<String>, bold: bool) -> Self {
        Self {
            size: BODY_SIZE,
            spans: COLUMNS
                .iter()
                .zip(cells)
                .map(|(&x, text)| Span { x, text, bold })
                .collect(),
        }
    }

    fn sized(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    /// Vertical space taken, in millimetres
    fn height(&self) -> f32 {
        self.size * 0.5
    }
}

fn money(value: Decimal) -> String {
    format!("{:.2}", value.round_dp(2))
}

fn address_rows(rows: &mut Vec<Row>, address: &Address) {
    rows.push(Row::text(
        MARGIN_LEFT,
        format!("{} {}", address.street, address.number),
    ));
    rows.push(Row::text(
        MARGIN_LEFT,
        format!("{}, {}", address.city, address.country),
    ));
}

/// Breaks text into lines of at most `width` characters on word boundaries.
/// Words longer than the width are kept whole.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            if !line.is_empty() && line.chars().count() + 1 + word.chars().count() > width {
                lines.push(std::mem::take(&mut line));
            }
            if !line.is_empty() {
                line.push(' ');
            }
            line.push_str(word);
        }
        if !line.is_empty() {
            lines.push(line);
        }
    }
    lines
}

fn layout(document: &InvoiceDocument) -> Vec<Row> {
    let invoice = &document.invoice;
    let mut rows = vec![
        Row::bold(MARGIN_LEFT, format!("Invoice #{}", invoice.invoice_number)).sized(18.0),
        Row::text(
            MARGIN_LEFT,
            format!("Date: {}", invoice.date.format("%Y-%m-%d")),
        ),
        Row::blank(),
        Row::bold(MARGIN_LEFT, "From"),
        Row::text(
            MARGIN_LEFT,
            format!("{} ({})", document.vendor.company_name, document.vendor.name),
        ),
    ];
    address_rows(&mut rows, &document.vendor_address);

    rows.push(Row::blank());
    rows.push(Row::bold(MARGIN_LEFT, "Bill to"));
    rows.push(Row::text(MARGIN_LEFT, document.customer.full_name()));
    rows.push(Row::text(MARGIN_LEFT, document.customer.email.clone()));
    address_rows(&mut rows, &document.customer_address);

    rows.push(Row::blank());
    rows.push(Row::columns(
        ["Item", "Qty", "Price", "Tax", "Net", "Total"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        true,
    ));

    for item in &document.items {
        let mut name = wrap(&item.name, NAME_WIDTH).into_iter();
        rows.push(Row::columns(
            vec![
                name.next().unwrap_or_default(),
                item.quantity.to_string(),
                money(item.price),
                format!("{}%", (tax_rate(item.tax) * Decimal::ONE_HUNDRED).normalize()),
                money(item.net_total()),
                money(item.total()),
            ],
            false,
        ));
        for rest in name {
            rows.push(Row::text(MARGIN_LEFT, rest));
        }
        for line in wrap(&item.description, DESCRIPTION_WIDTH) {
            rows.push(Row::text(MARGIN_LEFT + 4.0, line).sized(8.0));
        }
    }

    let totals = document.totals();
    rows.push(Row::blank());
    for (label, value, bold) in [
        ("Net total", totals.net_total, false),
        ("Tax", totals.tax_total, false),
        ("Total", totals.total, true),
    ] {
        rows.push(Row {
            size: BODY_SIZE,
            spans: vec![
                Span {
                    x: COLUMNS[3],
                    text: label.to_string(),
                    bold,
                },
                Span {
                    x: COLUMNS[5],
                    text: money(value),
                    bold,
                },
            ],
        });
    }

    if !document.bank_accounts.is_empty() {
        rows.push(Row::blank());
        rows.push(Row::bold(MARGIN_LEFT, "Payment details"));
        for account in &document.bank_accounts {
            rows.push(Row::text(
                MARGIN_LEFT,
                format!(
                    "{}  IBAN {}  BIC {}",
                    account.bank_name, account.iban, account.bic
                ),
            ));
        }
    }

    rows
}

/// Splits rows into pages by available height
fn paginate(rows: Vec<Row>) -> Vec<Vec<Row>> {
    let usable = PAGE_HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
    let mut pages = vec![Vec::new()];
    let mut used = 0.0;

    for row in rows {
        if used + row.height() > usable && used > 0.0 {
            pages.push(Vec::new());
            used = 0.0;
        }
        used += row.height();
        if let Some(page) = pages.last_mut() {
            page.push(row);
        }
    }
    pages
}

fn pdf_error(e: impl std::fmt::Display) -> DomainError {
    DomainError::Render(format!("PDF generation failed: {}", e))
}

fn draw(
    doc: &PdfDocumentReference,
    pages: Vec<Vec<Row>>,
    regular: &IndirectFontRef,
    bold: &IndirectFontRef,
    first: (PdfPageIndex, PdfLayerIndex),
) {
    let mut target = Some(first);
    for rows in pages {
        let (page, layer) = match target.take() {
            Some(indices) => indices,
            None => doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1"),
        };
        let layer = doc.get_page(page).get_layer(layer);

        let mut y = PAGE_HEIGHT - MARGIN_TOP;
        for row in rows {
            y -= row.height();
            for span in &row.spans {
                let font = if span.bold { bold } else { regular };
                layer.use_text(span.text.clone(), row.size, Mm(span.x), Mm(y), font);
            }
        }
    }
}

/// Renders the invoice with its parties, items, totals and payment details.
pub fn render_invoice_pdf(document: &InvoiceDocument) -> Result<Vec<u8>, DomainError> {
    let title = format!("Invoice {}", document.invoice.invoice_number);
    let (doc, page, layer) =
        PdfDocument::new(title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(pdf_error)?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(pdf_error)?;

    let pages = paginate(layout(document));
    draw(&doc, pages, &regular, &bold, (page, layer));

    doc.save_to_bytes().map_err(pdf_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BankAccount, Customer, Invoice, InvoiceItem, Vendor};
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;

    fn address(id: i32) -> Address {
        Address {
            id,
            street: "Main Street".to_string(),
            number: "45".to_string(),
            city: "Capital".to_string(),
            country: "Mainland".to_string(),
        }
    }

    fn item(id: i32, name: &str) -> InvoiceItem {
        InvoiceItem {
            id,
            invoice_id: 1,
            name: name.to_string(),
            description: "Implementation of a firewall".to_string(),
            quantity: 1,
            price: dec!(100.00),
            tax: 0.19,
        }
    }

    fn document(items: Vec<InvoiceItem>) -> InvoiceDocument {
        InvoiceDocument {
            invoice: Invoice {
                id: 1,
                invoice_number: 42,
                date: Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap(),
                vendor_id: 1,
                customer_id: 1,
            },
            vendor: Vendor {
                id: 1,
                name: "John".to_string(),
                company_name: "Doe Company".to_string(),
                address_id: 1,
            },
            vendor_address: address(1),
            bank_accounts: vec![BankAccount {
                id: 1,
                vendor_id: 1,
                bank_name: "Commerzbank".to_string(),
                iban: "DE89370400440532013000".to_string(),
                bic: "COBADEFF".to_string(),
            }],
            customer: Customer {
                id: 1,
                first_name: "Jane".to_string(),
                last_name: "Roe".to_string(),
                email: "jane@example.com".to_string(),
                address_id: 2,
            },
            customer_address: address(2),
            items,
        }
    }

    fn texts(rows: &[Row]) -> Vec<String> {
        rows.iter()
            .flat_map(|r| r.spans.iter().map(|s| s.text.clone()))
            .collect()
    }

    #[test]
    fn money_has_two_places() {
        assert_eq!(money(dec!(119)), "119.00");
        assert_eq!(money(dec!(10.505)), "10.50");
        assert_eq!(money(dec!(0.1)), "0.10");
    }

    #[test]
    fn wrap_breaks_on_words() {
        assert_eq!(wrap("one two three", 7), vec!["one two", "three"]);
        assert_eq!(wrap("", 10), Vec::<String>::new());
        assert_eq!(wrap("unbreakable", 4), vec!["unbreakable"]);
    }

    #[test]
    fn layout_lists_items_totals_and_payment_details() {
        let text = texts(&layout(&document(vec![item(1, "Security Services")])));

        assert!(text.contains(&"Invoice #42".to_string()));
        assert!(text.contains(&"Security Services".to_string()));
        assert!(text.contains(&"100.00".to_string()));
        assert!(text.contains(&"19%".to_string()));
        assert!(text.contains(&"119.00".to_string()));
        assert!(text
            .iter()
            .any(|t| t.contains("IBAN DE89370400440532013000")));
    }

    #[test]
    fn long_invoices_span_several_pages() {
        let items = (1..=120).map(|i| item(i, "Consulting")).collect();
        let pages = paginate(layout(&document(items)));
        assert!(pages.len() > 1);
        assert!(pages.iter().all(|p| !p.is_empty()));
    }

    #[test]
    fn rendered_bytes_are_a_pdf() {
        let bytes = render_invoice_pdf(&document(vec![item(1, "Security Services")])).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
