//! PDF report download, built with printpdf's builtin Helvetica fonts.
//!
//! The report carries the totals summary, the chart data in print form (top
//! spending categories and recent daily spend) and the filtered transaction
//! table. Pure formatting; every number is computed before this module runs.

use std::io::BufWriter;

use printpdf::*;

use crate::error::{AppError, AppResult};
use crate::models::transaction::{format_amount, Transaction};
use crate::services::aggregation::{self, Totals};

// A4 dimensions (mm)
const PAGE_W: f32 = 210.0;
const PAGE_H: f32 = 297.0;
const MARGIN_TOP: f32 = 20.0;
const MARGIN_BOTTOM: f32 = 20.0;
const MARGIN_LEFT: f32 = 14.0;
const MARGIN_RIGHT: f32 = 14.0;
const ROW_H: f32 = 5.0;
const FONT_SIZE: f32 = 10.0;
const TITLE_SIZE: f32 = 18.0;
const SUBTITLE_SIZE: f32 = 10.0;

const CHART_CATEGORY_LIMIT: usize = 6;
const CHART_DAY_WINDOW: usize = 10;

fn approx_text_width(text: &str, size: f32) -> f32 {
    text.len() as f32 * size * 0.18
}

fn clip(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", truncated)
    }
}

#[derive(Clone, Copy)]
enum Align {
    Left,
    Right,
}

struct Col {
    width: f32,
    align: Align,
}

struct PdfWriter {
    doc: PdfDocumentReference,
    font: IndirectFontRef,
    font_bold: IndirectFontRef,
    current_page: PdfPageIndex,
    current_layer: PdfLayerIndex,
    y: f32,
}

impl PdfWriter {
    fn new(title: &str) -> AppResult<Self> {
        let (doc, page, layer) = PdfDocument::new(title, Mm(PAGE_W), Mm(PAGE_H), "Layer 1");
        let font = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| AppError::Pdf(format!("{e:?}")))?;
        let font_bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| AppError::Pdf(format!("{e:?}")))?;
        Ok(Self {
            doc,
            font,
            font_bold,
            current_page: page,
            current_layer: layer,
            y: MARGIN_TOP,
        })
    }

    fn pdf_y(&self) -> f32 {
        PAGE_H - self.y
    }

    fn new_page(&mut self) {
        let (page, layer) = self.doc.add_page(Mm(PAGE_W), Mm(PAGE_H), "Layer");
        self.current_page = page;
        self.current_layer = layer;
        self.y = MARGIN_TOP;
    }

    fn ensure_space(&mut self, needed: f32) {
        if self.y + needed > PAGE_H - MARGIN_BOTTOM {
            self.new_page();
        }
    }

    fn text(&self, s: &str, x: f32, size: f32, bold: bool) {
        let font = if bold {
            self.font_bold.clone()
        } else {
            self.font.clone()
        };
        let layer = self
            .doc
            .get_page(self.current_page)
            .get_layer(self.current_layer);
        layer.use_text(s, size, Mm(x), Mm(self.pdf_y()), &font);
    }

    fn hline(&self, x1: f32, x2: f32) {
        let layer = self
            .doc
            .get_page(self.current_page)
            .get_layer(self.current_layer);
        layer.set_outline_thickness(0.5);
        let line = Line {
            points: vec![
                (Point::new(Mm(x1), Mm(self.pdf_y())), false),
                (Point::new(Mm(x2), Mm(self.pdf_y())), false),
            ],
            is_closed: false,
        };
        layer.add_line(line);
    }

    fn header(&mut self, title: &str, username: &str) {
        self.text(title, MARGIN_LEFT, TITLE_SIZE, true);
        self.y += 8.0;
        self.text(
            &format!("Generated for: {}", username),
            MARGIN_LEFT,
            SUBTITLE_SIZE,
            false,
        );
        self.y += 5.0;
        let ts = chrono::Local::now()
            .format("Generated on: %Y-%m-%d %H:%M")
            .to_string();
        self.text(&ts, MARGIN_LEFT, SUBTITLE_SIZE, false);
        self.y += 5.0;
        self.hline(MARGIN_LEFT, PAGE_W - MARGIN_RIGHT);
        self.y += 6.0;
    }

    fn section_label(&mut self, label: &str) {
        self.ensure_space(ROW_H * 2.0);
        self.text(label, MARGIN_LEFT, 13.0, true);
        self.y += ROW_H + 1.0;
    }

    fn table_header(&mut self, cols: &[Col], headers: &[&str]) {
        self.ensure_space(ROW_H * 2.0);
        let mut x = MARGIN_LEFT;
        for (i, col) in cols.iter().enumerate() {
            if i < headers.len() {
                match col.align {
                    Align::Left => self.text(headers[i], x, FONT_SIZE, true),
                    Align::Right => {
                        let tw = approx_text_width(headers[i], FONT_SIZE);
                        self.text(headers[i], x + col.width - tw, FONT_SIZE, true);
                    }
                }
            }
            x += col.width;
        }
        self.y += ROW_H;
        self.hline(MARGIN_LEFT, PAGE_W - MARGIN_RIGHT);
        self.y += 2.0;
    }

    fn table_row(&mut self, cols: &[Col], values: &[&str], bold: bool) {
        self.ensure_space(ROW_H);
        let mut x = MARGIN_LEFT;
        for (i, col) in cols.iter().enumerate() {
            if i < values.len() {
                match col.align {
                    Align::Left => self.text(values[i], x, FONT_SIZE, bold),
                    Align::Right => {
                        let tw = approx_text_width(values[i], FONT_SIZE);
                        self.text(values[i], x + col.width - tw, FONT_SIZE, bold);
                    }
                }
            }
            x += col.width;
        }
        self.y += ROW_H;
    }

    fn blank_row(&mut self) {
        self.y += ROW_H;
    }

    fn to_bytes(self) -> AppResult<Vec<u8>> {
        let mut buf = BufWriter::new(Vec::new());
        self.doc
            .save(&mut buf)
            .map_err(|e| AppError::Pdf(format!("{e:?}")))?;
        buf.into_inner().map_err(|e| AppError::Pdf(e.to_string()))
    }
}

pub fn render_report(
    username: &str,
    totals: &Totals,
    transactions: &[Transaction],
) -> AppResult<Vec<u8>> {
    let mut pdf = PdfWriter::new("SpendWise Report")?;
    pdf.header("SpendWise Report", username);

    let summary_cols = &[
        Col {
            width: 120.0,
            align: Align::Left,
        },
        Col {
            width: 62.0,
            align: Align::Right,
        },
    ];

    pdf.section_label("Summary");
    pdf.table_header(summary_cols, &["", "Amount"]);
    let credit = format_amount(totals.credit);
    let debit = format_amount(totals.debit);
    let cash = format_amount(totals.cash);
    let balance = format_amount(totals.balance);
    pdf.table_row(summary_cols, &["Total Credit", &credit], false);
    pdf.table_row(summary_cols, &["Total Debit", &debit], false);
    pdf.table_row(summary_cols, &["Total Cash", &cash], false);
    pdf.table_row(summary_cols, &["Balance", &balance], true);
    pdf.blank_row();

    let breakdown = aggregation::category_series(transactions, CHART_CATEGORY_LIMIT);
    if !breakdown.is_empty() {
        pdf.section_label("Top Spending Categories");
        pdf.table_header(summary_cols, &["Category", "Amount"]);
        for item in &breakdown {
            let amount = format_amount(item.amount);
            pdf.table_row(summary_cols, &[&item.category, &amount], false);
        }
        pdf.blank_row();
    }

    let daily = aggregation::daily_series(transactions, CHART_DAY_WINDOW);
    if !daily.is_empty() {
        pdf.section_label("Daily Spending");
        pdf.table_header(summary_cols, &["Date", "Debit"]);
        for item in &daily {
            let amount = format_amount(item.amount);
            pdf.table_row(summary_cols, &[&item.date, &amount], false);
        }
        pdf.blank_row();
    }

    pdf.section_label("Transactions");
    let txn_cols = &[
        Col {
            width: 26.0,
            align: Align::Left,
        },
        Col {
            width: 18.0,
            align: Align::Left,
        },
        Col {
            width: 44.0,
            align: Align::Left,
        },
        Col {
            width: 66.0,
            align: Align::Left,
        },
        Col {
            width: 28.0,
            align: Align::Right,
        },
    ];
    pdf.table_header(txn_cols, &["Date", "Type", "Category", "Description", "Amount"]);
    for t in transactions {
        let txn_type = t.txn_type.to_uppercase();
        let category = clip(&t.category, 24);
        let description = clip(&t.description, 36);
        let amount = t.amount_display();
        pdf.table_row(
            txn_cols,
            &[&t.date, &txn_type, &category, &description, &amount],
            false,
        );
    }

    pdf.to_bytes()
}
