use crate::db::pool::DbPool;
use crate::db::queries::{FilterColumn, distinct_values};
use crate::errors::AppResult;
use crate::export::CheckMark;
use crate::models::record::ChecklistRecord;
use crate::ui::messages::{header, warning};
use crate::utils::colors::{CYAN, RESET, color_for_check, color_for_optional_field};
use crate::utils::table::{Column, Table, fit};

/// Console rendering for `list` and `search`.
pub struct ListLogic;

impl ListLogic {
    /// Print `records` either as a compact table or, with `details`, one
    /// block per record with multi-line fields in full.
    pub fn print(records: &[ChecklistRecord], details: bool) {
        if records.is_empty() {
            warning("No items found.");
            return;
        }

        if details {
            for rec in records {
                print_details(rec);
            }
        } else {
            print!("{}", render_table(records));
        }

        println!("\n{} item(s)", records.len());
    }

    /// Print the distinct values available for each exact-match filter.
    pub fn print_filter_values(pool: &DbPool) -> AppResult<()> {
        for column in [
            FilterColumn::Title,
            FilterColumn::Area,
            FilterColumn::AssignedTo,
        ] {
            let values = distinct_values(&pool.conn, column)?;
            println!("{CYAN}{}{RESET} ({})", column.label(), values.len());
            for v in values {
                println!("  - {v}");
            }
        }
        Ok(())
    }
}

const CHECK_W: usize = 5;

fn render_table(records: &[ChecklistRecord]) -> String {
    let mut table = Table::new(vec![
        Column::new("ID", 5),
        Column::new("Date", 10),
        Column::new("Title", 24),
        Column::new("Area", 16),
        Column::new("Assigned To", 14),
        Column::new("Check", CHECK_W),
        Column::new("Finding", 30),
    ]);

    for rec in records {
        let glyph = CheckMark::from_passed(rec.passed).glyph();
        table.add_row(vec![
            rec.id.to_string(),
            rec.date.clone(),
            rec.title.clone(),
            rec.area.clone(),
            rec.assigned_to.clone(),
            glyph.to_string(),
            rec.finding.clone().unwrap_or_default(),
        ]);
    }

    let plain = table.render();

    // color the check cells after layout so widths stay exact
    let mut out = String::with_capacity(plain.len());
    for (i, line) in plain.lines().enumerate() {
        if i < 2 {
            out.push_str(line);
        } else {
            let rec = &records[i - 2];
            let glyph = fit(CheckMark::from_passed(rec.passed).glyph(), CHECK_W);
            let colored = format!("{}{glyph}{RESET}", color_for_check(rec.passed));
            out.push_str(&line.replacen(&glyph, &colored, 1));
        }
        out.push('\n');
    }
    out
}

fn print_details(rec: &ChecklistRecord) {
    header(format!("#{} {}", rec.id, rec.title));

    let mark = CheckMark::from_passed(rec.passed);
    println!("  Area:           {}", rec.area);
    println!("  Assigned To:    {}", rec.assigned_to);
    println!("  Date:           {}", rec.date);
    println!(
        "  Check:          {}{}{RESET}",
        color_for_check(rec.passed),
        mark.glyph()
    );
    print_multiline("Finding", rec.finding.as_deref());
    print_multiline("Recommendation", rec.recommendation.as_deref());
    println!();
}

fn print_multiline(label: &str, value: Option<&str>) {
    let color = color_for_optional_field(value);
    let text = value.filter(|v| !v.trim().is_empty()).unwrap_or("--");

    let mut lines = text.lines();
    let first = lines.next().unwrap_or("");
    println!("  {:<15} {color}{first}{RESET}", format!("{label}:"));
    for l in lines {
        println!("  {:<15} {color}{l}{RESET}", "");
    }
}
