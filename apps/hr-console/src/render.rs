//! Plain-text output for the console: directory pages and notifications.

use std::io::Write;

use employees_info::contract::model::{Employee, PageView};
use employees_info::domain::ports::{Notification, NotificationSink};

/// Prints notifications as they arrive. Failures go to stderr.
pub struct ConsoleNotificationSink;

impl NotificationSink for ConsoleNotificationSink {
    fn notify(&self, n: Notification) {
        let line = match &n.description {
            Some(d) => format!("{}: {}", n.title, d),
            None => n.title.clone(),
        };
        if n.is_destructive() {
            eprintln!("error: {line}");
        } else {
            println!("{line}");
        }
    }
}

const HEADERS: [&str; 6] = ["ID", "NAME", "POSITION", "DEPARTMENT", "STATUS", "JOINED"];

fn cells(e: &Employee) -> [String; 6] {
    [
        e.id.clone(),
        e.name.clone(),
        e.position.clone(),
        e.department.clone(),
        e.status.to_string(),
        e.join_date
            .map(|d| d.format("%b %-d, %Y").to_string())
            .unwrap_or_else(|| "-".to_string()),
    ]
}

/// Write `view` as an aligned table followed by the pager line.
pub fn write_page(out: &mut impl Write, view: &PageView) -> std::io::Result<()> {
    if let Some(reason) = view.empty_reason() {
        writeln!(out, "No employees found")?;
        writeln!(out, "{}", reason.hint())?;
        return Ok(());
    }

    let rows: Vec<[String; 6]> = view.rows.iter().map(cells).collect();
    let mut widths = HEADERS.map(str::len);
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let line = |cols: &[&str]| {
        cols.iter()
            .zip(widths)
            .map(|(c, w)| format!("{c:<w$}"))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };
    writeln!(out, "{}", line(&HEADERS))?;
    for row in &rows {
        let cols: Vec<&str> = row.iter().map(String::as_str).collect();
        writeln!(out, "{}", line(&cols))?;
    }

    if view.shows_pagination() {
        writeln!(
            out,
            "Page {} of {} ({} matching)",
            view.current_page,
            view.display_total_pages(),
            view.filtered_count
        )?;
    }
    Ok(())
}
