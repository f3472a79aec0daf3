//! Plain-text rendering of the screen state

use crate::notification::Notification;
use adminpanel_core::SubAdmin;

const HEADERS: [&str; 5] = ["Username", "Email", "Full Name", "Phone", "ID"];

fn row(admin: &SubAdmin) -> [String; 5] {
    [
        admin.username.clone(),
        admin.email.clone(),
        admin.full_name.clone(),
        admin.phone_no.clone(),
        admin.id.to_string(),
    ]
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join(" | ");
    out.push_str(line.trim_end());
    out.push('\n');
}

/// Render sub-admins as a column-aligned table
///
/// An empty list renders the header followed by `(no sub-admins)`.
#[must_use]
pub fn render_table(admins: &[SubAdmin]) -> String {
    let rows: Vec<[String; 5]> = admins.iter().map(row).collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for cells in &rows {
        for (width, cell) in widths.iter_mut().zip(cells) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, &HEADERS.map(str::to_string), &widths);
    let rule = widths
        .iter()
        .map(|w| "-".repeat(*w))
        .collect::<Vec<_>>()
        .join("-+-");
    out.push_str(&rule);
    out.push('\n');

    if rows.is_empty() {
        out.push_str("(no sub-admins)\n");
    }
    for cells in &rows {
        push_line(&mut out, cells, &widths);
    }
    out
}

/// Format the notification as `[severity] message`, or `None` when hidden
#[must_use]
pub fn render_notification(notification: &Notification) -> Option<String> {
    if !notification.is_open() {
        return None;
    }
    Some(format!(
        "[{}] {}",
        notification.severity(),
        notification.message()
    ))
}
