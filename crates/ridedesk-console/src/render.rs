//! Plain-text rendering for the console

use crate::view::RequestView;
use ridedesk_core::{ActionResult, RequestRecord};
use std::fmt::Write;

const COMMENT_WIDTH: usize = 28;

fn clip(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut clipped: String = text.chars().take(width.saturating_sub(1)).collect();
    clipped.push('…');
    clipped
}

/// Status tabs, e.g. `[All (12)]  Pending (5)  ...`
#[must_use]
pub fn render_tabs(view: &RequestView) -> String {
    view.status_tabs()
        .iter()
        .map(|tab| {
            if tab.active {
                format!("[{} ({})]", tab.label, tab.count)
            } else {
                format!("{} ({})", tab.label, tab.count)
            }
        })
        .collect::<Vec<_>>()
        .join("  ")
}

/// Current page as a table followed by the page indicator
#[must_use]
pub fn render_page(view: &RequestView, selected: Option<&str>) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "  {:<10} {:<16} {:<28} {:<18} {:>9} {:<10} {}",
        "ID", "USER", "ROUTE", "GOODS", "FARE", "STATUS", "COMMENTS"
    );

    if view.paged_len() == 0 {
        out.push_str("  (no requests)\n");
    }

    for record in view.paged() {
        let marker = if selected == Some(record.request_id.as_str()) {
            '>'
        } else {
            ' '
        };
        let route = format!("{} -> {}", record.from_location, record.to_location);
        let _ = writeln!(
            out,
            "{marker} {:<10} {:<16} {:<28} {:<18} {:>9.2} {:<10} {}",
            clip(&record.request_id, 10),
            clip(&record.user_name, 16),
            clip(&route, 28),
            clip(&record.goods_description, 18),
            record.fare,
            record.status,
            clip(record.comments().unwrap_or("-"), COMMENT_WIDTH),
        );
    }

    let _ = write!(
        out,
        "Page {} of {} ({} shown of {} matching)",
        view.current_page(),
        view.total_pages(),
        view.paged_len(),
        view.filtered_len()
    );
    out
}

/// Full details of one request
#[must_use]
pub fn render_details(record: &RequestRecord) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Request     {}", record.request_id);
    let _ = writeln!(out, "User        {}", record.user_name);
    let _ = writeln!(out, "From        {}", record.from_location);
    let _ = writeln!(out, "To          {}", record.to_location);
    let _ = writeln!(out, "Goods       {}", record.goods_description);
    let _ = writeln!(out, "Fare        {:.2}", record.fare);
    let _ = writeln!(out, "Status      {}", record.status);
    let _ = writeln!(out, "Comments    {}", record.comments().unwrap_or("-"));
    for (label, url) in [
        ("Photo 1", &record.goods_photo1_url),
        ("Photo 2", &record.goods_photo2_url),
    ] {
        if let Some(url) = url {
            let _ = writeln!(out, "{label:<11} {url}");
        }
    }
    if let Some(created) = record.created_at {
        let _ = writeln!(out, "Created     {}", created.format("%Y-%m-%d %H:%M:%S UTC"));
    }
    if let Some(updated) = record.updated_at {
        let _ = writeln!(out, "Updated     {}", updated.format("%Y-%m-%d %H:%M:%S UTC"));
    }
    out.trim_end().to_string()
}

/// One-line summary of an approve/reject result
#[must_use]
pub fn render_action_result(result: &ActionResult) -> String {
    let mut parts = Vec::new();
    if let Some(status) = result.status {
        parts.push(format!("status {status}"));
    }
    if let Some(message) = result.message.as_deref() {
        parts.push(message.to_string());
    }
    if let Some(comments) = result.comments.as_deref().filter(|c| !c.is_empty()) {
        parts.push(format!("comments: {comments}"));
    }
    if parts.is_empty() {
        "done".to_string()
    } else {
        parts.join("; ")
    }
}
