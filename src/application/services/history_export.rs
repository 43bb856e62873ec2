use crate::application::ports::PrintDocument;
use crate::domain::entities::HistoryRow;

/// Default cap on rows included in the printout, matching the on-screen
/// table. Independent of the 200-record query cap.
pub const DEFAULT_VISIBLE_ROWS: usize = 10;

/// Renders the visible history rows into a standalone printable document.
/// No network access, no state mutation. `None` when there is nothing to
/// print; callers treat that as a disabled action.
pub fn render_history_document(rows: &[HistoryRow], max_rows: usize) -> Option<PrintDocument> {
    if rows.is_empty() {
        return None;
    }
    let visible = &rows[..rows.len().min(max_rows)];

    let mut body_rows = String::new();
    for row in visible {
        let date = row.created_at.format("%Y-%m-%d").to_string();
        let time = row.created_at.format("%H:%M:%S").to_string();
        body_rows.push_str(&format!(
            "<tr>\
             <td><div class=\"center\">{}</div><div class=\"center muted\">{}</div></td>\
             <td class=\"center strong\">{}</td>\
             <td>{}</td>\
             </tr>\n",
            escape_html(&date),
            escape_html(&time),
            escape_html(&row.apartment),
            escape_html(&row.package_code),
        ));
    }
    if body_rows.is_empty() {
        // Render-level guard; unreachable given the empty check above.
        body_rows = "<tr><td colspan=\"3\" class=\"muted\">No data.</td></tr>".to_string();
    }

    let body = format!(
        "<!doctype html>\n<html>\n<head>\n<meta charset=\"utf-8\" />\n\
         <title>PackDesk - History</title>\n\
         <style>\n\
         body {{ font-family: Arial, sans-serif; margin: 16px; }}\n\
         table {{ border-collapse: collapse; width: 100%; }}\n\
         th, td {{ border: 1px solid #ddd; padding: 8px; vertical-align: top; }}\n\
         th {{ text-align: left; background: #f3f3f3; }}\n\
         .center {{ text-align: center; }}\n\
         .strong {{ font-weight: 700; }}\n\
         .muted {{ font-size: 11px; opacity: .75; }}\n\
         @media print {{ body {{ margin: 0; }} th, td {{ border: 1px solid #999; }} }}\n\
         </style>\n</head>\n<body>\n\
         <table>\n<thead>\n<tr>\
         <th class=\"center\">date</th>\
         <th class=\"center\">apartment</th>\
         <th>packageCode</th>\
         </tr>\n</thead>\n<tbody>\n{body_rows}</tbody>\n</table>\n\
         </body>\n</html>\n"
    );

    Some(PrintDocument {
        title: "PackDesk - History".to_string(),
        body,
    })
}

pub fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#039;")
}
