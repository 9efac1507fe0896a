// HTML rendering for the hub pages

use crate::ui::escape_html;

/// Two-column table shown above the page content
#[derive(Debug, Clone, Default)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

const STYLE: &str = "\
      body { font-family: Arial, sans-serif; margin: 1rem; }
      pre { background:#f5f5f5; padding:1rem; overflow:auto; max-height:80vh }
      .meta { color: #666; margin-bottom: .5rem }
      table { border-collapse: collapse; }
      td, th { padding: .25rem .5rem; border: 1px solid #ddd }";

/// Render a full page; every interpolated value is escaped
pub fn render_page(title: &str, meta: &str, table: Option<&Table>, content: Option<&str>) -> String {
    let title = escape_html(title);
    let mut body = String::new();

    if let Some(table) = table {
        body.push_str("    <table>\n      <tr>");
        for header in &table.headers {
            body.push_str(&format!("<th>{}</th>", escape_html(header)));
        }
        body.push_str("</tr>\n");
        for row in &table.rows {
            body.push_str("      <tr>");
            for cell in row {
                body.push_str(&format!("<td>{}</td>", escape_html(cell)));
            }
            body.push_str("</tr>\n");
        }
        body.push_str("    </table>\n");
    }

    if let Some(content) = content.filter(|c| !c.is_empty()) {
        body.push_str(&format!("    <pre>{}</pre>\n", escape_html(content)));
    }

    format!(
        "<!doctype html>
<html lang=\"en\">
  <head>
    <meta charset=\"utf-8\">
    <title>Monitoring Hub - {title}</title>
    <style>
{STYLE}
    </style>
  </head>
  <body>
    <h1>Monitoring Hub - {title}</h1>
    <div class=\"meta\">{meta}</div>
{body}  </body>
</html>
",
        title = title,
        meta = escape_html(meta),
        body = body,
    )
}
