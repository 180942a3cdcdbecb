use crate::domain::{network_location, Grouping};
use crate::model::DateRange;

pub const DEFAULT_FAVICON_SERVICE: &str = "https://www.google.com/s2/favicons";

const STYLESHEET: &[&str] = &[
    "body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; padding: 20px; max-width: 1200px; margin: 0 auto; background-color: #f5f5f5; }",
    "h1 { color: #2c3e50; text-align: center; margin-bottom: 15px; }",
    "h2 { color: #34495e; border-bottom: 2px solid #3498db; padding-bottom: 4px; margin-top: 15px; }",
    ".date-range { color: #666; font-size: 0.9em; text-align: center; margin-bottom: 20px; }",
    "ul { list-style-type: none; padding-left: 0; }",
    ".toc { column-count: auto; column-width: 250px; column-gap: 20px; background-color: white; padding: 15px; border-radius: 8px; box-shadow: 0 2px 4px rgba(0,0,0,0.1); }",
    ".toc li { break-inside: avoid; margin: 4px 0; }",
    ".toc a { text-decoration: none; color: #2980b9; transition: color 0.2s; }",
    ".toc a:hover { color: #3498db; }",
    "li { margin: 6px 0; padding: 4px; border-radius: 4px; transition: background-color 0.2s; }",
    "li:hover { background-color: #f0f0f0; }",
    "li img { vertical-align: middle; width: 16px; height: 16px; margin-right: 6px; }",
    "li a { text-decoration: none; color: #2c3e50; }",
    "li a:hover { color: #3498db; }",
    "hr { border: none; border-top: 2px solid #e0e0e0; margin: 15px 0; }",
];

/// Renders the grouped tabs as a standalone HTML page.
pub struct ReportRenderer<'a> {
    favicon_service: &'a str,
}

impl Default for ReportRenderer<'_> {
    fn default() -> Self {
        ReportRenderer::new(DEFAULT_FAVICON_SERVICE)
    }
}

impl<'a> ReportRenderer<'a> {
    pub fn new(favicon_service: &'a str) -> Self {
        ReportRenderer { favicon_service }
    }

    pub fn render(&self, grouping: &Grouping, date_range: Option<&DateRange>) -> String {
        let label = date_range.map(DateRange::label);
        let title_suffix = label
            .as_ref()
            .map(|label| format!(" ({label})"))
            .unwrap_or_default();

        let mut lines: Vec<String> = vec![
            "<!DOCTYPE html>".to_string(),
            "<html><head><meta charset='utf-8'>".to_string(),
            format!("<title>Tabs by Domain{title_suffix}</title>"),
            "<style>".to_string(),
        ];
        lines.extend(STYLESHEET.iter().map(|rule| rule.to_string()));
        lines.push("</style>".to_string());
        lines.push("</head><body>".to_string());
        lines.push(format!("<h1>Tabs Grouped by Domain{title_suffix}</h1>"));
        if let Some(label) = &label {
            lines.push(format!("<div class='date-range'>Date Range: {label}</div>"));
        }

        let domains = grouping.sorted_domains();

        lines.push("<h2>Table of Contents</h2>".to_string());
        lines.push("<ul class='toc'>".to_string());
        for domain in &domains {
            let icon = match grouping.icons.get(*domain) {
                Some(icon) => icon.clone(),
                None => self.favicon_url(domain),
            };
            lines.push(format!(
                "<li><a href=\"#{}\"><img src=\"{}\" alt=\"icon\">{}</a></li>",
                anchor_id(domain),
                html_escape(&icon),
                html_escape(domain)
            ));
        }
        lines.push("</ul><hr>".to_string());

        for domain in &domains {
            lines.push(format!(
                "<h2 id=\"{}\">{}</h2>",
                anchor_id(domain),
                html_escape(domain)
            ));
            lines.push("<ul>".to_string());
            for tab in &grouping.groups[*domain] {
                let icon = if tab.icon.is_empty() {
                    self.favicon_url(network_location(&tab.url))
                } else {
                    tab.icon.clone()
                };
                lines.push(format!(
                    "<li><img src=\"{}\" alt=\"icon\"><a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a></li>",
                    html_escape(&icon),
                    html_escape(&tab.url),
                    html_escape(&tab.title)
                ));
            }
            lines.push("</ul>".to_string());
        }

        lines.push("</body></html>".to_string());
        lines.join("\n")
    }

    fn favicon_url(&self, key: &str) -> String {
        format!("{}?domain={}", self.favicon_service, key)
    }
}

/// In-page anchor for a domain: every non-alphanumeric character becomes `-`.
pub fn anchor_id(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect()
}

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
