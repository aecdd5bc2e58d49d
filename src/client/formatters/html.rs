use crate::client::models::report::{escape_html, ScanReport, NO_WARNINGS_MESSAGE};
use crate::common::models::{RiskLevel, ScanResult};

/// Render a self-contained HTML page for one scan.
///
/// `subject` is the scanned file name (or `stdin`) and ends up in the title.
pub fn render_html_report(result: &ScanResult, source: Option<&str>, subject: &str) -> String {
    let report = ScanReport::build(result, source);
    let generated_at = chrono::Utc::now().to_rfc3339();

    let language = report
        .language
        .as_deref()
        .map(|l| format!(r#"<span class="meta">Language: {}</span>"#, escape_html(l)))
        .unwrap_or_default();

    let warnings_html = if report.warnings.is_empty() {
        format!(r#"<p class="safe">{}</p>"#, NO_WARNINGS_MESSAGE)
    } else {
        report
            .warnings
            .iter()
            .map(|w| {
                format!(
                    r#"<div class="warning {}">
            <div><strong>Line {}</strong> <code>{}</code></div>
            <div class="category">{}</div>
            <div>⚠️ {}</div>
        </div>"#,
                    w.risk.css_class(),
                    w.line,
                    escape_html(&w.code),
                    escape_html(&w.category),
                    escape_html(&w.explanation),
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    let preview_html = match &report.preview {
        Some(preview) => {
            let rows = preview
                .lines
                .iter()
                .map(|line| {
                    let class = line
                        .risk
                        .as_ref()
                        .map(|r| format!(" {}", r.css_class()))
                        .unwrap_or_default();
                    format!(
                        r#"<div class="code-line{}"><span class="line-number">{}</span>{}</div>"#,
                        class,
                        line.gutter(),
                        escape_html(&line.text)
                    )
                })
                .collect::<Vec<_>>()
                .join("\n");
            format!("<h2>Code preview</h2>\n<pre class=\"preview\">{}</pre>", rows)
        }
        None => String::new(),
    };

    let summary_html = if report.summary.is_empty() {
        String::new()
    } else {
        let groups = report
            .summary
            .groups
            .iter()
            .map(|g| {
                let items = g
                    .categories
                    .iter()
                    .map(|(category, count)| format!("<li>{} ({})</li>", escape_html(category), count))
                    .collect::<Vec<_>>()
                    .join("");
                format!(
                    r#"<div class="group"><h3 class="{}">{} ({})</h3><ul>{}</ul></div>"#,
                    RiskLevel::parse(&g.risk).css_class(),
                    escape_html(&g.risk),
                    g.total,
                    items
                )
            })
            .collect::<Vec<_>>()
            .join("\n");
        format!("<h2>Risk summary</h2>\n{}", groups)
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Phoenix AI Scan: {subject}</title>
    <style>
        body {{
            font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, Arial, sans-serif;
            background: #0f1230;
            color: #ffffff;
            margin: 0;
            padding: 2rem;
        }}
        .container {{ max-width: 960px; margin: 0 auto; }}
        .meta {{ color: #b3b3b3; margin-left: 1rem; }}
        .score {{ font-size: 2.5rem; font-weight: bold; margin-right: 1rem; }}
        .badge {{ padding: 0.2rem 0.8rem; border-radius: 999px; font-weight: bold; }}
        .badge.safe {{ background: #22c55e; }}
        .badge.low {{ background: #3b82f6; }}
        .badge.medium {{ background: #eab308; }}
        .badge.high {{ background: #f97316; }}
        .badge.critical {{ background: #ef4444; }}
        .warning {{ background: #1f2142; border-left: 4px solid #888; padding: 0.5rem 0.75rem; margin: 0.5rem 0; border-radius: 6px; }}
        .warning.critical {{ border-color: #ef4444; }}
        .warning.high {{ border-color: #f97316; }}
        .warning.medium {{ border-color: #eab308; }}
        .warning.low {{ border-color: #3b82f6; }}
        .category {{ color: #b3b3b3; }}
        .safe {{ color: #22c55e; }}
        .preview {{ background: #1f2142; padding: 0.75rem; border-radius: 8px; overflow-x: auto; }}
        .code-line {{ white-space: pre; }}
        .code-line.critical {{ background: rgba(239, 68, 68, 0.22); }}
        .code-line.high {{ background: rgba(249, 115, 22, 0.22); }}
        .code-line.medium {{ background: rgba(234, 179, 8, 0.22); }}
        .code-line.low {{ background: rgba(59, 130, 246, 0.22); }}
        .line-number {{ color: #737390; margin-right: 1rem; user-select: none; }}
        footer {{ color: #737390; margin-top: 2rem; font-size: 0.8rem; }}
    </style>
</head>
<body>
<div class="container">
    <h1>Phoenix AI Scan</h1>
    <p><code>{subject}</code></p>
    <div>
        <span class="score">{score}</span>
        <span class="badge {badge_class}">{badge}</span>
        {language}
    </div>
    <h2>Warnings</h2>
    {warnings_html}
    {preview_html}
    {summary_html}
    <footer>Generated at {generated_at}</footer>
</div>
</body>
</html>
"#,
        subject = escape_html(subject),
        score = report.score.target(),
        badge_class = report.badge.level.css_class(),
        badge = escape_html(&report.badge.text),
        language = language,
        warnings_html = warnings_html,
        preview_html = preview_html,
        summary_html = summary_html,
        generated_at = generated_at,
    )
}
