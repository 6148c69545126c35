use std::fmt;

use write_model::value_object::DateTime;

use super::summary::{Season, Upcoming};

const REFRESH_SECONDS: u32 = 300;
const TITLE: &str = "Ticket Sales";
const STYLE: &str = "body { font-family: sans-serif; margin: 2em auto; max-width: 1040px; background: #f4f4f4; color: #222; }
table { border-collapse: collapse; width: 100%; margin-bottom: 1.5em; background: #fff; }
th, td { border: 1px solid #ccc; padding: 0.4em 0.6em; text-align: left; }
td.number { text-align: right; }
tr.top td { font-weight: bold; background: #fff6d5; }
img { max-width: 100%; background: #fff; }
.velocity { color: #2f7d32; }
.notice { padding: 1em; background: #e8f4ff; border: 1px solid #9cc7f0; }
.error { padding: 1em; background: #fdecea; border: 1px solid #e0a19b; color: #8a1c12; }
footer { margin-top: 2em; color: #666; font-size: 0.9em; }";

/// Escapes text for use in element content and quoted attribute values.
pub(crate) fn escape(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn head(f: &mut fmt::Formatter<'_>, title: &str) -> fmt::Result {
    writeln!(f, "<!DOCTYPE html>")?;
    writeln!(f, r#"<html lang="en">"#)?;
    writeln!(f, "<head>")?;
    writeln!(f, r#"<meta charset="utf-8">"#)?;
    writeln!(f, r#"<meta http-equiv="refresh" content="{REFRESH_SECONDS}">"#)?;
    writeln!(
        f,
        r#"<meta name="viewport" content="width=device-width, initial-scale=1">"#
    )?;
    writeln!(f, "<title>{}</title>", escape(title))?;
    writeln!(f, "<style>\n{STYLE}\n</style>")?;
    writeln!(f, "</head>")?;
    writeln!(f, "<body>")?;
    writeln!(f, "<h1>Ticket Sales</h1>")
}

fn foot(f: &mut fmt::Formatter<'_>, generated_at: DateTime) -> fmt::Result {
    writeln!(
        f,
        "<footer>Last updated: {} UTC</footer>",
        generated_at.format("%Y-%m-%d %H:%M:%S")
    )?;
    writeln!(f, "</body>")?;
    writeln!(f, "</html>")
}

fn chart_href(id: &str) -> String {
    format!("charts/{}.svg", escape(id))
}

/// The report page.
pub(crate) struct Page<'a> {
    pub(crate) generated_at: DateTime,
    pub(crate) season: &'a Season<'a>,
    pub(crate) upcoming: &'a [Upcoming<'a>],
}

impl<'a> Page<'a> {
    fn upcoming_table(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "<h2>Upcoming matches</h2>")?;
        if self.upcoming.is_empty() {
            return writeln!(f, r#"<p class="notice">No upcoming matches.</p>"#);
        }
        writeln!(f, "<table>")?;
        writeln!(
            f,
            "<tr><th>Match</th><th>Kick-off</th><th>Sold</th><th>Available</th><th>Capacity</th><th>Sales</th></tr>"
        )?;
        for upcoming in self.upcoming {
            let event = upcoming.history.event();
            writeln!(
                f,
                r#"<tr><td><a href="{}">{}</a></td><td>{}</td><td class="number">{}</td><td class="number">{}</td><td class="number">{}%</td><td class="velocity">{}</td></tr>"#,
                chart_href(event.id().as_str()),
                escape(event.title()),
                event.starts_at().format("%Y-%m-%d %H:%M"),
                upcoming.sold,
                upcoming.available,
                upcoming.capacity_percent,
                escape(&upcoming.velocity.to_string()),
            )?;
        }
        writeln!(f, "</table>")
    }

    fn season_table(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "<h2>This season</h2>")?;
        let Some(summary) = self.season.summary() else {
            return writeln!(f, r#"<p class="notice">No matches played this season.</p>"#);
        };
        writeln!(f, r#"<p class="summary">{}</p>"#, escape(&summary))?;
        writeln!(f, "<table>")?;
        writeln!(
            f,
            "<tr><th>Date</th><th>Opponent</th><th>Sold</th><th>Rank</th><th>Chart</th></tr>"
        )?;
        for entry in &self.season.entries {
            let event = entry.history.event();
            writeln!(
                f,
                r#"<tr{}><td>{}</td><td>{}</td><td class="number">{}</td><td class="number">{}{}</td><td><a href="{}"><img src="{}" alt="{}" width="160"></a></td></tr>"#,
                if entry.is_top() { r#" class="top""# } else { "" },
                event.starts_at().format("%Y-%m-%d"),
                escape(event.opponent()),
                entry.sold,
                entry.rank,
                if entry.is_top() { " \u{2605}" } else { "" },
                chart_href(event.id().as_str()),
                chart_href(event.id().as_str()),
                escape(event.title()),
            )?;
        }
        writeln!(f, "</table>")
    }
}

impl<'a> fmt::Display for Page<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        head(f, TITLE)?;
        self.upcoming_table(f)?;
        writeln!(
            f,
            r#"<p><img src="charts/overview.svg" alt="Ticket Sales Over Time"></p>"#
        )?;
        self.season_table(f)?;
        foot(f, self.generated_at)
    }
}

/// Written instead of the report when no event has been recorded yet.
pub(crate) struct EmptyPage {
    pub(crate) generated_at: DateTime,
}

impl fmt::Display for EmptyPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        head(f, TITLE)?;
        writeln!(f, r#"<p class="notice">No events found.</p>"#)?;
        foot(f, self.generated_at)
    }
}

/// Written when a run fails before the report could be rendered.
pub(crate) struct ErrorPage<'a> {
    pub(crate) generated_at: DateTime,
    pub(crate) last_successful_run: Option<DateTime>,
    pub(crate) message: &'a str,
}

impl<'a> fmt::Display for ErrorPage<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        head(f, &format!("{TITLE} - ERROR"))?;
        writeln!(f, r#"<div class="error">"#)?;
        writeln!(f, "<h2>\u{26a0}\u{fe0f} Error</h2>")?;
        writeln!(f, "<p><strong>{}</strong></p>", escape(self.message))?;
        writeln!(
            f,
            "<p>Next automatic run in {} minutes.</p>",
            REFRESH_SECONDS / 60
        )?;
        writeln!(f, "</div>")?;
        if let Some(last_successful_run) = self.last_successful_run {
            writeln!(
                f,
                "<p><em>Last successful run: {} UTC</em></p>",
                last_successful_run.format("%Y-%m-%d %H:%M:%S")
            )?;
        }
        foot(f, self.generated_at)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr as _;

    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(escape("GAK 1902 : SK Sturm Graz"), "GAK 1902 : SK Sturm Graz");
        assert_eq!(
            escape(r#"<script>alert("a & b's")</script>"#),
            "&lt;script&gt;alert(&quot;a &amp; b&#39;s&quot;)&lt;/script&gt;"
        );
        assert_eq!(escape(""), "");
    }

    #[test]
    fn test_empty_page() -> anyhow::Result<()> {
        let html = EmptyPage {
            generated_at: DateTime::from_str("2024-08-01T10:05:00Z")?,
        }
        .to_string();
        assert!(html.starts_with("<!DOCTYPE html>\n"));
        assert!(html.contains(r#"<meta http-equiv="refresh" content="300">"#));
        assert!(html.contains("No events found."));
        assert!(html.contains("Last updated: 2024-08-01 10:05:00 UTC"));
        assert!(html.ends_with("</html>\n"));
        Ok(())
    }

    #[test]
    fn test_error_page() -> anyhow::Result<()> {
        let html = ErrorPage {
            generated_at: DateTime::from_str("2024-08-01T10:05:00Z")?,
            last_successful_run: Some(DateTime::from_str("2024-08-01T10:00:00Z")?),
            message: "fetch: status 503 <Service Unavailable>",
        }
        .to_string();
        assert!(html.contains("<title>Ticket Sales - ERROR</title>"));
        assert!(html.contains(r#"<meta http-equiv="refresh" content="300">"#));
        assert!(html.contains(r#"<div class="error">"#));
        assert!(html.contains("<strong>fetch: status 503 &lt;Service Unavailable&gt;</strong>"));
        assert!(html.contains("Next automatic run in 5 minutes."));
        assert!(html.contains("Last successful run: 2024-08-01 10:00:00 UTC"));
        assert!(html.ends_with("</html>\n"));

        let html = ErrorPage {
            generated_at: DateTime::from_str("2024-08-01T10:05:00Z")?,
            last_successful_run: None,
            message: "storage",
        }
        .to_string();
        assert!(!html.contains("Last successful run"));
        Ok(())
    }
}
