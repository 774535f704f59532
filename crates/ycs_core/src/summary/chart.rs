use std::fmt::Write as _;

use crate::domain::Sentiment;

use super::SentimentSummary;

const WIDTH: f64 = 480.0;
const HEIGHT: f64 = 360.0;
const MARGIN_LEFT: f64 = 64.0;
const MARGIN_RIGHT: f64 = 24.0;
const MARGIN_TOP: f64 = 48.0;
const MARGIN_BOTTOM: f64 = 48.0;

pub const CHART_TITLE: &str = "Sentiment Distribution: Good vs Bad";
pub const Y_AXIS_LABEL: &str = "Percentage";

fn bar_color(sentiment: Sentiment) -> &'static str {
    match sentiment {
        Sentiment::Good => "green",
        Sentiment::Bad => "red",
        Sentiment::Unknown => "gray",
    }
}

fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render the distribution as a standalone SVG bar chart.
///
/// The y axis always spans 0-100% so charts from different runs are comparable.
pub fn render_bar_chart_svg(summary: &SentimentSummary) -> String {
    let plot_w = WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_h = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
    let base_y = MARGIN_TOP + plot_h;

    let mut svg = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{WIDTH}" height="{HEIGHT}" viewBox="0 0 {WIDTH} {HEIGHT}" font-family="sans-serif" font-size="12">"#
    );
    let _ = writeln!(svg, r#"<rect width="100%" height="100%" fill="white"/>"#);
    let _ = writeln!(
        svg,
        r#"<text x="{}" y="24" text-anchor="middle" font-size="14">{}</text>"#,
        WIDTH / 2.0,
        xml_escape(CHART_TITLE)
    );

    for tick in [0u32, 25, 50, 75, 100] {
        let y = base_y - plot_h * f64::from(tick) / 100.0;
        let _ = writeln!(
            svg,
            r##"<line x1="{MARGIN_LEFT}" y1="{y:.1}" x2="{:.1}" y2="{y:.1}" stroke="#dddddd"/>"##,
            MARGIN_LEFT + plot_w
        );
        let _ = writeln!(
            svg,
            r#"<text x="{:.1}" y="{:.1}" text-anchor="end">{tick}</text>"#,
            MARGIN_LEFT - 6.0,
            y + 4.0
        );
    }
    let _ = writeln!(
        svg,
        r#"<text x="16" y="{:.1}" text-anchor="middle" transform="rotate(-90 16 {:.1})">{}</text>"#,
        MARGIN_TOP + plot_h / 2.0,
        MARGIN_TOP + plot_h / 2.0,
        xml_escape(Y_AXIS_LABEL)
    );

    let n = summary.entries.len().max(1) as f64;
    let slot = plot_w / n;
    let bar_w = slot * 0.6;
    for (idx, e) in summary.entries.iter().enumerate() {
        let x = MARGIN_LEFT + slot * idx as f64 + (slot - bar_w) / 2.0;
        let h = plot_h * e.percentage.clamp(0.0, 100.0) / 100.0;
        let y = base_y - h;
        let _ = writeln!(
            svg,
            r#"<rect class="bar" data-sentiment="{}" x="{x:.1}" y="{y:.1}" width="{bar_w:.1}" height="{h:.1}" fill="{}"/>"#,
            e.sentiment,
            bar_color(e.sentiment)
        );
        let _ = writeln!(
            svg,
            r#"<text x="{:.1}" y="{:.1}" text-anchor="middle">{:.1}%</text>"#,
            x + bar_w / 2.0,
            y - 3.0,
            e.percentage
        );
        let _ = writeln!(
            svg,
            r#"<text x="{:.1}" y="{:.1}" text-anchor="middle">{}</text>"#,
            x + bar_w / 2.0,
            base_y + 18.0,
            e.sentiment
        );
    }

    let _ = writeln!(
        svg,
        r#"<line x1="{MARGIN_LEFT}" y1="{base_y:.1}" x2="{:.1}" y2="{base_y:.1}" stroke="black"/>"#,
        MARGIN_LEFT + plot_w
    );
    svg.push_str("</svg>\n");
    svg
}
