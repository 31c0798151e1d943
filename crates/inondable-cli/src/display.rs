//! Terminal rendering of an eligibility result.
//!
//! The popup message is an HTML fragment meant for the map; here it is
//! flattened to plain lines with link targets shown in parentheses.

use inondable_core::{Coordinate, EligibilityResult};
use serde::Serialize;

#[derive(Serialize)]
struct JsonOutput<'a> {
    coordinate: &'a Coordinate,
    #[serde(flatten)]
    result: &'a EligibilityResult,
}

/// Print a result as a short card.
pub fn print_result(coordinate: &Coordinate, result: &EligibilityResult) -> anyhow::Result<()> {
    println!("=== {coordinate} ===");
    println!(
        "  {:<12} {}",
        "eligible",
        if result.eligible { "yes" } else { "no" }
    );
    println!("  {:<12} {}", "parcel", result.parcel.display_identifier());
    println!();
    for line in html_to_text(&result.message).lines() {
        println!("  {line}");
    }
    println!();
    println!("  {:<12} {}", "overlay", serde_json::to_string(&result.overlay)?);
    Ok(())
}

/// Print a result as one JSON document.
pub fn print_json(coordinate: &Coordinate, result: &EligibilityResult) -> anyhow::Result<()> {
    let out = JsonOutput { coordinate, result };
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

/// Warn on stderr when some lookups fell back to their default.
pub fn warn_degraded(result: &EligibilityResult) {
    if !result.is_degraded() {
        return;
    }
    let sources: Vec<&str> = result.degraded.iter().map(|s| s.as_str()).collect();
    eprintln!(
        "warning: {} lookup(s) failed and were treated as empty: {}",
        sources.len(),
        sources.join(", ")
    );
    if !result.eligible {
        eprintln!("warning: the \"not in a flood zone\" verdict may be understated");
    }
}

/// Flatten the popup HTML: `<br>` becomes a newline, links become
/// `label (href)`, other tags are dropped.
pub fn html_to_text(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut rest = html;

    while let Some(open) = rest.find('<') {
        out.push_str(&rest[..open]);
        let Some(len) = rest[open..].find('>') else {
            out.push_str(&rest[open..]);
            return out;
        };
        let tag = &rest[open + 1..open + len];
        rest = &rest[open + len + 1..];

        if tag == "br" {
            out.push('\n');
        } else if let Some(href) = tag.strip_prefix("a ").and_then(href_of) {
            let end = rest.find("</a>").unwrap_or(rest.len());
            out.push_str(&rest[..end]);
            out.push_str(&format!(" ({href})"));
            rest = rest.get(end + "</a>".len()..).unwrap_or("");
        }
    }
    out.push_str(rest);
    out
}

fn href_of(attrs: &str) -> Option<&str> {
    let start = attrs.find("href=\"")? + "href=\"".len();
    let len = attrs[start..].find('"')?;
    Some(&attrs[start..start + len])
}
