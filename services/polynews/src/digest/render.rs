//! Newsletter HTML for a composed rendering plan.

use crate::digest::grouper::RenderBlock;
use crate::digest::highlight::{escape_html, highlight_html};
use crate::digest::item::ScoredItem;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

/// Fallback page used when no template file is configured.
pub const DEFAULT_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>PolyNewsDaily Update - $date</title>
<style>.pct { color: #0a7d38; font-weight: bold; }</style>
</head>
<body style="margin: 0; padding: 0; background-color: #f4f4f4; font-family: Arial, sans-serif;">
<table role="presentation" style="width: 100%; max-width: 640px; margin: 0 auto; border-collapse: collapse;">
    <tr>
        <td style="padding: 30px; text-align: center;">
            <h1 style="margin: 0; color: #1a1a1a;">PolyNewsDaily</h1>
            <p style="margin: 8px 0 0; color: #666666;">$date</p>
        </td>
    </tr>
$articles
</table>
</body>
</html>
"#;

/// `October 19, 2026`
pub fn format_digest_date(date: NaiveDate) -> String {
    date.format("%B %d, %Y").to_string()
}

pub fn render_articles(blocks: &[RenderBlock]) -> String {
    let mut html = String::new();
    for block in blocks {
        match block {
            RenderBlock::SectionHeader { title } => render_section_header(&mut html, title),
            RenderBlock::ItemCard { item } => render_card(&mut html, item),
        }
    }
    html
}

fn render_section_header(html: &mut String, title: &str) {
    html.push_str(&format!(
        r#"
        <tr>
            <td style="padding: 30px 30px 0;">
                <h2 style="margin: 0; color: #1a1a1a; font-size: 22px; border-bottom: 2px solid #1a1a1a;">{}</h2>
            </td>
        </tr>
"#,
        escape_html(title)
    ));
}

fn render_card(html: &mut String, item: &ScoredItem) {
    let image = item
        .image_url
        .as_deref()
        .map(|url| {
            format!(
                r#"<img src="{}" alt="" style="width: 100%; border-radius: 4px; margin-bottom: 12px;">"#,
                escape_html(url)
            )
        })
        .unwrap_or_default();

    let links: String = item
        .links
        .iter()
        .map(|link| {
            format!(
                r#"<a href="{0}" style="color: #1a73e8; font-size: 13px;">{0}</a><br>"#,
                escape_html(link)
            )
        })
        .collect();

    html.push_str(&format!(
        r#"
        <tr>
            <td style="padding: 20px 30px;">
                <table role="presentation" style="width: 100%; border-collapse: collapse; background-color: #ffffff; border: 1px solid #e0e0e0; border-radius: 4px;">
                    <tr>
                        <td style="padding: 20px;">
                            {image}
                            <h2 style="margin: 0; color: #1a1a1a; font-size: 20px; font-weight: bold;">
                                {headline}
                            </h2>
                            <h3 style="margin: 10px 0; color: #666666; font-size: 16px; font-weight: bold;">
                                {subheader}
                            </h3>
                            <p style="margin: 0; color: #333333; font-size: 14px; line-height: 1.6;">
                                {blurb}
                            </p>
                            {links}
                        </td>
                    </tr>
                </table>
            </td>
        </tr>
"#,
        image = image,
        headline = highlight_html(&item.headline),
        subheader = highlight_html(&item.subheader),
        blurb = highlight_html(&item.blurb),
        links = links,
    ));
}

/// Substitute `$date`/`${date}` then `$articles`/`${articles}` in `template`.
pub fn render_newsletter(template: &str, date: &str, blocks: &[RenderBlock]) -> String {
    let articles = render_articles(blocks);
    let with_date = template.replace("${date}", date).replace("$date", date);

    // Split on the articles placeholder so text inside rendered cards is never re-substituted.
    let mut out = String::with_capacity(with_date.len() + articles.len());
    for (i, part) in with_date
        .replace("${articles}", "$articles")
        .split("$articles")
        .enumerate()
    {
        if i > 0 {
            out.push_str(&articles);
        }
        out.push_str(part);
    }
    out
}

pub fn load_template(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Newsletter template not found: {}", path)),
        None => Ok(DEFAULT_TEMPLATE.to_string()),
    }
}

pub fn digest_path(data_dir: &str, date: &str) -> PathBuf {
    Path::new(data_dir)
        .join("digest")
        .join(format!("date={}", date))
        .join("digest.html")
}

pub fn write_digest_html(data_dir: &str, date: &str, html: &str) -> Result<PathBuf> {
    let path = digest_path(data_dir, date);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {:?}", parent))?;
    }
    std::fs::write(&path, html).with_context(|| format!("Failed to write {:?}", path))?;
    tracing::info!("Wrote digest to {:?}", path);
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn item(id: i64, headline: &str) -> ScoredItem {
        ScoredItem {
            id,
            headline: headline.to_string(),
            subheader: "Markets react".to_string(),
            blurb: "Traders moved fast.".to_string(),
            score: 8.0,
            ticker: Some("t".to_string()),
            links: vec!["https://polymarket.com/event/t".to_string()],
            image_url: None,
        }
    }

    #[test]
    fn test_format_digest_date() {
        let date = NaiveDate::from_ymd_opt(2024, 9, 5).unwrap();
        assert_eq!(format_digest_date(date), "September 05, 2024");
    }

    #[test]
    fn test_render_articles_orders_blocks() {
        let blocks = vec![
            RenderBlock::SectionHeader { title: "Elections".to_string() },
            RenderBlock::ItemCard { item: item(1, "Harris up 3% overnight") },
        ];
        let html = render_articles(&blocks);
        let header_at = html.find("Elections").unwrap();
        let card_at = html.find("<span class=\"pct\">3%</span>").unwrap();
        assert!(header_at < card_at);
        assert!(html.contains("https://polymarket.com/event/t"));
    }

    #[test]
    fn test_render_newsletter_substitutes_placeholders() {
        let blocks = vec![RenderBlock::ItemCard { item: item(1, "Costs $date nothing") }];
        let html = render_newsletter("<p>${date}</p><div>$articles</div><i>$date</i>", "May 01, 2024", &blocks);
        assert!(html.starts_with("<p>May 01, 2024</p><div>"));
        assert!(html.ends_with("</div><i>May 01, 2024</i>"));
        // Card text is not treated as a placeholder.
        assert!(html.contains("Costs $date nothing"));
    }

    #[test]
    fn test_default_template_has_placeholders() {
        let html = render_newsletter(DEFAULT_TEMPLATE, "May 01, 2024", &[]);
        assert!(!html.contains("$articles"));
        assert!(html.contains("PolyNewsDaily Update - May 01, 2024"));
    }

    #[test]
    fn test_write_digest_html() {
        let dir = TempDir::new().unwrap();
        let path = write_digest_html(dir.path().to_str().unwrap(), "2024-05-01", "<html></html>").unwrap();
        assert!(path.ends_with("digest/date=2024-05-01/digest.html"));
        assert_eq!(std::fs::read_to_string(path).unwrap(), "<html></html>");
    }

    #[test]
    fn test_load_template_default() {
        assert_eq!(load_template(None).unwrap(), DEFAULT_TEMPLATE);
        assert!(load_template(Some("/nonexistent/template.html")).is_err());
    }

    #[test]
    fn test_bundled_template() {
        let template = load_template(Some("../../config/newsletter_template.html")).unwrap();
        let html = render_newsletter(&template, "May 01, 2024", &[]);
        assert!(!html.contains("$articles"));
        assert!(!html.contains("$date"));
    }
}
