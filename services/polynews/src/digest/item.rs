use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Group title -> member item ids, in curation order.
pub type GroupMap = IndexMap<String, Vec<i64>>;

/// A curated article eligible for the digest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredItem {
    pub id: i64,
    pub headline: String,
    #[serde(default)]
    pub subheader: String,
    #[serde(default)]
    pub blurb: String,
    pub score: f64,
    #[serde(default)]
    pub ticker: Option<String>,
    #[serde(default)]
    pub links: Vec<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

pub fn load_items(path: &Path) -> Result<Vec<ScoredItem>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read items from {:?}", path))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse items in {:?}", path))
}

/// Load a group map. A missing file means no groups.
pub fn load_groups(path: &Path) -> Result<GroupMap> {
    if !path.exists() {
        tracing::info!("No groups file at {:?}, composing ungrouped digest", path);
        return Ok(GroupMap::new());
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read groups from {:?}", path))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse groups in {:?}", path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_items_with_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("items.json");
        std::fs::write(
            &path,
            r#"[{"id": 1, "headline": "Odds jump 12%", "score": 6.5},
                {"id": 2, "headline": "Quiet day", "subheader": "s", "blurb": "b", "score": 1,
                 "ticker": "abc", "links": ["https://polymarket.com/event/abc"]}]"#,
        )
        .unwrap();

        let items = load_items(&path).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].subheader, "");
        assert!(items[0].ticker.is_none());
        assert_eq!(items[1].score, 1.0);
        assert_eq!(items[1].links.len(), 1);
    }

    #[test]
    fn test_load_groups_preserves_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("groups.json");
        std::fs::write(&path, r#"{"Zeta": [3, 1], "Alpha": [2]}"#).unwrap();

        let groups = load_groups(&path).unwrap();
        let titles: Vec<&str> = groups.keys().map(|k| k.as_str()).collect();
        assert_eq!(titles, vec!["Zeta", "Alpha"]);
        assert_eq!(groups["Zeta"], vec![3, 1]);
    }

    #[test]
    fn test_load_groups_missing_file() {
        let dir = TempDir::new().unwrap();
        let groups = load_groups(&dir.path().join("absent.json")).unwrap();
        assert!(groups.is_empty());
    }
}
