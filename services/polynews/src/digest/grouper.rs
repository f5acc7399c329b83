//! Compose the digest rendering plan from curated groups and scored items.
//!
//! Pass 1 folds over the groups in order, keeping each group's high-signal
//! members that no earlier group already emitted. Pass 2 collects every
//! item never emitted into the ungrouped tail. Each item id appears in the
//! plan exactly once.

use crate::digest::item::{GroupMap, ScoredItem};
use crate::markets::ranking::compare_score_desc;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// Grouped sections only show items scoring strictly above this.
pub const HIGH_SIGNAL_THRESHOLD: f64 = 5.0;
pub const OTHER_STORIES: &str = "Other Stories";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RenderBlock {
    SectionHeader { title: String },
    ItemCard { item: ScoredItem },
}

impl RenderBlock {
    pub fn item_id(&self) -> Option<i64> {
        match self {
            RenderBlock::ItemCard { item } => Some(item.id),
            RenderBlock::SectionHeader { .. } => None,
        }
    }
}

struct Section<'a> {
    title: &'a str,
    items: Vec<&'a ScoredItem>,
}

pub fn compose(items: &[ScoredItem], groups: &GroupMap) -> Vec<RenderBlock> {
    compose_with_title(items, groups, OTHER_STORIES)
}

/// [`compose`] with a custom heading for the ungrouped tail.
///
/// The tail heading is shown whenever `groups` is non-empty, even if every
/// group filtered down to nothing.
pub fn compose_with_title(items: &[ScoredItem], groups: &GroupMap, other_title: &str) -> Vec<RenderBlock> {
    let items = unique_items(items);
    let by_id: HashMap<i64, &ScoredItem> = items.iter().map(|item| (item.id, *item)).collect();

    let (sections, used) = grouped_sections(groups, &by_id);

    let remainder: Vec<&ScoredItem> = items
        .iter()
        .copied()
        .filter(|item| !used.contains(&item.id))
        .collect();

    let mut blocks = Vec::with_capacity(items.len() + sections.len() + 1);
    for section in sections {
        blocks.push(RenderBlock::SectionHeader {
            title: section.title.to_string(),
        });
        blocks.extend(cards(section.items));
    }

    if !remainder.is_empty() {
        if !groups.is_empty() {
            blocks.push(RenderBlock::SectionHeader {
                title: other_title.to_string(),
            });
        }
        blocks.extend(cards(remainder));
    }

    blocks
}

fn grouped_sections<'a>(
    groups: &'a GroupMap,
    by_id: &HashMap<i64, &'a ScoredItem>,
) -> (Vec<Section<'a>>, HashSet<i64>) {
    groups.iter().fold(
        (Vec::new(), HashSet::new()),
        |(mut sections, mut used), (title, ids)| {
            let mut members: Vec<&ScoredItem> = Vec::new();
            for id in ids {
                let Some(item) = by_id.get(id) else {
                    tracing::debug!("Group {:?} references unknown item {}", title, id);
                    continue;
                };
                if item.score > HIGH_SIGNAL_THRESHOLD && !used.contains(id) {
                    used.insert(*id);
                    members.push(*item);
                }
            }

            if !members.is_empty() {
                sections.push(Section {
                    title: title.as_str(),
                    items: members,
                });
            }
            (sections, used)
        },
    )
}

/// Drop repeated ids, keeping the first occurrence.
fn unique_items(items: &[ScoredItem]) -> Vec<&ScoredItem> {
    let mut seen = HashSet::new();
    items
        .iter()
        .filter(|item| {
            let fresh = seen.insert(item.id);
            if !fresh {
                tracing::warn!("Duplicate item id {} in digest input, keeping first", item.id);
            }
            fresh
        })
        .collect()
}

fn cards(mut items: Vec<&ScoredItem>) -> impl Iterator<Item = RenderBlock> + '_ {
    items.sort_by(|a, b| compare_score_desc(a.score, b.score));
    items.into_iter().map(|item| RenderBlock::ItemCard { item: item.clone() })
}
