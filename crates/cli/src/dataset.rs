//! CSV loaders for interactions and item features.
//!
//! Column names follow the short-video dataset export: `user_id`,
//! `video_id`, `watch_ratio` for interactions and `video_id`, `feat` for
//! categories. Generic aliases (`item_id`, `engagement_ratio`, `features`,
//! `tags`) are accepted too. Extra columns are ignored.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use vidrec_core::dataset::{parse_tags, CleaningStats, FeatureCatalog, Interaction, ItemId};
use vidrec_core::InteractionTable;

#[derive(Debug, Deserialize)]
struct InteractionRow {
    user_id: u32,
    #[serde(alias = "item_id")]
    video_id: u32,
    /// Empty cells load as `None` and are dropped with the invalid rows.
    #[serde(alias = "engagement_ratio")]
    watch_ratio: Option<f32>,
}

#[derive(Debug, Deserialize)]
struct FeatureRow {
    #[serde(alias = "item_id")]
    video_id: u32,
    #[serde(alias = "features", alias = "tags")]
    feat: String,
}

/// Reads an interaction CSV with a header row and cleans it.
pub fn read_interactions<R: Read>(reader: R) -> Result<(InteractionTable, CleaningStats)> {
    let mut csv = csv::Reader::from_reader(reader);
    let mut rows = Vec::new();
    for (line, record) in csv.deserialize::<InteractionRow>().enumerate() {
        // header is line 1
        let row = record.with_context(|| format!("malformed interaction row {}", line + 2))?;
        rows.push(Interaction::new(
            row.user_id,
            row.video_id,
            row.watch_ratio.unwrap_or(f32::NAN),
        ));
    }
    Ok(InteractionTable::from_records(rows))
}

/// Reads an item feature CSV with a header row.
pub fn read_features<R: Read>(reader: R) -> Result<FeatureCatalog> {
    let mut csv = csv::Reader::from_reader(reader);
    let mut catalog = FeatureCatalog::new();
    for (line, record) in csv.deserialize::<FeatureRow>().enumerate() {
        let row = record.with_context(|| format!("malformed feature row {}", line + 2))?;
        catalog.insert(ItemId(row.video_id), parse_tags(&row.feat));
    }
    Ok(catalog)
}

pub fn load_interactions(path: &Path) -> Result<(InteractionTable, CleaningStats)> {
    let file = File::open(path)
        .with_context(|| format!("failed to open interactions file {}", path.display()))?;
    let (table, stats) = read_interactions(file)
        .with_context(|| format!("failed to read {}", path.display()))?;
    tracing::info!(
        "Loaded {} interactions from {} ({} invalid, {} duplicate rows dropped)",
        stats.accepted,
        path.display(),
        stats.invalid,
        stats.duplicates
    );
    Ok((table, stats))
}

pub fn load_features(path: &Path) -> Result<FeatureCatalog> {
    let file = File::open(path)
        .with_context(|| format!("failed to open features file {}", path.display()))?;
    let catalog =
        read_features(file).with_context(|| format!("failed to read {}", path.display()))?;
    tracing::info!(
        "Loaded features for {} items ({} distinct tags) from {}",
        catalog.len(),
        catalog.universe_size(),
        path.display()
    );
    Ok(catalog)
}
