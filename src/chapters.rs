//! Rebuilds the volume/chapter hierarchy from a flat chapter listing and
//! detects numbering gaps.

use crate::helpers::{normalize_volume_label, parse_number};
use crate::models::{SourceSerieVolume, SourceSerieVolumeChapter, VolumeId};
use std::collections::{BTreeSet, HashMap};

const SUPPLEMENT_EPSILON: f64 = 1e-9;

/// Widest chapter range scanned for gaps. Numbers come from remote data.
const MAX_GAP_SPAN: u64 = 100_000;

/// Whole chapter numbers absent between the lowest and highest covered ones.
///
/// `x.5` chapters are supplements and never cover chapter `x`; any other
/// fractional chapter covers its integer part.
pub fn missing_chapters(numbers: &[f64]) -> Vec<f64> {
    let covered: BTreeSet<i64> = numbers
        .iter()
        .filter(|n| n.is_finite())
        .filter(|n| (n.fract().abs() - 0.5).abs() >= SUPPLEMENT_EPSILON)
        .map(|n| n.trunc() as i64)
        .collect();

    let (Some(&min), Some(&max)) = (covered.first(), covered.last()) else {
        return Vec::new();
    };

    if max.abs_diff(min) > MAX_GAP_SPAN {
        log::warn!(
            "Chapter numbers span {}..={}, wider than {}, skipping gap detection",
            min,
            max,
            MAX_GAP_SPAN
        );
        return Vec::new();
    }

    (min..=max)
        .filter(|i| !covered.contains(i))
        .map(|i| i as f64)
        .collect()
}

/// A chapter as listed by a provider, before it is assigned to a volume.
#[derive(Debug, Clone)]
pub struct RawChapter {
    pub volume_label: String,
    pub chapter: SourceSerieVolumeChapter,
}

impl RawChapter {
    pub fn new(volume_label: impl Into<String>, chapter: SourceSerieVolumeChapter) -> Self {
        Self {
            volume_label: volume_label.into(),
            chapter,
        }
    }
}

/// Groups chapters by normalized volume label.
///
/// Volumes come out ordered by volume number then label; chapters keep
/// their input order.
pub fn aggregate_volumes(chapters: Vec<RawChapter>) -> Vec<SourceSerieVolume> {
    let mut labels: Vec<String> = Vec::new();
    let mut groups: HashMap<String, Vec<SourceSerieVolumeChapter>> = HashMap::new();

    for raw in chapters {
        let label = normalize_volume_label(&raw.volume_label);
        groups
            .entry(label.clone())
            .or_insert_with(|| {
                labels.push(label);
                Vec::new()
            })
            .push(raw.chapter);
    }

    let mut volumes: Vec<SourceSerieVolume> = labels
        .into_iter()
        .filter_map(|label| {
            let chapters = groups.remove(&label)?;
            let volume_number = parse_number(&label).unwrap_or_else(|| {
                log::warn!("Failed to parse volume number from label {:?}", label);
                0.0
            });
            let numbers: Vec<f64> = chapters.iter().map(|c| c.chapter_number).collect();

            Some(SourceSerieVolume {
                id: VolumeId::new(format!("volume-{}", label)),
                name: format!("Volume {}", label),
                volume_number,
                missing_chapters: missing_chapters(&numbers),
                chapters,
            })
        })
        .collect();

    volumes.sort_by(|a, b| {
        a.volume_number
            .total_cmp(&b.volume_number)
            .then_with(|| a.name.cmp(&b.name))
    });

    volumes
}
