/// One timestamped unit of recognized speech, in seconds from the start of
/// the recording.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptSegment {
    pub start: f64,
    pub end: f64,
    pub text: String,
}

impl TranscriptSegment {
    pub fn new(start: f64, end: f64, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            text: text.into(),
        }
    }

    pub fn duration(&self) -> f64 {
        (self.end - self.start).max(0.0)
    }
}

/// A transcript segment with an assigned speaker label.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledSegment {
    pub start: f64,
    pub end: f64,
    pub speaker: String,
    pub text: String,
}

/// Zips segments with cluster labels. Cluster `k` becomes `speaker_{k+1}`.
///
/// Invariant: `labels.len() == segments.len()`; extra entries on either side
/// are dropped by the zip.
pub fn assign_speakers(segments: Vec<TranscriptSegment>, labels: &[usize]) -> Vec<LabeledSegment> {
    segments
        .into_iter()
        .zip(labels.iter())
        .map(|(segment, label)| LabeledSegment {
            start: segment.start,
            end: segment.end,
            speaker: format!("speaker_{}", label + 1),
            text: segment.text,
        })
        .collect()
}
