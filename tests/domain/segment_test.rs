use voxscribe::domain::{assign_speakers, TranscriptSegment};

#[test]
fn given_labels_when_assigning_speakers_then_labels_are_one_based() {
    let segments = vec![
        TranscriptSegment::new(0.0, 1.5, "first"),
        TranscriptSegment::new(1.5, 3.0, "second"),
    ];

    let labeled = assign_speakers(segments, &[0, 1]);

    assert_eq!(labeled[0].speaker, "speaker_1");
    assert_eq!(labeled[1].speaker, "speaker_2");
    assert_eq!(labeled[0].text, "first");
    assert_eq!(labeled[1].start, 1.5);
}

#[test]
fn given_shared_label_when_assigning_speakers_then_segments_share_a_speaker() {
    let segments = vec![
        TranscriptSegment::new(0.0, 1.0, "a"),
        TranscriptSegment::new(1.0, 2.0, "b"),
        TranscriptSegment::new(2.0, 3.0, "c"),
    ];

    let labeled = assign_speakers(segments, &[0, 1, 0]);

    assert_eq!(labeled[0].speaker, labeled[2].speaker);
    assert_ne!(labeled[0].speaker, labeled[1].speaker);
}

#[test]
fn given_no_segments_when_assigning_speakers_then_returns_empty() {
    let labeled = assign_speakers(Vec::new(), &[]);

    assert!(labeled.is_empty());
}

#[test]
fn given_inverted_bounds_when_computing_duration_then_clamps_to_zero() {
    let segment = TranscriptSegment::new(2.0, 1.0, "oops");

    assert_eq!(segment.duration(), 0.0);
}
