use voxscribe::domain::VoiceEmbedding;

#[test]
fn given_identical_vectors_when_computing_similarity_then_returns_one() {
    let a = VoiceEmbedding::new(vec![0.6, 0.8]);

    assert!((a.cosine_similarity(&a) - 1.0).abs() < 1e-6);
}

#[test]
fn given_orthogonal_vectors_when_computing_similarity_then_returns_zero() {
    let a = VoiceEmbedding::new(vec![1.0, 0.0]);
    let b = VoiceEmbedding::new(vec![0.0, 1.0]);

    assert!(a.cosine_similarity(&b).abs() < 1e-6);
}

#[test]
fn given_opposite_vectors_when_computing_similarity_then_returns_minus_one() {
    let a = VoiceEmbedding::new(vec![1.0, 0.0]);
    let b = VoiceEmbedding::new(vec![-1.0, 0.0]);

    assert!((a.cosine_similarity(&b) + 1.0).abs() < 1e-6);
}

#[test]
fn given_mismatched_dimensions_when_computing_similarity_then_returns_zero() {
    let a = VoiceEmbedding::new(vec![1.0, 0.0]);
    let b = VoiceEmbedding::new(vec![1.0, 0.0, 0.0]);

    assert_eq!(a.cosine_similarity(&b), 0.0);
}

#[test]
fn given_zero_vector_when_computing_similarity_then_returns_zero() {
    let a = VoiceEmbedding::zeros(3);
    let b = VoiceEmbedding::new(vec![1.0, 2.0, 3.0]);

    assert_eq!(a.cosine_similarity(&b), 0.0);
}

#[test]
fn given_zeros_constructor_when_inspecting_then_reports_zero_and_dimensions() {
    let e = VoiceEmbedding::zeros(256);

    assert_eq!(e.dimensions(), 256);
    assert!(e.is_zero());
}

#[test]
fn given_unnormalized_vector_when_normalizing_then_has_unit_length() {
    let mut e = VoiceEmbedding::new(vec![3.0, 4.0]);

    e.l2_normalize();

    assert!((e.values[0] - 0.6).abs() < 1e-6);
    assert!((e.values[1] - 0.8).abs() < 1e-6);
}

#[test]
fn given_zero_vector_when_normalizing_then_stays_zero() {
    let mut e = VoiceEmbedding::zeros(3);

    e.l2_normalize();

    assert!(e.is_zero());
}
