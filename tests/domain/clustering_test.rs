use voxscribe::domain::{cluster_embeddings, VoiceEmbedding};

fn embedding(values: &[f32]) -> VoiceEmbedding {
    VoiceEmbedding::new(values.to_vec())
}

#[test]
fn given_no_embeddings_when_clustering_then_returns_empty_labels() {
    let labels = cluster_embeddings(&[], 2);

    assert!(labels.is_empty());
}

#[test]
fn given_single_embedding_when_clustering_then_returns_single_label() {
    let labels = cluster_embeddings(&[embedding(&[1.0, 0.0])], 2);

    assert_eq!(labels, vec![0]);
}

#[test]
fn given_two_distinct_voices_when_clustering_then_separates_them() {
    let embeddings = vec![
        embedding(&[1.0, 0.0]),
        embedding(&[0.0, 1.0]),
        embedding(&[0.99, 0.01]),
        embedding(&[0.01, 0.99]),
    ];

    let labels = cluster_embeddings(&embeddings, 2);

    assert_eq!(labels[0], labels[2]);
    assert_eq!(labels[1], labels[3]);
    assert_ne!(labels[0], labels[1]);
}

#[test]
fn given_similar_voices_when_clustering_into_one_then_all_share_a_label() {
    let embeddings = vec![
        embedding(&[1.0, 0.0]),
        embedding(&[0.9, 0.1]),
        embedding(&[0.8, 0.2]),
    ];

    let labels = cluster_embeddings(&embeddings, 1);

    assert_eq!(labels, vec![0, 0, 0]);
}

#[test]
fn given_fewer_embeddings_than_clusters_when_clustering_then_caps_cluster_count() {
    let embeddings = vec![embedding(&[1.0, 0.0]), embedding(&[0.0, 1.0])];

    let labels = cluster_embeddings(&embeddings, 5);

    assert_eq!(labels.len(), 2);
    assert!(labels.iter().all(|&l| l < 2));
}

#[test]
fn given_any_input_when_clustering_then_first_segment_gets_label_zero() {
    let embeddings = vec![
        embedding(&[0.0, 1.0]),
        embedding(&[1.0, 0.0]),
        embedding(&[0.0, 0.98]),
    ];

    let labels = cluster_embeddings(&embeddings, 2);

    assert_eq!(labels[0], 0);
    assert_eq!(labels[1], 1);
    assert_eq!(labels[2], 0);
}

#[test]
fn given_zero_vectors_when_clustering_then_labels_are_assigned_without_panic() {
    let embeddings = vec![
        VoiceEmbedding::zeros(4),
        embedding(&[1.0, 0.0, 0.0, 0.0]),
        VoiceEmbedding::zeros(4),
    ];

    let labels = cluster_embeddings(&embeddings, 2);

    assert_eq!(labels.len(), 3);
    assert_eq!(labels[0], 0);
}
