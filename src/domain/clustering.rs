use super::VoiceEmbedding;

/// Groups voice embeddings into at most `num_clusters` speakers using
/// bottom-up average-linkage merging over cosine distance.
///
/// Returned labels are renumbered in order of first appearance, so the
/// earliest segment always belongs to cluster 0.
pub fn cluster_embeddings(embeddings: &[VoiceEmbedding], num_clusters: usize) -> Vec<usize> {
    let n = embeddings.len();
    if n == 0 {
        return Vec::new();
    }
    let target = num_clusters.clamp(1, n);

    // Pairwise cosine distances; zero vectors sit at maximum distance from
    // everything, including each other.
    let mut distance = vec![vec![0.0f32; n]; n];
    for i in 0..n {
        for j in (i + 1)..n {
            let d = 1.0 - embeddings[i].cosine_similarity(&embeddings[j]);
            distance[i][j] = d;
            distance[j][i] = d;
        }
    }

    let mut clusters: Vec<Vec<usize>> = (0..n).map(|i| vec![i]).collect();

    while clusters.len() > target {
        let mut best: Option<(usize, usize, f32)> = None;
        for a in 0..clusters.len() {
            for b in (a + 1)..clusters.len() {
                let linkage = average_linkage(&clusters[a], &clusters[b], &distance);
                if best.map(|(_, _, d)| linkage < d).unwrap_or(true) {
                    best = Some((a, b, linkage));
                }
            }
        }

        // target >= 1 and clusters.len() > target imply at least one pair
        let Some((a, b, _)) = best else { break };
        let merged = clusters.swap_remove(b);
        clusters[a].extend(merged);
    }

    relabel_by_first_appearance(&clusters, n)
}

fn average_linkage(a: &[usize], b: &[usize], distance: &[Vec<f32>]) -> f32 {
    let mut sum = 0.0f32;
    for &i in a {
        for &j in b {
            sum += distance[i][j];
        }
    }
    sum / (a.len() * b.len()) as f32
}

fn relabel_by_first_appearance(clusters: &[Vec<usize>], n: usize) -> Vec<usize> {
    let mut first_member: Vec<(usize, usize)> = clusters
        .iter()
        .enumerate()
        .map(|(cluster_idx, members)| {
            let earliest = members.iter().copied().min().unwrap_or(usize::MAX);
            (earliest, cluster_idx)
        })
        .collect();
    first_member.sort_unstable();

    let mut labels = vec![0usize; n];
    for (label, &(_, cluster_idx)) in first_member.iter().enumerate() {
        for &member in &clusters[cluster_idx] {
            labels[member] = label;
        }
    }
    labels
}
