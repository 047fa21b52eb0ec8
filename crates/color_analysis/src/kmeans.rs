use palette::Lab;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

const ITERATIONS: usize = 12;

/// Plain Lloyd k-means over Lab points with seeded initialization, so the
/// same pixels always produce the same palette. Returns centers with their
/// cluster populations, largest first.
pub(crate) fn kmeans(points: &[Lab], k: usize, seed: u64) -> Vec<(Lab, usize)> {
    if points.is_empty() || k == 0 {
        return Vec::new();
    }
    let k = k.min(points.len());

    let mut rng = StdRng::seed_from_u64(seed);
    let mut centers = initial_centers(points, k, &mut rng);
    let mut assignment = vec![0usize; points.len()];

    for _ in 0..ITERATIONS {
        for (i, p) in points.iter().enumerate() {
            assignment[i] = nearest_center(&centers, *p);
        }

        let mut sums = vec![(0.0f32, 0.0f32, 0.0f32); k];
        let mut counts = vec![0usize; k];
        for (p, &cluster) in points.iter().zip(&assignment) {
            sums[cluster].0 += p.l;
            sums[cluster].1 += p.a;
            sums[cluster].2 += p.b;
            counts[cluster] += 1;
        }
        for (cluster, center) in centers.iter_mut().enumerate() {
            // Empty clusters keep their previous center.
            if counts[cluster] > 0 {
                let n = counts[cluster] as f32;
                *center = Lab::new(
                    sums[cluster].0 / n,
                    sums[cluster].1 / n,
                    sums[cluster].2 / n,
                );
            }
        }
    }

    let mut counts = vec![0usize; k];
    for &cluster in &assignment {
        counts[cluster] += 1;
    }
    let mut ranked: Vec<(Lab, usize)> = centers.into_iter().zip(counts).collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
}

/// One random seed point, then repeatedly the point farthest from its
/// nearest center. Keeps initial centers spread out even when most pixels
/// are near-duplicates.
fn initial_centers(points: &[Lab], k: usize, rng: &mut StdRng) -> Vec<Lab> {
    let mut centers = Vec::with_capacity(k);
    centers.push(points[rng.random_range(0..points.len())]);
    while centers.len() < k {
        let farthest = points
            .iter()
            .max_by(|a, b| {
                distance_to_nearest(&centers, **a)
                    .partial_cmp(&distance_to_nearest(&centers, **b))
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .copied()
            .unwrap_or(centers[0]);
        centers.push(farthest);
    }
    centers
}

fn distance_to_nearest(centers: &[Lab], p: Lab) -> f32 {
    centers
        .iter()
        .map(|c| (p.l - c.l).powi(2) + (p.a - c.a).powi(2) + (p.b - c.b).powi(2))
        .fold(f32::MAX, f32::min)
}

fn nearest_center(centers: &[Lab], p: Lab) -> usize {
    let mut best = 0;
    let mut best_distance = f32::MAX;
    for (i, c) in centers.iter().enumerate() {
        let d = (p.l - c.l).powi(2) + (p.a - c.a).powi(2) + (p.b - c.b).powi(2);
        if d < best_distance {
            best_distance = d;
            best = i;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_yields_no_centers() {
        assert!(kmeans(&[], 3, 0).is_empty());
    }

    #[test]
    fn k_is_clamped_to_point_count() {
        let points = vec![Lab::new(50.0, 0.0, 0.0); 2];
        assert_eq!(kmeans(&points, 5, 0).len(), 2);
    }

    #[test]
    fn separates_two_obvious_clusters_biggest_first() {
        let mut points = Vec::new();
        for _ in 0..90 {
            points.push(Lab::new(20.0, -40.0, 30.0));
        }
        for _ in 0..10 {
            points.push(Lab::new(80.0, 40.0, -30.0));
        }
        let ranked = kmeans(&points, 2, 0);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].1, 90);
        assert!((ranked[0].0.l - 20.0).abs() < 1.0);
        assert!((ranked[1].0.l - 80.0).abs() < 1.0);
    }

    #[test]
    fn same_seed_same_result() {
        let points: Vec<Lab> = (0..200)
            .map(|i| Lab::new((i % 97) as f32, (i % 13) as f32 - 6.0, (i % 7) as f32))
            .collect();
        let a = kmeans(&points, 4, 7);
        let b = kmeans(&points, 4, 7);
        assert_eq!(a.len(), b.len());
        for ((ca, na), (cb, nb)) in a.iter().zip(&b) {
            assert_eq!(na, nb);
            assert!((ca.l - cb.l).abs() < f32::EPSILON);
        }
    }
}
