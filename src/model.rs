//! Euclidean distances and single-linkage hierarchical clustering

use ndarray::Array2;

use crate::data::Table;
use crate::error::ValidationError;

/// Symmetric matrix of pairwise Euclidean distances with zero diagonal,
/// indexed by the source table's point labels.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    values: Array2<f64>,
    labels: Vec<String>,
}

impl DistanceMatrix {
    /// Number of points.
    pub fn n(&self) -> usize {
        self.values.nrows()
    }

    /// Distance between points i and j.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[[i, j]]
    }

    /// Point labels, in matrix order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// The full square matrix.
    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    /// The same matrix with rows, columns and labels permuted by `order`
    /// (e.g. a dendrogram leaf ordering).
    pub fn reordered(&self, order: &[usize]) -> DistanceMatrix {
        let n = order.len();
        debug_assert_eq!(n, self.n());
        let mut values = Array2::zeros((n, n));
        for (i, &oi) in order.iter().enumerate() {
            for (j, &oj) in order.iter().enumerate() {
                values[[i, j]] = self.values[[oi, oj]];
            }
        }
        let labels = order.iter().map(|&o| self.labels[o].clone()).collect();
        DistanceMatrix { values, labels }
    }
}

/// One agglomerative merge event.
///
/// Cluster ids follow the usual linkage convention: ids below the point
/// count are leaves; the k-th merge creates cluster id `n_points + k`.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeStep {
    /// Id of the first merged cluster (the lower-slot one).
    pub a: usize,
    /// Id of the second merged cluster.
    pub b: usize,
    /// Inter-cluster distance at which the merge happened.
    pub distance: f64,
    /// Number of points in the merged cluster.
    pub size: usize,
}

/// Distance matrix plus the merge sequence derived from it.
#[derive(Debug, Clone, PartialEq)]
pub struct Hierarchy {
    pub matrix: DistanceMatrix,
    pub merges: Vec<MergeStep>,
}

/// Compute the full pairwise Euclidean distance matrix over the table's
/// row vectors (each point = its values across all variables).
///
/// Requires at least 2 points; rejects non-finite values defensively even
/// though the normalizer already filters them.
pub fn distance_matrix(table: &Table) -> Result<DistanceMatrix, ValidationError> {
    let n = table.n_points();
    if n < 2 {
        return Err(ValidationError::InsufficientPoints { found: n });
    }
    for (j, name) in table.names().iter().enumerate() {
        if table.values().column(j).iter().any(|v| !v.is_finite()) {
            return Err(ValidationError::NonFiniteValue {
                variable: name.clone(),
            });
        }
    }

    let mut values = Array2::zeros((n, n));
    for i in 0..n {
        for j in (i + 1)..n {
            let d = euclidean_distance(table, i, j);
            values[[i, j]] = d;
            values[[j, i]] = d;
        }
    }

    Ok(DistanceMatrix {
        values,
        labels: table.labels().to_vec(),
    })
}

/// Run single-linkage agglomerative clustering over a distance matrix.
///
/// Inter-cluster distance is the minimum pairwise member distance,
/// maintained with the usual min-update after each merge. Ties resolve to
/// the lowest-indexed pair: a cluster occupies the slot of its smallest
/// original point index, candidate pairs are scanned in ascending (i, j)
/// order, and only a strictly smaller distance displaces the current best.
/// Produces exactly n-1 merges, in merge order (inversions kept as
/// computed).
pub fn single_linkage(matrix: &DistanceMatrix) -> Vec<MergeStep> {
    let n = matrix.n();
    let mut dist = matrix.values().clone();
    let mut active = vec![true; n];
    let mut id: Vec<usize> = (0..n).collect();
    let mut size = vec![1usize; n];
    let mut merges = Vec::with_capacity(n.saturating_sub(1));

    for step in 0..n.saturating_sub(1) {
        let mut best = (0, 0);
        let mut best_distance = f64::INFINITY;
        for i in 0..n {
            if !active[i] {
                continue;
            }
            for j in (i + 1)..n {
                if !active[j] {
                    continue;
                }
                if dist[[i, j]] < best_distance {
                    best_distance = dist[[i, j]];
                    best = (i, j);
                }
            }
        }

        let (i, j) = best;
        merges.push(MergeStep {
            a: id[i],
            b: id[j],
            distance: best_distance,
            size: size[i] + size[j],
        });

        // Merge j into i; single-linkage keeps the smaller distance.
        for k in 0..n {
            if k == i || k == j || !active[k] {
                continue;
            }
            let d = dist[[i, k]].min(dist[[j, k]]);
            dist[[i, k]] = d;
            dist[[k, i]] = d;
        }
        active[j] = false;
        size[i] += size[j];
        id[i] = n + step;
    }

    merges
}

/// Distance matrix plus single-linkage merges for a table, in one call.
pub fn cluster(table: &Table) -> Result<Hierarchy, ValidationError> {
    let matrix = distance_matrix(table)?;
    let merges = single_linkage(&matrix);
    Ok(Hierarchy { matrix, merges })
}

fn euclidean_distance(table: &Table, i: usize, j: usize) -> f64 {
    table
        .row(i)
        .iter()
        .zip(table.row(j).iter())
        .map(|(a, b)| (a - b).powi(2))
        .sum::<f64>()
        .sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::build_table;

    const TOL: f64 = 1e-9;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_three_four_five_triangle() {
        // Points (0,0) and (3,4): X holds the x coordinates, Y the y.
        let table = build_table(&strings(&["X", "Y"]), &strings(&["0 3", "0 4"])).unwrap();
        let matrix = distance_matrix(&table).unwrap();
        assert!(matrix.get(0, 0).abs() < TOL);
        assert!(matrix.get(1, 1).abs() < TOL);
        assert!((matrix.get(0, 1) - 5.0).abs() < TOL);
        assert!((matrix.get(1, 0) - 5.0).abs() < TOL);
    }

    #[test]
    fn test_matrix_symmetric_zero_diagonal() {
        let table = build_table(
            &strings(&["A", "B"]),
            &strings(&["1 4 -2 7.5 0", "3 3 9 -1 2"]),
        )
        .unwrap();
        let matrix = distance_matrix(&table).unwrap();
        let n = matrix.n();
        for i in 0..n {
            assert_eq!(matrix.get(i, i), 0.0);
            for j in 0..n {
                assert_eq!(matrix.get(i, j), matrix.get(j, i));
                assert!(matrix.get(i, j) >= 0.0);
            }
        }
    }

    #[test]
    fn test_insufficient_points() {
        let table = build_table(&strings(&["X"]), &strings(&["42"])).unwrap();
        let err = distance_matrix(&table).unwrap_err();
        assert_eq!(err, ValidationError::InsufficientPoints { found: 1 });
    }

    #[test]
    fn test_single_linkage_chain() {
        // Points on a line at 0, 1, 10: the 0-1 pair merges first at
        // distance 1, then the pair cluster meets 10 at distance 9.
        let table = build_table(&strings(&["X"]), &strings(&["0 1 10"])).unwrap();
        let hierarchy = cluster(&table).unwrap();
        assert_eq!(hierarchy.merges.len(), 2);

        let first = &hierarchy.merges[0];
        assert_eq!((first.a, first.b), (0, 1));
        assert!((first.distance - 1.0).abs() < TOL);
        assert_eq!(first.size, 2);

        let second = &hierarchy.merges[1];
        assert_eq!((second.a, second.b), (3, 2));
        assert!((second.distance - 9.0).abs() < TOL);
        assert_eq!(second.size, 3);
    }

    #[test]
    fn test_merge_count_and_final_size() {
        let table = build_table(
            &strings(&["X", "Y"]),
            &strings(&["0 2 9 4 7 1", "0 1 3 4 2 8"]),
        )
        .unwrap();
        let hierarchy = cluster(&table).unwrap();
        assert_eq!(hierarchy.merges.len(), 5);
        assert_eq!(hierarchy.merges.last().unwrap().size, 6);
    }

    #[test]
    fn test_tie_break_lowest_indexed_pair() {
        // Equilateral layout: every pairwise distance is 2. The first
        // merge must pick (0, 1), then the rest join at the same height.
        let table = build_table(&strings(&["X"]), &strings(&["0 2 4"])).unwrap();
        // Not equilateral in one dimension; use identical points instead.
        let table_tied = build_table(&strings(&["X", "Y"]), &strings(&["1 1 1", "2 2 2"])).unwrap();
        let hierarchy = cluster(&table_tied).unwrap();
        assert_eq!(
            (hierarchy.merges[0].a, hierarchy.merges[0].b),
            (0, 1),
            "tied distances must merge the lowest-indexed pair first"
        );
        assert_eq!((hierarchy.merges[1].a, hierarchy.merges[1].b), (3, 2));

        // Distinct distances stay deterministic too.
        let hierarchy = cluster(&table).unwrap();
        assert_eq!((hierarchy.merges[0].a, hierarchy.merges[0].b), (0, 1));
    }

    #[test]
    fn test_determinism() {
        let table = build_table(
            &strings(&["X", "Y", "Z"]),
            &strings(&["0.5 3 3 8 2", "1 1 7 4 4", "2 0 5 5 9"]),
        )
        .unwrap();
        let first = cluster(&table).unwrap();
        let second = cluster(&table).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_reordered_matrix() {
        let table = build_table(&strings(&["X"]), &strings(&["0 1 10"])).unwrap();
        let matrix = distance_matrix(&table).unwrap();
        let reordered = matrix.reordered(&[2, 0, 1]);
        assert_eq!(reordered.labels()[0], "Point 3");
        assert!((reordered.get(0, 1) - 10.0).abs() < TOL);
        assert!((reordered.get(1, 2) - 1.0).abs() < TOL);
        for i in 0..3 {
            assert_eq!(reordered.get(i, i), 0.0);
        }
    }
}
