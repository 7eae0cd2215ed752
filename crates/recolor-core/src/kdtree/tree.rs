use std::cmp::Ordering;

use num_traits::AsPrimitive;

use super::error::KdTreeError;

/// Scalar type usable as a point coordinate.
///
/// Distances are accumulated in `f64`, so integer coordinates never
/// overflow while squaring.
pub trait Coordinate: Copy + PartialOrd + AsPrimitive<f64> {}

impl<T: Copy + PartialOrd + AsPrimitive<f64>> Coordinate for T {}

/// Squared Euclidean distance between two points.
#[inline]
pub fn squared_distance<T: Coordinate, const K: usize>(a: &[T; K], b: &[T; K]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(&p, &q)| {
            let d = p.as_() - q.as_();
            d * d
        })
        .sum()
}

/// One arena slot of a [`KdTree`].
#[derive(Debug, Clone, PartialEq)]
pub struct Node<T, const K: usize> {
    point: [T; K],
    depth: usize,
    left: Option<usize>,
    right: Option<usize>,
}

impl<T: Copy, const K: usize> Node<T, K> {
    #[inline]
    pub fn point(&self) -> &[T; K] {
        &self.point
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Arena index of the left child.
    #[inline]
    pub fn left(&self) -> Option<usize> {
        self.left
    }

    /// Arena index of the right child.
    #[inline]
    pub fn right(&self) -> Option<usize> {
        self.right
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// Coordinate this node splits on: `depth mod K`.
    #[inline]
    pub fn split_dimension(&self) -> usize {
        self.depth % K
    }
}

/// A balanced k-d tree over `K`-dimensional points.
///
/// Every node's left subtree holds only points whose coordinate on the
/// node's split dimension is `<=` the node's own. A group of exactly two
/// points becomes the larger point with the smaller one as its only
/// (left) child; no node built from two points has a right child.
///
/// # Example
///
/// ```
/// use recolor_core::KdTree;
///
/// let tree = KdTree::new(vec![[0, 0, 0], [255, 255, 255]]).unwrap();
/// assert_eq!(tree.nearest(&[10, 10, 10]), [0, 0, 0]);
/// assert_eq!(tree.nearest(&[200, 200, 200]), [255, 255, 255]);
/// ```
#[derive(Debug, Clone)]
pub struct KdTree<T, const K: usize> {
    nodes: Vec<Node<T, K>>,
    root: usize,
}

impl<T: Coordinate, const K: usize> KdTree<T, K> {
    /// Build the tree from `points`.
    ///
    /// Duplicate points are kept. Construction sorts each subgroup on its
    /// split dimension (stable), so building is `O(N log² N)`.
    ///
    /// # Errors
    ///
    /// - [`KdTreeError::ZeroDimensions`] if `K == 0`
    /// - [`KdTreeError::EmptyPointSet`] if `points` is empty
    pub fn new(mut points: Vec<[T; K]>) -> Result<Self, KdTreeError> {
        if K == 0 {
            return Err(KdTreeError::ZeroDimensions);
        }
        if points.is_empty() {
            return Err(KdTreeError::EmptyPointSet);
        }

        let mut nodes = Vec::with_capacity(points.len());
        let root = build(&mut nodes, &mut points, 0);
        Ok(Self { nodes, root })
    }

    /// Number of points stored.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`: construction rejects empty point sets.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of levels, 1 for a single point.
    pub fn height(&self) -> usize {
        self.nodes.iter().map(|n| n.depth + 1).max().unwrap_or(0)
    }

    /// The node arena, in construction order.
    pub fn nodes(&self) -> &[Node<T, K>] {
        &self.nodes
    }

    pub fn root(&self) -> &Node<T, K> {
        &self.nodes[self.root]
    }

    /// Stored point closest to `query` by Euclidean distance.
    ///
    /// When several points are equally close, the one met first on the
    /// way back up from the descent wins.
    pub fn nearest(&self, query: &[T; K]) -> [T; K] {
        self.nearest_with_distance(query).0
    }

    /// Like [`nearest`](Self::nearest), also returning the squared distance.
    pub fn nearest_with_distance(&self, query: &[T; K]) -> ([T; K], f64) {
        let (index, distance) = self.search(self.root, query);
        (self.nodes[index].point, distance)
    }

    fn search(&self, index: usize, query: &[T; K]) -> (usize, f64) {
        let node = &self.nodes[index];
        let here = squared_distance(&node.point, query);

        match (node.left, node.right) {
            (None, None) => (index, here),
            (Some(only), None) | (None, Some(only)) => {
                let best = self.search(only, query);
                closer((index, here), best)
            }
            (Some(left), Some(right)) => {
                let k = node.split_dimension();
                let q: f64 = query[k].as_();
                let p: f64 = node.point[k].as_();
                let (near, far) = if q <= p { (left, right) } else { (right, left) };

                let best = closer((index, here), self.search(near, query));

                // The far side can only hold a closer point if the
                // splitting plane is within the current best radius
                let plane = (q - p) * (q - p);
                if best.1 >= plane {
                    let candidate = self.search(far, query);
                    if candidate.1 < best.1 {
                        return candidate;
                    }
                }
                best
            }
        }
    }
}

/// Keep `held` unless `node` is strictly closer.
#[inline]
fn closer(node: (usize, f64), held: (usize, f64)) -> (usize, f64) {
    if node.1 < held.1 {
        node
    } else {
        held
    }
}

fn build<T: Coordinate, const K: usize>(
    nodes: &mut Vec<Node<T, K>>,
    points: &mut [[T; K]],
    depth: usize,
) -> usize {
    let k = depth % K;
    points.sort_by(|a, b| a[k].partial_cmp(&b[k]).unwrap_or(Ordering::Equal));

    let (pivot, left, right) = match points.len() {
        1 => (0, None, None),
        2 => (1, Some(0..1), None),
        n => {
            let m = n / 2;
            (m, Some(0..m), Some(m + 1..n))
        }
    };

    let index = nodes.len();
    nodes.push(Node {
        point: points[pivot],
        depth,
        left: None,
        right: None,
    });

    if let Some(range) = left {
        let child = build(nodes, &mut points[range], depth + 1);
        nodes[index].left = Some(child);
    }
    if let Some(range) = right {
        let child = build(nodes, &mut points[range], depth + 1);
        nodes[index].right = Some(child);
    }
    index
}
