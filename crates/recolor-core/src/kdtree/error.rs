use thiserror::Error;

/// Errors raised while building a [`KdTree`](super::KdTree).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum KdTreeError {
    #[error("cannot build a k-d tree from an empty point set")]
    EmptyPointSet,

    #[error("cannot build a k-d tree over zero dimensions")]
    ZeroDimensions,
}
