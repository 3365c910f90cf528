use thiserror::Error;

/// `Breaker` が返すエラー。
///
/// 遮断による合成エラーと、ラップした処理自身のエラーを型で区別する。
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BreakerError<E> {
    #[error("service unreachable")]
    Unreachable,
    /// ラップした処理が返したエラーをそのまま保持する。
    #[error("{0}")]
    Inner(E),
}

impl<E> BreakerError<E> {
    #[must_use]
    pub fn is_unreachable(&self) -> bool {
        matches!(self, Self::Unreachable)
    }

    #[must_use]
    pub fn inner(&self) -> Option<&E> {
        match self {
            Self::Inner(e) => Some(e),
            Self::Unreachable => None,
        }
    }

    #[must_use]
    pub fn into_inner(self) -> Option<E> {
        match self {
            Self::Inner(e) => Some(e),
            Self::Unreachable => None,
        }
    }
}
