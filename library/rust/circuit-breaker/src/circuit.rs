use std::future::Future;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

/// キャンセル可能なコンテキストを受け取って実行される失敗しうる非同期処理。
///
/// `Fn(CancellationToken) -> impl Future<Output = Result<T, E>>` を満たすクロージャは
/// そのまま `Circuit` として扱える。`Breaker` 自身も `Circuit` を実装するため入れ子にできる。
#[async_trait]
pub trait Circuit: Send + Sync {
    type Output: Send;
    type Error: Send;

    async fn run(&self, ctx: CancellationToken) -> Result<Self::Output, Self::Error>;
}

#[async_trait]
impl<F, Fut, T, E> Circuit for F
where
    F: Fn(CancellationToken) -> Fut + Send + Sync,
    Fut: Future<Output = Result<T, E>> + Send + 'static,
    T: Send + 'static,
    E: Send + 'static,
{
    type Output = T;
    type Error = E;

    async fn run(&self, ctx: CancellationToken) -> Result<T, E> {
        (self)(ctx).await
    }
}
