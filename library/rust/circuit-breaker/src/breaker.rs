use async_trait::async_trait;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::circuit::Circuit;
use crate::config::BreakerConfig;
use crate::error::BreakerError;

struct BreakerState {
    consecutive_failures: u32,
    last_attempt: Instant,
}

/// 連続失敗回数に応じて呼び出しを遮断する `Circuit` のデコレータ。
///
/// 連続失敗回数が閾値に達すると、最後に完了した呼び出しから
/// `backoff_unit * 2^(超過数 + 1)` が経過するまで `BreakerError::Unreachable` を即座に返す。
/// クールダウン経過後の次の呼び出しは失敗回数に関わらずラップした処理へ委譲される。
///
/// 判定後にロックを解放してから委譲するため、クールダウン明けに複数の呼び出しが
/// 同時に委譲されることがある。
pub struct Breaker<C> {
    circuit: C,
    config: BreakerConfig,
    state: RwLock<BreakerState>,
}

impl<C: Circuit> Breaker<C> {
    #[must_use]
    pub fn new(circuit: C, failure_threshold: u32) -> Self {
        Self::with_config(circuit, BreakerConfig::new(failure_threshold))
    }

    #[must_use]
    pub fn with_config(circuit: C, config: BreakerConfig) -> Self {
        Self {
            circuit,
            config,
            state: RwLock::new(BreakerState {
                consecutive_failures: 0,
                last_attempt: Instant::now(),
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &BreakerConfig {
        &self.config
    }

    #[must_use]
    pub fn get_ref(&self) -> &C {
        &self.circuit
    }

    #[must_use]
    pub fn into_inner(self) -> C {
        self.circuit
    }

    /// 遮断中であれば再試行可能になるまでの残り時間を返す。
    async fn remaining_cooldown(&self) -> Option<std::time::Duration> {
        let state = self.state.read().await;
        // 失敗が記録されていない間は閾値 0 でも遮断しない
        if state.consecutive_failures == 0 {
            return None;
        }
        let excess = state
            .consecutive_failures
            .checked_sub(self.config.failure_threshold)?;

        let now = Instant::now();
        match state.last_attempt.checked_add(self.config.backoff(excess)) {
            Some(retry_at) if now > retry_at => None,
            Some(retry_at) => Some(retry_at - now),
            // 再試行時刻を表現できないほど遠い場合は遮断を続ける
            None => Some(std::time::Duration::MAX),
        }
    }
}

#[async_trait]
impl<C: Circuit> Circuit for Breaker<C> {
    type Output = C::Output;
    type Error = BreakerError<C::Error>;

    async fn run(&self, ctx: CancellationToken) -> Result<Self::Output, Self::Error> {
        if let Some(remaining) = self.remaining_cooldown().await {
            tracing::debug!(
                failure_threshold = self.config.failure_threshold,
                remaining = ?remaining,
                "サーキットブレーカーが呼び出しを遮断しました"
            );
            return Err(BreakerError::Unreachable);
        }

        let result = self.circuit.run(ctx).await;

        let mut state = self.state.write().await;
        state.last_attempt = Instant::now();

        match result {
            Ok(value) => {
                if state.consecutive_failures > 0 {
                    tracing::debug!(
                        previous_failures = state.consecutive_failures,
                        "連続失敗回数をリセットしました"
                    );
                }
                state.consecutive_failures = 0;
                Ok(value)
            }
            Err(e) => {
                state.consecutive_failures = state.consecutive_failures.saturating_add(1);
                tracing::debug!(
                    consecutive_failures = state.consecutive_failures,
                    failure_threshold = self.config.failure_threshold,
                    "委譲した呼び出しが失敗しました"
                );
                Err(BreakerError::Inner(e))
            }
        }
    }
}
