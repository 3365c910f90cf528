use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BreakerConfig {
    /// 遮断を始めるまでに許容する連続失敗回数。0 の場合は最初の失敗から遮断判定が有効になる。
    pub failure_threshold: u32,
    /// バックオフの基本単位。クールダウンは `backoff_unit * 2^(超過数 + 1)` となる。
    /// 既定値の 1ns ではクールダウンはほぼ発生しないため、用途に合わせて設定すること。
    pub backoff_unit: Duration,
}

impl Default for BreakerConfig {
    fn default() -> Self {
        Self {
            failure_threshold: 5,
            backoff_unit: Duration::from_nanos(1),
        }
    }
}

impl BreakerConfig {
    #[must_use]
    pub fn new(failure_threshold: u32) -> Self {
        Self {
            failure_threshold,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_failure_threshold(mut self, failure_threshold: u32) -> Self {
        self.failure_threshold = failure_threshold;
        self
    }

    #[must_use]
    pub fn with_backoff_unit(mut self, unit: Duration) -> Self {
        self.backoff_unit = unit;
        self
    }

    /// 閾値超過数 `excess` に対するクールダウン時間を返す。
    /// ナノ秒単位で計算し、`Duration` で表現できない場合のみ `Duration::MAX` に飽和する。
    #[must_use]
    pub fn backoff(&self, excess: u32) -> Duration {
        const NANOS_PER_SEC: u128 = 1_000_000_000;

        let unit = self.backoff_unit.as_nanos();
        if unit == 0 {
            return Duration::ZERO;
        }
        let nanos = excess
            .checked_add(1)
            .and_then(|shift| 1u128.checked_shl(shift))
            .and_then(|factor| unit.checked_mul(factor));

        nanos
            .and_then(|n| {
                let secs = u64::try_from(n / NANOS_PER_SEC).ok()?;
                // 剰余は 10^9 未満なので u32 に収まる
                let subsec = u32::try_from(n % NANOS_PER_SEC).ok()?;
                Some(Duration::new(secs, subsec))
            })
            .unwrap_or(Duration::MAX)
    }
}
