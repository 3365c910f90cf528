//! k1s0-circuit-breaker: 連続失敗に基づくサーキットブレーカー。
//!
//! 任意の非同期処理 (`Circuit`) をラップし、連続失敗回数が閾値に達した後は
//! 指数的に伸びるクールダウンが明けるまで呼び出しを即座に失敗させる。
//!
//! ```no_run
//! use k1s0_circuit_breaker::{Breaker, BreakerError, Circuit};
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn example() {
//! let breaker = Breaker::new(
//!     |_ctx: CancellationToken| async { Ok::<_, std::io::Error>("pong") },
//!     3,
//! );
//!
//! match breaker.run(CancellationToken::new()).await {
//!     Ok(reply) => println!("{reply}"),
//!     Err(BreakerError::Unreachable) => println!("遮断中"),
//!     Err(BreakerError::Inner(e)) => println!("下流エラー: {e}"),
//! }
//! # }
//! ```

pub mod breaker;
pub mod circuit;
pub mod config;
pub mod error;

pub use breaker::Breaker;
pub use circuit::Circuit;
pub use config::BreakerConfig;
pub use error::BreakerError;
