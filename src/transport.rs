//! Plan execution over an acknowledged window link.
//!
//! The encoder produces a [`SendPlan`](crate::protocol::SendPlan); this
//! module defines the contract for delivering it. A [`WindowLink`] is the
//! session layer's write-with-response channel: one call per window,
//! resolving when the device acknowledges it.
//!
//! # Architecture
//!
//! ```text
//! SendPlan ──► run_plan ──► WindowLink::send_window ──► BLE write w/ response
//!                 │                    ▲
//!                 └── waits for ack ───┘   (at most one window in flight)
//! ```
//!
//! Ordering and backpressure are the same rule: the next window is not
//! written until the previous acknowledgement arrived. Because windows
//! share one whole-payload CRC, partial delivery is useless to the
//! receiver, so on the first failure the remainder of the plan is aborted
//! with no retry and no partial-success semantics.

use std::time::Duration;

use crate::error::{PixelError, Result};
use crate::protocol::{SendPlan, Window};

/// Default acknowledgement timeout per window.
pub const DEFAULT_ACK_TIMEOUT: Duration = Duration::from_secs(5);

/// Configuration for plan execution.
#[derive(Debug, Clone)]
pub struct LinkConfig {
    /// How long to wait for each window's acknowledgement.
    pub ack_timeout: Duration,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            ack_timeout: DEFAULT_ACK_TIMEOUT,
        }
    }
}

/// A write-with-acknowledgement channel to the device.
///
/// Implementations write the window's bytes and resolve once the
/// application-level acknowledgement arrives. Connection lifecycle,
/// retry/backoff on the radio link, and disconnect detection all live in
/// the implementation; the executor only sequences windows.
#[allow(async_fn_in_trait)]
pub trait WindowLink {
    /// Write one window and wait for its acknowledgement.
    async fn send_window(&mut self, window: &Window) -> Result<()>;
}

/// Execute a plan: windows strictly in order, one outstanding
/// acknowledgement at a time, abort on first failure.
pub async fn run_plan<L: WindowLink>(
    link: &mut L,
    plan: &SendPlan,
    config: &LinkConfig,
) -> Result<()> {
    let total = plan.len();

    for (index, window) in plan.windows().iter().enumerate() {
        let send = link.send_window(window);
        let result = match tokio::time::timeout(config.ack_timeout, send).await {
            Ok(result) => result,
            Err(_) => Err(PixelError::AckTimeout { window: index }),
        };

        if let Err(e) = result {
            tracing::error!(
                plan = plan.name(),
                window = index,
                total,
                error = %e,
                "window delivery failed, aborting remainder of plan"
            );
            return Err(e);
        }

        tracing::debug!(plan = plan.name(), window = index, total, "window acknowledged");
    }

    Ok(())
}

/// In-memory link for tests and dry runs: records every window's bytes
/// and can be told to fail at a given window index.
#[derive(Debug, Default)]
pub struct MemoryLink {
    /// Raw bytes of every delivered window, in order.
    pub sent: Vec<Vec<u8>>,
    /// Fail (as if the link closed) when this window index is sent.
    pub fail_at: Option<usize>,
}

impl MemoryLink {
    /// Create an always-succeeding memory link.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a link that fails at window `index`.
    pub fn failing_at(index: usize) -> Self {
        Self {
            sent: Vec::new(),
            fail_at: Some(index),
        }
    }
}

impl WindowLink for MemoryLink {
    async fn send_window(&mut self, window: &Window) -> Result<()> {
        if self.fail_at == Some(self.sent.len()) {
            return Err(PixelError::LinkClosed);
        }
        self.sent.push(window.as_bytes().to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{frame_windows, FrameClass, WINDOW_BODY_SIZE};
    use bytes::Bytes;

    fn plan_with_windows(n: usize) -> SendPlan {
        let payload = Bytes::from(vec![0xAB; WINDOW_BODY_SIZE * (n - 1) + 1]);
        frame_windows("test", payload, FrameClass::StillImage)
    }

    #[tokio::test]
    async fn test_run_plan_delivers_in_order() {
        let plan = plan_with_windows(3);
        let mut link = MemoryLink::new();

        run_plan(&mut link, &plan, &LinkConfig::default())
            .await
            .unwrap();

        assert_eq!(link.sent.len(), 3);
        for (sent, window) in link.sent.iter().zip(plan.windows()) {
            assert_eq!(sent, window.as_bytes());
        }
    }

    #[tokio::test]
    async fn test_run_plan_aborts_remainder_on_failure() {
        let plan = plan_with_windows(3);
        let mut link = MemoryLink::failing_at(1);

        let result = run_plan(&mut link, &plan, &LinkConfig::default()).await;

        assert!(matches!(result, Err(PixelError::LinkClosed)));
        // Only the first window went out; nothing after the failure.
        assert_eq!(link.sent.len(), 1);
    }

    #[tokio::test]
    async fn test_run_plan_ack_timeout() {
        struct StalledLink;
        impl WindowLink for StalledLink {
            async fn send_window(&mut self, _window: &Window) -> Result<()> {
                tokio::time::sleep(Duration::from_secs(60)).await;
                Ok(())
            }
        }

        let plan = plan_with_windows(2);
        let config = LinkConfig {
            ack_timeout: Duration::from_millis(10),
        };

        let result = run_plan(&mut StalledLink, &plan, &config).await;
        assert!(matches!(
            result,
            Err(PixelError::AckTimeout { window: 0 })
        ));
    }

    #[tokio::test]
    async fn test_run_plan_empty_plan_is_noop() {
        let plan = frame_windows("empty", Bytes::new(), FrameClass::StillImage);
        let mut link = MemoryLink::new();
        run_plan(&mut link, &plan, &LinkConfig::default())
            .await
            .unwrap();
        assert!(link.sent.is_empty());
    }
}
