//! Send plans: the ordered window sequences handed to the transport.
//!
//! A [`SendPlan`] is the encoder's only product. It is immutable once
//! built and consumed exactly once; the transport must deliver its windows
//! strictly in order and abort the remainder on the first irrecoverable
//! failure. Window payloads are zero-copy slices of the assembled frame
//! bytes via `bytes::Bytes`.

use bytes::Bytes;

/// One transport-sized slice of a framed payload: outer length prefix,
/// frame header, and payload chunk, ready to write to the BLE channel.
#[derive(Debug, Clone)]
pub struct Window {
    data: Bytes,
    requires_ack: bool,
}

impl Window {
    /// Wrap assembled wire bytes. Every window of this protocol requires
    /// an application-level acknowledgement; this is a contract property,
    /// not a per-invocation choice.
    pub(crate) fn new(data: Bytes) -> Self {
        Self {
            data,
            requires_ack: true,
        }
    }

    /// The raw bytes to write.
    #[inline]
    pub fn data(&self) -> &Bytes {
        &self.data
    }

    /// The raw bytes as a slice.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Total wire length of this window.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the window carries no bytes (never, for framed output).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Whether the transport must wait for an acknowledgement before
    /// sending the next window. Always true.
    #[inline]
    pub fn requires_ack(&self) -> bool {
        self.requires_ack
    }
}

/// A named, ordered sequence of windows representing one logical device
/// command.
#[derive(Debug, Clone)]
pub struct SendPlan {
    name: String,
    windows: Vec<Window>,
}

impl SendPlan {
    pub(crate) fn new(name: &str, windows: Vec<Window>) -> Self {
        Self {
            name: name.to_string(),
            windows,
        }
    }

    /// The command name this plan was built for (diagnostics only).
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The windows, in delivery order.
    #[inline]
    pub fn windows(&self) -> &[Window] {
        &self.windows
    }

    /// Number of windows.
    #[inline]
    pub fn len(&self) -> usize {
        self.windows.len()
    }

    /// Whether the plan has no windows.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// Total wire bytes across all windows.
    pub fn total_bytes(&self) -> usize {
        self.windows.iter().map(Window::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_always_requires_ack() {
        let w = Window::new(Bytes::from_static(b"\x01\x02"));
        assert!(w.requires_ack());
        assert_eq!(w.len(), 2);
        assert!(!w.is_empty());
    }

    #[test]
    fn test_plan_accessors() {
        let plan = SendPlan::new(
            "send_text",
            vec![
                Window::new(Bytes::from_static(b"abc")),
                Window::new(Bytes::from_static(b"defg")),
            ],
        );

        assert_eq!(plan.name(), "send_text");
        assert_eq!(plan.len(), 2);
        assert!(!plan.is_empty());
        assert_eq!(plan.total_bytes(), 7);
        assert_eq!(plan.windows()[1].as_bytes(), b"defg");
    }
}
