/// Identifies one scheduled long-press. Tokens are never reused within an
/// interpreter, so a late callback from an earlier press can be told apart.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerToken(u32);

impl TimerToken {
    pub const fn session(self) -> u32 {
        self.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct PendingLongPress {
    token: TimerToken,
    deadline_ms: u64,
}

/// The single long-press deadline a session may own.
#[derive(Debug, Default)]
pub(crate) struct LongPressSlot {
    pending: Option<PendingLongPress>,
    next_session: u32,
}

impl LongPressSlot {
    pub(crate) fn arm(&mut self, now_ms: u64, timeout_ms: u64) -> (TimerToken, u64) {
        self.next_session = self.next_session.wrapping_add(1);
        let token = TimerToken(self.next_session);
        let deadline_ms = now_ms.saturating_add(timeout_ms);
        self.pending = Some(PendingLongPress { token, deadline_ms });
        (token, deadline_ms)
    }

    /// Drops the pending deadline. Returns `None` when it already fired or was
    /// never armed.
    pub(crate) fn disarm(&mut self) -> Option<TimerToken> {
        self.pending.take().map(|pending| pending.token)
    }

    /// Consumes the pending deadline if `token` still names it.
    pub(crate) fn fire(&mut self, token: TimerToken) -> bool {
        match self.pending {
            Some(pending) if pending.token == token => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }

    pub(crate) fn pending_token(&self) -> Option<TimerToken> {
        self.pending.map(|pending| pending.token)
    }
}
