/// Token for one armed cooldown timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

impl TimerId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Two-state limiter enforcing a minimum interval between sends.
///
/// Invariant: `can_send` is false exactly while one timer is pending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendGate {
    can_send: bool,
    pending: Option<TimerId>,
    last_timer: u64,
}

impl Default for SendGate {
    fn default() -> Self {
        Self {
            can_send: true,
            pending: None,
            last_timer: 0,
        }
    }
}

impl SendGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn can_send(&self) -> bool {
        self.can_send
    }

    pub fn pending_timer(&self) -> Option<TimerId> {
        self.pending
    }

    /// Closes the gate and hands out the token of the timer to arm.
    ///
    /// Returns `None` without touching state while the gate is closed.
    pub fn try_acquire(&mut self) -> Option<TimerId> {
        if !self.can_send {
            return None;
        }
        self.last_timer += 1;
        let timer = TimerId(self.last_timer);
        self.can_send = false;
        self.pending = Some(timer);
        Some(timer)
    }

    /// Reopens the gate when `timer` is the pending one. Stale tokens are ignored.
    pub fn release(&mut self, timer: TimerId) -> bool {
        if self.pending != Some(timer) {
            return false;
        }
        self.pending = None;
        self.can_send = true;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acquire_closes_until_release() {
        let mut gate = SendGate::new();
        let timer = gate.try_acquire().expect("open gate");
        assert!(!gate.can_send());
        assert_eq!(gate.pending_timer(), Some(timer));
        assert_eq!(gate.try_acquire(), None);

        assert!(gate.release(timer));
        assert!(gate.can_send());
        assert_eq!(gate.pending_timer(), None);
    }

    #[test]
    fn stale_release_is_ignored() {
        let mut gate = SendGate::new();
        let first = gate.try_acquire().unwrap();
        assert!(gate.release(first));
        let second = gate.try_acquire().unwrap();

        assert!(!gate.release(first));
        assert!(!gate.can_send());
        assert!(gate.release(second));
    }
}
