/// Skips redraws of frames that did not change.
///
/// A 2048 frame only changes on input or when the elapsed timer ticks, so the
/// runner hashes what it is about to draw and asks here first.
#[derive(Debug, Clone)]
pub struct RenderThrottle {
    max_idle_ms: u64,
    last_render_ms: u64,
    last_fingerprint: u64,
    forced: bool,
}

impl RenderThrottle {
    pub fn new(max_idle_ms: u64) -> Self {
        Self {
            max_idle_ms,
            last_render_ms: 0,
            last_fingerprint: 0,
            forced: true,
        }
    }

    /// Make the next [`RenderThrottle::should_render`] return true (resize, first frame).
    pub fn force(&mut self) {
        self.forced = true;
    }

    /// Decide whether to render a new frame.
    ///
    /// Renders immediately when forced or when the fingerprint changed,
    /// otherwise at most once per `max_idle_ms`.
    pub fn should_render(&mut self, now_ms: u64, fingerprint: u64) -> bool {
        let due = self.forced
            || fingerprint != self.last_fingerprint
            || now_ms.saturating_sub(self.last_render_ms) >= self.max_idle_ms;

        if due {
            self.forced = false;
            self.last_render_ms = now_ms;
            self.last_fingerprint = fingerprint;
        }
        due
    }
}
