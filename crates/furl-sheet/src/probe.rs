//! One-shot off-screen measurement of the content slots.
//!
//! The host renders header, body, and optional footer once, hidden (zero
//! opacity, displaced out of the viewport, non-interactive), and reports
//! each slot's natural height here. `ready` flips exactly once, strictly off
//! completed measurement callbacks — never off a timer — and before that the
//! visible sheet must not render at all.

/// The three logical content regions. The engine never inspects slot
/// contents, only their measured heights.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotKind {
    Header,
    Body,
    Footer,
}

/// Measured natural heights of the slots, available once the probe is
/// complete.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotHeights {
    pub header: f32,
    pub body: f32,
    /// Zero when no footer slot was supplied.
    pub footer: f32,
}

pub struct ContentProber {
    expects_footer: bool,
    header: Option<f32>,
    body: Option<f32>,
    footer: Option<f32>,
    announced: bool,
}

impl ContentProber {
    pub fn new(expects_footer: bool) -> Self {
        Self {
            expects_footer,
            header: None,
            body: None,
            footer: None,
            announced: false,
        }
    }

    /// Records one slot measurement. Returns the complete heights the first
    /// time all expected slots are known; `None` on every other call.
    /// Later re-measurements update the stored heights without re-triggering
    /// the ready edge — callers read them through [`Self::heights`].
    pub fn record(&mut self, slot: SlotKind, height: f32) -> Option<SlotHeights> {
        let height = height.max(0.0);
        match slot {
            SlotKind::Header => self.header = Some(height),
            SlotKind::Body => self.body = Some(height),
            SlotKind::Footer => self.footer = Some(height),
        }
        if self.ready() && !self.announced {
            self.announced = true;
            return self.heights();
        }
        None
    }

    /// All expected slots have been measured at least once.
    pub fn ready(&self) -> bool {
        let footer_known = !self.expects_footer || self.footer.is_some();
        self.header.is_some() && self.body.is_some() && footer_known
    }

    pub fn heights(&self) -> Option<SlotHeights> {
        if !self.ready() {
            return None;
        }
        Some(SlotHeights {
            header: self.header.unwrap_or(0.0),
            body: self.body.unwrap_or(0.0),
            footer: self.footer.unwrap_or(0.0),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ready_requires_header_and_body() {
        let mut prober = ContentProber::new(false);
        assert!(prober.record(SlotKind::Header, 80.0).is_none());
        assert!(!prober.ready());

        let heights = prober.record(SlotKind::Body, 400.0).expect("ready edge");
        assert_eq!(heights.header, 80.0);
        assert_eq!(heights.body, 400.0);
        assert_eq!(heights.footer, 0.0);
    }

    #[test]
    fn footer_slot_gates_ready_when_expected() {
        let mut prober = ContentProber::new(true);
        prober.record(SlotKind::Header, 80.0);
        assert!(prober.record(SlotKind::Body, 400.0).is_none());
        assert!(!prober.ready());

        let heights = prober.record(SlotKind::Footer, 60.0).expect("ready edge");
        assert_eq!(heights.footer, 60.0);
    }

    #[test]
    fn ready_edge_fires_exactly_once() {
        let mut prober = ContentProber::new(false);
        prober.record(SlotKind::Header, 80.0);
        assert!(prober.record(SlotKind::Body, 400.0).is_some());
        // Re-measurement updates heights without a second edge.
        assert!(prober.record(SlotKind::Body, 500.0).is_none());
        assert_eq!(prober.heights().unwrap().body, 500.0);
    }

    #[test]
    fn negative_measurements_are_clamped() {
        let mut prober = ContentProber::new(false);
        prober.record(SlotKind::Header, -5.0);
        let heights = prober.record(SlotKind::Body, 100.0).unwrap();
        assert_eq!(heights.header, 0.0);
    }
}
