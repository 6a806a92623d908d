use std::time::{Duration, Instant};

/// Default scroll pacing -- deliberately slow so the text is readable
/// on a low-resolution VR overlay capture.
pub const DEFAULT_WINDOW_CHARS: usize = 36;
pub const DEFAULT_STEP_MS: u64 = 350;
pub const DEFAULT_START_PAUSE_MS: u64 = 3500;
pub const DEFAULT_GAP: &str = "   •   ";

/// Tuning knobs for the title marquee (persisted in AppConfig)
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MarqueeSettings {
    pub enabled: bool,

    /// Visible window width in characters
    pub window_chars: usize,

    /// Time between single-character scroll steps
    pub step_ms: u64,

    /// Hold the start of the title this long before scrolling begins
    pub start_pause_ms: u64,

    /// Spacer inserted between the end of the title and its repeat
    pub gap: String,
}

impl Default for MarqueeSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            window_chars: DEFAULT_WINDOW_CHARS,
            step_ms: DEFAULT_STEP_MS,
            start_pause_ms: DEFAULT_START_PAUSE_MS,
            gap: DEFAULT_GAP.to_string(),
        }
    }
}

/// Scrolls a long line of text through a fixed-width character window.
///
/// All timing is derived from the `Instant` passed by the caller, so the
/// render loop just asks "what is the line right now" every frame and the
/// whole thing stays unit-testable without sleeping.
pub struct Marquee {
    settings: MarqueeSettings,

    /// The text as set, trimmed
    text: Vec<char>,

    /// text + gap + text. Empty when the text fits the window (static mode)
    run: Vec<char>,

    /// When the current text was installed
    set_at: Instant,
}

impl Marquee {
    pub fn new(settings: MarqueeSettings) -> Self {
        Self {
            settings,
            text: Vec::new(),
            run: Vec::new(),
            set_at: Instant::now(),
        }
    }

    /// Install new text and restart the scroll cycle (start pause included)
    pub fn set_text(&mut self, text: &str, now: Instant) {
        self.text = text.trim().chars().collect();
        self.set_at = now;

        // Short titles never scroll
        if !self.settings.enabled || self.text.len() <= self.settings.window_chars {
            self.run.clear();
            return;
        }

        // Scroll string is the title twice with a spacer, so the wrap-around
        // reads continuously instead of snapping back to the start
        let mut run = self.text.clone();
        run.extend(self.settings.gap.chars());
        run.extend(self.text.iter().copied());
        self.run = run;
    }

    pub fn is_scrolling(&self) -> bool {
        !self.run.is_empty()
    }

    /// The visible line at `now`.
    ///
    /// While scrolling, windows are always padded to `window_chars` so the
    /// label width stays stable frame to frame.
    pub fn current_line(&self, now: Instant) -> String {
        if !self.is_scrolling() {
            return self.text.iter().collect();
        }
        self.window_at(self.index_at(now))
    }

    /// How long until the displayed line next changes. None in static mode --
    /// the render loop uses this to pick its repaint deadline.
    pub fn time_to_next_step(&self, now: Instant) -> Option<Duration> {
        if !self.is_scrolling() {
            return None;
        }

        let elapsed = now.duration_since(self.set_at);
        let pause = Duration::from_millis(self.settings.start_pause_ms);
        let step = Duration::from_millis(self.settings.step_ms.max(1));

        if elapsed < pause {
            return Some(pause - elapsed);
        }
        let since_pause = elapsed - pause;
        let into_step = Duration::from_nanos((since_pause.as_nanos() % step.as_nanos()) as u64);
        Some(step - into_step)
    }

    /// Scroll position at `now`: hold index 0 through the start pause, then
    /// advance one char per step, wrapping modulo the scroll string.
    fn index_at(&self, now: Instant) -> usize {
        let elapsed = now.duration_since(self.set_at);
        let pause = Duration::from_millis(self.settings.start_pause_ms);
        if elapsed < pause {
            return 0;
        }

        let step_ms = self.settings.step_ms.max(1) as u128;
        let steps = ((elapsed - pause).as_millis() / step_ms) as usize;
        steps % self.run.len()
    }

    fn window_at(&self, index: usize) -> String {
        let width = self.settings.window_chars;
        let mut line: String = self.run[index..self.run.len().min(index + width)]
            .iter()
            .collect();

        // Tail windows near the end of the scroll string come up short;
        // pad so the next cycle starts from a clean full-width line
        let shown = self.run.len().min(index + width) - index;
        for _ in shown..width {
            line.push(' ');
        }
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> MarqueeSettings {
        MarqueeSettings {
            enabled: true,
            window_chars: 10,
            step_ms: 100,
            start_pause_ms: 1000,
            gap: " • ".to_string(),
        }
    }

    fn at(t0: Instant, ms: u64) -> Instant {
        t0 + Duration::from_millis(ms)
    }

    #[test]
    fn test_short_text_is_static() {
        let t0 = Instant::now();
        let mut m = Marquee::new(settings());
        m.set_text("Short", t0);

        assert!(!m.is_scrolling());
        assert_eq!(m.current_line(at(t0, 0)), "Short");
        // No step deadline in static mode
        assert_eq!(m.time_to_next_step(at(t0, 5000)), None);
        // And it stays put forever
        assert_eq!(m.current_line(at(t0, 60_000)), "Short");
    }

    #[test]
    fn test_exact_window_width_is_static() {
        let t0 = Instant::now();
        let mut m = Marquee::new(settings());
        m.set_text("1234567890", t0); // exactly 10 chars
        assert!(!m.is_scrolling());
        assert_eq!(m.current_line(at(t0, 9999)), "1234567890");
    }

    #[test]
    fn test_holds_head_during_start_pause() {
        let t0 = Instant::now();
        let mut m = Marquee::new(settings());
        m.set_text("ABCDEFGHIJKLMNOP", t0); // 16 chars > 10

        assert!(m.is_scrolling());
        assert_eq!(m.current_line(at(t0, 0)), "ABCDEFGHIJ");
        assert_eq!(m.current_line(at(t0, 999)), "ABCDEFGHIJ");
    }

    #[test]
    fn test_scrolls_one_char_per_step() {
        let t0 = Instant::now();
        let mut m = Marquee::new(settings());
        m.set_text("ABCDEFGHIJKLMNOP", t0);

        // Pause ends at 1000ms: first post-pause window is still index 0
        assert_eq!(m.current_line(at(t0, 1000)), "ABCDEFGHIJ");
        assert_eq!(m.current_line(at(t0, 1100)), "BCDEFGHIJK");
        assert_eq!(m.current_line(at(t0, 1200)), "CDEFGHIJKL");
        // Mid-step: no change until the step boundary
        assert_eq!(m.current_line(at(t0, 1250)), "CDEFGHIJKL");
    }

    #[test]
    fn test_gap_scrolls_into_view() {
        let t0 = Instant::now();
        let mut m = Marquee::new(settings());
        m.set_text("ABCDEFGHIJKLMNOP", t0);

        // Index 16 puts the window right at the gap (16 text + 3 gap + 16 text)
        let line = m.current_line(at(t0, 1000 + 16 * 100));
        assert_eq!(line, " • ABCDEFG");
    }

    #[test]
    fn test_tail_windows_are_padded() {
        let t0 = Instant::now();
        let mut m = Marquee::new(settings());
        m.set_text("ABCDEFGHIJKLMNOP", t0);

        // Run is 35 chars; index 30 leaves only 5 visible chars
        let line = m.current_line(at(t0, 1000 + 30 * 100));
        assert_eq!(line.chars().count(), 10);
        assert_eq!(line, "LMNOP     ");
    }

    #[test]
    fn test_wraps_modulo_run_length() {
        let t0 = Instant::now();
        let mut m = Marquee::new(settings());
        m.set_text("ABCDEFGHIJKLMNOP", t0);

        // Run length is 35, so step 35 lands back on index 0
        assert_eq!(m.current_line(at(t0, 1000 + 35 * 100)), "ABCDEFGHIJ");
        // A couple of full cycles later, still consistent
        assert_eq!(
            m.current_line(at(t0, 1000 + (35 * 3 + 1) * 100)),
            "BCDEFGHIJK"
        );
    }

    #[test]
    fn test_set_text_restarts_the_cycle() {
        let t0 = Instant::now();
        let mut m = Marquee::new(settings());
        m.set_text("ABCDEFGHIJKLMNOP", t0);
        let _ = m.current_line(at(t0, 2000));

        // New track -> back to the head with a fresh pause
        let t1 = at(t0, 2500);
        m.set_text("QRSTUVWXYZ0123456789", t1);
        assert_eq!(m.current_line(at(t1, 0)), "QRSTUVWXYZ");
        assert_eq!(m.current_line(at(t1, 999)), "QRSTUVWXYZ");
    }

    #[test]
    fn test_unicode_titles_scroll_on_char_boundaries() {
        let t0 = Instant::now();
        let mut m = Marquee::new(settings());
        m.set_text("日本語のとても長いタイトルです", t0); // 15 chars > 10

        assert!(m.is_scrolling());
        let head = m.current_line(at(t0, 0));
        assert_eq!(head.chars().count(), 10);
        assert_eq!(head, "日本語のとても長いタ");

        let shifted = m.current_line(at(t0, 1100));
        assert_eq!(shifted.chars().count(), 10);
        assert_eq!(shifted, "本語のとても長いタイ");
    }

    #[test]
    fn test_disabled_marquee_never_scrolls() {
        let t0 = Instant::now();
        let mut cfg = settings();
        cfg.enabled = false;
        let mut m = Marquee::new(cfg);
        m.set_text("ABCDEFGHIJKLMNOP", t0);

        assert!(!m.is_scrolling());
        assert_eq!(m.current_line(at(t0, 10_000)), "ABCDEFGHIJKLMNOP");
    }

    #[test]
    fn test_time_to_next_step() {
        let t0 = Instant::now();
        let mut m = Marquee::new(settings());
        m.set_text("ABCDEFGHIJKLMNOP", t0);

        // During the pause: deadline is the end of the pause
        assert_eq!(
            m.time_to_next_step(at(t0, 400)),
            Some(Duration::from_millis(600))
        );
        // While scrolling: deadline is the next step boundary
        assert_eq!(
            m.time_to_next_step(at(t0, 1150)),
            Some(Duration::from_millis(50))
        );
    }
}
