/// Elapsed play time. The host passes in the current time in milliseconds;
/// nothing here schedules or sleeps.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Stopwatch {
    started_at: Option<f64>,
    stopped_at: Option<f64>,
}

impl Stopwatch {
    pub fn start(&mut self, now: f64) {
        self.started_at = Some(now);
        self.stopped_at = None;
    }

    /// Freeze the reading. Does nothing if the stopwatch is not running.
    pub fn stop(&mut self, now: f64) {
        if self.is_running() {
            self.stopped_at = Some(now);
        }
    }

    pub fn reset(&mut self) {
        *self = Stopwatch::default();
    }

    pub fn is_running(&self) -> bool {
        self.started_at.is_some() && self.stopped_at.is_none()
    }

    pub fn elapsed_ms(&self, now: f64) -> f64 {
        match self.started_at {
            Some(start) => (self.stopped_at.unwrap_or(now) - start).max(0.0),
            None => 0.0,
        }
    }

    pub fn display(&self, now: f64) -> String {
        format_elapsed(self.elapsed_ms(now))
    }
}

/// `MM:SS`, minutes keep counting past 99.
pub fn format_elapsed(ms: f64) -> String {
    let total = (ms.max(0.0) / 1000.0).floor() as u64;
    format!("{:02}:{:02}", total / 60, total % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, "00:00")]
    #[case(999.0, "00:00")]
    #[case(1000.0, "00:01")]
    #[case(61_500.0, "01:01")]
    #[case(3_599_000.0, "59:59")]
    #[case(6_000_000.0, "100:00")]
    #[case(-20.0, "00:00")]
    fn formats(#[case] ms: f64, #[case] expected: &str) {
        assert_eq!(format_elapsed(ms), expected);
    }

    #[test]
    fn runs_and_freezes() {
        let mut sw = Stopwatch::default();
        assert_eq!(sw.display(5000.0), "00:00");
        sw.start(1000.0);
        assert!(sw.is_running());
        assert_eq!(sw.display(6000.0), "00:05");
        sw.stop(8000.0);
        assert!(!sw.is_running());
        assert_eq!(sw.display(60_000.0), "00:07");
        // a second stop keeps the first reading
        sw.stop(20_000.0);
        assert_eq!(sw.elapsed_ms(90_000.0), 7000.0);
    }

    #[test]
    fn restart_clears_previous_run() {
        let mut sw = Stopwatch::default();
        sw.start(0.0);
        sw.stop(5000.0);
        sw.start(10_000.0);
        assert_eq!(sw.display(12_000.0), "00:02");
        sw.reset();
        assert_eq!(sw.elapsed_ms(50_000.0), 0.0);
    }
}
