use std::time::{Duration, Instant};

/// Maps wall-clock time since a move onto a 0..1 transition ratio.
///
/// Holds no resources; starting a new move simply replaces the guide.
#[derive(Clone, Copy, Debug)]
pub struct AnimationGuide {
    start: Instant,
    duration: Duration,
}

impl AnimationGuide {
    pub fn new(duration: Duration) -> Self {
        Self::starting_at(Instant::now(), duration)
    }

    pub fn starting_at(start: Instant, duration: Duration) -> Self {
        AnimationGuide { start, duration }
    }

    pub fn reached(&self) -> bool {
        self.reached_at(Instant::now())
    }

    pub fn progress(&self) -> f32 {
        self.progress_at(Instant::now())
    }

    pub fn reached_at(&self, now: Instant) -> bool {
        self.progress_at(now) >= 1.0
    }

    /// Elapsed time over duration. Keeps growing past 1.0 once reached.
    pub fn progress_at(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.start);
        elapsed.as_secs_f32() / self.duration.as_secs_f32()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn progress_is_elapsed_over_duration() {
        let start = Instant::now();
        let guide = AnimationGuide::starting_at(start, Duration::from_millis(200));
        assert_eq!(guide.progress_at(start), 0.0);
        let half = guide.progress_at(start + Duration::from_millis(100));
        assert!((half - 0.5).abs() < 1e-4, "got {}", half);
        assert!(!guide.reached_at(start + Duration::from_millis(199)));
        assert!(guide.reached_at(start + Duration::from_millis(200)));
    }

    #[test]
    fn progress_overshoots_after_completion() {
        let start = Instant::now();
        let guide = AnimationGuide::starting_at(start, Duration::from_millis(100));
        let later = guide.progress_at(start + Duration::from_millis(300));
        assert!(later > 2.9);
        assert!(guide.reached_at(start + Duration::from_millis(300)));
    }

    #[test]
    fn progress_never_decreases() {
        let start = Instant::now();
        let guide = AnimationGuide::starting_at(start, Duration::from_millis(150));
        let mut previous = f32::MIN;
        for ms in (0..400).step_by(7) {
            let now = start + Duration::from_millis(ms);
            let p = guide.progress_at(now);
            assert!(p >= previous);
            assert_eq!(guide.reached_at(now), p >= 1.0);
            previous = p;
        }
    }

    #[test]
    fn time_before_start_reads_as_zero() {
        let start = Instant::now() + Duration::from_secs(1);
        let guide = AnimationGuide::starting_at(start, Duration::from_millis(100));
        assert_eq!(guide.progress_at(Instant::now()), 0.0);
    }

    #[test]
    fn zero_duration_is_already_reached() {
        let guide = AnimationGuide::new(Duration::ZERO);
        assert!(guide.reached());
        assert_eq!(guide.progress(), 1.0);
    }
}
