use std::sync::atomic::{AtomicBool, Ordering};

/// Check whether the session cancellation flag has been raised.
#[must_use]
pub fn cancel_requested(cancel: &AtomicBool) -> bool {
    cancel.load(Ordering::SeqCst)
}

/// Compute transfer progress as a fraction in `[0, 1]`.
///
/// The declared total is advisory only, so over-runs are clamped instead of
/// being reported past the end of the bar.
#[must_use]
pub fn progress_fraction(processed: u64, total: Option<u64>) -> f32 {
    match total {
        Some(total) if total > 0 => (processed as f32 / total as f32).clamp(0.0, 1.0),
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[test]
    fn calculates_progress_fraction() {
        assert_eq!(progress_fraction(0, Some(10)), 0.0);
        assert_eq!(progress_fraction(5, Some(10)), 0.5);
        assert_eq!(progress_fraction(10, Some(10)), 1.0);
        assert_eq!(progress_fraction(5, None), 0.0);
        assert_eq!(progress_fraction(5, Some(0)), 0.0);
    }

    #[test]
    fn clamps_overrun_to_one() {
        assert_eq!(progress_fraction(15, Some(10)), 1.0);
    }

    #[test]
    fn reads_cancel_flag() {
        let flag = AtomicBool::new(false);
        assert!(!cancel_requested(&flag));
        flag.store(true, Ordering::SeqCst);
        assert!(cancel_requested(&flag));
    }
}
