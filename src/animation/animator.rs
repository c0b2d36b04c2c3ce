use std::collections::HashMap;

use super::easing::{lerp, Easing};

/// Called with `(value, raw_progress)` on every advance
pub type UpdateFn = Box<dyn FnMut(f64, f64)>;

struct Animation {
    start_ms: f64,
    duration_ms: f64,
    from: f64,
    to: f64,
    easing: Easing,
    on_update: UpdateFn,
}

impl Animation {
    fn progress(&self, now_ms: f64) -> f64 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        ((now_ms - self.start_ms) / self.duration_ms).clamp(0.0, 1.0)
    }
}

/// Keyed scalar tweens over wall-clock time, independent of the game tick.
///
/// Scheduling under an existing key replaces that animation.
#[derive(Default)]
pub struct Animator {
    animations: HashMap<String, Animation>,
    now_ms: f64,
}

impl Animator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule starting at the animator's clock (the last `advance` time)
    pub fn schedule<F>(
        &mut self,
        key: impl Into<String>,
        from: f64,
        to: f64,
        duration_ms: f64,
        easing: Easing,
        on_update: F,
    ) where
        F: FnMut(f64, f64) + 'static,
    {
        let start_ms = self.now_ms;
        self.schedule_at(key, start_ms, from, to, duration_ms, easing, on_update);
    }

    #[allow(clippy::too_many_arguments)]
    pub fn schedule_at<F>(
        &mut self,
        key: impl Into<String>,
        start_ms: f64,
        from: f64,
        to: f64,
        duration_ms: f64,
        easing: Easing,
        on_update: F,
    ) where
        F: FnMut(f64, f64) + 'static,
    {
        self.animations.insert(
            key.into(),
            Animation {
                start_ms,
                duration_ms,
                from,
                to,
                easing,
                on_update: Box::new(on_update),
            },
        );
    }

    /// Step every animation to `now_ms`, dropping the ones that finished
    pub fn advance(&mut self, now_ms: f64) {
        self.now_ms = now_ms;

        self.animations.retain(|_, animation| {
            let progress = animation.progress(now_ms);
            let eased = animation.easing.apply(progress);
            let value = lerp(animation.from, animation.to, eased);

            (animation.on_update)(value, progress);

            progress < 1.0
        });
    }

    /// Remove an animation without a final callback
    pub fn cancel(&mut self, key: &str) -> bool {
        self.animations.remove(key).is_some()
    }

    pub fn cancel_all(&mut self) {
        self.animations.clear();
    }

    pub fn is_active(&self, key: &str) -> bool {
        self.animations.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.animations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.animations.is_empty()
    }

    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Calls = Rc<RefCell<Vec<(f64, f64)>>>;

    fn recorder() -> (Calls, impl FnMut(f64, f64) + 'static) {
        let calls: Calls = Rc::default();
        let sink = Rc::clone(&calls);
        (calls, move |value: f64, progress: f64| {
            sink.borrow_mut().push((value, progress))
        })
    }

    #[test]
    fn test_linear_runs_to_completion() {
        let mut animator = Animator::new();
        let (calls, cb) = recorder();
        animator.schedule("x", 0.0, 100.0, 1000.0, Easing::Linear, cb);

        animator.advance(500.0);
        assert_eq!(calls.borrow().last(), Some(&(50.0, 0.5)));
        assert!(animator.is_active("x"));

        animator.advance(1000.0);
        assert_eq!(calls.borrow().last(), Some(&(100.0, 1.0)));
        assert!(!animator.is_active("x"));

        animator.advance(1500.0);
        assert_eq!(calls.borrow().len(), 2);
    }

    #[test]
    fn test_cancel_stops_callbacks() {
        let mut animator = Animator::new();
        let (calls, cb) = recorder();
        animator.schedule("fade", 1.0, 0.0, 400.0, Easing::EaseOut, cb);

        animator.advance(100.0);
        assert!(animator.cancel("fade"));
        animator.advance(200.0);
        animator.advance(1000.0);

        assert_eq!(calls.borrow().len(), 1);
        assert!(!animator.cancel("fade"));
    }

    #[test]
    fn test_schedule_replaces_same_key() {
        let mut animator = Animator::new();
        let (first, cb1) = recorder();
        let (second, cb2) = recorder();

        animator.schedule("pulse", 0.0, 1.0, 100.0, Easing::Linear, cb1);
        animator.schedule("pulse", 10.0, 20.0, 100.0, Easing::Linear, cb2);
        animator.advance(50.0);

        assert!(first.borrow().is_empty());
        assert_eq!(second.borrow().as_slice(), &[(15.0, 0.5)]);
        assert_eq!(animator.len(), 1);
    }

    #[test]
    fn test_schedule_starts_at_last_advance() {
        let mut animator = Animator::new();
        animator.advance(2_000.0);

        let (calls, cb) = recorder();
        animator.schedule("late", 0.0, 10.0, 100.0, Easing::Linear, cb);
        animator.advance(2_050.0);

        assert_eq!(calls.borrow().as_slice(), &[(5.0, 0.5)]);
    }

    #[test]
    fn test_progress_clamped_before_start() {
        let mut animator = Animator::new();
        let (calls, cb) = recorder();
        animator.schedule_at("future", 500.0, 3.0, 9.0, 100.0, Easing::EaseIn, cb);

        animator.advance(100.0);
        assert_eq!(calls.borrow().as_slice(), &[(3.0, 0.0)]);
    }

    #[test]
    fn test_zero_duration_completes_immediately() {
        let mut animator = Animator::new();
        let (calls, cb) = recorder();
        animator.schedule("snap", 0.0, 1.0, 0.0, Easing::Linear, cb);

        animator.advance(0.0);
        assert_eq!(calls.borrow().as_slice(), &[(1.0, 1.0)]);
        assert!(animator.is_empty());
    }

    #[test]
    fn test_cancel_all() {
        let mut animator = Animator::new();
        animator.schedule("a", 0.0, 1.0, 100.0, Easing::Linear, |_, _| {});
        animator.schedule("b", 0.0, 1.0, 100.0, Easing::Linear, |_, _| {});

        animator.cancel_all();
        assert!(animator.is_empty());
    }
}
