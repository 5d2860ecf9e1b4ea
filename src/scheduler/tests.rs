//! Tests for the timer drivers

#[cfg(test)]
mod tests {
    use crate::scheduler::{ManualTimers, Timers, TokioTimers};
    use std::sync::Arc;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn counter() -> (Arc<AtomicUsize>, impl Fn() -> Box<dyn FnOnce() + Send>) {
        let count = Arc::new(AtomicUsize::new(0));
        let shared = count.clone();
        let make = move || {
            let shared = shared.clone();
            Box::new(move || {
                shared.fetch_add(1, Ordering::SeqCst);
            }) as Box<dyn FnOnce() + Send>
        };
        (count, make)
    }

    #[test]
    fn test_manual_timer_fires_only_after_delay() {
        let timers = ManualTimers::new();
        let (count, make) = counter();
        timers.schedule(Duration::from_millis(150), make());

        assert_eq!(timers.advance(Duration::from_millis(149)), 0);
        assert_eq!(count.load(Ordering::SeqCst), 0);

        assert_eq!(timers.advance(Duration::from_millis(1)), 1);
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(timers.now(), Duration::from_millis(150));
    }

    #[test]
    fn test_manual_timer_fires_once() {
        let timers = ManualTimers::new();
        let (count, make) = counter();
        timers.schedule(Duration::from_millis(10), make());

        timers.advance(Duration::from_millis(50));
        timers.advance(Duration::from_millis(50));
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(timers.pending(), 0);
    }

    #[test]
    fn test_cancelled_timer_never_fires() {
        let timers = ManualTimers::new();
        let (count, make) = counter();
        let handle = timers.schedule(Duration::from_millis(10), make());
        assert_eq!(timers.pending(), 1);

        handle.cancel();
        assert_eq!(timers.pending(), 0);
        assert_eq!(timers.advance(Duration::from_millis(100)), 0);
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_manual_timers_fire_in_deadline_order() {
        let timers = ManualTimers::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        for (label, delay) in [("late", 30), ("early", 10), ("tie", 10)] {
            let order = order.clone();
            timers.schedule(
                Duration::from_millis(delay),
                Box::new(move || order.lock().unwrap().push(label)),
            );
        }

        assert_eq!(timers.advance(Duration::from_millis(30)), 3);
        assert_eq!(*order.lock().unwrap(), vec!["early", "tie", "late"]);
    }

    #[test]
    fn test_callback_may_schedule_within_window() {
        let timers = Arc::new(ManualTimers::new());
        let (count, make) = counter();

        let inner = timers.clone();
        let follow_up = make();
        timers.schedule(
            Duration::from_millis(10),
            Box::new(move || {
                inner.schedule(Duration::from_millis(10), follow_up);
            }),
        );

        assert_eq!(timers.advance(Duration::from_millis(15)), 1);
        assert_eq!(count.load(Ordering::SeqCst), 0);
        assert_eq!(timers.advance(Duration::from_millis(5)), 1);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_tokio_timer_respects_cancel() {
        let timers = TokioTimers::new();
        let (count, make) = counter();

        timers.schedule(Duration::from_millis(100), make());
        let cancelled = timers.schedule(Duration::from_millis(100), make());
        cancelled.cancel();

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_manual_sleep_advances_clock() {
        let timers = ManualTimers::new();
        let (count, make) = counter();
        timers.schedule(Duration::from_millis(150), make());

        timers.sleep(Duration::from_millis(160)).await;
        assert_eq!(timers.now(), Duration::from_millis(160));
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }
}
