//! Coordinator and completion-barrier behavior, no OS signals involved.

use std::time::Duration;

use terminator::{ShutdownCoordinator, WorkGroup};
use tokio::time::timeout;

const WAIT_BOUND: Duration = Duration::from_secs(1);

#[tokio::test]
async fn stop_is_observed_and_irreversible() {
    let shutdown = ShutdownCoordinator::new();
    assert!(!shutdown.is_stopped());

    shutdown.stop();

    // Repeated queries keep returning stopped, with no side effects.
    for _ in 0..10 {
        assert!(shutdown.is_stopped());
    }
}

#[tokio::test]
async fn stop_is_idempotent() {
    let shutdown = ShutdownCoordinator::new();
    shutdown.stop();
    shutdown.stop();
    assert!(shutdown.is_stopped());
}

#[tokio::test]
async fn all_concurrent_observers_wake_on_stop() {
    let shutdown = ShutdownCoordinator::new();

    let mut observers = Vec::new();
    for _ in 0..10 {
        let signal = shutdown.stop_signal();
        observers.push(tokio::spawn(async move { signal.cancelled().await }));
    }

    // Give the tasks time to start waiting.
    tokio::time::sleep(Duration::from_millis(10)).await;
    shutdown.stop();

    for observer in observers {
        timeout(WAIT_BOUND, observer)
            .await
            .expect("observer was not woken by stop")
            .expect("observer task panicked");
    }
}

#[tokio::test]
async fn late_observer_sees_closed_signal_immediately() {
    let shutdown = ShutdownCoordinator::new();
    shutdown.stop();

    let signal = shutdown.stop_signal();
    assert!(signal.is_cancelled());
    timeout(WAIT_BOUND, signal.cancelled())
        .await
        .expect("late observer did not see the closed signal");
}

#[tokio::test]
async fn cancelling_an_observation_handle_does_not_stop_the_coordinator() {
    let shutdown = ShutdownCoordinator::new();
    let handle = shutdown.stop_signal();
    handle.cancel();
    assert!(!shutdown.is_stopped());
}

#[tokio::test]
async fn stopped_returns_immediately_when_already_stopped() {
    let shutdown = ShutdownCoordinator::new();
    shutdown.stop();

    timeout(WAIT_BOUND, shutdown.stopped())
        .await
        .expect("stopped() hung despite the signal being closed");
}

#[tokio::test]
async fn drain_returns_once_work_reaches_zero_and_not_before() {
    let shutdown = ShutdownCoordinator::new();
    shutdown.add_work(2);
    shutdown.work_done();

    // One unit still in flight: drain must not complete.
    assert!(
        timeout(Duration::from_millis(100), shutdown.drain())
            .await
            .is_err()
    );
    assert_eq!(shutdown.in_flight(), 1);

    let finisher = {
        let shutdown = shutdown.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            shutdown.work_done();
        })
    };

    timeout(WAIT_BOUND, shutdown.drain())
        .await
        .expect("drain did not return after the count reached zero");
    assert_eq!(shutdown.in_flight(), 0);
    finisher.await.expect("finisher task panicked");
}

#[tokio::test]
async fn drain_returns_immediately_with_no_work() {
    let shutdown = ShutdownCoordinator::new();
    timeout(WAIT_BOUND, shutdown.drain())
        .await
        .expect("drain hung with nothing registered");
}

#[tokio::test]
async fn multiple_waiters_all_unblock_at_zero() {
    let shutdown = ShutdownCoordinator::new();
    shutdown.add_work(1);

    let mut waiters = Vec::new();
    for _ in 0..10 {
        let shutdown = shutdown.clone();
        waiters.push(tokio::spawn(async move { shutdown.drain().await }));
    }

    tokio::time::sleep(Duration::from_millis(10)).await;
    shutdown.work_done();

    for waiter in waiters {
        timeout(WAIT_BOUND, waiter)
            .await
            .expect("a waiter was not unblocked at zero")
            .expect("waiter task panicked");
    }
}

#[tokio::test]
async fn barrier_is_reusable_after_draining() {
    let work = WorkGroup::new();
    work.add(1);
    work.done();
    timeout(WAIT_BOUND, work.wait())
        .await
        .expect("wait hung after the first drain");

    // Work resumes: a later wait must block again until it drains.
    work.add(1);
    assert!(
        timeout(Duration::from_millis(100), work.wait())
            .await
            .is_err()
    );
    work.done();
    timeout(WAIT_BOUND, work.wait())
        .await
        .expect("wait hung after the second drain");
}

#[tokio::test]
async fn work_guard_deregisters_on_drop() {
    let shutdown = ShutdownCoordinator::new();
    let guard = shutdown.track_work();
    assert_eq!(shutdown.in_flight(), 1);

    drop(guard);
    assert_eq!(shutdown.in_flight(), 0);
    timeout(WAIT_BOUND, shutdown.drain())
        .await
        .expect("drain hung after the guard dropped");
}

#[test]
#[should_panic(expected = "no registered work")]
fn finishing_unregistered_work_panics() {
    let work = WorkGroup::new();
    work.done();
}
