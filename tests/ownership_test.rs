use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use threadbridge::{AwaitError, ThreadBridge, ThreadError};

use common::{DropTracker, InlineThreads, RefusingThreads, SilentThreads, UnjoinableThreads};

mod common;

#[test]
fn failed_launch_releases_the_runnable() {
    let threads = RefusingThreads::default();
    let bridge = ThreadBridge::new(threads.clone());
    let drops = Arc::new(AtomicUsize::new(0));
    let ran = Arc::new(AtomicUsize::new(0));

    let tracker = DropTracker(drops.clone());
    let ran_in_body = ran.clone();
    let result = bridge.spawn(tracker, move |tracker: DropTracker| {
        ran_in_body.fetch_add(1, Ordering::SeqCst);
        Ok::<_, ()>(tracker.0.load(Ordering::SeqCst))
    });

    match result {
        Err(ThreadError::FailToLaunch { io_error }) => assert_eq!(io_error.kind(), std::io::ErrorKind::WouldBlock),
        Err(other) => panic!("unexpected error: {}", other),
        Ok(_) => panic!("the refusing threads launched something."),
    }
    assert_eq!(threads.attempts.load(Ordering::SeqCst), 1);
    // the argument was dropped exactly once, the body never ran.
    assert_eq!(drops.load(Ordering::SeqCst), 1);
    assert_eq!(ran.load(Ordering::SeqCst), 0);
    // and nothing else holds what the closure captured.
    assert_eq!(Arc::strong_count(&ran), 1);
}

#[test]
fn launch_can_be_retried_after_failure() {
    let refusing = ThreadBridge::new(RefusingThreads::default());
    let payload = Arc::new(String::from("retry me"));

    let captured = payload.clone();
    let err = refusing
        .spawn(captured, |s: Arc<String>| Ok::<_, ()>(s.len()))
        .err()
        .expect("launch should fail.");
    assert!(err.is_launch_failure());
    assert_eq!(Arc::strong_count(&payload), 1);

    let bridge: ThreadBridge = ThreadBridge::default();
    let handle = bridge
        .spawn(payload.clone(), |s: Arc<String>| Ok::<_, ()>(s.len()))
        .expect("the real threads should launch.");
    assert_eq!(handle.join().unwrap(), 8);
    assert_eq!(Arc::strong_count(&payload), 1);
}

#[test]
fn successful_launch_releases_the_runnable_on_the_worker() {
    let drops = Arc::new(AtomicUsize::new(0));
    let bridge: ThreadBridge = ThreadBridge::default();
    let handle = bridge
        .spawn(DropTracker(drops.clone()), |tracker: DropTracker| {
            let before = tracker.0.load(Ordering::SeqCst);
            drop(tracker);
            Ok::<_, ()>(before)
        })
        .unwrap();
    assert_eq!(handle.join().unwrap(), 0);
    assert_eq!(drops.load(Ordering::SeqCst), 1);
}

#[test]
fn unused_argument_is_dropped_once_with_the_runnable() {
    let drops = Arc::new(AtomicUsize::new(0));
    let bridge: ThreadBridge = ThreadBridge::default();
    let handle = bridge
        .spawn(DropTracker(drops.clone()), |_tracker: DropTracker| Ok::<_, ()>(()))
        .unwrap();
    handle.join().unwrap();
    assert_eq!(drops.load(Ordering::SeqCst), 1);
}

#[test]
fn panicking_body_still_frees_its_captures() {
    let drops = Arc::new(AtomicUsize::new(0));
    let tracker = DropTracker(drops.clone());
    let bridge: ThreadBridge = ThreadBridge::default();
    let handle = bridge
        .spawn_fn(move || -> Result<(), ()> {
            let _tracker = tracker;
            panic!("unwinding past the tracker")
        })
        .unwrap();
    assert!(handle.join().expect_err("the body panicked.").is_panic());
    assert_eq!(drops.load(Ordering::SeqCst), 1);
}

#[test]
fn inline_threads_run_on_the_caller() {
    let bridge = ThreadBridge::new(InlineThreads);
    let caller = thread::current().id();
    let handle = bridge.spawn(caller, |caller| Ok::<_, ()>(thread::current().id() == caller)).unwrap();
    assert!(handle.join().unwrap());
}

#[test]
fn join_failure_is_reported() {
    let bridge = ThreadBridge::new(UnjoinableThreads);
    let handle = bridge.spawn(1, |a: i32| Ok::<_, ()>(a)).unwrap();
    match handle.join() {
        Err(AwaitError::Thread(ThreadError::FailToJoin { io_error })) => {
            assert_eq!(io_error.kind(), std::io::ErrorKind::Other)
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn missing_result_is_reported() {
    let bridge = ThreadBridge::new(SilentThreads);
    let handle = bridge.spawn_fn(|| Ok::<_, ()>(1)).unwrap();
    match handle.join() {
        Err(AwaitError::Thread(ThreadError::MissingResult)) => (),
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn handles_move_between_threads() {
    let bridge: ThreadBridge = ThreadBridge::default();
    let handle = bridge.spawn(6, |a: u32| Ok::<_, ()>(a * 7)).unwrap();
    let joiner = thread::spawn(move || handle.join());
    assert_eq!(joiner.join().unwrap().unwrap(), 42);
}
