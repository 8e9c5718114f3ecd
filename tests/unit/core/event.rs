use super::*;
use std::sync::atomic::{AtomicUsize, Ordering};

#[test]
fn emit_reaches_subscribed_handler() {
    let source = EventSource::<bool>::new();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let _sub = source.subscribe(move |v| sink.lock().unwrap().push(v));

    source.emit(true);
    source.emit(false);

    assert_eq!(*seen.lock().unwrap(), vec![true, false]);
}

#[test]
fn dropping_subscription_unregisters() {
    let source = EventSource::<u8>::new();
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&hits);
    let sub = source.subscribe(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    assert_eq!(source.handler_count(), 1);

    source.emit(1);
    drop(sub);
    source.emit(2);

    assert_eq!(hits.load(Ordering::SeqCst), 1);
    assert_eq!(source.handler_count(), 0);
}

#[test]
fn unsubscribe_only_removes_own_handler() {
    let source = EventSource::<()>::new();
    let a = source.subscribe(|_| {});
    let _b = source.subscribe(|_| {});

    a.unsubscribe();
    assert_eq!(source.handler_count(), 1);
}

#[test]
fn subscription_outliving_source_is_harmless() {
    let source = EventSource::<()>::new();
    let sub = source.subscribe(|_| {});
    drop(source);
    drop(sub);
}

#[test]
fn handler_may_emit_reentrantly() {
    let source = Arc::new(EventSource::<u32>::new());
    let hits = Arc::new(AtomicUsize::new(0));
    let inner_source = Arc::clone(&source);
    let counter = Arc::clone(&hits);
    let _sub = source.subscribe(move |depth| {
        counter.fetch_add(1, Ordering::SeqCst);
        if depth < 2 {
            inner_source.emit(depth + 1);
        }
    });

    source.emit(0);
    assert_eq!(hits.load(Ordering::SeqCst), 3);
}
