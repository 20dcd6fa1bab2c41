//! Counter registry identity, empty-key, and concurrency tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;
use std::thread;

use pulse_core::{CounterRegistry, Var, Vars};

fn registry() -> CounterRegistry {
    CounterRegistry::new(Arc::new(Vars::new()))
}

#[test]
fn same_label_shares_total() {
    let reg = registry();
    let a = reg.get_counter("decide").expect("counter");
    let b = reg.get_counter("decide").expect("counter");

    a.inc();
    b.inc();

    assert!(a.same_as(&b));
    assert_eq!(a.value(), 2);
    assert_eq!(reg.get_counter("decide").unwrap().value(), 2);
    assert_eq!(reg.len(), 1);
}

#[test]
fn empty_label_is_suppressed() {
    let reg = registry();
    assert!(reg.get_counter("").is_none());
    assert!(reg.is_empty());
    assert!(reg.vars().is_empty());
}

#[test]
fn counter_is_exported_with_prefix() {
    let reg = registry();
    reg.get_counter("activate").unwrap().add(3);

    assert_eq!(reg.keys(), vec!["counter.activate".to_string()]);
    match reg.vars().get("counter.activate") {
        Some(Var::Counter(c)) => assert_eq!(c.value(), 3),
        other => panic!("unexpected var: {other:?}"),
    }
    assert_eq!(reg.vars().render()["counter.activate"], 3);
}

#[test]
fn labels_are_independent() {
    let reg = registry();
    reg.get_counter("decide").unwrap().inc();

    assert_eq!(reg.get_counter("decide").unwrap().value(), 1);
    assert_eq!(reg.get_counter("activate").unwrap().value(), 0);
}

#[test]
fn conflicting_var_kind_yields_none() {
    let vars = Arc::new(Vars::new());
    vars.new_string("counter.decide").unwrap();
    let reg = CounterRegistry::new(Arc::clone(&vars));

    assert!(reg.get_counter("decide").is_none());
    assert!(reg.is_empty());
}

#[test]
fn racing_creation_returns_one_instance() {
    let reg = Arc::new(registry());
    let handles: Vec<_> = (0..16)
        .map(|_| {
            let reg = Arc::clone(&reg);
            thread::spawn(move || reg.get_counter("decide").unwrap())
        })
        .collect();

    let counters: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    for c in &counters {
        assert!(c.same_as(&counters[0]));
    }
    assert_eq!(reg.len(), 1);
}

#[test]
fn concurrent_increments_are_not_lost() {
    const THREADS: u64 = 8;
    const PER_THREAD: u64 = 1_000;

    let reg = Arc::new(registry());
    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let reg = Arc::clone(&reg);
            thread::spawn(move || {
                for _ in 0..PER_THREAD {
                    reg.get_counter("decide").unwrap().inc();
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(reg.get_counter("decide").unwrap().value(), THREADS * PER_THREAD);
}
