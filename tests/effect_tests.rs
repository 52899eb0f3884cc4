//! Integration tests for the `Effect` lazy container.
//!
//! Tests cover:
//! - Deferred execution (nothing runs before `run`)
//! - The unwrap rule across whole pipelines
//! - Short-circuiting on halting containers
//! - Recovery (`catch`/`catch_with`) and contract-violation re-raising

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use monadic::contract::ContractViolation;
use monadic::lazy::{Computed, Effect};
use monadic::simple::Outcome;
use rstest::rstest;

#[rstest]
fn effect_pipeline_unwraps_both_simple_families() {
    let effect: Effect<String, i32> = Effect::new_simple(|| Outcome::success(5))
        .fmap_simple(|x| Outcome::just(x + 3))
        .flat_map(|x| Effect::new(move || x * 2));
    assert_eq!(effect.run(), Computed::Plain(16));
}

#[rstest]
fn effect_runs_steps_in_chained_order() {
    let trace = Arc::new(AtomicUsize::new(0));

    let first = trace.clone();
    let second = trace.clone();
    let effect: Effect<String, usize> = Effect::new(move || {
        // First step observes an untouched trace.
        first.fetch_add(1, Ordering::SeqCst)
    })
    .flat_map(move |seen| {
        let count = second.fetch_add(1, Ordering::SeqCst);
        Effect::pure(seen + count)
    });

    assert_eq!(trace.load(Ordering::SeqCst), 0);
    assert_eq!(effect.run(), Computed::Plain(1)); // 0 + 1
    assert_eq!(trace.load(Ordering::SeqCst), 2);
}

#[rstest]
fn effect_halting_propagates_without_running_later_steps() {
    let executed = Arc::new(AtomicUsize::new(0));
    let executed_clone = executed.clone();

    let effect: Effect<String, i32> = Effect::new_simple(|| Outcome::fail("boom".to_string()))
        .fmap(|x: i32| x + 1)
        .fmap_simple(|x| Outcome::just(x))
        .flat_map(move |x| {
            executed_clone.fetch_add(1, Ordering::SeqCst);
            Effect::pure(x)
        });

    assert_eq!(
        effect.run(),
        Computed::Wrapped(Outcome::fail("boom".to_string()))
    );
    assert_eq!(executed.load(Ordering::SeqCst), 0);
}

#[rstest]
fn effect_fold_sees_raw_base_shape() {
    let continuing: Effect<String, i32> = Effect::new_simple(|| Outcome::just(9));
    let rendered = continuing.fold(
        |value| format!("continuing {value}"),
        |halting| format!("halting {halting}"),
        |value| format!("plain {value}"),
    );
    assert_eq!(rendered, "continuing 9");
}

#[rstest]
fn effect_fold_after_transformation_sees_plain() {
    // A continuing container produced by a step is unwrapped once more
    // before being stored, so fold observes a plain value.
    let effect: Effect<String, i32> = Effect::pure(1).fmap_simple(|x| Outcome::success(x + 1));
    let rendered = effect.fold(|_| "continuing", |_| "halting", |_| "plain");
    assert_eq!(rendered, "plain");
}

#[rstest]
fn effect_catch_recovers_only_ordinary_panics() {
    let recovered: Effect<String, i32> =
        Effect::new(|| panic!("worse")).catch(|message| message.len() as i32);
    assert_eq!(recovered.run(), Computed::Plain(5));
}

#[rstest]
fn effect_catch_with_absorbs_recovery_container() {
    let recovered: Effect<String, i32> = Effect::new(|| panic!("boom"))
        .catch_with(|_| Effect::new_simple(|| Outcome::just(7)));
    assert_eq!(recovered.run(), Computed::Plain(7));
}

#[rstest]
fn contract_violation_reaches_the_run_caller_through_catch() {
    let effect: Effect<String, i32> = Effect::new_simple(|| {
        let halted: Outcome<String, i32> = Outcome::nothing();
        // Misuse: extracting from a halting container raises a violation.
        Outcome::success(halted.extract())
    })
    .catch(|_| 0)
    .catch_with(|_| Effect::pure(0));

    let panicked = catch_unwind(AssertUnwindSafe(move || effect.run())).unwrap_err();
    let violation = panicked.downcast::<ContractViolation>().unwrap();
    assert_eq!(violation.operation, "extract");
}

#[rstest]
fn effect_pure_then_product() {
    let paired: Effect<String, (i32, &str)> = Effect::pure(1).product(Effect::pure("two"));
    assert_eq!(paired.run(), Computed::Plain((1, "two")));
}
