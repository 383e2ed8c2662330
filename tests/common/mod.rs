#![allow(dead_code)]

use std::{
    cell::Cell,
    fmt,
    panic::{self, AssertUnwindSafe},
};

use small_cow_vec::SmallCowVec;

pub type Container = SmallCowVec<Element, 3>;

thread_local! {
    static INSTANCES: Cell<usize> = const { Cell::new(0) };
    static CLONES: Cell<usize> = const { Cell::new(0) };
    // 0 disables fault injection, otherwise the number of clones before the faulty one
    static CLONE_FAULT_COUNTDOWN: Cell<usize> = const { Cell::new(0) };
}

/// Payload of the panics raised by [`Element::clone`].
#[derive(Debug)]
pub struct InjectedFault;

/// Element counting its live instances and clones, whose `clone` can be made
/// to panic.
pub struct Element {
    value: i32,
}

impl Element {
    pub fn new(value: i32) -> Self {
        INSTANCES.with(|n| n.set(n.get() + 1));
        Self { value }
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    pub fn instances() -> usize {
        INSTANCES.with(Cell::get)
    }

    pub fn clones() -> usize {
        CLONES.with(Cell::get)
    }

    pub fn reset_counters() {
        CLONES.with(|n| n.set(0));
    }

    /// The `countdown`-th next clone panics, `0` disables injection.
    pub fn set_clone_fault_countdown(countdown: usize) {
        CLONE_FAULT_COUNTDOWN.with(|n| n.set(countdown));
    }

    pub fn assert_no_instances() {
        assert_eq!(Self::instances(), 0, "leaked elements");
    }
}

impl Clone for Element {
    fn clone(&self) -> Self {
        CLONE_FAULT_COUNTDOWN.with(|countdown| match countdown.get() {
            0 => {}
            1 => {
                countdown.set(0);
                panic::panic_any(InjectedFault);
            }
            n => countdown.set(n - 1),
        });
        CLONES.with(|n| n.set(n.get() + 1));
        Self::new(self.value)
    }
}

impl Drop for Element {
    fn drop(&mut self) {
        INSTANCES.with(|n| n.set(n.get() - 1));
    }
}

impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl PartialEq<i32> for Element {
    fn eq(&self, other: &i32) -> bool {
        self.value == *other
    }
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.value, f)
    }
}

/// Disables fault injection while alive, restoring the countdown on drop.
pub struct FaultInjectionDisable(usize);

impl FaultInjectionDisable {
    pub fn new() -> Self {
        Self(CLONE_FAULT_COUNTDOWN.with(|n| n.replace(0)))
    }
}

impl Drop for FaultInjectionDisable {
    fn drop(&mut self) {
        Element::set_clone_fault_countdown(self.0);
    }
}

/// Test fixture: resets the counters, checks that no element leaked at the end.
pub struct Fixture;

impl Fixture {
    pub fn new() -> Self {
        Element::reset_counters();
        Element::set_clone_fault_countdown(0);
        Self
    }
}

impl Drop for Fixture {
    fn drop(&mut self) {
        Element::set_clone_fault_countdown(0);
        if !std::thread::panicking() {
            Element::assert_no_instances();
        }
    }
}

pub fn elements<const N: usize>(values: impl IntoIterator<Item = i32>) -> SmallCowVec<Element, N> {
    values.into_iter().map(Element::new).collect()
}

pub fn expect_eq<const N: usize>(actual: &SmallCowVec<Element, N>, expected: &[i32]) {
    let _disable = FaultInjectionDisable::new();
    let actual = actual.iter().map(Element::value).collect::<Vec<_>>();
    assert_eq!(actual, expected);
}

/// Checks that the elements are stored inside the vector itself.
pub fn expect_static_storage<T, const N: usize>(vec: &SmallCowVec<T, N>) {
    assert_eq!(vec.capacity(), N);
    assert!(vec.is_inline());
    let start = vec as *const SmallCowVec<T, N> as usize;
    let end = start + std::mem::size_of::<SmallCowVec<T, N>>();
    let data = vec.as_ptr() as usize;
    assert!(start <= data && data < end || N == 0);
}

pub fn expect_empty_storage<T, const N: usize>(vec: &SmallCowVec<T, N>) {
    assert!(vec.is_empty());
    assert_eq!(vec.len(), 0);
    expect_static_storage(vec);
}

/// Observable state of a vector: everything strong panic safety must preserve.
#[derive(Debug, PartialEq)]
pub struct Snapshot {
    values: Vec<i32>,
    capacity: usize,
    data: *const Element,
    inline: bool,
    ref_count: usize,
}

impl Snapshot {
    pub fn of<const N: usize>(vec: &SmallCowVec<Element, N>) -> Self {
        Self {
            values: vec.iter().map(Element::value).collect(),
            capacity: vec.capacity(),
            data: vec.as_ptr(),
            inline: vec.is_inline(),
            ref_count: vec.ref_count(),
        }
    }
}

/// Checks that a vector is left unchanged, including its buffer address, by
/// everything happening before the guard is dropped.
pub struct ImmutableGuard<'a, const N: usize> {
    vec: &'a SmallCowVec<Element, N>,
    snapshot: Snapshot,
}

impl<'a, const N: usize> ImmutableGuard<'a, N> {
    pub fn new(vec: &'a SmallCowVec<Element, N>) -> Self {
        Self {
            vec,
            snapshot: Snapshot::of(vec),
        }
    }
}

impl<const N: usize> Drop for ImmutableGuard<'_, N> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            return;
        }
        let Snapshot {
            values,
            capacity,
            data,
            inline,
            ..
        } = Snapshot::of(self.vec);
        assert_eq!(values, self.snapshot.values);
        assert_eq!(capacity, self.snapshot.capacity);
        assert_eq!(data, self.snapshot.data);
        assert_eq!(inline, self.snapshot.inline);
    }
}

/// Runs `f` on `vec`; if it panics with an injected fault, checks that the
/// vector is observably unchanged before resuming the panic.
pub fn check_strong_safety<const N: usize>(
    vec: &mut SmallCowVec<Element, N>,
    f: impl FnOnce(&mut SmallCowVec<Element, N>),
) {
    let before = {
        let _disable = FaultInjectionDisable::new();
        Snapshot::of(vec)
    };
    if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(|| f(vec))) {
        if payload.is::<InjectedFault>() {
            let _disable = FaultInjectionDisable::new();
            assert_eq!(Snapshot::of(vec), before);
        }
        panic::resume_unwind(payload);
    }
}

/// Runs `f` with the clone fault injected at the first clone, then the second,
/// and so on until it completes without fault. `f` must build its own state.
pub fn faulty_run(mut f: impl FnMut()) {
    let mut countdown = 1;
    loop {
        Element::set_clone_fault_countdown(countdown);
        let res = panic::catch_unwind(AssertUnwindSafe(&mut f));
        Element::set_clone_fault_countdown(0);
        match res {
            Ok(()) => return,
            Err(payload) if payload.is::<InjectedFault>() => countdown += 1,
            Err(payload) => panic::resume_unwind(payload),
        }
    }
}
