//! Simple profiling macros using thread-local storage
//!
//! This module provides lightweight profiling without changing function signatures.
//! Enable with environment variable: SNAKE_SEARCH_PROFILE=1

use std::cell::RefCell;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::time::Instant;

thread_local! {
    static PATH_SEARCH_TIME: RefCell<u64> = const { RefCell::new(0) };
    static PATH_SEARCH_COUNT: RefCell<usize> = const { RefCell::new(0) };

    static EVAL_TIME: RefCell<u64> = const { RefCell::new(0) };
    static EVAL_COUNT: RefCell<usize> = const { RefCell::new(0) };

    static EXPAND_TIME: RefCell<u64> = const { RefCell::new(0) };
    static EXPAND_COUNT: RefCell<usize> = const { RefCell::new(0) };

    static PARANOID_TIME: RefCell<u64> = const { RefCell::new(0) };
    static PARANOID_COUNT: RefCell<usize> = const { RefCell::new(0) };
    static ALPHA_BETA_CUTOFFS: RefCell<usize> = const { RefCell::new(0) };

    static NON_PARANOID_TIME: RefCell<u64> = const { RefCell::new(0) };
    static NON_PARANOID_COUNT: RefCell<usize> = const { RefCell::new(0) };
}

// Global aggregators
static GLOBAL_PATH_SEARCH_TIME: AtomicU64 = AtomicU64::new(0);
static GLOBAL_PATH_SEARCH_COUNT: AtomicUsize = AtomicUsize::new(0);
static GLOBAL_EVAL_TIME: AtomicU64 = AtomicU64::new(0);
static GLOBAL_EVAL_COUNT: AtomicUsize = AtomicUsize::new(0);
static GLOBAL_EXPAND_TIME: AtomicU64 = AtomicU64::new(0);
static GLOBAL_EXPAND_COUNT: AtomicUsize = AtomicUsize::new(0);
static GLOBAL_PARANOID_TIME: AtomicU64 = AtomicU64::new(0);
static GLOBAL_PARANOID_COUNT: AtomicUsize = AtomicUsize::new(0);
static GLOBAL_ALPHA_BETA_CUTOFFS: AtomicUsize = AtomicUsize::new(0);
static GLOBAL_NON_PARANOID_TIME: AtomicU64 = AtomicU64::new(0);
static GLOBAL_NON_PARANOID_COUNT: AtomicUsize = AtomicUsize::new(0);

// Set from [profiling] enabled in Snake.toml
static FORCE_ENABLED: AtomicBool = AtomicBool::new(false);

#[inline]
pub fn is_profiling_enabled() -> bool {
    FORCE_ENABLED.load(Ordering::Relaxed) || std::env::var("SNAKE_SEARCH_PROFILE").is_ok()
}

/// Turns profiling on regardless of the environment variable
pub fn enable() {
    FORCE_ENABLED.store(true, Ordering::Relaxed);
}

pub struct ProfileGuard {
    start: Instant,
    category: &'static str,
}

impl ProfileGuard {
    pub fn new(category: &'static str) -> Option<Self> {
        if is_profiling_enabled() {
            Some(ProfileGuard {
                start: Instant::now(),
                category,
            })
        } else {
            None
        }
    }
}

impl Drop for ProfileGuard {
    fn drop(&mut self) {
        let elapsed_ns = self.start.elapsed().as_nanos() as u64;

        match self.category {
            "path_search" => {
                PATH_SEARCH_TIME.with(|t| *t.borrow_mut() += elapsed_ns);
                PATH_SEARCH_COUNT.with(|c| *c.borrow_mut() += 1);
            }
            "eval" => {
                EVAL_TIME.with(|t| *t.borrow_mut() += elapsed_ns);
                EVAL_COUNT.with(|c| *c.borrow_mut() += 1);
            }
            "expand" => {
                EXPAND_TIME.with(|t| *t.borrow_mut() += elapsed_ns);
                EXPAND_COUNT.with(|c| *c.borrow_mut() += 1);
            }
            "paranoid" => {
                PARANOID_TIME.with(|t| *t.borrow_mut() += elapsed_ns);
                PARANOID_COUNT.with(|c| *c.borrow_mut() += 1);
            }
            "non_paranoid" => {
                NON_PARANOID_TIME.with(|t| *t.borrow_mut() += elapsed_ns);
                NON_PARANOID_COUNT.with(|c| *c.borrow_mut() += 1);
            }
            _ => {}
        }
    }
}

#[inline]
pub fn record_alpha_beta_cutoff() {
    if is_profiling_enabled() {
        ALPHA_BETA_CUTOFFS.with(|c| *c.borrow_mut() += 1);
    }
}

fn drain_time(local: &'static std::thread::LocalKey<RefCell<u64>>, global: &AtomicU64) {
    local.with(|t| {
        global.fetch_add(*t.borrow(), Ordering::Relaxed);
        *t.borrow_mut() = 0;
    });
}

fn drain_count(local: &'static std::thread::LocalKey<RefCell<usize>>, global: &AtomicUsize) {
    local.with(|c| {
        global.fetch_add(*c.borrow(), Ordering::Relaxed);
        *c.borrow_mut() = 0;
    });
}

pub fn merge_thread_local() {
    if !is_profiling_enabled() {
        return;
    }

    drain_time(&PATH_SEARCH_TIME, &GLOBAL_PATH_SEARCH_TIME);
    drain_count(&PATH_SEARCH_COUNT, &GLOBAL_PATH_SEARCH_COUNT);
    drain_time(&EVAL_TIME, &GLOBAL_EVAL_TIME);
    drain_count(&EVAL_COUNT, &GLOBAL_EVAL_COUNT);
    drain_time(&EXPAND_TIME, &GLOBAL_EXPAND_TIME);
    drain_count(&EXPAND_COUNT, &GLOBAL_EXPAND_COUNT);
    drain_time(&PARANOID_TIME, &GLOBAL_PARANOID_TIME);
    drain_count(&PARANOID_COUNT, &GLOBAL_PARANOID_COUNT);
    drain_count(&ALPHA_BETA_CUTOFFS, &GLOBAL_ALPHA_BETA_CUTOFFS);
    drain_time(&NON_PARANOID_TIME, &GLOBAL_NON_PARANOID_TIME);
    drain_count(&NON_PARANOID_COUNT, &GLOBAL_NON_PARANOID_COUNT);
}

fn percent(part: u64, whole: u64) -> f64 {
    if whole > 0 {
        100.0 * part as f64 / whole as f64
    } else {
        0.0
    }
}

fn avg_us(time_ns: u64, count: usize) -> f64 {
    if count > 0 {
        time_ns as f64 / (count * 1000) as f64
    } else {
        0.0
    }
}

pub fn print_report(total_time_ms: u64) {
    if !is_profiling_enabled() {
        return;
    }

    let total_ns = total_time_ms * 1_000_000;

    eprintln!("\n═══════════════════════════════════════════════════════════");
    eprintln!("                 PERFORMANCE PROFILE");
    eprintln!("═══════════════════════════════════════════════════════════");
    eprintln!("Total Time: {}ms\n", total_time_ms);

    let ex_time = GLOBAL_EXPAND_TIME.load(Ordering::Relaxed);
    let ex_count = GLOBAL_EXPAND_COUNT.load(Ordering::Relaxed);
    eprintln!("Node Expansion:");
    eprintln!("  Time:     {:.2}ms ({:.1}%)", ex_time as f64 / 1_000_000.0, percent(ex_time, total_ns));
    eprintln!("  Calls:    {}", ex_count);
    eprintln!("  Avg:      {:.2}µs/call\n", avg_us(ex_time, ex_count));

    let eval_time = GLOBAL_EVAL_TIME.load(Ordering::Relaxed);
    let eval_count = GLOBAL_EVAL_COUNT.load(Ordering::Relaxed);
    let ps_time = GLOBAL_PATH_SEARCH_TIME.load(Ordering::Relaxed);
    let ps_count = GLOBAL_PATH_SEARCH_COUNT.load(Ordering::Relaxed);

    eprintln!("Evaluation:");
    eprintln!("  Total Time:            {:.2}ms ({:.1}%)",
        eval_time as f64 / 1_000_000.0, percent(eval_time, total_ns));
    eprintln!("  Calls:                 {}", eval_count);
    eprintln!("  Avg:                   {:.2}µs/call", avg_us(eval_time, eval_count));
    eprintln!("  Path Search:           {:.2}ms ({:.1}%) - {} calls, {:.2}µs avg\n",
        ps_time as f64 / 1_000_000.0, percent(ps_time, eval_time), ps_count, avg_us(ps_time, ps_count));

    let pa_time = GLOBAL_PARANOID_TIME.load(Ordering::Relaxed);
    let pa_count = GLOBAL_PARANOID_COUNT.load(Ordering::Relaxed);
    let cutoffs = GLOBAL_ALPHA_BETA_CUTOFFS.load(Ordering::Relaxed);
    let cutoff_rate = if pa_count > 0 { 100.0 * cutoffs as f64 / pa_count as f64 } else { 0.0 };
    let np_time = GLOBAL_NON_PARANOID_TIME.load(Ordering::Relaxed);
    let np_count = GLOBAL_NON_PARANOID_COUNT.load(Ordering::Relaxed);

    eprintln!("Search:");
    eprintln!("  Paranoid:     {:.2}ms ({:.1}%) - {} calls, {:.1}% cutoff rate",
        pa_time as f64 / 1_000_000.0, percent(pa_time, total_ns), pa_count, cutoff_rate);
    eprintln!("  Non-Paranoid: {:.2}ms ({:.1}%) - {} calls\n",
        np_time as f64 / 1_000_000.0, percent(np_time, total_ns), np_count);

    eprintln!("═══════════════════════════════════════════════════════════\n");
}

pub fn reset() {
    for counter in [
        &GLOBAL_PATH_SEARCH_TIME,
        &GLOBAL_EVAL_TIME,
        &GLOBAL_EXPAND_TIME,
        &GLOBAL_PARANOID_TIME,
        &GLOBAL_NON_PARANOID_TIME,
    ] {
        counter.store(0, Ordering::Relaxed);
    }
    for counter in [
        &GLOBAL_PATH_SEARCH_COUNT,
        &GLOBAL_EVAL_COUNT,
        &GLOBAL_EXPAND_COUNT,
        &GLOBAL_PARANOID_COUNT,
        &GLOBAL_ALPHA_BETA_CUTOFFS,
        &GLOBAL_NON_PARANOID_COUNT,
    ] {
        counter.store(0, Ordering::Relaxed);
    }
}

#[macro_export]
macro_rules! profile {
    ($category:expr, $code:block) => {{
        let _guard = $crate::simple_profiler::ProfileGuard::new($category);
        $code
    }};
}
