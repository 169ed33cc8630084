//! Heap accounting
//!
//! With the `memory_tracking` feature the crate installs a global allocator
//! that counts live bytes and the high-water mark. Without it every query
//! returns zero and `TRACKING_ENABLED` is false.

#[cfg(feature = "memory_tracking")]
mod tracking {
    use std::alloc::{GlobalAlloc, Layout};
    use std::sync::atomic::{AtomicUsize, Ordering};

    pub static ALLOCATED: AtomicUsize = AtomicUsize::new(0);
    pub static PEAK_ALLOCATED: AtomicUsize = AtomicUsize::new(0);

    pub struct TrackingAllocator;

    #[cfg(feature = "mimalloc")]
    static UNDERLYING: mimalloc::MiMalloc = mimalloc::MiMalloc;

    #[cfg(not(feature = "mimalloc"))]
    static UNDERLYING: std::alloc::System = std::alloc::System;

    fn record_growth(size: usize) {
        let current = ALLOCATED.fetch_add(size, Ordering::Relaxed) + size;
        let mut peak = PEAK_ALLOCATED.load(Ordering::Relaxed);
        while current > peak {
            match PEAK_ALLOCATED.compare_exchange_weak(
                peak,
                current,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => break,
                Err(p) => peak = p,
            }
        }
    }

    unsafe impl GlobalAlloc for TrackingAllocator {
        unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
            let ptr = UNDERLYING.alloc(layout);
            if !ptr.is_null() {
                record_growth(layout.size());
            }
            ptr
        }

        unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
            ALLOCATED.fetch_sub(layout.size(), Ordering::Relaxed);
            UNDERLYING.dealloc(ptr, layout)
        }

        unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
            let new_ptr = UNDERLYING.realloc(ptr, layout, new_size);
            if !new_ptr.is_null() {
                if new_size >= layout.size() {
                    record_growth(new_size - layout.size());
                } else {
                    ALLOCATED.fetch_sub(layout.size() - new_size, Ordering::Relaxed);
                }
            }
            new_ptr
        }
    }
}

#[cfg(feature = "memory_tracking")]
#[global_allocator]
static GLOBAL: tracking::TrackingAllocator = tracking::TrackingAllocator;

#[cfg(all(feature = "mimalloc", not(feature = "memory_tracking")))]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

/// Whether the counters below report real numbers
pub const TRACKING_ENABLED: bool = cfg!(feature = "memory_tracking");

/// Live heap bytes
#[cfg(feature = "memory_tracking")]
pub fn current() -> usize {
    tracking::ALLOCATED.load(std::sync::atomic::Ordering::SeqCst)
}

/// Highest live heap bytes since start or the last `reset_peak`
#[cfg(feature = "memory_tracking")]
pub fn peak() -> usize {
    tracking::PEAK_ALLOCATED.load(std::sync::atomic::Ordering::SeqCst)
}

/// Lower the peak to the current level, returning `(current, old_peak)`
#[cfg(feature = "memory_tracking")]
pub fn reset_peak() -> (usize, usize) {
    use std::sync::atomic::Ordering;
    let current = tracking::ALLOCATED.load(Ordering::SeqCst);
    let peak = tracking::PEAK_ALLOCATED.swap(current, Ordering::SeqCst);
    (current, peak)
}

#[cfg(not(feature = "memory_tracking"))]
pub fn current() -> usize {
    0
}

#[cfg(not(feature = "memory_tracking"))]
pub fn peak() -> usize {
    0
}

#[cfg(not(feature = "memory_tracking"))]
pub fn reset_peak() -> (usize, usize) {
    (0, 0)
}

/// Run `f`, returning its output and the heap growth above the starting level
///
/// The figure is the peak minus the live bytes at entry, so it measures what
/// `f` held at its worst moment rather than what it leaked.
pub fn measure_peak<T>(f: impl FnOnce() -> T) -> (T, usize) {
    let (start, _) = reset_peak();
    let output = f();
    (output, peak().saturating_sub(start))
}
