//! A global allocator that records the allocations made while a closure runs, so tests can
//! assert that a piece of code allocates nothing, or frees everything it allocated.

use std::alloc::{
    GlobalAlloc,
    Layout,
    System,
};
use std::sync::atomic::{
    AtomicBool,
    Ordering,
};

use parking_lot::{
    const_fair_mutex,
    FairMutex,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Alloc { addr: usize, size: usize },
    Freed { addr: usize, size: usize },
}

impl Event {
    /// Change in live heap bytes caused by this event.
    pub fn delta(&self) -> isize {
        match self {
            Self::Alloc { size, .. } => *size as isize,
            Self::Freed { size, .. } => -(*size as isize),
        }
    }
}

/// Totals over a list of [`Event`]s.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub allocations: usize,
    pub frees: usize,
    pub net_bytes: isize,
}

impl Summary {
    pub fn of(events: &[Event]) -> Self {
        events.iter().fold(Summary::default(), |mut summary, event| {
            match event {
                Event::Alloc { .. } => summary.allocations += 1,
                Event::Freed { .. } => summary.frees += 1,
            }
            summary.net_bytes += event.delta();
            summary
        })
    }

    /// Returns `true` if no heap memory was touched at all.
    pub fn is_silent(&self) -> bool {
        self.allocations == 0 && self.frees == 0
    }

    /// Returns `true` if everything that was allocated got freed again.
    pub fn is_balanced(&self) -> bool {
        self.allocations == self.frees && self.net_bytes == 0
    }
}

pub struct RecordingAllocator {
    log: FairMutex<Vec<Event>>,
    recording: AtomicBool,
}

impl RecordingAllocator {
    pub const fn new() -> Self {
        Self {
            log: const_fair_mutex(Vec::new()),
            recording: AtomicBool::new(false),
        }
    }

    /// Runs `f` with recording switched on and returns its result along with every event that
    /// happened meanwhile.
    ///
    /// The allocator is process wide, so callers should not run other allocating threads
    /// concurrently.
    pub fn record<R>(&self, f: impl FnOnce() -> R) -> (R, Vec<Event>) {
        self.log.lock().clear();

        self.recording.store(true, Ordering::SeqCst);
        let result = f();
        self.recording.store(false, Ordering::SeqCst);

        let events = std::mem::take(&mut *self.log.lock());
        (result, events)
    }

    fn push(&self, event: Event) {
        // pausing stops the log's own growth from being recorded
        if self.recording.swap(false, Ordering::SeqCst) {
            self.log.lock().push(event);
            self.recording.store(true, Ordering::SeqCst);
        }
    }
}

impl Default for RecordingAllocator {
    fn default() -> Self {
        Self::new()
    }
}

unsafe impl GlobalAlloc for RecordingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let ptr = System.alloc(layout);
        self.push(Event::Alloc {
            addr: ptr as usize,
            size: layout.size(),
        });
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        self.push(Event::Freed {
            addr: ptr as usize,
            size: layout.size(),
        });
        System.dealloc(ptr, layout)
    }
}

#[cfg(test)]
mod tests {
    use super::{
        Event,
        Summary,
    };

    #[test]
    fn test_summary() {
        let events = [
            Event::Alloc { addr: 8, size: 24 },
            Event::Alloc { addr: 64, size: 8 },
            Event::Freed { addr: 8, size: 24 },
        ];
        let summary = Summary::of(&events);

        assert_eq!(summary.allocations, 2);
        assert_eq!(summary.frees, 1);
        assert_eq!(summary.net_bytes, 8);
        assert!(!summary.is_balanced());
        assert!(!summary.is_silent());

        assert!(Summary::of(&[]).is_silent());
        assert!(Summary::of(&events[..1]).net_bytes > 0);
        assert!(Summary::of(&[events[0], events[2]]).is_balanced());
    }
}
