//! Min-priority queue of front pixels.
//!
//! Entries order by arrival time first. Equal times fall back to row-major
//! coordinate order (`y`, then `x`), so a given grid always pops in the same
//! sequence.

use std::any::{Any, type_name};
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::fmt;

use fm_core::{Error, ImageView};
use log::debug;

use crate::error::{InitError, Result};
use crate::state::{Classification, PixelState, UNREACHED_TIME};

/// A front pixel: arrival time plus padded-grid coordinates.
#[derive(Debug, Clone, Copy)]
pub struct FrontierEntry {
    pub time: f32,
    pub x: usize,
    pub y: usize,
}

impl FrontierEntry {
    pub fn new(time: f32, x: usize, y: usize) -> Self {
        Self { time, x, y }
    }

    pub fn coords(&self) -> (usize, usize) {
        (self.x, self.y)
    }

    /// Compares against a dynamically typed value.
    ///
    /// Anything other than a `FrontierEntry` yields
    /// [`InitError::TypeMismatch`].
    pub fn try_cmp(&self, other: &dyn Any) -> Result<Ordering> {
        other
            .downcast_ref::<FrontierEntry>()
            .map(|o| self.cmp(o))
            .ok_or(InitError::TypeMismatch {
                expected: type_name::<FrontierEntry>(),
            })
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.time
            .total_cmp(&other.time)
            .then_with(|| self.y.cmp(&other.y))
            .then_with(|| self.x.cmp(&other.x))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

impl fmt::Display for FrontierEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.time, self.x, self.y)
    }
}

#[derive(Debug, Clone, Default)]
pub struct FrontierQueue {
    heap: BinaryHeap<Reverse<FrontierEntry>>,
}

impl FrontierQueue {
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(capacity),
        }
    }

    /// # Panics
    /// If `entry.time` is NaN or not strictly below [`UNREACHED_TIME`]. Either
    /// means the propagation produced an arrival time the sentinel cannot
    /// dominate.
    pub fn push(&mut self, entry: FrontierEntry) {
        assert!(!entry.time.is_nan(), "NaN arrival time at {:?}", entry.coords());
        assert!(
            entry.time < UNREACHED_TIME,
            "arrival time {} at {:?} collides with sentinel {}",
            entry.time,
            entry.coords(),
            UNREACHED_TIME
        );
        self.heap.push(Reverse(entry));
    }

    /// Removes the entry with the smallest arrival time.
    pub fn pop(&mut self) -> Option<FrontierEntry> {
        self.heap.pop().map(|Reverse(e)| e)
    }

    pub fn peek(&self) -> Option<&FrontierEntry> {
        self.heap.peek().map(|Reverse(e)| e)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Entries in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = &FrontierEntry> {
        self.heap.iter().map(|Reverse(e)| e)
    }

    /// Entries in pop order, leaving the queue untouched.
    pub fn to_sorted_vec(&self) -> Vec<FrontierEntry> {
        let mut entries: Vec<FrontierEntry> = self.iter().copied().collect();
        entries.sort_unstable();
        entries
    }

    /// Drains the queue in pop order.
    pub fn into_ordered(mut self) -> impl Iterator<Item = FrontierEntry> {
        std::iter::from_fn(move || self.pop())
    }
}

impl fmt::Display for FrontierQueue {
    /// One `time x y` line per entry, in pop order.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in self.to_sorted_vec() {
            writeln!(f, "{entry}")?;
        }
        Ok(())
    }
}

/// Collects every `Band` cell with its arrival time into a fresh queue.
///
/// The grids are read only. Extents must match.
pub fn build_queue(
    states: &ImageView<'_, PixelState>,
    arrival: &ImageView<'_, f32>,
) -> Result<FrontierQueue> {
    if states.dims() != arrival.dims() {
        return Err(Error::ExtentMismatch {
            expected: states.dims(),
            actual: arrival.dims(),
        }
        .into());
    }

    let mut queue = FrontierQueue::new();
    for (x, y, &state) in states.iter_pixels() {
        if state != PixelState::Band {
            continue;
        }
        let time = *arrival.get(x, y).ok_or(Error::OutOfBounds)?;
        queue.push(FrontierEntry::new(time, x, y));
    }

    debug!(
        "frontier queue built over {}x{} grid: {} entries",
        states.width(),
        states.height(),
        queue.len()
    );
    Ok(queue)
}

/// [`build_queue`] over the grids of a [`Classification`].
pub fn build_queue_from(grids: &Classification) -> Result<FrontierQueue> {
    build_queue(&grids.states().as_view(), &grids.arrival().as_view())
}
