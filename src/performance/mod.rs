//! Timer registry: start named timers, stop them, print a table of results.
//!
//! ```
//! use perftrack::performance::{Performance, TimeUnit};
//!
//! let mut performance = Performance::new();
//! let load = performance.start("load", TimeUnit::Milliseconds);
//! performance.stop(load).unwrap();
//! performance.report("Timing");
//! ```

pub mod clock;
pub mod error;
pub mod format;
pub mod record;
pub mod report;

pub use self::{
    clock::{Clock, MonotonicClock},
    error::{Error, Result},
    format::{Grouped, IntegerFormat, Plain},
    record::{TimeUnit, TimerRecord},
};

use std::{
    fmt, io,
    sync::atomic::{AtomicU64, Ordering},
};

pub const DEFAULT_NAME: &str = "UNKNOWN";
pub const DEFAULT_TITLE: &str = "Performance List";

static NEXT_REGISTRY: AtomicU64 = AtomicU64::new(0);

/// Handle of a record, valid until the registry that issued it is reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProcessId {
    registry: u64,
    index: usize,
    generation: u64,
}

impl ProcessId {
    /// Position of the record in the report.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }
}

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index)
    }
}

/// Ordered collection of timers.
///
/// Not synchronized: share it between threads behind a `Mutex`.
#[derive(Debug)]
pub struct Performance<C = MonotonicClock, F = Grouped> {
    clock: C,
    format: F,
    id: u64,
    records: Vec<TimerRecord>,
    generation: u64,
}

impl Performance {
    #[must_use]
    pub fn new() -> Self {
        Self::with(MonotonicClock, Grouped::default())
    }
}

impl Default for Performance {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock, F: IntegerFormat> Performance<C, F> {
    /// Creates an empty registry with the given clock and number format.
    pub fn with(clock: C, format: F) -> Self {
        Self {
            clock,
            format,
            id: NEXT_REGISTRY.fetch_add(1, Ordering::Relaxed),
            records: Vec::new(),
            generation: 0,
        }
    }

    /// Replaces the number format used by the report.
    pub fn with_format<G: IntegerFormat>(self, format: G) -> Performance<C, G> {
        Performance {
            clock: self.clock,
            format,
            id: self.id,
            records: self.records,
            generation: self.generation,
        }
    }

    /// Starts a new timer and returns its handle.
    pub fn start(&mut self, name: impl Into<String>, unit: TimeUnit) -> ProcessId {
        let id = ProcessId {
            registry: self.id,
            index: self.records.len(),
            generation: self.generation,
        };

        self.records
            .push(TimerRecord::new(name.into(), unit, self.clock.now()));

        id
    }

    /// Starts an `UNKNOWN` timer in milliseconds.
    pub fn start_default(&mut self) -> ProcessId {
        self.start(DEFAULT_NAME, TimeUnit::default())
    }

    /// Stops the timer, overwriting any previous measurement.
    ///
    /// # Errors
    /// [`Error::InvalidHandle`] if `id` was issued by another registry or
    /// before the last reset, or the clock reports an instant before the timer started.
    pub fn stop(&mut self, id: ProcessId) -> Result<()> {
        let now = self.clock.now();

        let record = self.record_mut(id)?;
        let elapsed = record.measure(now).ok_or(Error::InvalidHandle(id))?;
        record.finish(elapsed);

        Ok(())
    }

    /// Elapsed time of a timer, `None` while it is still running.
    ///
    /// # Errors
    /// [`Error::InvalidHandle`] if `id` was issued by another registry or
    /// before the last reset.
    pub fn elapsed(&self, id: ProcessId) -> Result<Option<u128>> {
        self.record(id).map(TimerRecord::elapsed)
    }

    /// Renders the results table.
    pub fn render(&self, title: &str) -> String {
        report::render(title, &self.records, &self.format)
    }

    /// Writes the results table to `writer`.
    ///
    /// # Errors
    /// Propagates write errors from `writer`.
    pub fn write_report<W: io::Write>(&self, mut writer: W, title: &str) -> io::Result<()> {
        writer.write_all(self.render(title).as_bytes())?;
        writer.flush()
    }

    /// Prints the results table to standard output.
    pub fn report(&self, title: &str) {
        print!("{}", self.render(title));
    }

    pub fn report_default(&self) {
        self.report(DEFAULT_TITLE);
    }

    /// Drops every record; handles issued so far become invalid.
    pub fn reset(&mut self) {
        self.records.clear();
        self.generation = self.generation.wrapping_add(1);
    }

    pub fn records(&self) -> impl Iterator<Item = &TimerRecord> {
        self.records.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn record(&self, id: ProcessId) -> Result<&TimerRecord> {
        if id.registry != self.id || id.generation != self.generation {
            return Err(Error::InvalidHandle(id));
        }

        self.records.get(id.index).ok_or(Error::InvalidHandle(id))
    }

    fn record_mut(&mut self, id: ProcessId) -> Result<&mut TimerRecord> {
        if id.registry != self.id || id.generation != self.generation {
            return Err(Error::InvalidHandle(id));
        }

        self.records.get_mut(id.index).ok_or(Error::InvalidHandle(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{
        cell::Cell,
        time::{Duration, Instant},
    };

    #[derive(Debug)]
    struct ManualClock {
        now: Cell<Instant>,
    }

    impl ManualClock {
        fn new() -> Self {
            Self {
                now: Cell::new(Instant::now()),
            }
        }

        fn advance(&self, duration: Duration) {
            self.now.set(self.now.get() + duration);
        }

        fn rewind(&self, duration: Duration) {
            self.now.set(self.now.get() - duration);
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> Instant {
            self.now.get()
        }
    }

    fn registry(clock: &ManualClock) -> Performance<&ManualClock, Grouped> {
        Performance::with(clock, Grouped::default())
    }

    #[test]
    fn test_start_returns_sequential_handles() {
        let clock = ManualClock::new();
        let mut performance = registry(&clock);

        for n in 0..5 {
            assert_eq!(performance.start(format!("step {n}"), TimeUnit::Nanoseconds).index(), n);
        }
        assert_eq!(performance.len(), 5);

        performance.reset();
        assert!(performance.is_empty());

        assert_eq!(performance.start_default().index(), 0);
        assert_eq!(performance.start_default().index(), 1);
    }

    #[test]
    fn test_start_default() {
        let mut performance = Performance::new();
        performance.start_default();

        let record = performance.records().next().unwrap();
        assert_eq!(record.name(), DEFAULT_NAME);
        assert_eq!(record.unit(), TimeUnit::Milliseconds);
        assert!(record.is_running());
    }

    #[test]
    fn test_stop_converts_to_unit() {
        let clock = ManualClock::new();
        let mut performance = registry(&clock);

        let s = performance.start("s", TimeUnit::Seconds);
        let ms = performance.start("ms", TimeUnit::Milliseconds);
        let us = performance.start("us", TimeUnit::Microseconds);
        let ns = performance.start("ns", TimeUnit::Nanoseconds);

        clock.advance(Duration::from_nanos(1_999_999_999));

        for id in [s, ms, us, ns] {
            performance.stop(id).unwrap();
        }

        assert_eq!(performance.elapsed(s).unwrap(), Some(1));
        assert_eq!(performance.elapsed(ms).unwrap(), Some(1_999));
        assert_eq!(performance.elapsed(us).unwrap(), Some(1_999_999));
        assert_eq!(performance.elapsed(ns).unwrap(), Some(1_999_999_999));
    }

    #[test]
    fn test_restop_is_monotonic() {
        let clock = ManualClock::new();
        let mut performance = registry(&clock);

        let id = performance.start("load", TimeUnit::Milliseconds);

        clock.advance(Duration::from_millis(10));
        performance.stop(id).unwrap();
        let first = performance.elapsed(id).unwrap().unwrap();

        clock.advance(Duration::from_millis(5));
        performance.stop(id).unwrap();
        let second = performance.elapsed(id).unwrap().unwrap();

        assert_eq!(first, 10);
        assert_eq!(second, 15);
        assert!(second >= first);
    }

    #[test]
    fn test_still_running_until_stopped() {
        let clock = ManualClock::new();
        let mut performance = registry(&clock);

        let id = performance.start("parse", TimeUnit::Microseconds);
        assert_eq!(performance.elapsed(id).unwrap(), None);
        assert!(performance.render(DEFAULT_TITLE).contains(report::STILL_RUNNING));

        clock.advance(Duration::from_micros(1_500));
        performance.stop(id).unwrap();

        let table = performance.render(DEFAULT_TITLE);
        assert!(!table.contains(report::STILL_RUNNING));
        assert!(table.contains("1,500 µs"));
    }

    #[test]
    fn test_invalid_handles() {
        let clock = ManualClock::new();
        let mut other = registry(&clock);
        for _ in 0..3 {
            other.start_default();
        }
        let foreign = other.start_default();

        let mut performance = registry(&clock);
        performance.start_default();

        assert_eq!(performance.stop(foreign), Err(Error::InvalidHandle(foreign)));
        assert_eq!(performance.elapsed(foreign), Err(Error::InvalidHandle(foreign)));
    }

    #[test]
    fn test_foreign_handle_in_range() {
        let clock = ManualClock::new();
        let mut a = registry(&clock);
        let mut b = registry(&clock);

        let a0 = a.start("a0", TimeUnit::Milliseconds);
        let b0 = b.start("b0", TimeUnit::Milliseconds);
        assert_eq!(a0.index(), b0.index());

        clock.advance(Duration::from_millis(4));

        assert_eq!(a.stop(b0), Err(Error::InvalidHandle(b0)));
        assert_eq!(a.elapsed(b0), Err(Error::InvalidHandle(b0)));
        assert_eq!(a.elapsed(a0).unwrap(), None);

        assert!(b.stop(b0).is_ok());
        assert_eq!(b.elapsed(b0).unwrap(), Some(4));
    }

    #[test]
    fn test_with_format_keeps_handles() {
        let mut performance = Performance::new();
        let id = performance.start_default();

        let mut performance = performance.with_format(Plain);
        assert!(performance.stop(id).is_ok());
    }

    #[test]
    fn test_reset_invalidates_handles() {
        let clock = ManualClock::new();
        let mut performance = registry(&clock);

        let stale = performance.start("load", TimeUnit::Milliseconds);
        performance.reset();

        // same index, new generation
        let fresh = performance.start("parse", TimeUnit::Milliseconds);
        assert_eq!(stale.index(), fresh.index());

        assert_eq!(performance.stop(stale), Err(Error::InvalidHandle(stale)));
        assert!(performance.stop(fresh).is_ok());
    }

    #[test]
    fn test_clock_going_backwards() {
        let clock = ManualClock::new();
        clock.advance(Duration::from_secs(10));
        let mut performance = registry(&clock);

        let id = performance.start("load", TimeUnit::Milliseconds);
        clock.advance(Duration::from_millis(3));
        performance.stop(id).unwrap();

        clock.rewind(Duration::from_secs(1));
        assert_eq!(performance.stop(id), Err(Error::InvalidHandle(id)));

        assert_eq!(performance.elapsed(id).unwrap(), Some(3));
    }

    #[test]
    fn test_report_is_idempotent() {
        let clock = ManualClock::new();
        let mut performance = registry(&clock);

        let id = performance.start("load", TimeUnit::Milliseconds);
        clock.advance(Duration::from_millis(2_500));
        performance.stop(id).unwrap();

        let first = performance.render("Timing");
        let second = performance.render("Timing");
        assert_eq!(first, second);
        assert_eq!(performance.elapsed(id).unwrap(), Some(2_500));
    }

    #[test]
    fn test_write_report() {
        let mut performance = Performance::new().with_format(Plain);
        performance.start("idle", TimeUnit::Seconds);

        let mut out = Vec::new();
        performance.write_report(&mut out, "Timing").unwrap();

        let out = String::from_utf8(out).unwrap();
        assert_eq!(out, performance.render("Timing"));
        assert!(out.contains("idle"));
    }

    #[test]
    fn test_scenario() {
        let clock = ManualClock::new();
        let mut performance = registry(&clock);

        let load = performance.start("load", TimeUnit::Milliseconds);
        let parse = performance.start("parse", TimeUnit::Microseconds);
        assert_eq!(load.index(), 0);
        assert_eq!(parse.index(), 1);

        clock.advance(Duration::from_millis(1_234));
        performance.stop(load).unwrap();

        let table = performance.render("Timing");
        let rows: Vec<&str> = table.lines().skip(5).take(2).collect();
        assert_eq!(rows[0], format!("load{:>71}", "1,234 ms"));
        assert_eq!(rows[1], format!("parse{:>70}", "STILL RUNNING"));

        performance.reset();

        let table = performance.render(DEFAULT_TITLE);
        assert!(table.contains(report::NO_EVENTS));
        assert_eq!(performance.stop(load), Err(Error::InvalidHandle(load)));
        assert_eq!(performance.stop(parse), Err(Error::InvalidHandle(parse)));
    }
}
