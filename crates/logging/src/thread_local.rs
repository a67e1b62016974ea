//! crates/logging/src/thread_local.rs
//! Thread-local scratch buffer reused when rendering log lines, and the
//! marker that keeps a sink from being re-entered on the same thread.

use std::cell::{Cell, RefCell};

/// Capacity kept between renders; larger buffers are shrunk back.
const SCRATCH_RETAIN: usize = 4096;

thread_local! {
    static SCRATCH: RefCell<String> = const { RefCell::new(String::new()) };
    static IN_SINK: Cell<bool> = const { Cell::new(false) };
}

/// Clears the in-sink marker on drop, including during unwinding.
struct SinkGuard;

impl Drop for SinkGuard {
    fn drop(&mut self) {
        let _ = IN_SINK.try_with(|flag| flag.set(false));
    }
}

/// Runs `write` unless this thread is already inside a sink write.
///
/// Returns whether `write` ran. A nested call is skipped, so a writer that
/// logs through its own registry loses that line rather than deadlocking on
/// the sink lock.
pub(crate) fn enter_sink(write: impl FnOnce()) -> bool {
    let entered = IN_SINK.try_with(|flag| !flag.replace(true)).unwrap_or(false);
    if !entered {
        return false;
    }
    let _guard = SinkGuard;
    write();
    true
}

/// Runs `render` with an empty line buffer.
///
/// The thread's scratch buffer is reused when it is free. A nested call made
/// while the buffer is borrowed (an argument whose `Display` impl logs) or
/// during thread teardown gets a fresh buffer instead.
pub(crate) fn with_scratch(render: impl FnOnce(&mut String)) {
    let mut render = Some(render);
    let _ = SCRATCH.try_with(|cell| {
        if let Ok(mut line) = cell.try_borrow_mut() {
            line.clear();
            if let Some(render) = render.take() {
                render(&mut line);
            }
            if line.capacity() > SCRATCH_RETAIN {
                line.clear();
                line.shrink_to(SCRATCH_RETAIN);
            }
        }
    });
    if let Some(render) = render {
        render(&mut String::new());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_starts_empty_each_time() {
        with_scratch(|line| line.push_str("first"));
        with_scratch(|line| {
            assert!(line.is_empty());
            line.push_str("second");
        });
    }

    #[test]
    fn nested_use_gets_a_separate_buffer() {
        let mut inner_seen = String::new();
        with_scratch(|outer| {
            outer.push_str("outer");
            with_scratch(|inner| {
                assert!(inner.is_empty());
                inner.push_str("inner");
                inner_seen = inner.clone();
            });
            assert_eq!(outer, "outer");
        });
        assert_eq!(inner_seen, "inner");
    }

    #[test]
    fn nested_sink_entry_is_skipped() {
        let mut nested_ran = None;
        let outer_ran = enter_sink(|| {
            nested_ran = Some(enter_sink(|| {}));
        });
        assert!(outer_ran);
        assert_eq!(nested_ran, Some(false));
        assert!(enter_sink(|| {}));
    }

    #[test]
    fn sink_marker_is_cleared_after_a_panic() {
        let result = std::panic::catch_unwind(|| {
            enter_sink(|| panic!("writer failed"));
        });
        assert!(result.is_err());
        assert!(enter_sink(|| {}));
    }

    #[test]
    fn oversized_buffers_are_shrunk() {
        with_scratch(|line| line.push_str(&"x".repeat(SCRATCH_RETAIN * 4)));
        SCRATCH.with(|cell| assert!(cell.borrow().capacity() <= SCRATCH_RETAIN));
    }
}
