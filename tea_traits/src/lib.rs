pub mod clock;

pub use clock::{Clock, ManualClock, MonotonicClock};

/// Consumer of per-step output produced by a simulation driver.
///
/// Sinks must tolerate their own I/O failures; a driver never inspects the
/// outcome of a write.
pub trait RecordSink<R: ?Sized> {
    fn record(&mut self, record: &R);

    /// Push buffered output to the underlying stream (best-effort).
    fn flush(&mut self) {}
}

/// Discards everything; used when no output stream is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl<R: ?Sized> RecordSink<R> for NullSink {
    fn record(&mut self, _record: &R) {}
}

impl<R: ?Sized, S: RecordSink<R> + ?Sized> RecordSink<R> for &mut S {
    fn record(&mut self, record: &R) {
        (**self).record(record);
    }

    fn flush(&mut self) {
        (**self).flush();
    }
}

impl<R: Clone> RecordSink<R> for Vec<R> {
    fn record(&mut self, record: &R) {
        self.push(record.clone());
    }
}

/// An absent sink discards records.
impl<R: ?Sized, S: RecordSink<R>> RecordSink<R> for Option<S> {
    fn record(&mut self, record: &R) {
        if let Some(s) = self {
            s.record(record);
        }
    }

    fn flush(&mut self) {
        if let Some(s) = self {
            s.flush();
        }
    }
}

/// Fan a record out to two sinks, left first.
impl<R: ?Sized, A: RecordSink<R>, B: RecordSink<R>> RecordSink<R> for (A, B) {
    fn record(&mut self, record: &R) {
        self.0.record(record);
        self.1.record(record);
    }

    fn flush(&mut self) {
        self.0.flush();
        self.1.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fan_out_reaches_both_sides_and_skips_none() {
        let mut left: Vec<u32> = Vec::new();
        let mut right: Option<Vec<u32>> = None;
        {
            let mut both = (&mut left, &mut right);
            both.record(&1);
            both.record(&2);
            RecordSink::<u32>::flush(&mut both);
        }
        assert_eq!(left, vec![1, 2]);
        assert!(right.is_none());

        let mut right = Some(Vec::new());
        (NullSink, &mut right).record(&7u32);
        assert_eq!(right, Some(vec![7]));
    }
}
