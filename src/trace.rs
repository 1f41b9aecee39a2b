//! Span and event helpers for the pipeline stages.
//!
//! Call sites name the level explicitly (`INFO` for per-image work, `DEBUG`
//! for the inner decode and suppression passes). With the `tracing` feature
//! off the macros expand to [`NoopSpan`] or to nothing.

#[cfg(feature = "tracing")]
macro_rules! trace_span {
    ($level:ident, $name:expr $(, $($field:tt)*)?) => {
        tracing::span!(tracing::Level::$level, $name $(, $($field)*)?)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_span {
    ($level:ident, $name:expr $(, $($field:tt)*)?) => {
        $crate::trace::NoopSpan
    };
}

/// Records a named event with `key = value` fields.
#[cfg(feature = "tracing")]
macro_rules! trace_event {
    ($level:ident, $name:expr, $($key:ident = $value:expr),+ $(,)?) => {
        tracing::event!(name: $name, tracing::Level::$level, $($key = $value),+)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_event {
    ($level:ident, $name:expr, $($key:ident = $value:expr),+ $(,)?) => {
        let _ = ($($value,)+);
    };
}

pub(crate) use trace_event;
pub(crate) use trace_span;

/// Stand-in for an entered span when tracing is compiled out.
#[cfg(not(feature = "tracing"))]
pub struct NoopSpan;

#[cfg(not(feature = "tracing"))]
impl NoopSpan {
    #[inline]
    pub fn entered(self) -> Self {
        self
    }
}
