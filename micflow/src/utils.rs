//! Helpers shared by the kernel and the component crates.

/// Bits needed to count `value` distinct states, i.e. `ceil(log2(value))`.
pub const fn clog2(value: usize) -> usize {
    if value <= 1 {
        0
    } else {
        (usize::BITS - (value - 1).leading_zeros()) as usize
    }
}

/// Joins the present names with `sep`, or returns `None` if no name is present.
pub fn join_options<I: IntoIterator<Item = Option<String>>>(sep: &str, names: I) -> Option<String> {
    let mut names = names.into_iter().flatten().peekable();
    names.peek()?;
    Some(names.collect::<Vec<_>>().join(sep))
}

/// Unwraps an `Option`, or evaluates the fallback expression (typically `return` or `continue`).
#[macro_export]
macro_rules! some_or {
    ($option:expr, $fallback:expr) => {{
        match $option {
            Some(value) => value,
            None => $fallback,
        }
    }};
}
