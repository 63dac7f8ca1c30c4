//! Helper functions for driving callbacks outside of a container.

/// Calls `function` with every index in `0..count`, in order.
///
/// This is the counted loop of the library: it stands in wherever a
/// callback has to run a fixed number of times rather than once per entry.
///
/// # Examples
///
/// ```
/// use kollect::compose::times;
///
/// let data = [1, 2, 3];
/// let mut total = 0;
/// times(data.len(), |index| total += data[index]);
/// assert_eq!(total, 6);
/// ```
#[inline]
pub fn times<F>(count: usize, mut function: F)
where
    F: FnMut(usize),
{
    for index in 0..count {
        function(index);
    }
}
