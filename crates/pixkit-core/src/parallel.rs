//! Elementwise iteration over disjoint partitions.
//!
//! An image's index space `0..width*height` is split into contiguous,
//! disjoint partitions. Each partition gets its own mutable cursor over its
//! slice of the buffer (see [`PartitionCursor`]), so two partitions can never
//! touch the same pixel. Partitions run on rayon unless the
//! [`IterationConfig`] asks for sequential execution.
//!
//! # Protocol
//!
//! A [`PixelManipulator`] is driven like this, per partition:
//!
//! ```text
//! element = allocate_element()          once per partition
//! for index in partition (ascending):
//!     cursor.set_index(index)
//!     bind(&cursor, &mut element)       e.g. move a secondary cursor
//!     apply(&mut cursor, &mut element)  the operation, may fail
//!     flush(&mut cursor, &mut element)  commit deferred writes
//! ```
//!
//! The element is never shared between partitions, so manipulators can keep
//! per-partition scratch state in it without locking.
//!
//! # Failure
//!
//! If `apply` fails, its partition stops at that pixel and the run returns
//! [`Error::PartitionFailed`]. Other partitions may already be done.
//!
//! # Example
//!
//! ```rust
//! use pixkit_core::{parallel, Img, ImgBase, IterationConfig, PixelBase, PixelBaseMut};
//!
//! let mut img = Img::new(64, 64);
//! let invert = parallel::from_fn(|px| {
//!     px.set_rgb_preserve_alpha(1.0 - px.r(), 1.0 - px.g(), 1.0 - px.b());
//!     Ok(())
//! });
//! img.for_each_with(&invert, &IterationConfig::default()).unwrap();
//! assert_eq!(img.get(3, 3), 0x00ffffff);
//! ```

use std::ops::Range;

use rayon::prelude::*;
use tracing::{debug, trace};

use crate::{Error, IterationConfig, PixelBase, PixelBaseMut, Result};

/// An elementwise operation with optional per-partition state.
///
/// Methods are generic over the cursor type, so one manipulator works on
/// packed and planar images alike.
pub trait PixelManipulator: Sync {
    /// Per-partition state, created by [`allocate_element`](Self::allocate_element).
    type Element;

    /// Creates the state for one partition.
    fn allocate_element(&self) -> Self::Element;

    /// Prepares the element for the pixel under `px`. Default: no-op.
    #[inline]
    fn bind<P: PixelBase>(&self, _px: &P, _element: &mut Self::Element) {}

    /// The operation itself.
    fn apply<P: PixelBaseMut>(&self, px: &mut P, element: &mut Self::Element) -> Result<()>;

    /// Writes deferred effects back to `px`. Default: no-op.
    #[inline]
    fn flush<P: PixelBaseMut>(&self, _px: &mut P, _element: &mut Self::Element) {}
}

/// A mutable cursor restricted to one partition of an image.
pub trait PartitionCursor: PixelBaseMut + Send {
    /// Indices this cursor may access.
    fn range(&self) -> Range<usize>;
}

/// Result of running one partition: `Err((processed, error))` on failure.
pub(crate) type PartitionOutcome = std::result::Result<(), (usize, Error)>;

/// Runs `work` once per partition, sequentially or on the pool.
pub(crate) fn run_partitions<P, W>(partitions: Vec<P>, config: &IterationConfig, work: W) -> Result<()>
where
    P: PartitionCursor,
    W: Fn(&mut P) -> PartitionOutcome + Sync,
{
    let parallel = config.parallel && partitions.len() > 1;
    debug!(partitions = partitions.len(), parallel, "Running pixel iteration");

    let run = |(partition, mut cursor): (usize, P)| -> Result<()> {
        let range = cursor.range();
        trace!(partition, start = range.start, end = range.end, "partition");
        work(&mut cursor).map_err(|(processed, source)| Error::PartitionFailed {
            partition,
            start: range.start,
            end: range.end,
            processed,
            source: Box::new(source),
        })
    };

    if !parallel {
        return partitions.into_iter().enumerate().try_for_each(run);
    }
    let job = || partitions.into_par_iter().enumerate().try_for_each(run);
    match &config.pool {
        Some(pool) => pool.install(job),
        None => job(),
    }
}

/// Drives `manipulator` over every index of one partition.
pub(crate) fn manipulate<P, M>(px: &mut P, manipulator: &M) -> PartitionOutcome
where
    P: PartitionCursor,
    M: PixelManipulator,
{
    let range = px.range();
    let mut element = manipulator.allocate_element();
    for index in range.clone() {
        px.set_index(index);
        manipulator.bind(&*px, &mut element);
        manipulator
            .apply(px, &mut element)
            .map_err(|e| (index - range.start, e))?;
        manipulator.flush(px, &mut element);
    }
    Ok(())
}

/// Calls `op` for every index of one partition.
pub(crate) fn visit<P, F>(px: &mut P, op: F) -> PartitionOutcome
where
    P: PartitionCursor,
    F: Fn(&mut P) -> Result<()>,
{
    let range = px.range();
    for index in range.clone() {
        px.set_index(index);
        op(px).map_err(|e| (index - range.start, e))?;
    }
    Ok(())
}

/// Stateless manipulator built from a closure, see [`from_fn`].
#[derive(Debug, Clone, Copy)]
pub struct FnManipulator<F>(F);

/// Wraps a closure over `&mut dyn PixelBaseMut` as a [`PixelManipulator`].
///
/// Works on any image; use the inherent `for_each` helpers of
/// [`Img`](crate::Img) and [`ColorImg`](crate::ColorImg) when the concrete
/// cursor type is needed.
pub fn from_fn<F>(op: F) -> FnManipulator<F>
where
    F: Fn(&mut dyn PixelBaseMut) -> Result<()> + Sync,
{
    FnManipulator(op)
}

impl<F> PixelManipulator for FnManipulator<F>
where
    F: Fn(&mut dyn PixelBaseMut) -> Result<()> + Sync,
{
    type Element = ();

    #[inline]
    fn allocate_element(&self) {}

    #[inline]
    fn apply<P: PixelBaseMut>(&self, px: &mut P, _element: &mut ()) -> Result<()> {
        let px: &mut dyn PixelBaseMut = px;
        (self.0)(px)
    }
}
