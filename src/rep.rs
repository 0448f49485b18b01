//! Shared representation backing [`Octets`](crate::bytes::Octets).
//!
//! A [`Rep`] is a non-null pointer to a reference-counting heap cell that
//! owns the actual byte storage. It is crate-private on purpose: the only
//! way to create, share or destroy a cell is through the handle type, which
//! is what keeps the copy-on-write protocol sound.
//!
//! Rules for the cell:
//!
//! - the buffer is never written while the count is above one; a handle
//!   that needs to write first obtains a private copy via [`Rep::clone_bytes`],
//! - cloning a `Rep` shares (increments), dropping one releases (decrements),
//!   and the cell is reclaimed by whoever decrements the count to zero.

use core::mem::ManuallyDrop;
use core::ptr::NonNull;

use crate::alloc::boxed::Box;
use crate::alloc::string::String;
use crate::alloc::vec::Vec;
use crate::backend::Count;

/// Reference counting cell: the counter and the owned byte storage.
///
/// The `Vec` provides the buffer, its capacity and the logically valid
/// length, with `len <= capacity` holding by construction.
struct Inner<C: Count> {
    count: C,
    buf: Vec<u8>,
}

/// Shared byte storage handle, one per owner.
///
/// Deliberately not `Copy`: every copy must go through [`Clone`] so the
/// count stays in step with the number of owners.
pub(crate) struct Rep<C: Count>(NonNull<Inner<C>>);

unsafe impl<C: Count + Send + Sync> Send for Rep<C> {}

unsafe impl<C: Count + Send + Sync> Sync for Rep<C> {}

impl<C: Count> Rep<C> {
    #[inline]
    fn from_inner(inner: Inner<C>) -> Self {
        let ptr = Box::into_raw(Box::new(inner));
        // SAFETY: `Box::into_raw` never returns a null pointer
        Self(unsafe { NonNull::new_unchecked(ptr) })
    }

    /// Creates a cell owning a copy of `bytes`, with a count of one.
    #[inline]
    pub(crate) fn from_slice(bytes: &[u8]) -> Self {
        Self::from_inner(Inner {
            count: C::one(),
            buf: Vec::from(bytes),
        })
    }

    /// Creates a cell taking ownership of `vec`, without copying.
    ///
    /// The vector's spare capacity is kept.
    #[inline]
    pub(crate) fn from_vec(vec: Vec<u8>) -> Self {
        Self::from_inner(Inner {
            count: C::one(),
            buf: vec,
        })
    }

    /// Creates an empty cell with room for at least `capacity` bytes.
    #[inline]
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self::from_vec(Vec::with_capacity(capacity))
    }

    /// Gets a reference to the cell.
    #[inline]
    fn inner(&self) -> &Inner<C> {
        // SAFETY: type invariant, the pointer is valid as long as any owner
        // remains
        unsafe { self.0.as_ref() }
    }

    /// Returns the number of logically valid bytes.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.inner().buf.len()
    }

    /// Returns the allocated capacity of the buffer.
    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.inner().buf.capacity()
    }

    /// Returns the valid bytes as a slice.
    #[inline]
    pub(crate) fn as_slice(&self) -> &[u8] {
        &self.inner().buf
    }

    /// Returns a pointer to the start of the buffer.
    #[inline]
    #[cfg(test)]
    pub(crate) fn as_ptr(&self) -> *const u8 {
        self.inner().buf.as_ptr()
    }

    /// Checks if this owner is the only one.
    #[inline]
    pub(crate) fn is_unique(&self) -> bool {
        self.inner().count.get() == 1
    }

    /// Gets the current owner count.
    #[inline]
    #[cfg(test)]
    pub(crate) fn ref_count(&self) -> usize {
        self.inner().count.get()
    }

    /// Creates an independent cell holding a copy of the valid bytes, with
    /// a fresh count of one.
    ///
    /// This is the divergence step of copy-on-write: the result may be
    /// mutated freely without affecting any owner of `self`.
    #[inline]
    pub(crate) fn clone_bytes(&self) -> Self {
        Self::from_slice(self.as_slice())
    }

    /// Returns the valid bytes as a mutable slice if this owner is the only
    /// one.
    #[inline]
    pub(crate) fn as_mut_slice(&mut self) -> Option<&mut [u8]> {
        if self.is_unique() {
            // SAFETY: uniqueness checked above
            Some(unsafe { self.as_mut_slice_unchecked() })
        } else {
            None
        }
    }

    /// Returns the valid bytes as a mutable slice.
    ///
    /// # Safety
    ///
    /// This owner must be the only one, cf. [`Self::is_unique`].
    #[inline]
    pub(crate) unsafe fn as_mut_slice_unchecked(&mut self) -> &mut [u8] {
        // SAFETY: forwarded precondition
        unsafe { self.buf_mut() }
    }

    /// Gets a mutable reference to the byte storage.
    ///
    /// # Safety
    ///
    /// This owner must be the only one, cf. [`Self::is_unique`].
    #[inline]
    unsafe fn buf_mut(&mut self) -> &mut Vec<u8> {
        debug_assert!(self.is_unique(), "Rep::buf_mut on a shared cell");

        // SAFETY: uniqueness per the function precondition, validity per the
        // type invariant
        unsafe { &mut self.0.as_mut().buf }
    }

    /// Grows the buffer to hold at least `min_capacity` bytes.
    ///
    /// Growth is geometric (at least doubling) so repeated appends stay
    /// amortized O(1) per byte. Never shrinks, never touches the valid
    /// bytes.
    ///
    /// # Safety
    ///
    /// This owner must be the only one.
    pub(crate) unsafe fn reserve(&mut self, min_capacity: usize) {
        // SAFETY: forwarded precondition
        let buf = unsafe { self.buf_mut() };
        let capacity = buf.capacity();
        if min_capacity > capacity {
            let target = min_capacity.max(capacity * 2);
            buf.reserve_exact(target - buf.len());
        }
    }

    /// Appends `addition` in place.
    ///
    /// # Safety
    ///
    /// This owner must be the only one.
    #[inline]
    pub(crate) unsafe fn push_slice(&mut self, addition: &[u8]) {
        // SAFETY: forwarded precondition
        unsafe { self.buf_mut() }.extend_from_slice(addition);
    }

    /// Extracts the byte storage if this owner is the only one.
    ///
    /// # Errors
    ///
    /// Returns `Err(self)` when the cell is shared.
    #[inline]
    pub(crate) fn try_unwrap(self) -> Result<Vec<u8>, Self> {
        if self.is_unique() {
            // do not run `Drop`, the cell is reclaimed right here
            let this = ManuallyDrop::new(self);
            // SAFETY: sole owner, the pointer is valid and never used again
            let inner = unsafe { Box::from_raw(this.0.as_ptr()) };
            Ok(inner.buf)
        } else {
            Err(self)
        }
    }

    /// Returns the buffer contents as a lowercase hexadecimal string, two
    /// digits per byte, most significant nibble first.
    pub(crate) fn hex(&self) -> String {
        const TABLE: &[u8; 16] = b"0123456789abcdef";

        let bytes = self.as_slice();
        let mut out = String::with_capacity(bytes.len() * 2);
        for &byte in bytes {
            out.push(TABLE[usize::from(byte >> 4)] as char);
            out.push(TABLE[usize::from(byte & 0xF)] as char);
        }
        out
    }
}

impl<C: Count> Clone for Rep<C> {
    /// Shares the cell: increments the count, no byte is copied.
    #[inline]
    fn clone(&self) -> Self {
        if self.inner().count.incr() {
            panic!("owner count overflow");
        }
        Self(self.0)
    }
}

impl<C: Count> Drop for Rep<C> {
    /// Releases the cell, reclaiming it if this was the last owner.
    #[inline]
    fn drop(&mut self) {
        if self.inner().count.decr() {
            // SAFETY: count reached zero, no other owner can observe the
            // cell anymore; reclaim the box created in `from_inner`
            let _ = unsafe { Box::from_raw(self.0.as_ptr()) };
        }
    }
}
