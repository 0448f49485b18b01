//! Yet another **byte buffer** for Rust 🦀
//!
//! * **O(1) copy**: clones share the backing store, no byte is copied
//! * **copy-on-write**: a mutation through one handle never shows through
//!   another
//! * **zero dependency**, except for optional `serde` support
//!
//! # Examples
//!
//! ```rust
//! use octets::Octets;
//!
//! let payload = Octets::from(b"\xDE\xAD\xBE\xEF");
//! let copy = payload.clone(); // no copy
//! std::thread::spawn(move || { assert_eq!(copy.hex(), "deadbeef"); });
//!
//! let mut frame = payload.clone();
//! frame.push_slice(b"\x00\x00"); // diverges here
//! assert_eq!(payload.len(), 4); // the original is untouched
//! ```
//!
//! # One type, two counters
//!
//! [`bytes::Octets`] is generic over its reference counter:
//!
//! - [`ThreadSafe`], an atomic counter: handles sharing a buffer may live on
//!   different threads,
//! - [`Local`], a plain cell: cheaper, but single-threaded.
//!
//! The crate root provides the convenience aliases [`Octets`] and
//! [`LocalOctets`].
//!
//! Sharing is strictly about *reading*: the buffer behind a shared handle is
//! never written. The first mutation through a handle that is not the sole
//! owner copies the bytes into a private buffer first, so concurrent readers
//! need no synchronization beyond the counter itself.

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(clippy::pedantic, clippy::nursery, clippy::cargo)]
#![warn(unsafe_op_in_unsafe_fn)]

#[cfg(not(feature = "std"))]
pub(crate) extern crate alloc;

#[cfg(feature = "std")]
pub(crate) use std as alloc;

mod backend;
pub mod bytes;
mod rep;

pub use backend::{Count, Local, ThreadSafe};

/// Thread-safe shared byte buffer.
pub type Octets = bytes::Octets<ThreadSafe>;

/// Thread-local byte buffer.
pub type LocalOctets = bytes::Octets<Local>;
