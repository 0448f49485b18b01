//! Conversion trait implementations for `Octets`.

use crate::alloc::borrow::Cow;
use crate::alloc::boxed::Box;
use crate::alloc::string::String;
use crate::alloc::vec::Vec;
use crate::backend::Count;
use crate::rep::Rep;

use super::Octets;

impl<C: Count> AsRef<[u8]> for Octets<C> {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}

// Infallible conversions

impl<C: Count> From<&[u8]> for Octets<C> {
    #[inline]
    fn from(value: &[u8]) -> Self {
        if value.is_empty() {
            Self::new()
        } else {
            Self {
                rep: Some(Rep::from_slice(value)),
            }
        }
    }
}

impl<C: Count, const N: usize> From<&[u8; N]> for Octets<C> {
    #[inline]
    fn from(value: &[u8; N]) -> Self {
        Self::from(value.as_slice())
    }
}

impl<C: Count> From<&str> for Octets<C> {
    /// Copies the string's bytes, UTF-8 as they are.
    #[inline]
    fn from(value: &str) -> Self {
        Self::from(value.as_bytes())
    }
}

impl<C: Count> From<String> for Octets<C> {
    /// Takes ownership of the string's buffer without copying.
    #[inline]
    fn from(value: String) -> Self {
        Self::from_vec(value.into_bytes())
    }
}

impl<C: Count> From<Vec<u8>> for Octets<C> {
    /// Takes ownership of the vector without copying.
    #[inline]
    fn from(value: Vec<u8>) -> Self {
        Self::from_vec(value)
    }
}

impl<C: Count> From<Box<[u8]>> for Octets<C> {
    /// Takes ownership of the boxed slice without copying.
    #[inline]
    fn from(value: Box<[u8]>) -> Self {
        Self::from_vec(value.into_vec())
    }
}

impl<C: Count> From<Cow<'_, [u8]>> for Octets<C> {
    #[inline]
    fn from(value: Cow<'_, [u8]>) -> Self {
        match value {
            Cow::Borrowed(borrow) => Self::from(borrow),
            Cow::Owned(owned) => Self::from(owned),
        }
    }
}

impl<C: Count> From<Octets<C>> for Vec<u8> {
    #[inline]
    fn from(value: Octets<C>) -> Self {
        value.into_vec()
    }
}

impl<C: Count> Octets<C> {
    /// Converts `self` into a [`Vec`], without copying when this handle is
    /// the sole owner of its buffer.
    ///
    /// # Examples
    ///
    /// ```
    /// # use octets::Octets;
    /// let o = Octets::from(vec![1, 2, 3]);
    /// let v: Vec<u8> = o.into_vec();
    /// assert_eq!(v, [1, 2, 3]);
    /// ```
    #[inline]
    #[must_use]
    pub fn into_vec(self) -> Vec<u8> {
        match self.rep {
            None => Vec::new(),
            Some(rep) => rep
                .try_unwrap()
                .unwrap_or_else(|shared| shared.as_slice().to_vec()),
        }
    }
}
