//! `serde` support for `Octets`.
//!
//! An `Octets` serializes as a byte array and deserializes from byte
//! arrays, byte buffers, strings, and sequences of integers.

use core::fmt;
use core::marker::PhantomData;

use serde::de::{Error, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::alloc::string::String;
use crate::alloc::vec::Vec;
use crate::backend::Count;

use super::Octets;

impl<C: Count> Serialize for Octets<C> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_bytes(self.as_slice())
    }
}

struct OctetsVisitor<C>(PhantomData<C>);

impl<'de, C: Count> Visitor<'de> for OctetsVisitor<C> {
    type Value = Octets<C>;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("byte array")
    }

    fn visit_bytes<E: Error>(self, v: &[u8]) -> Result<Self::Value, E> {
        Ok(Octets::from(v))
    }

    fn visit_byte_buf<E: Error>(self, v: Vec<u8>) -> Result<Self::Value, E> {
        Ok(Octets::from(v))
    }

    fn visit_str<E: Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(Octets::from(v))
    }

    fn visit_string<E: Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(Octets::from(v))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut vec = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(byte) = seq.next_element::<u8>()? {
            vec.push(byte);
        }
        Ok(Octets::from(vec))
    }
}

impl<'de, C: Count> Deserialize<'de> for Octets<C> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_bytes(OctetsVisitor(PhantomData))
    }
}

#[cfg(test)]
mod tests {
    use serde_test::{assert_de_tokens, assert_de_tokens_error, assert_ser_tokens, Token};

    use crate::Octets;

    #[test]
    fn test_serde() {
        let ref empty = Octets::new();
        assert_ser_tokens(empty, &[Token::Bytes(b"")]);
        assert_de_tokens(empty, &[Token::Bytes(b"")]);
        assert_de_tokens(empty, &[Token::ByteBuf(b"")]);
        assert_de_tokens(empty, &[Token::Seq { len: Some(0) }, Token::SeqEnd]);

        let ref small = Octets::from(&[1, 2, 3]);
        assert_ser_tokens(small, &[Token::Bytes(b"\x01\x02\x03")]);
        assert_de_tokens(small, &[Token::Bytes(b"\x01\x02\x03")]);
        assert_de_tokens(small, &[Token::ByteBuf(b"\x01\x02\x03")]);
        assert_de_tokens(
            small,
            &[
                Token::Seq { len: Some(3) },
                Token::U8(1),
                Token::U8(2),
                Token::U8(3),
                Token::SeqEnd,
            ],
        );
    }

    #[test]
    fn test_de_error() {
        assert_de_tokens_error::<Octets>(
            &[Token::Bool(true)],
            "invalid type: boolean `true`, expected byte array",
        );
    }

    #[test]
    fn test_serde_json_round_trip() {
        let o = Octets::from(b"\x00\x01\xFF");
        let value = serde_json::to_value(&o).unwrap();
        let back: Octets = serde_json::from_value(value).unwrap();
        assert_eq!(o, back);
    }

    #[test]
    fn test_serialize_does_not_diverge() {
        let a = Octets::from(b"abcdef");
        let b = a.clone();
        let _ = serde_json::to_value(&a).unwrap();
        assert!(a.is_shared());
        assert_eq!(a.as_ptr(), b.as_ptr());
    }
}
