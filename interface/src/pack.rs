//! Little-endian packing for `woofi` instruction arguments and account records.
//!
//! Layout rules:
//! - Fixed-width integers are written as little-endian bytes.
//! - `bool`s are a single byte, `0` or `1`. Any other value fails to unpack.
//! - Text is a `u32` little-endian byte length followed by the raw UTF-8 bytes.
//! - Addresses are their raw 32 bytes.

use solana_pubkey::Pubkey;

use crate::error::{
    WoofiError,
    WoofiResult,
};

/// A trait for packing values into little-endian bytes appended to a growable buffer.
pub trait Pack {
    /// Appends `self`'s packed bytes to `dst`.
    fn pack_into(&self, dst: &mut Vec<u8>);

    /// The exact number of bytes [`Pack::pack_into`] writes.
    fn packed_len(&self) -> usize;

    /// Packs `self` into a new, exactly sized buffer.
    fn pack(&self) -> Vec<u8> {
        let mut dst = Vec::with_capacity(self.packed_len());
        self.pack_into(&mut dst);
        dst
    }
}

/// A trait for unpacking values from little-endian bytes.
///
/// Unpacking is fallible: the source may be too short, a declared text length may run past the
/// end of the source, or a byte may be an invalid pattern for the type (e.g. a `bool` of `2`).
pub trait Unpack: Sized {
    /// Reads `Self` from the current position of `src`, advancing it past the bytes read.
    fn unpack_from(src: &mut ByteReader<'_>) -> WoofiResult<Self>;

    /// Reads `Self` from the start of `data`. Trailing bytes are ignored.
    fn unpack(data: &[u8]) -> WoofiResult<Self> {
        Self::unpack_from(&mut ByteReader::new(data))
    }
}

/// A bounds-checked cursor over a byte slice.
#[derive(Debug)]
pub struct ByteReader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> ByteReader<'a> {
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    #[inline(always)]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }

    #[inline(always)]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Returns the next `len` bytes and advances past them.
    pub fn take(&mut self, len: usize) -> WoofiResult<&'a [u8]> {
        if self.remaining() < len {
            return Err(WoofiError::InsufficientByteLength);
        }
        let bytes = &self.data[self.offset..self.offset + len];
        self.offset += len;
        Ok(bytes)
    }

    /// Returns the next `N` bytes as an array and advances past them.
    pub fn take_array<const N: usize>(&mut self) -> WoofiResult<[u8; N]> {
        let mut arr = [0u8; N];
        arr.copy_from_slice(self.take(N)?);
        Ok(arr)
    }
}

macro_rules! impl_pack_int {
    ($ty:ty) => {
        impl Pack for $ty {
            #[inline(always)]
            fn pack_into(&self, dst: &mut Vec<u8>) {
                dst.extend_from_slice(&self.to_le_bytes());
            }

            #[inline(always)]
            fn packed_len(&self) -> usize {
                size_of::<$ty>()
            }
        }

        impl Unpack for $ty {
            #[inline(always)]
            fn unpack_from(src: &mut ByteReader<'_>) -> WoofiResult<Self> {
                Ok(<$ty>::from_le_bytes(src.take_array()?))
            }
        }
    };
}

impl_pack_int!(u8);
impl_pack_int!(u32);
impl_pack_int!(u64);
impl_pack_int!(i64);

impl Pack for bool {
    #[inline(always)]
    fn pack_into(&self, dst: &mut Vec<u8>) {
        dst.push(*self as u8);
    }

    #[inline(always)]
    fn packed_len(&self) -> usize {
        1
    }
}

impl Unpack for bool {
    fn unpack_from(src: &mut ByteReader<'_>) -> WoofiResult<Self> {
        match u8::unpack_from(src)? {
            0 => Ok(false),
            1 => Ok(true),
            _ => Err(WoofiError::InvalidBoolByte),
        }
    }
}

impl Pack for Pubkey {
    #[inline(always)]
    fn pack_into(&self, dst: &mut Vec<u8>) {
        dst.extend_from_slice(self.as_ref());
    }

    #[inline(always)]
    fn packed_len(&self) -> usize {
        32
    }
}

impl Unpack for Pubkey {
    fn unpack_from(src: &mut ByteReader<'_>) -> WoofiResult<Self> {
        Ok(Pubkey::new_from_array(src.take_array()?))
    }
}

impl Pack for String {
    fn pack_into(&self, dst: &mut Vec<u8>) {
        // Text longer than `u32::MAX` bytes can't be allocated in an account or instruction.
        (self.len() as u32).pack_into(dst);
        dst.extend_from_slice(self.as_bytes());
    }

    #[inline(always)]
    fn packed_len(&self) -> usize {
        size_of::<u32>() + self.len()
    }
}

impl Unpack for String {
    fn unpack_from(src: &mut ByteReader<'_>) -> WoofiResult<Self> {
        let len = u32::unpack_from(src)? as usize;
        if len > src.remaining() {
            return Err(WoofiError::DeclaredLengthOverrun);
        }
        let bytes = src.take(len)?;
        String::from_utf8(bytes.to_vec()).map_err(|_| WoofiError::InvalidUtf8)
    }
}

/// Implements [`Pack`] and [`Unpack`] for a struct by packing each listed field in order.
///
/// The field list must name every field of the struct, in wire order.
#[macro_export]
macro_rules! packable_struct {
    ($ty:ident { $($field:ident),+ $(,)? }) => {
        impl $crate::pack::Pack for $ty {
            fn pack_into(&self, dst: &mut ::std::vec::Vec<u8>) {
                $( $crate::pack::Pack::pack_into(&self.$field, dst); )+
            }

            fn packed_len(&self) -> usize {
                0 $( + $crate::pack::Pack::packed_len(&self.$field) )+
            }
        }

        impl $crate::pack::Unpack for $ty {
            fn unpack_from(
                src: &mut $crate::pack::ByteReader<'_>,
            ) -> $crate::error::WoofiResult<Self> {
                // Struct literal fields are evaluated in source order, which is the wire order.
                Ok(Self {
                    $( $field: $crate::pack::Unpack::unpack_from(src)?, )+
                })
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ints_are_little_endian() {
        assert_eq!(0x0102_0304u32.pack(), vec![4, 3, 2, 1]);
        assert_eq!((-2i64).pack(), vec![0xfe, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff]);
        assert_eq!(u64::unpack(&u64::MAX.pack()), Ok(u64::MAX));
    }

    #[test]
    fn bool_rejects_invalid_bytes() {
        assert_eq!(bool::unpack(&[0]), Ok(false));
        assert_eq!(bool::unpack(&[1]), Ok(true));
        assert_eq!(bool::unpack(&[2]), Err(WoofiError::InvalidBoolByte));
        assert_eq!(bool::unpack(&[]), Err(WoofiError::InsufficientByteLength));
    }

    #[test]
    fn string_is_length_prefixed() {
        let packed = String::from("Max").pack();
        assert_eq!(packed, vec![3, 0, 0, 0, b'M', b'a', b'x']);
        assert_eq!(String::unpack(&packed).as_deref(), Ok("Max"));
        assert_eq!(String::unpack(&[0, 0, 0, 0]).as_deref(), Ok(""));
    }

    #[test]
    fn string_declared_length_overrun() {
        // Declares 4 bytes of text but only 3 follow.
        assert_eq!(
            String::unpack(&[4, 0, 0, 0, b'a', b'b', b'c']),
            Err(WoofiError::DeclaredLengthOverrun)
        );
        // A length prefix claiming far more than any buffer holds.
        assert_eq!(
            String::unpack(&[0xff, 0xff, 0xff, 0xff]),
            Err(WoofiError::DeclaredLengthOverrun)
        );
        // The length prefix itself is truncated.
        assert_eq!(String::unpack(&[1, 0]), Err(WoofiError::InsufficientByteLength));
    }

    #[test]
    fn string_rejects_invalid_utf8() {
        assert_eq!(
            String::unpack(&[2, 0, 0, 0, 0xc3, 0x28]),
            Err(WoofiError::InvalidUtf8)
        );
    }

    #[test]
    fn reader_tracks_offset() {
        let data = [1u8, 2, 3, 4, 5];
        let mut reader = ByteReader::new(&data);
        assert_eq!(reader.take(2), Ok(&data[0..2]));
        assert_eq!(reader.offset(), 2);
        assert_eq!(reader.remaining(), 3);
        assert_eq!(reader.take(4), Err(WoofiError::InsufficientByteLength));
        // A failed read doesn't advance the cursor.
        assert_eq!(reader.offset(), 2);
    }
}
