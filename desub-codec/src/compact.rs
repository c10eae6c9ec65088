// Copyright 2019-2021 Parity Technologies (UK) Ltd.
// This file is part of substrate-desub.
//
// substrate-desub is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// substrate-desub is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with substrate-desub.  If not, see <http://www.gnu.org/licenses/>.

//! SCALE compact integers.
//!
//! The low two bits of the first byte pick the mode:
//!
//! - `0b00`: single byte, the value is the upper six bits.
//! - `0b01`: two bytes, 14 bit value.
//! - `0b10`: four bytes, 30 bit value.
//! - `0b11`: the upper six bits hold `byte_len - 4`, followed by `byte_len` little endian bytes.
//!
//! Encodings that use a wider mode than necessary are accepted. Since the bytes we
//! decode may have to be re-encoded identically, [`Compact`] keeps the width it was
//! decoded from.

use crate::{ByteCursor, Decode, Encode, Error};
use serde::{Serialize, Serializer};

/// Largest number of payload bytes the big-integer mode can announce (`63 + 4`).
pub const MAX_BIG_INT_BYTES: usize = 67;

/// Unsigned integers that may be compact encoded.
pub trait CompactInteger: Copy + Into<u128> + TryFrom<u128> {}

impl CompactInteger for u8 {}
impl CompactInteger for u16 {}
impl CompactInteger for u32 {}
impl CompactInteger for u64 {}
impl CompactInteger for u128 {}

/// Number of bytes the canonical compact encoding of `value` takes up.
pub fn compact_len(value: u128) -> usize {
	match value {
		0..=0x3f => 1,
		0x40..=0x3fff => 2,
		0x4000..=0x3fff_ffff => 4,
		_ => {
			let significant_bytes = (128 - value.leading_zeros() as usize + 7) / 8;
			1 + significant_bytes.max(4)
		}
	}
}

/// Read a compact integer, returning its value and the number of bytes it occupied.
pub fn decode_compact(cursor: &mut ByteCursor<'_>) -> Result<(u128, usize), Error> {
	let offset = cursor.offset();
	let first = cursor.read_byte()?;
	match first & 0b11 {
		0b00 => Ok((u128::from(first >> 2), 1)),
		0b01 => {
			let second = cursor.read_byte()?;
			Ok((u128::from(u16::from_le_bytes([first, second]) >> 2), 2))
		}
		0b10 => {
			let [b1, b2, b3] = cursor.read_array::<3>()?;
			Ok((u128::from(u32::from_le_bytes([first, b1, b2, b3]) >> 2), 4))
		}
		_ => {
			let byte_len = usize::from(first >> 2) + 4;
			let bytes = cursor.read_bytes(byte_len)?;
			if bytes.iter().skip(16).any(|b| *b != 0) {
				return Err(Error::MalformedCompactInt { offset, reason: "value does not fit in 128 bits" });
			}
			let mut le = [0u8; 16];
			let used = byte_len.min(16);
			le[..used].copy_from_slice(&bytes[..used]);
			Ok((u128::from_le_bytes(le), byte_len + 1))
		}
	}
}

/// Write `value` using the mode implied by `encoded_len`. The value must fit that mode;
/// this holds for anything produced by [`compact_len`] or [`decode_compact`].
pub fn encode_compact(value: u128, encoded_len: usize, dest: &mut Vec<u8>) {
	match encoded_len {
		1 => dest.push((value as u8) << 2),
		2 => dest.extend_from_slice(&(((value as u16) << 2) | 0b01).to_le_bytes()),
		4 => dest.extend_from_slice(&(((value as u32) << 2) | 0b10).to_le_bytes()),
		_ => {
			let byte_len = encoded_len - 1;
			dest.push((((byte_len - 4) as u8) << 2) | 0b11);
			let le = value.to_le_bytes();
			dest.extend((0..byte_len).map(|i| le.get(i).copied().unwrap_or(0)));
		}
	}
}

/// A compact encoded integer which remembers how many bytes it was encoded with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Compact<T> {
	value: T,
	encoded_len: usize,
}

impl<T: CompactInteger> Compact<T> {
	/// A compact integer that will encode canonically.
	pub fn new(value: T) -> Self {
		Self { value, encoded_len: compact_len(value.into()) }
	}

	pub fn value(&self) -> T {
		self.value
	}

	/// Number of bytes this value occupies on the wire.
	pub fn encoded_len(&self) -> usize {
		self.encoded_len
	}

	/// Whether this value uses the shortest possible encoding.
	pub fn is_canonical(&self) -> bool {
		self.encoded_len == compact_len(self.value.into())
	}
}

impl<T: CompactInteger> From<T> for Compact<T> {
	fn from(value: T) -> Self {
		Compact::new(value)
	}
}

impl<T: CompactInteger> Decode for Compact<T> {
	fn decode(cursor: &mut ByteCursor<'_>) -> Result<Self, Error> {
		let offset = cursor.offset();
		let (value, encoded_len) = decode_compact(cursor)?;
		let value = T::try_from(value)
			.map_err(|_| Error::MalformedCompactInt { offset, reason: "value out of range for the target integer" })?;
		Ok(Compact { value, encoded_len })
	}
}

impl<T: CompactInteger> Encode for Compact<T> {
	fn encode_to(&self, dest: &mut Vec<u8>) {
		encode_compact(self.value.into(), self.encoded_len, dest)
	}
}

impl<T: Serialize> Serialize for Compact<T> {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		self.value.serialize(serializer)
	}
}
