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

use crate::Error;
use desub_common::SpecVersion;

/// Something that can be decoded from the bytes under a [`ByteCursor`].
pub trait Decode: Sized {
	/// Decode a value, advancing the cursor past exactly the bytes that encode it.
	fn decode(cursor: &mut ByteCursor<'_>) -> Result<Self, Error>;
}

/// Something that can be SCALE encoded. Implementations must write fields in the
/// same order [`Decode`] reads them; that order is the wire format.
pub trait Encode {
	fn encode_to(&self, dest: &mut Vec<u8>);

	fn encode(&self) -> Vec<u8> {
		let mut dest = Vec::new();
		self.encode_to(&mut dest);
		dest
	}
}

/// A decoded value, together with the number of input bytes it was decoded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded<T> {
	pub value: T,
	pub bytes_consumed: usize,
}

impl<T> Decoded<T> {
	pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Decoded<U> {
		Decoded { value: f(self.value), bytes_consumed: self.bytes_consumed }
	}

	pub fn into_value(self) -> T {
		self.value
	}
}

/// Sequential, forward-only reader over an immutable byte buffer.
///
/// A cursor belongs to exactly one decode session. It also remembers the
/// runtime version the bytes were produced by (if the caller knows it), since a
/// few decoders (addresses) change shape across runtime upgrades.
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
	data: &'a [u8],
	offset: usize,
	runtime_version: Option<SpecVersion>,
}

impl<'a> ByteCursor<'a> {
	pub fn new(data: &'a [u8]) -> Self {
		Self { data, offset: 0, runtime_version: None }
	}

	pub fn with_runtime_version(data: &'a [u8], runtime_version: Option<SpecVersion>) -> Self {
		Self { data, offset: 0, runtime_version }
	}

	/// The runtime version of the chain that produced these bytes, if known.
	pub fn runtime_version(&self) -> Option<SpecVersion> {
		self.runtime_version
	}

	/// Number of bytes read so far.
	pub fn offset(&self) -> usize {
		self.offset
	}

	pub fn remaining(&self) -> usize {
		self.data.len() - self.offset
	}

	pub fn is_empty(&self) -> bool {
		self.remaining() == 0
	}

	/// The bytes that have not been read yet.
	pub fn remaining_bytes(&self) -> &'a [u8] {
		&self.data[self.offset..]
	}

	fn ensure(&self, needed: usize) -> Result<(), Error> {
		if needed > self.remaining() {
			return Err(Error::BufferUnderrun { offset: self.offset, needed, remaining: self.remaining() });
		}
		Ok(())
	}

	/// Current byte, without advancing.
	pub fn peek_byte(&self) -> Result<u8, Error> {
		self.ensure(1)?;
		Ok(self.data[self.offset])
	}

	pub fn read_byte(&mut self) -> Result<u8, Error> {
		let byte = self.peek_byte()?;
		self.offset += 1;
		Ok(byte)
	}

	/// Borrow the next `len` bytes of the input and advance past them.
	pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], Error> {
		self.ensure(len)?;
		let bytes = &self.data[self.offset..self.offset + len];
		self.offset += len;
		Ok(bytes)
	}

	pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], Error> {
		let mut out = [0u8; N];
		out.copy_from_slice(self.read_bytes(N)?);
		Ok(out)
	}

	/// Decode the next value and report how many bytes it took.
	pub fn decode_next<T: Decode>(&mut self) -> Result<Decoded<T>, Error> {
		self.decode_next_with(T::decode)
	}

	/// Like [`ByteCursor::decode_next`], for decoders that need more than the cursor
	/// (an address strategy, a version, ...).
	pub fn decode_next_with<T>(
		&mut self,
		decode: impl FnOnce(&mut Self) -> Result<T, Error>,
	) -> Result<Decoded<T>, Error> {
		let start = self.offset;
		let value = decode(self)?;
		Ok(Decoded { value, bytes_consumed: self.offset - start })
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn reads_advance_offset() {
		let bytes = [1u8, 2, 3, 4, 5];
		let mut cursor = ByteCursor::new(&bytes);
		assert_eq!(cursor.peek_byte().unwrap(), 1);
		assert_eq!(cursor.read_byte().unwrap(), 1);
		assert_eq!(cursor.read_bytes(2).unwrap(), &[2, 3]);
		assert_eq!(cursor.read_array::<2>().unwrap(), [4, 5]);
		assert_eq!(cursor.offset(), 5);
		assert!(cursor.is_empty());
	}

	#[test]
	fn underrun_reports_position() {
		let bytes = [1u8, 2];
		let mut cursor = ByteCursor::new(&bytes);
		cursor.read_byte().unwrap();
		assert_eq!(cursor.read_bytes(4), Err(Error::BufferUnderrun { offset: 1, needed: 4, remaining: 1 }));
		// A failed read doesn't move the cursor.
		assert_eq!(cursor.offset(), 1);
	}

	#[test]
	fn decode_next_counts_bytes() {
		let bytes = [7u8, 0, 0, 0, 9];
		let mut cursor = ByteCursor::new(&bytes);
		let first = cursor.decode_next::<u32>().unwrap();
		assert_eq!(first, Decoded { value: 7, bytes_consumed: 4 });
		let second = cursor.decode_next::<u8>().unwrap();
		assert_eq!(second.bytes_consumed, 1);
		assert_eq!(second.into_value(), 9);
	}
}
