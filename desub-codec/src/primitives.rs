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

//! Fixed width integers, booleans, byte blobs, strings and fixed size hashes.

use crate::compact::{compact_len, decode_compact, encode_compact};
use crate::{ByteCursor, Decode, Encode, Error};
use serde::{Serialize, Serializer};
use std::{fmt, ops::Deref};

macro_rules! impl_fixed_width {
	($($ty:ty),*) => {$(
		impl Decode for $ty {
			fn decode(cursor: &mut ByteCursor<'_>) -> Result<Self, Error> {
				Ok(<$ty>::from_le_bytes(cursor.read_array()?))
			}
		}

		impl Encode for $ty {
			fn encode_to(&self, dest: &mut Vec<u8>) {
				dest.extend_from_slice(&self.to_le_bytes());
			}
		}
	)*};
}

impl_fixed_width!(u8, u16, u32, u64, u128, i8, i16, i32, i64, i128);

/// Any non-zero byte reads as `true`; chains have been seen emitting values other
/// than `0x01`. Encoding is always canonical.
impl Decode for bool {
	fn decode(cursor: &mut ByteCursor<'_>) -> Result<Self, Error> {
		Ok(cursor.read_byte()? != 0)
	}
}

impl Encode for bool {
	fn encode_to(&self, dest: &mut Vec<u8>) {
		dest.push(u8::from(*self));
	}
}

/// Read the compact length prefix of a sequence as a `usize`, with the prefix width.
pub(crate) fn decode_length(cursor: &mut ByteCursor<'_>) -> Result<(usize, usize), Error> {
	let offset = cursor.offset();
	let (len, prefix_len) = decode_compact(cursor)?;
	let len = usize::try_from(len)
		.map_err(|_| Error::MalformedCompactInt { offset, reason: "sequence length does not fit in usize" })?;
	Ok((len, prefix_len))
}

/// Serialize bytes as a `0x` prefixed hex string.
pub fn serialize_hex<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
	let mut hex_str = String::from("0x");
	hex_str.push_str(&hex::encode(bytes));
	serializer.serialize_str(&hex_str)
}

/// A compact length prefixed blob of bytes.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct Bytes {
	data: Vec<u8>,
	prefix_len: usize,
}

impl Bytes {
	pub fn new(data: Vec<u8>) -> Self {
		let prefix_len = compact_len(data.len() as u128);
		Self { data, prefix_len }
	}

	pub fn into_inner(self) -> Vec<u8> {
		self.data
	}
}

impl Deref for Bytes {
	type Target = [u8];
	fn deref(&self) -> &Self::Target {
		&self.data
	}
}

impl From<Vec<u8>> for Bytes {
	fn from(data: Vec<u8>) -> Self {
		Bytes::new(data)
	}
}

impl From<&[u8]> for Bytes {
	fn from(data: &[u8]) -> Self {
		Bytes::new(data.to_vec())
	}
}

impl fmt::Debug for Bytes {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "0x{}", hex::encode(&self.data))
	}
}

impl Decode for Bytes {
	fn decode(cursor: &mut ByteCursor<'_>) -> Result<Self, Error> {
		let (len, prefix_len) = decode_length(cursor)?;
		let data = cursor.read_bytes(len)?.to_vec();
		Ok(Bytes { data, prefix_len })
	}
}

impl Encode for Bytes {
	fn encode_to(&self, dest: &mut Vec<u8>) {
		encode_compact(self.data.len() as u128, self.prefix_len, dest);
		dest.extend_from_slice(&self.data);
	}
}

impl Serialize for Bytes {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serialize_hex(&self.data, serializer)
	}
}

/// A compact length prefixed UTF-8 string.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Text {
	text: String,
	prefix_len: usize,
}

impl Text {
	pub fn new(text: impl Into<String>) -> Self {
		let text = text.into();
		let prefix_len = compact_len(text.len() as u128);
		Self { text, prefix_len }
	}

	pub fn as_str(&self) -> &str {
		&self.text
	}
}

impl Deref for Text {
	type Target = str;
	fn deref(&self) -> &Self::Target {
		&self.text
	}
}

impl From<&str> for Text {
	fn from(s: &str) -> Self {
		Text::new(s)
	}
}

impl From<String> for Text {
	fn from(s: String) -> Self {
		Text::new(s)
	}
}

impl From<Text> for String {
	fn from(t: Text) -> Self {
		t.text
	}
}

impl PartialEq<str> for Text {
	fn eq(&self, other: &str) -> bool {
		self.text == other
	}
}

impl PartialEq<&str> for Text {
	fn eq(&self, other: &&str) -> bool {
		self.text == *other
	}
}

impl fmt::Debug for Text {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt::Debug::fmt(&self.text, f)
	}
}

impl fmt::Display for Text {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.text)
	}
}

impl Decode for Text {
	fn decode(cursor: &mut ByteCursor<'_>) -> Result<Self, Error> {
		let (len, prefix_len) = decode_length(cursor)?;
		let offset = cursor.offset();
		let bytes = cursor.read_bytes(len)?;
		let text = std::str::from_utf8(bytes).map_err(|_| Error::InvalidUtf8 { offset })?.to_owned();
		Ok(Text { text, prefix_len })
	}
}

impl Encode for Text {
	fn encode_to(&self, dest: &mut Vec<u8>) {
		encode_compact(self.text.len() as u128, self.prefix_len, dest);
		dest.extend_from_slice(self.text.as_bytes());
	}
}

impl Serialize for Text {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_str(&self.text)
	}
}

/// Exactly `N` raw bytes with no length prefix; the width comes from the type,
/// not from the data (20 byte fingerprints, 32 byte hashes, ...).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FixedHash<const N: usize>(pub [u8; N]);

impl<const N: usize> FixedHash<N> {
	pub fn as_bytes(&self) -> &[u8] {
		&self.0
	}
}

impl<const N: usize> From<[u8; N]> for FixedHash<N> {
	fn from(bytes: [u8; N]) -> Self {
		FixedHash(bytes)
	}
}

impl<const N: usize> fmt::Debug for FixedHash<N> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "0x{}", hex::encode(self.0))
	}
}

impl<const N: usize> Decode for FixedHash<N> {
	fn decode(cursor: &mut ByteCursor<'_>) -> Result<Self, Error> {
		Ok(FixedHash(cursor.read_array()?))
	}
}

impl<const N: usize> Encode for FixedHash<N> {
	fn encode_to(&self, dest: &mut Vec<u8>) {
		dest.extend_from_slice(&self.0);
	}
}

impl<const N: usize> Serialize for FixedHash<N> {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serialize_hex(&self.0, serializer)
	}
}
