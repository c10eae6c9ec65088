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

//! Codecs built out of other codecs: `Option<T>`, [`Array<T>`], tuples and enums.
//! Structs are built with the [`crate::composite`] macro.

use crate::compact::{compact_len, encode_compact};
use crate::primitives::decode_length;
use crate::{ByteCursor, Decode, Encode, Error};
use serde::{Serialize, Serializer};
use std::{fmt, mem, ops::Deref};

/// One presence byte; `0x00` is `None`, `0x01` is followed by the value.
impl<T: Decode> Decode for Option<T> {
	fn decode(cursor: &mut ByteCursor<'_>) -> Result<Self, Error> {
		decode_option_with(cursor, T::decode)
	}
}

/// Decode an optional value whose inner decoder needs more than the cursor.
pub fn decode_option_with<'a, T>(
	cursor: &mut ByteCursor<'a>,
	decode: impl FnOnce(&mut ByteCursor<'a>) -> Result<T, Error>,
) -> Result<Option<T>, Error> {
	let offset = cursor.offset();
	match cursor.read_byte()? {
		0 => Ok(None),
		1 => Ok(Some(decode(cursor)?)),
		byte => Err(Error::MalformedOptional { byte, offset }),
	}
}

impl<T: Encode> Encode for Option<T> {
	fn encode_to(&self, dest: &mut Vec<u8>) {
		match self {
			None => dest.push(0),
			Some(value) => {
				dest.push(1);
				value.encode_to(dest);
			}
		}
	}
}

macro_rules! impl_tuple {
	($($name:ident),+) => {
		impl<$($name: Decode),+> Decode for ($($name,)+) {
			fn decode(cursor: &mut ByteCursor<'_>) -> Result<Self, Error> {
				Ok(($($name::decode(cursor)?,)+))
			}
		}

		impl<$($name: Encode),+> Encode for ($($name,)+) {
			#[allow(non_snake_case)]
			fn encode_to(&self, dest: &mut Vec<u8>) {
				let ($($name,)+) = self;
				$($name.encode_to(dest);)+
			}
		}
	};
}

impl_tuple!(A, B);
impl_tuple!(A, B, C);

/// A compact length prefixed sequence of values. The prefix width is kept so that
/// decoded sequences re-encode byte for byte.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Array<T> {
	items: Vec<T>,
	prefix_len: usize,
}

impl<T> Array<T> {
	pub fn new(items: Vec<T>) -> Self {
		let prefix_len = compact_len(items.len() as u128);
		Self { items, prefix_len }
	}

	pub fn into_inner(self) -> Vec<T> {
		self.items
	}

	/// Decode a sequence whose element decoder needs more than the cursor.
	pub fn decode_with<'a>(
		cursor: &mut ByteCursor<'a>,
		mut decode: impl FnMut(&mut ByteCursor<'a>) -> Result<T, Error>,
	) -> Result<Self, Error> {
		let (len, prefix_len) = decode_length(cursor)?;
		// the length is untrusted input; never reserve more memory than there is input left
		let mut items = Vec::with_capacity(len.min(cursor.remaining() / mem::size_of::<T>().max(1)));
		for _ in 0..len {
			items.push(decode(cursor)?);
		}
		Ok(Array { items, prefix_len })
	}
}

impl<T> Default for Array<T> {
	fn default() -> Self {
		Array::new(Vec::new())
	}
}

impl<T> Deref for Array<T> {
	type Target = [T];
	fn deref(&self) -> &Self::Target {
		&self.items
	}
}

impl<T> From<Vec<T>> for Array<T> {
	fn from(items: Vec<T>) -> Self {
		Array::new(items)
	}
}

impl<T> FromIterator<T> for Array<T> {
	fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
		Array::new(iter.into_iter().collect())
	}
}

impl<T> IntoIterator for Array<T> {
	type Item = T;
	type IntoIter = std::vec::IntoIter<T>;
	fn into_iter(self) -> Self::IntoIter {
		self.items.into_iter()
	}
}

impl<'a, T> IntoIterator for &'a Array<T> {
	type Item = &'a T;
	type IntoIter = std::slice::Iter<'a, T>;
	fn into_iter(self) -> Self::IntoIter {
		self.items.iter()
	}
}

impl<T: fmt::Debug> fmt::Debug for Array<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_list().entries(self.items.iter()).finish()
	}
}

impl<T: Decode> Decode for Array<T> {
	fn decode(cursor: &mut ByteCursor<'_>) -> Result<Self, Error> {
		Array::decode_with(cursor, T::decode)
	}
}

impl<T: Encode> Encode for Array<T> {
	fn encode_to(&self, dest: &mut Vec<u8>) {
		encode_compact(self.items.len() as u128, self.prefix_len, dest);
		for item in &self.items {
			item.encode_to(dest);
		}
	}
}

impl<T: Serialize> Serialize for Array<T> {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		self.items.serialize(serializer)
	}
}

/// Decode a one byte enum discriminant and map it to a variant with `variant`.
/// Unknown discriminants are an error. Variants that carry a payload are decoded
/// by the caller once it knows which variant it has.
pub fn decode_enum<T>(
	cursor: &mut ByteCursor<'_>,
	name: &'static str,
	variant: impl FnOnce(u8) -> Option<T>,
) -> Result<T, Error> {
	let offset = cursor.offset();
	let discriminant = cursor.read_byte()?;
	variant(discriminant).ok_or(Error::UnknownEnumDiscriminant { name, discriminant, offset })
}

/// Declare a struct whose fields are decoded and encoded in declaration order.
///
/// ```
/// use desub_codec::{composite, decode_all, Compact, Encode, Text};
///
/// composite! {
///     #[derive(Debug, Clone, PartialEq)]
///     pub struct Constant {
///         pub name: Text,
///         pub ty: Compact<u32>,
///     }
/// }
///
/// let bytes = [0x0c, b'F', b'e', b'e', 0x04];
/// let constant = decode_all::<Constant>(&bytes).unwrap();
/// assert_eq!(constant.bytes_consumed, 5);
/// assert_eq!(constant.value.ty.value(), 1);
/// assert_eq!(constant.value.encode(), bytes.to_vec());
/// ```
#[macro_export]
macro_rules! composite {
	(
		$(#[$attr:meta])*
		$vis:vis struct $name:ident {
			$(
				$(#[$field_attr:meta])*
				$field_vis:vis $field:ident : $ty:ty
			),* $(,)?
		}
	) => {
		$(#[$attr])*
		$vis struct $name {
			$(
				$(#[$field_attr])*
				$field_vis $field: $ty,
			)*
		}

		impl $crate::Decode for $name {
			fn decode(cursor: &mut $crate::ByteCursor<'_>) -> Result<Self, $crate::Error> {
				Ok(Self { $($field: <$ty as $crate::Decode>::decode(cursor)?,)* })
			}
		}

		impl $crate::Encode for $name {
			fn encode_to(&self, dest: &mut Vec<u8>) {
				$($crate::Encode::encode_to(&self.$field, dest);)*
			}
		}
	};
}

/// Declare a field-less enum encoded as a single byte. Discriminants are listed
/// explicitly since they are part of the wire format.
#[macro_export]
macro_rules! unit_enum {
	(
		$(#[$attr:meta])*
		$vis:vis enum $name:ident {
			$(
				$(#[$variant_attr:meta])*
				$variant:ident = $discriminant:literal
			),* $(,)?
		}
	) => {
		$(#[$attr])*
		$vis enum $name {
			$(
				$(#[$variant_attr])*
				$variant,
			)*
		}

		impl $name {
			pub fn discriminant(&self) -> u8 {
				match self {
					$($name::$variant => $discriminant,)*
				}
			}

			pub fn from_discriminant(discriminant: u8) -> Option<Self> {
				match discriminant {
					$($discriminant => Some($name::$variant),)*
					_ => None,
				}
			}
		}

		impl $crate::Decode for $name {
			fn decode(cursor: &mut $crate::ByteCursor<'_>) -> Result<Self, $crate::Error> {
				$crate::decode_enum(cursor, stringify!($name), $name::from_discriminant)
			}
		}

		impl $crate::Encode for $name {
			fn encode_to(&self, dest: &mut Vec<u8>) {
				dest.push(self.discriminant());
			}
		}
	};
}
