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

//! Types shared by the V11, V12 and V13 metadata formats.
//!
//! The three versions describe modules in the same way: V12 appends a module index
//! and V13 allows one more kind of storage map. The shared part is decoded by
//! [`ModuleFields::decode_with`], which each version calls from its own decoder.

use crate::storage::{StorageEntryModifier, StorageHasher};
use desub_codec::{composite, decode_option_with, Array, ByteCursor, Bytes, Decode, Encode, Error, Text};
use serde::Serialize;

/// Which storage map layouts a legacy format may contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StorageLayouts {
	/// Plain values, maps and double maps.
	UpToDoubleMap,
	/// Additionally `NMap`; V13 onwards.
	WithNMap,
}

/// The type of a legacy storage entry. Types are named, not indexed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum StorageEntryType {
	Plain(Text),
	Map {
		hasher: StorageHasher,
		key: Text,
		value: Text,
		// is_linked flag previously
		unused: bool,
	},
	DoubleMap {
		hasher: StorageHasher,
		key1: Text,
		key2: Text,
		value: Text,
		key2_hasher: StorageHasher,
	},
	NMap {
		keys: Array<Text>,
		hashers: Array<StorageHasher>,
		value: Text,
	},
}

impl StorageEntryType {
	fn decode_with(cursor: &mut ByteCursor<'_>, layouts: StorageLayouts) -> Result<Self, Error> {
		let offset = cursor.offset();
		let ty = match cursor.read_byte()? {
			0 => StorageEntryType::Plain(Text::decode(cursor)?),
			1 => StorageEntryType::Map {
				hasher: StorageHasher::decode(cursor)?,
				key: Text::decode(cursor)?,
				value: Text::decode(cursor)?,
				unused: bool::decode(cursor)?,
			},
			2 => StorageEntryType::DoubleMap {
				hasher: StorageHasher::decode(cursor)?,
				key1: Text::decode(cursor)?,
				key2: Text::decode(cursor)?,
				value: Text::decode(cursor)?,
				key2_hasher: StorageHasher::decode(cursor)?,
			},
			3 if layouts == StorageLayouts::WithNMap => StorageEntryType::NMap {
				keys: Array::decode(cursor)?,
				hashers: Array::decode(cursor)?,
				value: Text::decode(cursor)?,
			},
			discriminant => {
				return Err(Error::UnknownEnumDiscriminant { name: "StorageEntryType", discriminant, offset })
			}
		};
		Ok(ty)
	}

	/// Name of the type stored under this entry.
	pub fn value(&self) -> &Text {
		match self {
			StorageEntryType::Plain(value)
			| StorageEntryType::Map { value, .. }
			| StorageEntryType::DoubleMap { value, .. }
			| StorageEntryType::NMap { value, .. } => value,
		}
	}
}

impl Encode for StorageEntryType {
	fn encode_to(&self, dest: &mut Vec<u8>) {
		match self {
			StorageEntryType::Plain(ty) => {
				dest.push(0);
				ty.encode_to(dest);
			}
			StorageEntryType::Map { hasher, key, value, unused } => {
				dest.push(1);
				hasher.encode_to(dest);
				key.encode_to(dest);
				value.encode_to(dest);
				unused.encode_to(dest);
			}
			StorageEntryType::DoubleMap { hasher, key1, key2, value, key2_hasher } => {
				dest.push(2);
				hasher.encode_to(dest);
				key1.encode_to(dest);
				key2.encode_to(dest);
				value.encode_to(dest);
				key2_hasher.encode_to(dest);
			}
			StorageEntryType::NMap { keys, hashers, value } => {
				dest.push(3);
				keys.encode_to(dest);
				hashers.encode_to(dest);
				value.encode_to(dest);
			}
		}
	}
}

/// A single storage entry of a legacy module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StorageEntryMetadata {
	pub name: Text,
	pub modifier: StorageEntryModifier,
	pub ty: StorageEntryType,
	/// Bytes a `Default` entry reads as when nothing is stored.
	pub default: Bytes,
	pub documentation: Array<Text>,
}

impl StorageEntryMetadata {
	fn decode_with(cursor: &mut ByteCursor<'_>, layouts: StorageLayouts) -> Result<Self, Error> {
		Ok(StorageEntryMetadata {
			name: Text::decode(cursor)?,
			modifier: StorageEntryModifier::decode(cursor)?,
			ty: StorageEntryType::decode_with(cursor, layouts)?,
			default: Bytes::decode(cursor)?,
			documentation: Array::decode(cursor)?,
		})
	}
}

impl Encode for StorageEntryMetadata {
	fn encode_to(&self, dest: &mut Vec<u8>) {
		self.name.encode_to(dest);
		self.modifier.encode_to(dest);
		self.ty.encode_to(dest);
		self.default.encode_to(dest);
		self.documentation.encode_to(dest);
	}
}

/// All storage entries of a module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StorageMetadata {
	/// Prefix of every storage key in the module.
	pub prefix: Text,
	pub entries: Array<StorageEntryMetadata>,
}

impl StorageMetadata {
	fn decode_with(cursor: &mut ByteCursor<'_>, layouts: StorageLayouts) -> Result<Self, Error> {
		let prefix = Text::decode(cursor)?;
		let entries = Array::decode_with(cursor, |cursor| StorageEntryMetadata::decode_with(cursor, layouts))?;
		Ok(StorageMetadata { prefix, entries })
	}
}

impl Encode for StorageMetadata {
	fn encode_to(&self, dest: &mut Vec<u8>) {
		self.prefix.encode_to(dest);
		self.entries.encode_to(dest);
	}
}

composite! {
	#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
	pub struct FunctionArgumentMetadata {
		pub name: Text,
		pub ty: Text,
	}
}

composite! {
	/// A dispatchable call of a legacy module.
	#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
	pub struct FunctionMetadata {
		pub name: Text,
		pub arguments: Array<FunctionArgumentMetadata>,
		pub documentation: Array<Text>,
	}
}

composite! {
	#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
	pub struct EventMetadata {
		pub name: Text,
		/// Type names of the event's fields.
		pub arguments: Array<Text>,
		pub documentation: Array<Text>,
	}
}

composite! {
	#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
	pub struct ModuleConstantMetadata {
		pub name: Text,
		pub ty: Text,
		/// SCALE encoded value.
		pub value: Bytes,
		pub documentation: Array<Text>,
	}
}

composite! {
	#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
	pub struct ErrorMetadata {
		pub name: Text,
		pub documentation: Array<Text>,
	}
}

composite! {
	/// Extrinsic format of a legacy runtime.
	#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
	pub struct ExtrinsicMetadata {
		pub version: u8,
		/// Names of the signed extensions, in the order they are encoded.
		pub signed_extensions: Array<Text>,
	}
}

/// The module description every legacy version has in common, in wire order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleFields {
	pub name: Text,
	pub storage: Option<StorageMetadata>,
	pub calls: Option<Array<FunctionMetadata>>,
	pub event: Option<Array<EventMetadata>>,
	pub constants: Array<ModuleConstantMetadata>,
	pub errors: Array<ErrorMetadata>,
}

impl ModuleFields {
	pub(crate) fn decode_with(cursor: &mut ByteCursor<'_>, layouts: StorageLayouts) -> Result<Self, Error> {
		let name = Text::decode(cursor)?;
		log::trace!("Decoding module {}", name);
		Ok(ModuleFields {
			name,
			storage: decode_option_with(cursor, |cursor| StorageMetadata::decode_with(cursor, layouts))?,
			calls: Decode::decode(cursor)?,
			event: Decode::decode(cursor)?,
			constants: Decode::decode(cursor)?,
			errors: Decode::decode(cursor)?,
		})
	}
}

impl Encode for ModuleFields {
	fn encode_to(&self, dest: &mut Vec<u8>) {
		self.name.encode_to(dest);
		self.storage.encode_to(dest);
		self.calls.encode_to(dest);
		self.event.encode_to(dest);
		self.constants.encode_to(dest);
		self.errors.encode_to(dest);
	}
}
