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

use crate::registry::{PortableRegistry, TypeIndex};
use crate::storage::{StorageEntryModifier, StorageHasher};
use desub_codec::{composite, Array, ByteCursor, Bytes, Decode, Encode, Error, Text};
use serde::Serialize;

composite! {
	/// V14 metadata: a type registry plus pallets that refer into it.
	#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
	pub struct RuntimeMetadataV14 {
		pub types: PortableRegistry,
		pub pallets: Array<PalletMetadata>,
		pub extrinsic: ExtrinsicMetadata,
		/// The type of the outer runtime.
		pub ty: TypeIndex,
	}
}

composite! {
	#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
	pub struct PalletMetadata {
		pub name: Text,
		pub storage: Option<PalletStorageMetadata>,
		/// Enum type of the pallet's calls.
		pub calls: Option<TypeIndex>,
		pub event: Option<TypeIndex>,
		pub constants: Array<PalletConstantMetadata>,
		pub error: Option<TypeIndex>,
		/// Index of the pallet in the outer call, event and error enums.
		pub index: u8,
	}
}

composite! {
	#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
	pub struct PalletStorageMetadata {
		pub prefix: Text,
		pub entries: Array<StorageEntryMetadata>,
	}
}

composite! {
	#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
	pub struct StorageEntryMetadata {
		pub name: Text,
		pub modifier: StorageEntryModifier,
		pub ty: StorageEntryType,
		pub default: Bytes,
		pub docs: Array<Text>,
	}
}

/// The type of a V14 storage entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum StorageEntryType {
	Plain(TypeIndex),
	Map {
		/// One hasher per key; several hashers mean `key` is a tuple.
		hashers: Array<StorageHasher>,
		key: TypeIndex,
		value: TypeIndex,
	},
}

impl StorageEntryType {
	pub fn value(&self) -> &TypeIndex {
		match self {
			StorageEntryType::Plain(value) | StorageEntryType::Map { value, .. } => value,
		}
	}
}

impl Decode for StorageEntryType {
	fn decode(cursor: &mut ByteCursor<'_>) -> Result<Self, Error> {
		let offset = cursor.offset();
		match cursor.read_byte()? {
			0 => Ok(StorageEntryType::Plain(Decode::decode(cursor)?)),
			1 => Ok(StorageEntryType::Map {
				hashers: Decode::decode(cursor)?,
				key: Decode::decode(cursor)?,
				value: Decode::decode(cursor)?,
			}),
			discriminant => Err(Error::UnknownEnumDiscriminant { name: "StorageEntryType", discriminant, offset }),
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
			StorageEntryType::Map { hashers, key, value } => {
				dest.push(1);
				hashers.encode_to(dest);
				key.encode_to(dest);
				value.encode_to(dest);
			}
		}
	}
}

composite! {
	#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
	pub struct PalletConstantMetadata {
		pub name: Text,
		pub ty: TypeIndex,
		pub value: Bytes,
		pub docs: Array<Text>,
	}
}

composite! {
	#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
	pub struct ExtrinsicMetadata {
		/// The type of the extrinsic itself.
		pub ty: TypeIndex,
		pub version: u8,
		pub signed_extensions: Array<SignedExtensionMetadata>,
	}
}

composite! {
	#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
	pub struct SignedExtensionMetadata {
		pub identifier: Text,
		/// Type of the data carried in the extrinsic.
		pub ty: TypeIndex,
		/// Type of the data that is signed but not carried.
		pub additional_signed: TypeIndex,
	}
}

impl RuntimeMetadataV14 {
	pub fn pallet(&self, name: &str) -> Option<&PalletMetadata> {
		self.pallets.iter().find(|p| p.name == name)
	}

	pub fn pallet_by_index(&self, index: u8) -> Option<&PalletMetadata> {
		self.pallets.iter().find(|p| p.index == index)
	}
}
