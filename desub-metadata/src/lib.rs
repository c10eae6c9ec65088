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

//! Decoding of Substrate runtime metadata, versions 11 to 14.
//!
//! A metadata blob is the magic number `"meta"`, a version byte and then the
//! version specific description of the runtime. [`RuntimeMetadataPrefixed`] picks the
//! version from the blob itself; [`decode_v11`]..[`decode_v14`] are for callers that
//! already know which version to expect. Either way, decoding is all or nothing and
//! the decoded value encodes back to the bytes it came from.
//!
//! [`decorate`] turns decoded metadata into flat storage, call and constant
//! descriptors for the pallets a caller is interested in.

#![forbid(unsafe_code)]

mod decorator;
mod error;
mod legacy;
mod registry;
mod storage;
mod version_11;
mod version_12;
mod version_13;
pub mod version_14;

pub use decorator::{
	decorate, resolve_calls, Call, Constant, DecoratedMetadata, StorageEntry, StorageKeyLayout, SupportedFeatures,
	TypeSignature,
};
pub use error::{MetadataError, ResolveError};
pub use legacy::{
	ErrorMetadata, EventMetadata, ExtrinsicMetadata, FunctionArgumentMetadata, FunctionMetadata,
	ModuleConstantMetadata, ModuleFields, StorageEntryMetadata, StorageEntryType, StorageMetadata,
};
pub use registry::{
	Field, PortableRegistry, PortableType, TypeDef, TypeDefArray, TypeDefBitSequence, TypeDefComposite,
	TypeDefPrimitive, TypeDefVariant, TypeIndex, TypeParameter, Variant,
};
pub use storage::{StorageEntryModifier, StorageHasher};
pub use version_11::{ModuleMetadataV11, RuntimeMetadataV11};
pub use version_12::{ModuleMetadataV12, RuntimeMetadataV12};
pub use version_13::{ModuleMetadataV13, RuntimeMetadataV13};
pub use version_14::RuntimeMetadataV14;

use desub_codec::{ByteCursor, Decode, Decoded, Encode};
use desub_common::SpecVersion;
use serde::Serialize;

/// Every metadata blob starts with this: "meta" as a little endian u32.
pub const META_RESERVED: u32 = 0x6174_656d;

/// Decoded metadata of one of the supported versions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum RuntimeMetadata {
	V11(RuntimeMetadataV11),
	V12(RuntimeMetadataV12),
	V13(RuntimeMetadataV13),
	V14(RuntimeMetadataV14),
}

impl RuntimeMetadata {
	/// The version byte this metadata is encoded with.
	pub fn version(&self) -> u8 {
		match self {
			RuntimeMetadata::V11(_) => 11,
			RuntimeMetadata::V12(_) => 12,
			RuntimeMetadata::V13(_) => 13,
			RuntimeMetadata::V14(_) => 14,
		}
	}

	/// Names of all pallets (modules, before V14), in metadata order.
	pub fn pallet_names(&self) -> Vec<&str> {
		match self {
			RuntimeMetadata::V11(meta) => meta.modules.iter().map(|m| m.name.as_str()).collect(),
			RuntimeMetadata::V12(meta) => meta.modules.iter().map(|m| m.name.as_str()).collect(),
			RuntimeMetadata::V13(meta) => meta.modules.iter().map(|m| m.name.as_str()).collect(),
			RuntimeMetadata::V14(meta) => meta.pallets.iter().map(|p| p.name.as_str()).collect(),
		}
	}

	fn decode_version(cursor: &mut ByteCursor<'_>, version: u8) -> Result<Self, MetadataError> {
		let metadata = match version {
			11 => RuntimeMetadata::V11(Decode::decode(cursor)?),
			12 => RuntimeMetadata::V12(Decode::decode(cursor)?),
			13 => RuntimeMetadata::V13(Decode::decode(cursor)?),
			14 => RuntimeMetadata::V14(Decode::decode(cursor)?),
			other => return Err(MetadataError::UnsupportedVersion(other)),
		};
		Ok(metadata)
	}
}

impl Encode for RuntimeMetadata {
	fn encode_to(&self, dest: &mut Vec<u8>) {
		dest.push(self.version());
		match self {
			RuntimeMetadata::V11(meta) => meta.encode_to(dest),
			RuntimeMetadata::V12(meta) => meta.encode_to(dest),
			RuntimeMetadata::V13(meta) => meta.encode_to(dest),
			RuntimeMetadata::V14(meta) => meta.encode_to(dest),
		}
	}
}

/// A whole metadata blob: magic number, then versioned metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuntimeMetadataPrefixed {
	pub magic: u32,
	pub metadata: RuntimeMetadata,
	/// Runtime version of the chain the blob was fetched from, if the caller said.
	/// Not part of the encoding.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub runtime_version: Option<SpecVersion>,
}

impl RuntimeMetadataPrefixed {
	pub fn decode(cursor: &mut ByteCursor<'_>) -> Result<Self, MetadataError> {
		let (magic, version) = decode_header(cursor)?;
		log::trace!("Decoding V{} metadata", version);
		let metadata = RuntimeMetadata::decode_version(cursor, version)?;
		Ok(RuntimeMetadataPrefixed { magic, metadata, runtime_version: cursor.runtime_version() })
	}

	/// Decode a blob that must contain exactly one metadata value.
	pub fn from_bytes(bytes: &[u8], runtime_version: Option<SpecVersion>) -> Result<Self, MetadataError> {
		let mut cursor = ByteCursor::with_runtime_version(bytes, runtime_version);
		let meta = Self::decode(&mut cursor)?;
		if !cursor.is_empty() {
			return Err(desub_codec::Error::TrailingBytes(cursor.remaining()).into());
		}
		Ok(meta)
	}

	/// Decode the hex form returned by a node's `state_getMetadata`.
	pub fn from_hex(hex_str: &str, runtime_version: Option<SpecVersion>) -> Result<Self, MetadataError> {
		Self::from_bytes(&desub_codec::from_hex(hex_str)?, runtime_version)
	}
}

impl Encode for RuntimeMetadataPrefixed {
	fn encode_to(&self, dest: &mut Vec<u8>) {
		self.magic.encode_to(dest);
		self.metadata.encode_to(dest);
	}
}

fn decode_header(cursor: &mut ByteCursor<'_>) -> Result<(u32, u8), MetadataError> {
	let magic = u32::decode(cursor)?;
	if magic != META_RESERVED {
		return Err(MetadataError::InvalidMagic(magic));
	}
	let version = u8::decode(cursor)?;
	Ok((magic, version))
}

/// Decode a metadata blob of whichever supported version it is. `runtime_version` is
/// the spec version of the runtime the blob came from, when known.
pub fn decode(
	bytes: &[u8],
	runtime_version: Option<SpecVersion>,
) -> Result<Decoded<RuntimeMetadataPrefixed>, MetadataError> {
	let mut cursor = ByteCursor::with_runtime_version(bytes, runtime_version);
	let value = RuntimeMetadataPrefixed::decode(&mut cursor)?;
	Ok(Decoded { value, bytes_consumed: cursor.offset() })
}

fn decode_expecting<T: Decode>(
	bytes: &[u8],
	runtime_version: Option<SpecVersion>,
	expected: u8,
) -> Result<Decoded<T>, MetadataError> {
	let mut cursor = ByteCursor::with_runtime_version(bytes, runtime_version);
	let (_, found) = decode_header(&mut cursor)?;
	if found != expected {
		return Err(MetadataError::VersionMismatch { expected, found });
	}
	let value = T::decode(&mut cursor)?;
	Ok(Decoded { value, bytes_consumed: cursor.offset() })
}

/// Decode a blob that has to be V11 metadata.
pub fn decode_v11(
	bytes: &[u8],
	runtime_version: Option<SpecVersion>,
) -> Result<Decoded<RuntimeMetadataV11>, MetadataError> {
	decode_expecting(bytes, runtime_version, 11)
}

/// Decode a blob that has to be V12 metadata.
pub fn decode_v12(
	bytes: &[u8],
	runtime_version: Option<SpecVersion>,
) -> Result<Decoded<RuntimeMetadataV12>, MetadataError> {
	decode_expecting(bytes, runtime_version, 12)
}

/// Decode a blob that has to be V13 metadata.
pub fn decode_v13(
	bytes: &[u8],
	runtime_version: Option<SpecVersion>,
) -> Result<Decoded<RuntimeMetadataV13>, MetadataError> {
	decode_expecting(bytes, runtime_version, 13)
}

/// Decode a blob that has to be V14 metadata.
pub fn decode_v14(
	bytes: &[u8],
	runtime_version: Option<SpecVersion>,
) -> Result<Decoded<RuntimeMetadataV14>, MetadataError> {
	decode_expecting(bytes, runtime_version, 14)
}
