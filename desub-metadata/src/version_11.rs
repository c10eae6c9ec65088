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

use crate::legacy::{ExtrinsicMetadata, ModuleFields, StorageLayouts};
use desub_codec::{Array, ByteCursor, Decode, Encode, Error};
use serde::Serialize;

/// A V11 module. V11 has no explicit module index; a module's position in the
/// outer call and event enums is its position among the modules that have calls
/// or events respectively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, derive_more::Deref)]
pub struct ModuleMetadataV11(pub ModuleFields);

impl Decode for ModuleMetadataV11 {
	fn decode(cursor: &mut ByteCursor<'_>) -> Result<Self, Error> {
		ModuleFields::decode_with(cursor, StorageLayouts::UpToDoubleMap).map(ModuleMetadataV11)
	}
}

impl Encode for ModuleMetadataV11 {
	fn encode_to(&self, dest: &mut Vec<u8>) {
		self.0.encode_to(dest)
	}
}

desub_codec::composite! {
	#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
	pub struct RuntimeMetadataV11 {
		pub modules: Array<ModuleMetadataV11>,
		pub extrinsic: ExtrinsicMetadata,
	}
}
