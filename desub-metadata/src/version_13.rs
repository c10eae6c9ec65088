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

/// A V13 module. Laid out like V12, but storage entries may be `NMap`s.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, derive_more::Deref)]
pub struct ModuleMetadataV13 {
	#[deref]
	pub fields: ModuleFields,
	pub index: u8,
}

impl Decode for ModuleMetadataV13 {
	fn decode(cursor: &mut ByteCursor<'_>) -> Result<Self, Error> {
		let fields = ModuleFields::decode_with(cursor, StorageLayouts::WithNMap)?;
		Ok(ModuleMetadataV13 { fields, index: u8::decode(cursor)? })
	}
}

impl Encode for ModuleMetadataV13 {
	fn encode_to(&self, dest: &mut Vec<u8>) {
		self.fields.encode_to(dest);
		self.index.encode_to(dest);
	}
}

desub_codec::composite! {
	#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
	pub struct RuntimeMetadataV13 {
		pub modules: Array<ModuleMetadataV13>,
		pub extrinsic: ExtrinsicMetadata,
	}
}
