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

/// A V12 module: the V11 fields followed by the module's index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, derive_more::Deref)]
pub struct ModuleMetadataV12 {
	#[deref]
	pub fields: ModuleFields,
	/// Index of the module in the outer call, event and error enums.
	pub index: u8,
}

impl Decode for ModuleMetadataV12 {
	fn decode(cursor: &mut ByteCursor<'_>) -> Result<Self, Error> {
		let fields = ModuleFields::decode_with(cursor, StorageLayouts::UpToDoubleMap)?;
		Ok(ModuleMetadataV12 { fields, index: u8::decode(cursor)? })
	}
}

impl Encode for ModuleMetadataV12 {
	fn encode_to(&self, dest: &mut Vec<u8>) {
		self.fields.encode_to(dest);
		self.index.encode_to(dest);
	}
}

desub_codec::composite! {
	#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
	pub struct RuntimeMetadataV12 {
		pub modules: Array<ModuleMetadataV12>,
		pub extrinsic: ExtrinsicMetadata,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::version_11::ModuleMetadataV11;
	use desub_codec::{decode, Text};

	fn module_bytes() -> Vec<u8> {
		let mut bytes = Text::new("Balances").encode();
		// storage: Some { prefix, [TotalIssuance: Default, Plain("Balance"), default 0u128] }
		bytes.push(1);
		bytes.extend(Text::new("Balances").encode());
		bytes.push(0x04);
		bytes.extend(Text::new("TotalIssuance").encode());
		bytes.push(1);
		bytes.push(0);
		bytes.extend(Text::new("Balance").encode());
		bytes.push(16 << 2);
		bytes.extend([0u8; 16]);
		bytes.push(0);
		// calls: Some [transfer(dest: Address)]
		bytes.extend([1, 0x04]);
		bytes.extend(Text::new("transfer").encode());
		bytes.push(0x04);
		bytes.extend(Text::new("dest").encode());
		bytes.extend(Text::new("Address").encode());
		bytes.push(0);
		// events: None, constants: [], errors: []
		bytes.extend([0, 0, 0]);
		bytes
	}

	#[test]
	fn v12_module_is_v11_module_plus_index() {
		let v11_bytes = module_bytes();
		let mut v12_bytes = v11_bytes.clone();
		v12_bytes.push(7);

		let v11 = decode::<ModuleMetadataV11>(&v11_bytes).unwrap();
		let v12 = decode::<ModuleMetadataV12>(&v12_bytes).unwrap();

		assert_eq!(v12.bytes_consumed, v11.bytes_consumed + 1);
		assert_eq!(v12.value.fields, v11.value.0);
		assert_eq!(v12.value.index, 7);
		assert_eq!(v12.value.name, "Balances");
		assert_eq!(v12.value.encode(), v12_bytes);
	}

	#[test]
	fn decoding_is_deterministic() {
		let mut bytes = module_bytes();
		bytes.push(3);
		assert_eq!(decode::<ModuleMetadataV12>(&bytes), decode::<ModuleMetadataV12>(&bytes));
	}
}
