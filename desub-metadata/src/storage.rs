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

//! Storage vocabulary shared by every metadata version.

use desub_codec::unit_enum;
use serde::Serialize;
use sp_core::hashing::{blake2_128, blake2_256, twox_128, twox_256, twox_64};

unit_enum! {
	/// Hasher used to turn a storage map key into part of the storage key.
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
	#[allow(non_camel_case_types)]
	pub enum StorageHasher {
		Blake2_128 = 0,
		Blake2_256 = 1,
		Blake2_128Concat = 2,
		Twox128 = 3,
		Twox256 = 4,
		Twox64Concat = 5,
		Identity = 6,
	}
}

impl StorageHasher {
	/// Hash an encoded key the way the runtime does when building a storage key.
	pub fn hash(&self, encoded_key: &[u8]) -> Vec<u8> {
		match self {
			StorageHasher::Blake2_128 => blake2_128(encoded_key).to_vec(),
			StorageHasher::Blake2_256 => blake2_256(encoded_key).to_vec(),
			StorageHasher::Blake2_128Concat => [&blake2_128(encoded_key)[..], encoded_key].concat(),
			StorageHasher::Twox128 => twox_128(encoded_key).to_vec(),
			StorageHasher::Twox256 => twox_256(encoded_key).to_vec(),
			StorageHasher::Twox64Concat => [&twox_64(encoded_key)[..], encoded_key].concat(),
			StorageHasher::Identity => encoded_key.to_vec(),
		}
	}

	/// Whether the original key can be read back out of the hashed key.
	pub fn is_transparent(&self) -> bool {
		matches!(self, StorageHasher::Blake2_128Concat | StorageHasher::Twox64Concat | StorageHasher::Identity)
	}
}

unit_enum! {
	/// What a storage read gives back when nothing is stored under the key.
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
	pub enum StorageEntryModifier {
		/// Nothing.
		Optional = 0,
		/// The entry's default bytes.
		Default = 1,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use desub_codec::{decode, Encode};

	#[test]
	fn concat_hashers_keep_the_key() {
		let key = [1u8, 2, 3];
		let hashed = StorageHasher::Twox64Concat.hash(&key);
		assert_eq!(hashed.len(), 8 + 3);
		assert_eq!(&hashed[8..], &key);
		assert_eq!(StorageHasher::Blake2_128Concat.hash(&key).len(), 16 + 3);
		assert_eq!(StorageHasher::Identity.hash(&key), key.to_vec());
		assert!(!StorageHasher::Blake2_256.is_transparent());
	}

	#[test]
	fn hasher_discriminants() {
		assert_eq!(decode::<StorageHasher>(&[5]).unwrap().value, StorageHasher::Twox64Concat);
		assert_eq!(StorageEntryModifier::Default.encode(), vec![1]);
		assert!(decode::<StorageHasher>(&[7]).is_err());
	}
}
