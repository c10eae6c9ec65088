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

//! Facade crate tying the codec, metadata decoding and decoration together for
//! one chain.

#![forbid(unsafe_code)]
#![deny(unused)]
mod config;
mod error;
pub mod identity;

use desub_codec::{AddressDecoder, AddressTable, Array, ByteCursor, Decode, Decoded, MultiAddress};
use desub_metadata::{decorate, DecoratedMetadata, RuntimeMetadata, RuntimeMetadataPrefixed, SupportedFeatures};
use identity::{RegistrarInfo, Registration};
use std::collections::HashMap;

pub use self::config::{AddressFormat, DecoderConfig};
pub use self::error::Error;
pub use desub_codec as codec;
pub use desub_common::{Chain, SpecVersion};
pub use desub_metadata as metadata;

/// Holds the metadata of every registered runtime version of one chain, and the
/// address strategy of that chain.
#[derive(Debug)]
pub struct Decoder {
	addresses: AddressDecoder,
	features: SupportedFeatures,
	metadata: HashMap<SpecVersion, RuntimeMetadata>,
}

impl Decoder {
	/// A decoder using the default address format of `chain`.
	pub fn new(chain: Chain) -> Self {
		Self::from_config(DecoderConfig::new(chain))
	}

	pub fn from_config(config: DecoderConfig) -> Self {
		let addresses = config.address_table().decoder(config.chain);
		Self { addresses, features: config.features, metadata: HashMap::new() }
	}

	/// A decoder with caller supplied address strategies.
	pub fn with_address_table(chain: Chain, table: &AddressTable, features: SupportedFeatures) -> Self {
		Self { addresses: table.decoder(chain), features, metadata: HashMap::new() }
	}

	pub fn chain(&self) -> &Chain {
		self.addresses.chain()
	}

	pub fn addresses(&self) -> &AddressDecoder {
		&self.addresses
	}

	/// Register a runtime version with the decoder.
	pub fn register_version(&mut self, version: SpecVersion, metadata: &[u8]) -> Result<(), Error> {
		let metadata = RuntimeMetadataPrefixed::from_bytes(metadata, Some(version))?.metadata;
		log::debug!("Registered V{} metadata for {} runtime {}", metadata.version(), self.chain(), version);
		self.metadata.insert(version, metadata);
		Ok(())
	}

	/// Register a runtime version from the hex returned by `state_getMetadata`.
	pub fn register_version_hex(&mut self, version: SpecVersion, metadata: &str) -> Result<(), Error> {
		self.register_version(version, &desub_codec::from_hex(metadata)?)
	}

	pub fn has_version(&self, version: &SpecVersion) -> bool {
		self.metadata.contains_key(version)
	}

	pub fn metadata(&self, version: SpecVersion) -> Result<&RuntimeMetadata, Error> {
		self.metadata.get(&version).ok_or(Error::SpecVersionNotFound(version))
	}

	/// Decorate the metadata of `version` with the configured features.
	pub fn decorate(&self, version: SpecVersion) -> Result<DecoratedMetadata, Error> {
		self.decorate_with(version, &self.features)
	}

	pub fn decorate_with(
		&self,
		version: SpecVersion,
		features: &SupportedFeatures,
	) -> Result<DecoratedMetadata, Error> {
		Ok(decorate(self.metadata(version)?, features))
	}

	/// Decode an address as runtime `version` of this chain encodes it.
	pub fn decode_address(&self, version: SpecVersion, data: &[u8]) -> Result<Decoded<MultiAddress>, Error> {
		let mut cursor = ByteCursor::with_runtime_version(data, Some(version));
		Ok(cursor.decode_next_with(|cursor| self.addresses.decode_address(cursor))?)
	}

	/// Decode an `IdentityOf` storage value.
	pub fn decode_registration(&self, version: SpecVersion, data: &[u8]) -> Result<Decoded<Registration>, Error> {
		let mut cursor = ByteCursor::with_runtime_version(data, Some(version));
		Ok(cursor.decode_next_with(Registration::decode)?)
	}

	/// Decode the `Registrars` storage value.
	pub fn decode_registrars(
		&self,
		version: SpecVersion,
		data: &[u8],
	) -> Result<Decoded<Array<Option<RegistrarInfo>>>, Error> {
		let mut cursor = ByteCursor::with_runtime_version(data, Some(version));
		Ok(cursor.decode_next_with(|cursor| identity::decode_registrars(cursor, &self.addresses))?)
	}
}
