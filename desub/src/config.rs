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

//! Decoder configuration, usually read from a JSON file:
//!
//! ```json
//! {
//!     "chain": "kusama",
//!     "address": { "format": "ss58", "prefix": 2 },
//!     "features": {
//!         "storage": { "System": ["Account"] },
//!         "calls": ["Balances"],
//!         "constants": ["Balances"]
//!     }
//! }
//! ```

use crate::Error;
use desub_codec::{AddressTable, HexAddress, Ss58Address};
use desub_common::Chain;
use desub_metadata::SupportedFeatures;
use serde::{Deserialize, Serialize};

/// Overrides the address format the chain would otherwise get.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "format", rename_all = "lowercase")]
pub enum AddressFormat {
	Ss58 { prefix: u16 },
	Hex { len: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecoderConfig {
	pub chain: Chain,
	#[serde(default)]
	pub address: Option<AddressFormat>,
	/// What to decorate registered metadata with.
	#[serde(default)]
	pub features: SupportedFeatures,
}

impl DecoderConfig {
	pub fn new(chain: Chain) -> Self {
		Self { chain, address: None, features: SupportedFeatures::default() }
	}

	pub fn from_json(json: &str) -> Result<Self, Error> {
		let config = serde_json::from_str(json)?;
		log::debug!("Loaded decoder config {:?}", config);
		Ok(config)
	}

	/// The address strategies for this configuration.
	pub fn address_table(&self) -> AddressTable {
		let mut table = AddressTable::default();
		match self.address {
			Some(AddressFormat::Ss58 { prefix }) => table.insert(self.chain.clone(), Ss58Address { prefix }),
			Some(AddressFormat::Hex { len }) => table.insert(self.chain.clone(), HexAddress { len }),
			None => (),
		}
		table
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn should_load_config() {
		let config = DecoderConfig::from_json(
			r#"{
				"chain": "moonbeam",
				"address": { "format": "hex", "len": 20 },
				"features": { "calls": ["Balances"] }
			}"#,
		)
		.unwrap();
		assert_eq!(config.chain, Chain::Custom("moonbeam".into()));
		assert_eq!(config.address, Some(AddressFormat::Hex { len: 20 }));
		assert!(config.features.calls.contains("Balances"));
		assert_eq!(config.address_table().get(&config.chain).account_id_len(), 20);
	}

	#[test]
	fn should_default_everything_but_chain() {
		let config = DecoderConfig::from_json(r#"{ "chain": "polkadot" }"#).unwrap();
		assert_eq!(config, DecoderConfig::new(Chain::Polkadot));
		assert!(matches!(DecoderConfig::from_json("{}"), Err(Error::Config(_))));
	}
}
