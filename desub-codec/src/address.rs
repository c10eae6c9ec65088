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

//! Account ids and addresses.
//!
//! How wide an account id is and how it is displayed depends on the network, so
//! decoding goes through an [`AddressDecoder`], which is resolved once per chain from
//! an [`AddressTable`] and then handed to whatever needs to decode addresses.

use crate::{ByteCursor, Bytes, Compact, Encode, Error, FixedHash};
use desub_common::{Chain, SpecVersion};
use serde::{Serialize, Serializer};
use sp_core::crypto::{AccountId32, Ss58AddressFormat, Ss58Codec};
use std::{collections::HashMap, fmt, sync::Arc};

/// A per-network way of reading and displaying account ids.
pub trait AddressCodec: fmt::Debug + Send + Sync {
	/// Number of bytes an account id occupies on the wire.
	fn account_id_len(&self) -> usize;

	/// Human readable form of an account id of [`AddressCodec::account_id_len`] bytes.
	fn format(&self, account: &[u8]) -> String;
}

/// SS58 encoded 32 byte account ids, as used by Polkadot, Kusama and most Substrate chains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ss58Address {
	pub prefix: u16,
}

impl AddressCodec for Ss58Address {
	fn account_id_len(&self) -> usize {
		32
	}

	fn format(&self, account: &[u8]) -> String {
		match <[u8; 32]>::try_from(account) {
			Ok(raw) => AccountId32::new(raw).to_ss58check_with_version(Ss58AddressFormat::custom(self.prefix)),
			Err(_) => format!("0x{}", hex::encode(account)),
		}
	}
}

/// Fixed width account ids shown as hex, such as 20 byte Ethereum style accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HexAddress {
	pub len: usize,
}

impl AddressCodec for HexAddress {
	fn account_id_len(&self) -> usize {
		self.len
	}

	fn format(&self, account: &[u8]) -> String {
		format!("0x{}", hex::encode(account))
	}
}

/// Address strategies keyed by network.
#[derive(Debug, Clone)]
pub struct AddressTable {
	codecs: HashMap<Chain, Arc<dyn AddressCodec>>,
}

impl Default for AddressTable {
	fn default() -> Self {
		let mut table = AddressTable { codecs: HashMap::new() };
		for chain in [Chain::Polkadot, Chain::Kusama, Chain::Westend, Chain::Rococo] {
			let prefix = chain.ss58_prefix();
			table.insert(chain, Ss58Address { prefix });
		}
		table
	}
}

impl AddressTable {
	/// Register (or replace) the strategy for a chain.
	pub fn insert(&mut self, chain: Chain, codec: impl AddressCodec + 'static) {
		self.codecs.insert(chain, Arc::new(codec));
	}

	/// The strategy for `chain`; chains without an entry get generic Substrate SS58.
	pub fn get(&self, chain: &Chain) -> Arc<dyn AddressCodec> {
		match self.codecs.get(chain) {
			Some(codec) => codec.clone(),
			None => Arc::new(Ss58Address { prefix: chain.ss58_prefix() }),
		}
	}

	/// Resolve the decoder used for every address of `chain`.
	pub fn decoder(&self, chain: Chain) -> AddressDecoder {
		let codec = self.get(&chain);
		AddressDecoder { chain, codec }
	}
}

/// The raw bytes of an account id plus how its network displays it.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct AccountId {
	bytes: Vec<u8>,
	address: String,
}

impl AccountId {
	pub fn as_bytes(&self) -> &[u8] {
		&self.bytes
	}

	/// Network specific human readable address.
	pub fn address(&self) -> &str {
		&self.address
	}
}

impl fmt::Debug for AccountId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "AccountId({})", self.address)
	}
}

impl fmt::Display for AccountId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.address)
	}
}

impl Encode for AccountId {
	fn encode_to(&self, dest: &mut Vec<u8>) {
		dest.extend_from_slice(&self.bytes);
	}
}

impl Serialize for AccountId {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_str(&self.address)
	}
}

/// The ways a transaction can refer to an account.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum MultiAddress {
	/// It's an account ID (pubkey).
	Id(AccountId),
	/// It's an account index.
	Index(Compact<u32>),
	/// It's some arbitrary raw bytes.
	Raw(Bytes),
	/// It's a 32 byte representation.
	Address32(FixedHash<32>),
	/// It's a 20 byte representation.
	Address20(FixedHash<20>),
}

impl Encode for MultiAddress {
	fn encode_to(&self, dest: &mut Vec<u8>) {
		match self {
			MultiAddress::Id(id) => {
				dest.push(0);
				id.encode_to(dest);
			}
			MultiAddress::Index(index) => {
				dest.push(1);
				index.encode_to(dest);
			}
			MultiAddress::Raw(bytes) => {
				dest.push(2);
				bytes.encode_to(dest);
			}
			MultiAddress::Address32(hash) => {
				dest.push(3);
				hash.encode_to(dest);
			}
			MultiAddress::Address20(hash) => {
				dest.push(4);
				hash.encode_to(dest);
			}
		}
	}
}

/// Decodes account ids and addresses for one chain.
#[derive(Debug, Clone)]
pub struct AddressDecoder {
	chain: Chain,
	codec: Arc<dyn AddressCodec>,
}

impl AddressDecoder {
	pub fn new(chain: Chain, codec: impl AddressCodec + 'static) -> Self {
		Self { chain, codec: Arc::new(codec) }
	}

	pub fn chain(&self) -> &Chain {
		&self.chain
	}

	/// Wrap raw account bytes, checking the width against the network.
	pub fn account_id(&self, bytes: &[u8]) -> Result<AccountId, Error> {
		if bytes.len() != self.codec.account_id_len() {
			return Err(Error::InvalidAddress("account id has the wrong length for this network"));
		}
		Ok(AccountId { bytes: bytes.to_vec(), address: self.codec.format(bytes) })
	}

	pub fn decode_account_id(&self, cursor: &mut ByteCursor<'_>) -> Result<AccountId, Error> {
		let bytes = cursor.read_bytes(self.codec.account_id_len())?;
		self.account_id(bytes)
	}

	/// Whether addresses at `runtime_version` are `MultiAddress`es rather than
	/// the indices lookup format that preceded them.
	pub fn uses_multi_address(&self, runtime_version: Option<SpecVersion>) -> bool {
		self.chain.uses_multi_address(runtime_version)
	}

	/// Decode an address, picking the format from the cursor's runtime version.
	pub fn decode_address(&self, cursor: &mut ByteCursor<'_>) -> Result<MultiAddress, Error> {
		if self.uses_multi_address(cursor.runtime_version()) {
			self.decode_multi_address(cursor)
		} else {
			self.decode_legacy_address(cursor)
		}
	}

	pub fn decode_multi_address(&self, cursor: &mut ByteCursor<'_>) -> Result<MultiAddress, Error> {
		let offset = cursor.offset();
		let address = match cursor.read_byte()? {
			0 => MultiAddress::Id(self.decode_account_id(cursor)?),
			1 => MultiAddress::Index(crate::Decode::decode(cursor)?),
			2 => MultiAddress::Raw(crate::Decode::decode(cursor)?),
			3 => MultiAddress::Address32(crate::Decode::decode(cursor)?),
			4 => MultiAddress::Address20(crate::Decode::decode(cursor)?),
			discriminant => {
				return Err(Error::UnknownEnumDiscriminant { name: "MultiAddress", discriminant, offset })
			}
		};
		log::trace!("Decoded address {:?}", address);
		Ok(address)
	}

	/// Decodes the address format in use before
	/// <https://github.com/paritytech/substrate/pull/7380>, surfacing it as a `MultiAddress`.
	pub fn decode_legacy_address(&self, cursor: &mut ByteCursor<'_>) -> Result<MultiAddress, Error> {
		fn need_more_than<T: PartialOrd>(value: T, floor: T) -> Result<T, Error> {
			if value > floor {
				Ok(value)
			} else {
				Err(Error::InvalidAddress("index encoded with more bytes than necessary"))
			}
		}
		fn to_index(value: u32) -> MultiAddress {
			MultiAddress::Index(Compact::new(value))
		}

		let address = match cursor.read_byte()? {
			x @ 0x00..=0xef => to_index(u32::from(x)),
			0xfc => to_index(u32::from(need_more_than(u16::from_le_bytes(cursor.read_array()?), 0xef)?)),
			0xfd => to_index(need_more_than(u32::from_le_bytes(cursor.read_array()?), 0xffff)?),
			0xfe => {
				need_more_than(u64::from_le_bytes(cursor.read_array()?), 0xffff_ffff)?;
				return Err(Error::UnsupportedAddress("account index wider than u32"));
			}
			0xff => MultiAddress::Id(self.decode_account_id(cursor)?),
			_ => return Err(Error::InvalidAddress("unknown legacy address prefix")),
		};
		log::trace!("Decoded legacy address {:?}", address);
		Ok(address)
	}

	/// Encode an address in the format used at `runtime_version`.
	pub fn encode_address(
		&self,
		address: &MultiAddress,
		runtime_version: Option<SpecVersion>,
	) -> Result<Vec<u8>, Error> {
		if self.uses_multi_address(runtime_version) {
			return Ok(address.encode());
		}
		let mut dest = Vec::new();
		match address {
			MultiAddress::Id(id) => {
				dest.push(0xff);
				id.encode_to(&mut dest);
			}
			MultiAddress::Index(index) => match index.value() {
				x @ 0x00..=0xef => dest.push(x as u8),
				x @ 0xf0..=0xffff => {
					dest.push(0xfc);
					dest.extend_from_slice(&(x as u16).to_le_bytes());
				}
				x => {
					dest.push(0xfd);
					dest.extend_from_slice(&x.to_le_bytes());
				}
			},
			MultiAddress::Raw(_) => return Err(Error::UnsupportedAddress("raw bytes")),
			MultiAddress::Address32(_) => return Err(Error::UnsupportedAddress("32 byte address")),
			MultiAddress::Address20(_) => return Err(Error::UnsupportedAddress("20 byte address")),
		}
		Ok(dest)
	}
}
