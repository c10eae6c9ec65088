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

//! Identity records as stored by the identity pallet, decoded purely by
//! composing the codec library's building blocks.
//!
//! Field order of every type here is the wire order and must not change.

use desub_codec::{
	composite, decode_enum, decode_option_with, serialize_hex, AccountId, AddressDecoder, Array, ByteCursor, Decode,
	Encode, Error, FixedHash,
};
use serde::Serialize;

/// Either underlying data blob if it is at most 32 bytes, or a hash of it.
///
/// Can also be `None`.
#[derive(Clone, Eq, PartialEq, Debug, Default, Serialize)]
pub enum Data {
	/// No data here.
	#[default]
	None,
	/// The data is stored directly.
	Raw(#[serde(serialize_with = "serialize_hex")] Vec<u8>),
	/// Only the Blake2 hash of the data is stored.
	BlakeTwo256(FixedHash<32>),
	/// Only the SHA2-256 hash of the data is stored.
	Sha256(FixedHash<32>),
	/// Only the Keccak-256 hash of the data is stored.
	Keccak256(FixedHash<32>),
	/// Only the SHA3-256 hash of the data is stored.
	ShaThree256(FixedHash<32>),
}

impl Data {
	/// The raw data as text, if it is raw UTF-8.
	pub fn as_text(&self) -> Option<&str> {
		match self {
			Data::Raw(raw) => std::str::from_utf8(raw).ok(),
			_ => None,
		}
	}
}

impl Decode for Data {
	fn decode(cursor: &mut ByteCursor<'_>) -> Result<Self, Error> {
		let offset = cursor.offset();
		Ok(match cursor.read_byte()? {
			0 => Data::None,
			n @ 1..=33 => Data::Raw(cursor.read_bytes(usize::from(n) - 1)?.to_vec()),
			34 => Data::BlakeTwo256(FixedHash::decode(cursor)?),
			35 => Data::Sha256(FixedHash::decode(cursor)?),
			36 => Data::Keccak256(FixedHash::decode(cursor)?),
			37 => Data::ShaThree256(FixedHash::decode(cursor)?),
			discriminant => return Err(Error::UnknownEnumDiscriminant { name: "Data", discriminant, offset }),
		})
	}
}

impl Encode for Data {
	fn encode_to(&self, dest: &mut Vec<u8>) {
		let (tag, hash) = match self {
			Data::None => return dest.push(0),
			Data::Raw(raw) => {
				// longer data can't be represented; truncated like the pallet does
				let len = raw.len().min(32);
				dest.push(len as u8 + 1);
				dest.extend_from_slice(&raw[..len]);
				return;
			}
			Data::BlakeTwo256(hash) => (34, hash),
			Data::Sha256(hash) => (35, hash),
			Data::Keccak256(hash) => (36, hash),
			Data::ShaThree256(hash) => (37, hash),
		};
		dest.push(tag);
		hash.encode_to(dest);
	}
}

/// A registrar's opinion of an identity.
///
/// `FeePaid` is followed on the wire by the fee, a `u128`. Only the variant is
/// kept: the fee is read past and dropped, and encodes back as zero. Anything
/// holding a `FeePaid` judgement with a non-zero fee therefore does not encode back
/// to the bytes it was decoded from; every other variant does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Judgement {
	FeePaid,
	Reasonable,
	KnownGood,
	OutOfDate,
	LowQuality,
	Erroneous,
}

impl Judgement {
	pub fn discriminant(&self) -> u8 {
		match self {
			Judgement::FeePaid => 0,
			Judgement::Reasonable => 1,
			Judgement::KnownGood => 2,
			Judgement::OutOfDate => 3,
			Judgement::LowQuality => 4,
			Judgement::Erroneous => 5,
		}
	}

	pub fn from_discriminant(discriminant: u8) -> Option<Self> {
		Some(match discriminant {
			0 => Judgement::FeePaid,
			1 => Judgement::Reasonable,
			2 => Judgement::KnownGood,
			3 => Judgement::OutOfDate,
			4 => Judgement::LowQuality,
			5 => Judgement::Erroneous,
			_ => return None,
		})
	}
}

impl Decode for Judgement {
	fn decode(cursor: &mut ByteCursor<'_>) -> Result<Self, Error> {
		let judgement = decode_enum(cursor, "Judgement", Judgement::from_discriminant)?;
		if judgement == Judgement::FeePaid {
			let _fee = u128::decode(cursor)?;
		}
		Ok(judgement)
	}
}

impl Encode for Judgement {
	fn encode_to(&self, dest: &mut Vec<u8>) {
		dest.push(self.discriminant());
		if *self == Judgement::FeePaid {
			0u128.encode_to(dest);
		}
	}
}

composite! {
	/// The identity information set by an account.
	#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
	pub struct IdentityInfo {
		/// Additional `(key, value)` fields.
		pub additional: Array<(Data, Data)>,
		pub display: Data,
		pub legal: Data,
		pub web: Data,
		pub riot: Data,
		pub email: Data,
		pub pgp_fingerprint: Option<FixedHash<20>>,
		pub image: Data,
		pub twitter: Data,
	}
}

composite! {
	/// An identity together with the judgements registrars gave it.
	///
	/// Re-encodes byte for byte unless a judgement is [`Judgement::FeePaid`], whose
	/// fee comes back as zero.
	#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
	pub struct Registration {
		/// `(registrar index, judgement)` pairs.
		pub judgements: Array<(u32, Judgement)>,
		pub deposit: u128,
		pub info: IdentityInfo,
	}
}

/// A registrar, as listed in the identity pallet's `Registrars` storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistrarInfo {
	pub account: AccountId,
	pub fee: u128,
	/// Bit flags of the identity fields this registrar looks at.
	pub fields: u64,
}

impl RegistrarInfo {
	pub fn decode_with(cursor: &mut ByteCursor<'_>, addresses: &AddressDecoder) -> Result<Self, Error> {
		Ok(RegistrarInfo {
			account: addresses.decode_account_id(cursor)?,
			fee: u128::decode(cursor)?,
			fields: u64::decode(cursor)?,
		})
	}
}

impl Encode for RegistrarInfo {
	fn encode_to(&self, dest: &mut Vec<u8>) {
		self.account.encode_to(dest);
		self.fee.encode_to(dest);
		self.fields.encode_to(dest);
	}
}

/// Decode the `Registrars` list; removed registrars leave a `None` behind.
pub fn decode_registrars(
	cursor: &mut ByteCursor<'_>,
	addresses: &AddressDecoder,
) -> Result<Array<Option<RegistrarInfo>>, Error> {
	Array::decode_with(cursor, |cursor| {
		decode_option_with(cursor, |cursor| RegistrarInfo::decode_with(cursor, addresses))
	})
}
