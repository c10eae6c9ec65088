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

//! A SCALE codec that remembers how things were encoded.
//!
//! Every decoder reads from a [`ByteCursor`] and either returns a whole value or
//! an [`Error`]; the number of bytes a value took up is available through
//! [`Decoded::bytes_consumed`]. Anything decoded with this crate encodes back to the
//! exact bytes it came from, including non-canonical compact length prefixes.

#![forbid(unsafe_code)]

mod address;
mod combinators;
mod compact;
mod cursor;
mod error;
mod primitives;

pub use address::{
	AccountId, AddressCodec, AddressDecoder, AddressTable, HexAddress, MultiAddress, Ss58Address,
};
pub use combinators::{decode_enum, decode_option_with, Array};
pub use compact::{compact_len, decode_compact, encode_compact, Compact, CompactInteger, MAX_BIG_INT_BYTES};
pub use cursor::{ByteCursor, Decode, Decoded, Encode};
pub use error::Error;
pub use primitives::{serialize_hex, Bytes, FixedHash, Text};

/// Decode a `T` from the start of `bytes`. Bytes after the value are ignored.
pub fn decode<T: Decode>(bytes: &[u8]) -> Result<Decoded<T>, Error> {
	ByteCursor::new(bytes).decode_next()
}

/// Decode a `T` that must make up the whole of `bytes`.
pub fn decode_all<T: Decode>(bytes: &[u8]) -> Result<Decoded<T>, Error> {
	let mut cursor = ByteCursor::new(bytes);
	let decoded = cursor.decode_next()?;
	if !cursor.is_empty() {
		return Err(Error::TrailingBytes(cursor.remaining()));
	}
	Ok(decoded)
}

/// Decode a hex string, with or without a leading `0x`.
pub fn from_hex(hex_str: &str) -> Result<Vec<u8>, Error> {
	let hex_str = hex_str.trim();
	let hex_str = hex_str.strip_prefix("0x").unwrap_or(hex_str);
	Ok(hex::decode(hex_str)?)
}
