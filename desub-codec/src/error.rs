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

/// Errors that can occur while decoding SCALE bytes. All of these are fatal for
/// the value being decoded; nothing partial is handed back.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
	#[error("Buffer underrun at byte {offset}: needed {needed} bytes but only {remaining} remain")]
	BufferUnderrun { offset: usize, needed: usize, remaining: usize },
	#[error("Unknown discriminant {discriminant} for enum {name} at byte {offset}")]
	UnknownEnumDiscriminant { name: &'static str, discriminant: u8, offset: usize },
	#[error("Invalid Option presence byte {byte:#04x} at byte {offset}")]
	MalformedOptional { byte: u8, offset: usize },
	#[error("Malformed compact integer at byte {offset}: {reason}")]
	MalformedCompactInt { offset: usize, reason: &'static str },
	#[error("Invalid UTF-8 string at byte {offset}")]
	InvalidUtf8 { offset: usize },
	#[error("{0} bytes of the input were not consumed")]
	TrailingBytes(usize),
	#[error("Address cannot be expressed in this address format: {0}")]
	UnsupportedAddress(&'static str),
	#[error("Invalid Address: {0}")]
	InvalidAddress(&'static str),
	#[error(transparent)]
	Hex(#[from] hex::FromHexError),
}
