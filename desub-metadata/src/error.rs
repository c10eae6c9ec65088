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

use desub_codec::Error as CodecError;

/// Errors from decoding a metadata blob. Any of these means no metadata is
/// returned at all.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MetadataError {
	#[error("Invalid metadata prefix {0:#010x}; expected \"meta\"")]
	InvalidMagic(u32),
	#[error("metadata version {0} is not supported")]
	UnsupportedVersion(u8),
	#[error("expected metadata version {expected}, found {found}")]
	VersionMismatch { expected: u8, found: u8 },
	#[error(transparent)]
	Codec(#[from] CodecError),
}

/// Errors resolving something against the V14 type registry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
	#[error("could not find type with ID {0}")]
	UnresolvedTypeIndex(u32),
	#[error("type {id} should be a Variant, but it is a {kind}")]
	TypeIndexNotVariant { id: u32, kind: &'static str },
}
