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

//! The portable type registry that V14 metadata carries. Pallets refer to their
//! call, event, error and storage types by index into it.

use crate::ResolveError;
use desub_codec::{composite, unit_enum, Array, ByteCursor, Compact, Decode, Encode, Error, Text};
use serde::Serialize;

/// Index of a type in the [`PortableRegistry`].
pub type TypeIndex = Compact<u32>;

composite! {
	#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
	pub struct PortableRegistry {
		pub types: Array<PortableType>,
	}
}

composite! {
	#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
	pub struct PortableType {
		pub id: TypeIndex,
		/// Module path and name of the type, e.g. `["pallet_balances", "pallet", "Call"]`.
		pub path: Array<Text>,
		pub params: Array<TypeParameter>,
		pub def: TypeDef,
		pub docs: Array<Text>,
	}
}

composite! {
	#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
	pub struct TypeParameter {
		pub name: Text,
		/// `None` when the parameter was not used in the type's definition.
		pub ty: Option<TypeIndex>,
	}
}

composite! {
	#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
	pub struct Field {
		pub name: Option<Text>,
		pub ty: TypeIndex,
		pub type_name: Option<Text>,
		pub docs: Array<Text>,
	}
}

composite! {
	#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
	pub struct Variant {
		pub name: Text,
		pub fields: Array<Field>,
		/// The discriminant byte of this variant on the wire.
		pub index: u8,
		pub docs: Array<Text>,
	}
}

composite! {
	#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
	pub struct TypeDefComposite {
		pub fields: Array<Field>,
	}
}

composite! {
	#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
	pub struct TypeDefVariant {
		pub variants: Array<Variant>,
	}
}

composite! {
	#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
	pub struct TypeDefArray {
		pub len: u32,
		pub type_param: TypeIndex,
	}
}

composite! {
	#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
	pub struct TypeDefBitSequence {
		pub bit_store_type: TypeIndex,
		pub bit_order_type: TypeIndex,
	}
}

unit_enum! {
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
	pub enum TypeDefPrimitive {
		Bool = 0,
		Char = 1,
		Str = 2,
		U8 = 3,
		U16 = 4,
		U32 = 5,
		U64 = 6,
		U128 = 7,
		U256 = 8,
		I8 = 9,
		I16 = 10,
		I32 = 11,
		I64 = 12,
		I128 = 13,
		I256 = 14,
	}
}

/// The shape of a registry type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum TypeDef {
	Composite(TypeDefComposite),
	Variant(TypeDefVariant),
	Sequence(TypeIndex),
	Array(TypeDefArray),
	Tuple(Array<TypeIndex>),
	Primitive(TypeDefPrimitive),
	Compact(TypeIndex),
	BitSequence(TypeDefBitSequence),
}

impl TypeDef {
	/// Name of the kind of definition, for error messages.
	pub fn kind(&self) -> &'static str {
		match self {
			TypeDef::Composite(_) => "Composite",
			TypeDef::Variant(_) => "Variant",
			TypeDef::Sequence(_) => "Sequence",
			TypeDef::Array(_) => "Array",
			TypeDef::Tuple(_) => "Tuple",
			TypeDef::Primitive(_) => "Primitive",
			TypeDef::Compact(_) => "Compact",
			TypeDef::BitSequence(_) => "BitSequence",
		}
	}

	fn discriminant(&self) -> u8 {
		match self {
			TypeDef::Composite(_) => 0,
			TypeDef::Variant(_) => 1,
			TypeDef::Sequence(_) => 2,
			TypeDef::Array(_) => 3,
			TypeDef::Tuple(_) => 4,
			TypeDef::Primitive(_) => 5,
			TypeDef::Compact(_) => 6,
			TypeDef::BitSequence(_) => 7,
		}
	}
}

impl Decode for TypeDef {
	fn decode(cursor: &mut ByteCursor<'_>) -> Result<Self, Error> {
		let offset = cursor.offset();
		let def = match cursor.read_byte()? {
			0 => TypeDef::Composite(Decode::decode(cursor)?),
			1 => TypeDef::Variant(Decode::decode(cursor)?),
			2 => TypeDef::Sequence(Decode::decode(cursor)?),
			3 => TypeDef::Array(Decode::decode(cursor)?),
			4 => TypeDef::Tuple(Decode::decode(cursor)?),
			5 => TypeDef::Primitive(Decode::decode(cursor)?),
			6 => TypeDef::Compact(Decode::decode(cursor)?),
			7 => TypeDef::BitSequence(Decode::decode(cursor)?),
			discriminant => return Err(Error::UnknownEnumDiscriminant { name: "TypeDef", discriminant, offset }),
		};
		Ok(def)
	}
}

impl Encode for TypeDef {
	fn encode_to(&self, dest: &mut Vec<u8>) {
		dest.push(self.discriminant());
		match self {
			TypeDef::Composite(composite) => composite.encode_to(dest),
			TypeDef::Variant(variant) => variant.encode_to(dest),
			TypeDef::Sequence(ty) | TypeDef::Compact(ty) => ty.encode_to(dest),
			TypeDef::Array(array) => array.encode_to(dest),
			TypeDef::Tuple(fields) => fields.encode_to(dest),
			TypeDef::Primitive(primitive) => primitive.encode_to(dest),
			TypeDef::BitSequence(bits) => bits.encode_to(dest),
		}
	}
}

impl PortableRegistry {
	/// Look a type up by its id.
	///
	/// Ids are assigned densely from zero in every registry seen so far, so the
	/// type at position `id` is checked first; anything else falls back to a scan.
	pub fn resolve(&self, id: u32) -> Option<&PortableType> {
		match self.types.get(id as usize) {
			Some(ty) if ty.id.value() == id => Some(ty),
			_ => self.types.iter().find(|ty| ty.id.value() == id),
		}
	}

	/// Look up a type that has to be an enum, such as a pallet's call type.
	pub fn resolve_variant(&self, id: u32) -> Result<&TypeDefVariant, ResolveError> {
		let ty = self.resolve(id).ok_or(ResolveError::UnresolvedTypeIndex(id))?;
		match &ty.def {
			TypeDef::Variant(variant) => Ok(variant),
			other => Err(ResolveError::TypeIndexNotVariant { id, kind: other.kind() }),
		}
	}

	pub fn len(&self) -> usize {
		self.types.len()
	}

	pub fn is_empty(&self) -> bool {
		self.types.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn ty(id: u32, def: TypeDef) -> PortableType {
		PortableType { id: id.into(), path: Array::default(), params: Array::default(), def, docs: Array::default() }
	}

	#[test]
	fn resolves_sparse_ids() {
		let registry = PortableRegistry {
			types: vec![
				ty(0, TypeDef::Primitive(TypeDefPrimitive::U8)),
				ty(5, TypeDef::Variant(TypeDefVariant { variants: Array::default() })),
				ty(1, TypeDef::Sequence(0u32.into())),
			]
			.into(),
		};
		assert_eq!(registry.resolve(0).map(|t| t.id.value()), Some(0));
		assert_eq!(registry.resolve(1).map(|t| t.id.value()), Some(1));
		assert!(registry.resolve_variant(5).is_ok());
		assert_eq!(registry.resolve_variant(9), Err(ResolveError::UnresolvedTypeIndex(9)));
		assert_eq!(
			registry.resolve_variant(0),
			Err(ResolveError::TypeIndexNotVariant { id: 0, kind: "Primitive" })
		);
	}

	#[test]
	fn typedef_round_trips() {
		let def = TypeDef::Array(TypeDefArray { len: 32, type_param: 2u32.into() });
		let bytes = def.encode();
		assert_eq!(bytes, vec![3, 32, 0, 0, 0, 2 << 2]);
		assert_eq!(desub_codec::decode_all::<TypeDef>(&bytes).unwrap().value, def);
		assert!(matches!(
			desub_codec::decode::<TypeDef>(&[8]),
			Err(Error::UnknownEnumDiscriminant { name: "TypeDef", discriminant: 8, .. })
		));
	}
}
