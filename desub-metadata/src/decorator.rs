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

//! Flattens decoded metadata into the descriptors transaction and storage code
//! works with.
//!
//! Only pallets the caller asks for (through [`SupportedFeatures`]) are decorated.
//! A pallet whose calls cannot be resolved contributes no calls; it never makes
//! decoration as a whole fail.

use crate::{
	legacy::{self, ModuleFields},
	registry::{PortableRegistry, TypeDef},
	storage::{StorageEntryModifier, StorageHasher},
	version_14::{self, PalletMetadata},
	ResolveError, RuntimeMetadata,
};
use desub_codec::{decode_all, serialize_hex, Decode};
use serde::{Deserialize, Serialize};
use sp_core::hashing::twox_128;
use std::collections::{BTreeMap, BTreeSet};

/// The storage entries, calls and constants a caller wants decorated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SupportedFeatures {
	/// Storage prefix to the names of the entries wanted under it.
	pub storage: BTreeMap<String, BTreeSet<String>>,
	/// Pallets whose calls are wanted.
	pub calls: BTreeSet<String>,
	/// Pallets whose constants are wanted.
	pub constants: BTreeSet<String>,
}

impl SupportedFeatures {
	pub fn with_storage<I, S>(mut self, prefix: impl Into<String>, entries: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.storage.entry(prefix.into()).or_default().extend(entries.into_iter().map(Into::into));
		self
	}

	pub fn with_calls(mut self, pallet: impl Into<String>) -> Self {
		self.calls.insert(pallet.into());
		self
	}

	pub fn with_constants(mut self, pallet: impl Into<String>) -> Self {
		self.constants.insert(pallet.into());
		self
	}

	fn storage_entries(&self, prefix: &str) -> Option<&BTreeSet<String>> {
		self.storage.get(prefix)
	}
}

/// How the type of a value is described: by name before V14, by registry index since.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, derive_more::Display)]
pub enum TypeSignature {
	#[display(fmt = "{}", _0)]
	Name(String),
	#[display(fmt = "#{}", _0)]
	Index(u32),
}

/// How the key of a storage entry is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum StorageKeyLayout {
	/// A single value; the key is just the prefix.
	Plain,
	/// A map with one hasher per key.
	Map { hashers: Vec<StorageHasher>, keys: Vec<TypeSignature> },
}

/// A storage entry bound to its pallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StorageEntry {
	pub pallet_prefix: String,
	pub name: String,
	pub modifier: StorageEntryModifier,
	pub layout: StorageKeyLayout,
	/// Type of the stored value.
	pub value: TypeSignature,
	/// What the entry reads as when nothing is stored, for `Default` entries.
	#[serde(serialize_with = "serialize_hex")]
	pub fallback: Vec<u8>,
	pub docs: Vec<String>,
}

impl StorageEntry {
	/// `twox128(prefix) ++ twox128(name)`, the start of every key of this entry.
	pub fn key_prefix(&self) -> Vec<u8> {
		let mut key = twox_128(self.pallet_prefix.as_bytes()).to_vec();
		key.extend(twox_128(self.name.as_bytes()));
		key
	}

	/// The full storage key for the given SCALE encoded map keys, one per hasher.
	/// `None` if the number of keys does not match the entry.
	pub fn storage_key(&self, encoded_keys: &[&[u8]]) -> Option<Vec<u8>> {
		let mut key = self.key_prefix();
		match &self.layout {
			StorageKeyLayout::Plain if encoded_keys.is_empty() => Some(key),
			StorageKeyLayout::Map { hashers, .. } if hashers.len() == encoded_keys.len() => {
				for (hasher, encoded) in hashers.iter().zip(encoded_keys) {
					key.extend(hasher.hash(encoded));
				}
				Some(key)
			}
			_ => None,
		}
	}

	/// What a read of this entry yields given what (if anything) is stored.
	pub fn value_or_fallback<'a>(&'a self, stored: Option<&'a [u8]>) -> Option<&'a [u8]> {
		match (stored, self.modifier) {
			(Some(stored), _) => Some(stored),
			(None, StorageEntryModifier::Default) => Some(&self.fallback),
			(None, StorageEntryModifier::Optional) => None,
		}
	}
}

/// A dispatchable call and where it sits in the outer call enum.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Call {
	pub pallet_name: String,
	pub pallet_index: u8,
	pub call_index: u8,
	pub name: String,
}

impl Call {
	/// The two bytes call data starts with.
	pub fn call_index_bytes(&self) -> [u8; 2] {
		[self.pallet_index, self.call_index]
	}
}

/// A pallet constant with its raw SCALE bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Constant {
	pub pallet_name: String,
	pub name: String,
	#[serde(serialize_with = "serialize_hex")]
	pub value: Vec<u8>,
	pub ty: TypeSignature,
}

impl Constant {
	pub fn decode_as<T: Decode>(&self) -> Result<T, desub_codec::Error> {
		decode_all(&self.value).map(|decoded| decoded.value)
	}
}

/// Descriptors for the whitelisted parts of a runtime, in metadata order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DecoratedMetadata {
	pub storage: Vec<StorageEntry>,
	pub calls: Vec<Call>,
	pub constants: Vec<Constant>,
}

impl DecoratedMetadata {
	pub fn storage_entry(&self, prefix: &str, name: &str) -> Option<&StorageEntry> {
		self.storage.iter().find(|e| e.pallet_prefix == prefix && e.name == name)
	}

	pub fn call(&self, pallet: &str, name: &str) -> Option<&Call> {
		self.calls.iter().find(|c| c.pallet_name == pallet && c.name == name)
	}

	pub fn constant(&self, pallet: &str, name: &str) -> Option<&Constant> {
		self.constants.iter().find(|c| c.pallet_name == pallet && c.name == name)
	}
}

/// Resolve a pallet's call enum from the registry into one [`Call`] per variant.
pub fn resolve_calls(
	registry: &PortableRegistry,
	pallet_name: &str,
	pallet_index: u8,
	calls_ty: u32,
) -> Result<Vec<Call>, ResolveError> {
	let variants = registry.resolve_variant(calls_ty)?;
	Ok(variants
		.variants
		.iter()
		.map(|variant| Call {
			pallet_name: pallet_name.to_string(),
			pallet_index,
			call_index: variant.index,
			name: variant.name.to_string(),
		})
		.collect())
}

/// Build the descriptors `features` asks for out of `metadata`.
pub fn decorate(metadata: &RuntimeMetadata, features: &SupportedFeatures) -> DecoratedMetadata {
	let mut out = DecoratedMetadata::default();
	match metadata {
		RuntimeMetadata::V11(meta) => {
			decorate_legacy(meta.modules.iter().map(|m| (&m.0, None)), features, &mut out)
		}
		RuntimeMetadata::V12(meta) => {
			decorate_legacy(meta.modules.iter().map(|m| (&m.fields, Some(m.index))), features, &mut out)
		}
		RuntimeMetadata::V13(meta) => {
			decorate_legacy(meta.modules.iter().map(|m| (&m.fields, Some(m.index))), features, &mut out)
		}
		RuntimeMetadata::V14(meta) => {
			for pallet in meta.pallets.iter() {
				decorate_pallet(&meta.types, pallet, features, &mut out);
			}
		}
	}
	log::debug!(
		"Decorated {} storage entries, {} calls and {} constants",
		out.storage.len(),
		out.calls.len(),
		out.constants.len()
	);
	out
}

fn decorate_pallet(
	registry: &PortableRegistry,
	pallet: &PalletMetadata,
	features: &SupportedFeatures,
	out: &mut DecoratedMetadata,
) {
	let pallet_name = pallet.name.as_str();

	if let Some(storage) = &pallet.storage {
		if let Some(wanted) = features.storage_entries(&storage.prefix) {
			let entries = storage.entries.iter().filter(|e| wanted.contains(e.name.as_str()));
			out.storage.extend(entries.map(|entry| {
				let (layout, value) = match &entry.ty {
					version_14::StorageEntryType::Plain(value) => {
						(StorageKeyLayout::Plain, TypeSignature::Index(value.value()))
					}
					version_14::StorageEntryType::Map { hashers, key, value } => {
						let keys = map_keys(registry, key.value(), hashers.len());
						(StorageKeyLayout::Map { hashers: hashers.to_vec(), keys }, TypeSignature::Index(value.value()))
					}
				};
				StorageEntry {
					pallet_prefix: storage.prefix.to_string(),
					name: entry.name.to_string(),
					modifier: entry.modifier,
					layout,
					value,
					fallback: entry.default.to_vec(),
					docs: entry.docs.iter().map(ToString::to_string).collect(),
				}
			}));
		}
	}

	if features.calls.contains(pallet_name) {
		match pallet.calls.as_ref().map(|ty| resolve_calls(registry, pallet_name, pallet.index, ty.value())) {
			Some(Ok(calls)) => out.calls.extend(calls),
			Some(Err(e)) => log::warn!("Skipping calls of pallet {}: {}", pallet_name, e),
			None => log::debug!("Pallet {} has no calls", pallet_name),
		}
	}

	if features.constants.contains(pallet_name) {
		out.constants.extend(pallet.constants.iter().map(|constant| Constant {
			pallet_name: pallet_name.to_string(),
			name: constant.name.to_string(),
			value: constant.value.to_vec(),
			ty: TypeSignature::Index(constant.ty.value()),
		}));
	}
}

/// The key types of a V14 map. Several hashers mean the key is a tuple with one
/// element per hasher.
fn map_keys(registry: &PortableRegistry, key: u32, hashers: usize) -> Vec<TypeSignature> {
	if hashers > 1 {
		if let Some(TypeDef::Tuple(fields)) = registry.resolve(key).map(|ty| &ty.def) {
			if fields.len() == hashers {
				return fields.iter().map(|field| TypeSignature::Index(field.value())).collect();
			}
		}
	}
	vec![TypeSignature::Index(key)]
}

fn decorate_legacy<'a>(
	modules: impl Iterator<Item = (&'a ModuleFields, Option<u8>)>,
	features: &SupportedFeatures,
	out: &mut DecoratedMetadata,
) {
	// Without explicit indices, a module's place in the call enum is its position
	// among the modules that have calls.
	let mut modules_with_calls = 0usize;

	for (module, index) in modules {
		let name = module.name.as_str();
		let call_index = match (&module.calls, index) {
			(Some(_), Some(index)) => Some(index),
			(Some(_), None) => {
				modules_with_calls += 1;
				u8::try_from(modules_with_calls - 1).ok()
			}
			(None, _) => None,
		};

		if let Some(storage) = &module.storage {
			if let Some(wanted) = features.storage_entries(&storage.prefix) {
				let entries = storage.entries.iter().filter(|e| wanted.contains(e.name.as_str()));
				out.storage.extend(entries.map(|entry| legacy_storage_entry(&storage.prefix, entry)));
			}
		}

		if features.calls.contains(name) {
			match (&module.calls, call_index) {
				(Some(calls), Some(pallet_index)) => {
					out.calls.extend(calls.iter().enumerate().filter_map(|(i, call)| {
						Some(Call {
							pallet_name: name.to_string(),
							pallet_index,
							call_index: u8::try_from(i).ok()?,
							name: call.name.to_string(),
						})
					}))
				}
				(Some(_), None) => log::warn!("Module {} has no representable call index", name),
				(None, _) => log::debug!("Module {} has no calls", name),
			}
		}

		if features.constants.contains(name) {
			out.constants.extend(module.constants.iter().map(|constant| Constant {
				pallet_name: name.to_string(),
				name: constant.name.to_string(),
				value: constant.value.to_vec(),
				ty: TypeSignature::Name(constant.ty.to_string()),
			}));
		}
	}
}

fn legacy_storage_entry(prefix: &str, entry: &legacy::StorageEntryMetadata) -> StorageEntry {
	use legacy::StorageEntryType::*;
	let name = |t: &desub_codec::Text| TypeSignature::Name(t.to_string());
	let layout = match &entry.ty {
		Plain(_) => StorageKeyLayout::Plain,
		Map { hasher, key, .. } => StorageKeyLayout::Map { hashers: vec![*hasher], keys: vec![name(key)] },
		DoubleMap { hasher, key1, key2, key2_hasher, .. } => {
			StorageKeyLayout::Map { hashers: vec![*hasher, *key2_hasher], keys: vec![name(key1), name(key2)] }
		}
		NMap { keys, hashers, .. } => {
			StorageKeyLayout::Map { hashers: hashers.to_vec(), keys: keys.iter().map(name).collect() }
		}
	};
	StorageEntry {
		pallet_prefix: prefix.to_string(),
		name: entry.name.to_string(),
		modifier: entry.modifier,
		layout,
		value: name(entry.ty.value()),
		fallback: entry.default.to_vec(),
		docs: entry.documentation.iter().map(ToString::to_string).collect(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::legacy::{ExtrinsicMetadata, FunctionMetadata, ModuleConstantMetadata, StorageMetadata};
	use crate::registry::{PortableType, TypeDefPrimitive, TypeDefVariant, Variant};
	use crate::version_11::{ModuleMetadataV11, RuntimeMetadataV11};
	use crate::version_14::{PalletConstantMetadata, PalletStorageMetadata, RuntimeMetadataV14};
	use desub_codec::{Array, Bytes, Encode, Text};

	fn ty(id: u32, def: TypeDef) -> PortableType {
		PortableType { id: id.into(), path: Array::default(), params: Array::default(), def, docs: Array::default() }
	}

	fn variant(name: &str, index: u8) -> Variant {
		Variant { name: name.into(), fields: Array::default(), index, docs: Array::default() }
	}

	fn pallet(name: &str, index: u8, calls: Option<u32>) -> PalletMetadata {
		PalletMetadata {
			name: name.into(),
			storage: None,
			calls: calls.map(Into::into),
			event: None,
			constants: Array::default(),
			error: None,
			index,
		}
	}

	fn v14() -> RuntimeMetadata {
		let types = PortableRegistry {
			types: vec![
				ty(0, TypeDef::Primitive(TypeDefPrimitive::U128)),
				ty(
					1,
					TypeDef::Variant(TypeDefVariant {
						variants: vec![variant("transfer", 0), variant("transfer_keep_alive", 1), variant("force", 2)]
							.into(),
					}),
				),
				ty(2, TypeDef::Variant(TypeDefVariant { variants: vec![variant("remark", 0)].into() })),
				ty(3, TypeDef::Tuple(vec![0u32.into(), 0u32.into()].into())),
			]
			.into(),
		};
		let mut a = pallet("A", 5, Some(1));
		a.storage = Some(PalletStorageMetadata {
			prefix: "A".into(),
			entries: vec![
				version_14::StorageEntryMetadata {
					name: "TotalIssuance".into(),
					modifier: StorageEntryModifier::Default,
					ty: version_14::StorageEntryType::Plain(0u32.into()),
					default: Bytes::from(vec![0u8; 16]),
					docs: Array::default(),
				},
				version_14::StorageEntryMetadata {
					name: "Pairs".into(),
					modifier: StorageEntryModifier::Optional,
					ty: version_14::StorageEntryType::Map {
						hashers: vec![StorageHasher::Twox64Concat, StorageHasher::Identity].into(),
						key: 3u32.into(),
						value: 0u32.into(),
					},
					default: Bytes::default(),
					docs: Array::default(),
				},
			]
			.into(),
		});
		a.constants = vec![PalletConstantMetadata {
			name: "ExistentialDeposit".into(),
			ty: 0u32.into(),
			value: Bytes::from(500u128.encode()),
			docs: Array::default(),
		}]
		.into();

		RuntimeMetadata::V14(RuntimeMetadataV14 {
			types,
			pallets: vec![a, pallet("B", 6, Some(2)), pallet("C", 7, Some(99)), pallet("D", 8, Some(0))].into(),
			extrinsic: version_14::ExtrinsicMetadata {
				ty: 0u32.into(),
				version: 4,
				signed_extensions: Array::default(),
			},
			ty: 0u32.into(),
		})
	}

	#[test]
	fn only_whitelisted_pallets_contribute_calls() {
		let _ = pretty_env_logger::try_init();
		let features = SupportedFeatures::default().with_calls("A");
		let decorated = decorate(&v14(), &features);
		assert_eq!(decorated.calls.len(), 3);
		assert!(decorated.calls.iter().all(|c| c.pallet_name == "A" && c.pallet_index == 5));
		let indices: Vec<u8> = decorated.calls.iter().map(|c| c.call_index).collect();
		assert_eq!(indices, vec![0, 1, 2]);
		assert_eq!(decorated.call("A", "force").unwrap().call_index_bytes(), [5, 2]);
		assert!(decorated.storage.is_empty() && decorated.constants.is_empty());
	}

	#[test]
	fn unresolvable_calls_are_skipped() {
		let _ = pretty_env_logger::try_init();
		// C points at a missing type, D at a primitive, Z does not exist.
		let features = SupportedFeatures::default().with_calls("A").with_calls("C").with_calls("D").with_calls("Z");
		let decorated = decorate(&v14(), &features);
		assert_eq!(decorated.calls.len(), 3);

		let RuntimeMetadata::V14(meta) = v14() else { unreachable!() };
		assert_eq!(resolve_calls(&meta.types, "C", 7, 99), Err(ResolveError::UnresolvedTypeIndex(99)));
		assert_eq!(
			resolve_calls(&meta.types, "D", 8, 0),
			Err(ResolveError::TypeIndexNotVariant { id: 0, kind: "Primitive" })
		);
	}

	#[test]
	fn storage_and_constants() {
		let features =
			SupportedFeatures::default().with_storage("A", ["TotalIssuance", "Pairs", "Missing"]).with_constants("A");
		let decorated = decorate(&v14(), &features);

		let total = decorated.storage_entry("A", "TotalIssuance").unwrap();
		assert_eq!(total.layout, StorageKeyLayout::Plain);
		assert_eq!(total.value, TypeSignature::Index(0));
		assert_eq!(total.value_or_fallback(None), Some(&[0u8; 16][..]));
		assert_eq!(total.storage_key(&[]), Some(total.key_prefix()));

		let pairs = decorated.storage_entry("A", "Pairs").unwrap();
		assert_eq!(
			pairs.layout,
			StorageKeyLayout::Map {
				hashers: vec![StorageHasher::Twox64Concat, StorageHasher::Identity],
				keys: vec![TypeSignature::Index(0), TypeSignature::Index(0)],
			}
		);
		assert_eq!(pairs.value_or_fallback(None), None);
		assert_eq!(pairs.value_or_fallback(Some(&[1])), Some(&[1u8][..]));
		assert!(pairs.storage_key(&[&[1]]).is_none());
		let key = pairs.storage_key(&[&[1], &[2]]).unwrap();
		assert_eq!(key.len(), 32 + 8 + 1 + 1);
		assert_eq!(key.last(), Some(&2));

		assert_eq!(decorated.storage.len(), 2);
		let ed = decorated.constant("A", "ExistentialDeposit").unwrap();
		assert_eq!(ed.decode_as::<u128>().unwrap(), 500);
		assert_eq!(ed.ty.to_string(), "#0");
	}

	#[test]
	fn known_storage_prefix() {
		let entry = StorageEntry {
			pallet_prefix: "System".into(),
			name: "Account".into(),
			modifier: StorageEntryModifier::Default,
			layout: StorageKeyLayout::Plain,
			value: TypeSignature::Name("AccountInfo".into()),
			fallback: Vec::new(),
			docs: Vec::new(),
		};
		assert_eq!(hex::encode(entry.key_prefix()), "26aa394eea5630e07c48ae0c9558cef7b99d880ec681799c0cf30e8886371da9");
	}

	fn module(name: &str, calls: &[&str]) -> ModuleMetadataV11 {
		let calls = (!calls.is_empty()).then(|| {
			calls
				.iter()
				.map(|c| FunctionMetadata {
					name: Text::new(*c),
					arguments: Array::default(),
					documentation: Array::default(),
				})
				.collect()
		});
		ModuleMetadataV11(ModuleFields {
			name: name.into(),
			storage: None,
			calls,
			event: None,
			constants: Array::default(),
			errors: Array::default(),
		})
	}

	#[test]
	fn v11_call_indices_skip_modules_without_calls() {
		let mut timestamp = module("Timestamp", &[]);
		timestamp.0.storage = Some(StorageMetadata {
			prefix: "Timestamp".into(),
			entries: vec![legacy::StorageEntryMetadata {
				name: "Now".into(),
				modifier: StorageEntryModifier::Default,
				ty: legacy::StorageEntryType::Plain("T::Moment".into()),
				default: Bytes::from(vec![0u8; 8]),
				documentation: vec![Text::new("Current time.")].into(),
			}]
			.into(),
		});
		timestamp.0.constants = vec![ModuleConstantMetadata {
			name: "MinimumPeriod".into(),
			ty: "T::Moment".into(),
			value: Bytes::from(3000u64.encode()),
			documentation: Array::default(),
		}]
		.into();

		let meta = RuntimeMetadata::V11(RuntimeMetadataV11 {
			modules: vec![module("System", &["remark"]), timestamp, module("Balances", &["transfer", "set_balance"])]
				.into(),
			extrinsic: ExtrinsicMetadata { version: 4, signed_extensions: Array::default() },
		});
		let features = SupportedFeatures::default()
			.with_calls("Balances")
			.with_calls("Timestamp")
			.with_storage("Timestamp", ["Now"])
			.with_constants("Timestamp");
		let decorated = decorate(&meta, &features);

		assert_eq!(decorated.calls.len(), 2);
		assert_eq!(decorated.call("Balances", "set_balance").unwrap().call_index_bytes(), [1, 1]);

		let now = decorated.storage_entry("Timestamp", "Now").unwrap();
		assert_eq!(now.value, TypeSignature::Name("T::Moment".into()));
		assert_eq!(now.docs, vec!["Current time.".to_string()]);

		let period = decorated.constant("Timestamp", "MinimumPeriod").unwrap();
		assert_eq!(period.decode_as::<u64>().unwrap(), 3000);
		assert_eq!(period.ty.to_string(), "T::Moment");
	}

	#[test]
	fn features_load_from_json() {
		let json = r#"{ "calls": ["Balances"], "storage": { "System": ["Account"] } }"#;
		let features: SupportedFeatures = serde_json::from_str(json).unwrap();
		assert!(features.calls.contains("Balances"));
		assert!(features.constants.is_empty());
		assert_eq!(features, SupportedFeatures::default().with_calls("Balances").with_storage("System", ["Account"]));
	}
}
