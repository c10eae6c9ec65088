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

//! Metadata blobs built with the reference encoders, standing in for what a
//! node returns from `state_getMetadata`.

#![allow(dead_code)]

use codec::Encode;
use frame_metadata::{
	v14::{
		ExtrinsicMetadata, PalletCallMetadata, PalletConstantMetadata, PalletErrorMetadata, PalletEventMetadata,
		PalletMetadata, PalletStorageMetadata, RuntimeMetadataV14, SignedExtensionMetadata, StorageEntryMetadata,
		StorageEntryModifier, StorageEntryType, StorageHasher,
	},
	RuntimeMetadataPrefixed, META_RESERVED,
};
use scale_info::{meta_type, TypeInfo};

#[derive(TypeInfo)]
#[allow(non_camel_case_types)]
pub enum BalancesCall {
	transfer { dest: [u8; 32], value: u128 },
	transfer_keep_alive { dest: [u8; 32], value: u128 },
	set_balance { who: [u8; 32], new_free: u128, new_reserved: u128 },
}

#[derive(TypeInfo)]
pub enum BalancesEvent {
	Transfer { from: [u8; 32], to: [u8; 32], amount: u128 },
}

#[derive(TypeInfo)]
pub enum BalancesError {
	InsufficientBalance,
}

#[derive(TypeInfo)]
pub struct AccountData {
	pub free: u128,
	pub reserved: u128,
	pub frozen: Option<u64>,
}

#[derive(TypeInfo)]
#[allow(non_camel_case_types)]
pub enum SystemCall {
	remark { remark: Vec<u8> },
}

#[derive(TypeInfo)]
pub struct CheckNonce(pub u32);

#[derive(TypeInfo)]
pub struct RuntimeCall;

#[derive(TypeInfo)]
pub struct UncheckedExtrinsic(Vec<u8>);

pub const EXISTENTIAL_DEPOSIT: u128 = 10_000_000_000;

/// A small V14 runtime with `System` (index 0) and `Balances` (index 5) pallets.
pub fn v14_metadata() -> RuntimeMetadataV14 {
	let system = PalletMetadata {
		name: "System",
		storage: Some(PalletStorageMetadata {
			prefix: "System",
			entries: vec![
				StorageEntryMetadata {
					name: "Account",
					modifier: StorageEntryModifier::Default,
					ty: StorageEntryType::Map {
						hashers: vec![StorageHasher::Blake2_128Concat],
						key: meta_type::<[u8; 32]>(),
						value: meta_type::<AccountData>(),
					},
					default: vec![0u8; 33],
					docs: vec![" The full account information for a particular account ID."],
				},
				StorageEntryMetadata {
					name: "Number",
					modifier: StorageEntryModifier::Default,
					ty: StorageEntryType::Plain(meta_type::<u32>()),
					default: 0u32.encode(),
					docs: vec![" The current block number being processed."],
				},
			],
		}),
		calls: Some(PalletCallMetadata { ty: meta_type::<SystemCall>() }),
		event: None,
		constants: vec![PalletConstantMetadata {
			name: "SS58Prefix",
			ty: meta_type::<u16>(),
			value: 2u16.encode(),
			docs: vec![],
		}],
		error: None,
		index: 0,
	};

	let balances = PalletMetadata {
		name: "Balances",
		storage: Some(PalletStorageMetadata {
			prefix: "Balances",
			entries: vec![StorageEntryMetadata {
				name: "TotalIssuance",
				modifier: StorageEntryModifier::Default,
				ty: StorageEntryType::Plain(meta_type::<u128>()),
				default: 0u128.encode(),
				docs: vec![" The total units issued in the system."],
			}],
		}),
		calls: Some(PalletCallMetadata { ty: meta_type::<BalancesCall>() }),
		event: Some(PalletEventMetadata { ty: meta_type::<BalancesEvent>() }),
		constants: vec![PalletConstantMetadata {
			name: "ExistentialDeposit",
			ty: meta_type::<u128>(),
			value: EXISTENTIAL_DEPOSIT.encode(),
			docs: vec![" The minimum amount required to keep an account open."],
		}],
		error: Some(PalletErrorMetadata { ty: meta_type::<BalancesError>() }),
		index: 5,
	};

	// A pallet whose call type is not an enum.
	let broken = PalletMetadata {
		name: "Broken",
		storage: None,
		calls: Some(PalletCallMetadata { ty: meta_type::<AccountData>() }),
		event: None,
		constants: vec![],
		error: None,
		index: 9,
	};

	let extrinsic = ExtrinsicMetadata {
		ty: meta_type::<UncheckedExtrinsic>(),
		version: 4,
		signed_extensions: vec![SignedExtensionMetadata {
			identifier: "CheckNonce",
			ty: meta_type::<CheckNonce>(),
			additional_signed: meta_type::<()>(),
		}],
	};

	RuntimeMetadataV14::new(vec![system, balances, broken], extrinsic, meta_type::<RuntimeCall>())
}

pub fn v14_blob() -> Vec<u8> {
	RuntimeMetadataPrefixed::from(v14_metadata()).encode()
}

/// Mirrors of the pre V14 metadata types, encoded with `parity-scale-codec`.
pub mod legacy {
	use super::*;

	#[derive(Encode, Clone, Copy)]
	#[allow(non_camel_case_types)]
	pub enum Hasher {
		Blake2_128,
		Blake2_256,
		Blake2_128Concat,
		Twox128,
		Twox256,
		Twox64Concat,
		Identity,
	}

	#[derive(Encode)]
	pub enum Modifier {
		Optional,
		Default,
	}

	#[derive(Encode)]
	pub enum EntryType {
		Plain(String),
		Map { hasher: Hasher, key: String, value: String, unused: bool },
		DoubleMap { hasher: Hasher, key1: String, key2: String, value: String, key2_hasher: Hasher },
		NMap { keys: Vec<String>, hashers: Vec<Hasher>, value: String },
	}

	#[derive(Encode)]
	pub struct Entry {
		pub name: String,
		pub modifier: Modifier,
		pub ty: EntryType,
		pub default: Vec<u8>,
		pub documentation: Vec<String>,
	}

	#[derive(Encode)]
	pub struct Storage {
		pub prefix: String,
		pub entries: Vec<Entry>,
	}

	#[derive(Encode)]
	pub struct Function {
		pub name: String,
		pub arguments: Vec<(String, String)>,
		pub documentation: Vec<String>,
	}

	#[derive(Encode)]
	pub struct Event {
		pub name: String,
		pub arguments: Vec<String>,
		pub documentation: Vec<String>,
	}

	#[derive(Encode)]
	pub struct Constant {
		pub name: String,
		pub ty: String,
		pub value: Vec<u8>,
		pub documentation: Vec<String>,
	}

	#[derive(Encode)]
	pub struct Module {
		pub name: String,
		pub storage: Option<Storage>,
		pub calls: Option<Vec<Function>>,
		pub event: Option<Vec<Event>>,
		pub constants: Vec<Constant>,
		pub errors: Vec<(String, Vec<String>)>,
	}

	#[derive(Encode)]
	pub struct Extrinsic {
		pub version: u8,
		pub signed_extensions: Vec<String>,
	}

	fn call(name: &str, arguments: &[(&str, &str)]) -> Function {
		Function {
			name: name.into(),
			arguments: arguments.iter().map(|(n, t)| (n.to_string(), t.to_string())).collect(),
			documentation: vec![],
		}
	}

	/// `System` with calls, `Timestamp` without, `Balances` with calls, `Staking`
	/// with a double map; when `nmap` is set `Staking` also has an `NMap` entry.
	pub fn modules(nmap: bool) -> Vec<Module> {
		let mut staking_entries = vec![Entry {
			name: "ErasStakers".into(),
			modifier: Modifier::Default,
			ty: EntryType::DoubleMap {
				hasher: Hasher::Twox64Concat,
				key1: "EraIndex".into(),
				key2: "T::AccountId".into(),
				value: "Exposure<T::AccountId, BalanceOf<T>>".into(),
				key2_hasher: Hasher::Twox64Concat,
			},
			default: vec![0, 0, 0],
			documentation: vec![" Exposure of validator at era.".into()],
		}];
		if nmap {
			staking_entries.push(Entry {
				name: "Ledgers".into(),
				modifier: Modifier::Optional,
				ty: EntryType::NMap {
					keys: vec!["EraIndex".into(), "T::AccountId".into(), "u32".into()],
					hashers: vec![Hasher::Twox64Concat, Hasher::Blake2_128Concat, Hasher::Identity],
					value: "StakingLedger".into(),
				},
				default: vec![0],
				documentation: vec![],
			});
		}

		vec![
			Module {
				name: "System".into(),
				storage: Some(Storage {
					prefix: "System".into(),
					entries: vec![Entry {
						name: "Account".into(),
						modifier: Modifier::Default,
						ty: EntryType::Map {
							hasher: Hasher::Blake2_128Concat,
							key: "T::AccountId".into(),
							value: "AccountInfo<T::Index, T::AccountData>".into(),
							unused: false,
						},
						default: vec![0u8; 40],
						documentation: vec![" The full account information for a particular account ID.".into()],
					}],
				}),
				calls: Some(vec![call("remark", &[("_remark", "Vec<u8>")])]),
				event: Some(vec![Event {
					name: "ExtrinsicSuccess".into(),
					arguments: vec!["DispatchInfo".into()],
					documentation: vec![],
				}]),
				constants: vec![],
				errors: vec![("InvalidSpecName".into(), vec![])],
			},
			Module {
				name: "Timestamp".into(),
				storage: None,
				calls: None,
				event: None,
				constants: vec![Constant {
					name: "MinimumPeriod".into(),
					ty: "T::Moment".into(),
					value: 3000u64.encode(),
					documentation: vec![],
				}],
				errors: vec![],
			},
			Module {
				name: "Balances".into(),
				storage: None,
				calls: Some(vec![
					call(
						"transfer",
						&[("dest", "<T::Lookup as StaticLookup>::Source"), ("value", "Compact<T::Balance>")],
					),
					call("set_balance", &[("who", "<T::Lookup as StaticLookup>::Source")]),
				]),
				event: None,
				constants: vec![Constant {
					name: "ExistentialDeposit".into(),
					ty: "T::Balance".into(),
					value: EXISTENTIAL_DEPOSIT.encode(),
					documentation: vec![],
				}],
				errors: vec![],
			},
			Module {
				name: "Staking".into(),
				storage: Some(Storage { prefix: "Staking".into(), entries: staking_entries }),
				calls: None,
				event: None,
				constants: vec![],
				errors: vec![],
			},
		]
	}

	pub fn extrinsic() -> Extrinsic {
		Extrinsic { version: 4, signed_extensions: vec!["CheckSpecVersion".into(), "CheckNonce".into()] }
	}

	pub fn v11_blob() -> Vec<u8> {
		(META_RESERVED, 11u8, modules(false), extrinsic()).encode()
	}

	/// Module indices are declared, and don't match positions.
	pub fn v12_blob() -> Vec<u8> {
		let modules: Vec<(Module, u8)> = modules(false).into_iter().zip([0u8, 3, 10, 7]).collect();
		(META_RESERVED, 12u8, modules, extrinsic()).encode()
	}

	pub fn v13_blob() -> Vec<u8> {
		let modules: Vec<(Module, u8)> = modules(true).into_iter().zip([0u8, 3, 10, 7]).collect();
		(META_RESERVED, 13u8, modules, extrinsic()).encode()
	}
}
