// Copyright 2018 The Gringo Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Definition of the genesis blocks, one per network. They are the roots of
//! trust of their chains and never change.

use chrono::prelude::{TimeZone, Utc};

use crate::consensus::{BLOCK_HASH_SIZE, HEADER_VERSION};
use crate::core;
use crate::core::hash::{Hash, ZERO_HASH};
use crate::global::ChainTypes;
use crate::pow::{Difficulty, Proof};

/// Previous hash of every genesis header. No block hashes to it.
pub const GENESIS_PREVIOUS: Hash = Hash::from_bytes([0xff; BLOCK_HASH_SIZE]);

fn first_pow() -> Proof {
	Proof::new(vec![
		0x21e, 0x7a2, 0xeae, 0x144e, 0x1b1c, 0x1fbd, 0x203a, 0x214b, 0x293b, 0x2b74, 0x2bfa,
		0x2c26, 0x32bb, 0x346a, 0x34c7, 0x37c5, 0x4164, 0x42cc, 0x4cc3, 0x55af, 0x5a70, 0x5b14,
		0x5e1c, 0x5f76, 0x6061, 0x60f9, 0x61d7, 0x6318, 0x63a1, 0x63fb, 0x649b, 0x64e5, 0x65a1,
		0x6b69, 0x70f8, 0x71c7, 0x71cd, 0x7492, 0x7b11, 0x7db8, 0x7f29, 0x7ff8,
	])
}

/// First testnet genesis block.
pub fn genesis_testnet1() -> core::Block {
	core::Block::with_header(core::BlockHeader {
		version: HEADER_VERSION,
		height: 0,
		previous: GENESIS_PREVIOUS,
		timestamp: Utc.with_ymd_and_hms(2017, 11, 16, 20, 0, 0).unwrap(),
		difficulty: Difficulty::from_raw(10),
		total_difficulty: Difficulty::from_raw(10),
		utxo_root: ZERO_HASH,
		range_proof_root: ZERO_HASH,
		kernel_root: ZERO_HASH,
		nonce: 28205,
		pow: first_pow(),
	})
}

/// Second testnet genesis block (cuckoo30). Its difficulty was never set
/// and stays at zero.
pub fn genesis_testnet2() -> core::Block {
	core::Block::with_header(core::BlockHeader {
		version: HEADER_VERSION,
		height: 0,
		previous: GENESIS_PREVIOUS,
		timestamp: Utc.with_ymd_and_hms(2017, 11, 16, 20, 0, 0).unwrap(),
		difficulty: Difficulty::zero(),
		total_difficulty: Difficulty::zero(),
		utxo_root: ZERO_HASH,
		range_proof_root: ZERO_HASH,
		kernel_root: ZERO_HASH,
		nonce: 70081,
		pow: Proof::new(vec![
			0x43ee48, 0x18d5a49, 0x2b76803, 0x3181a29, 0x39d6a8a, 0x39ef8d8, 0x478a0fb,
			0x69c1f9e, 0x6da4bca, 0x6f8782c, 0x9d842d7, 0xa051397, 0xb56934c, 0xbf1f2c7,
			0xc992c89, 0xce53a5a, 0xfa87225, 0x1070f99e, 0x107b39af, 0x1160a11b, 0x11b379a8,
			0x12420e02, 0x12991602, 0x12cc4a71, 0x13d91075, 0x15c950d0, 0x1659b7be, 0x1682c2b4,
			0x1796c62f, 0x191cf4c9, 0x19d71ac0, 0x1b812e44, 0x1d150efe, 0x1d15bd77, 0x1d172841,
			0x1d51e967, 0x1ee1de39, 0x1f35c9b3, 0x1f557204, 0x1fbf884f, 0x1fcf80bf, 0x1fd59d40,
		]),
	})
}

/// Main network genesis block. Its proof of work is the one of the first
/// testnet, only timestamp and difficulty differ.
pub fn genesis_main() -> core::Block {
	core::Block::with_header(core::BlockHeader {
		version: HEADER_VERSION,
		height: 0,
		previous: GENESIS_PREVIOUS,
		timestamp: Utc.with_ymd_and_hms(2018, 8, 14, 0, 0, 0).unwrap(),
		difficulty: Difficulty::from_raw(1000),
		total_difficulty: Difficulty::from_raw(1000),
		utxo_root: ZERO_HASH,
		range_proof_root: ZERO_HASH,
		kernel_root: ZERO_HASH,
		nonce: 28205,
		pow: first_pow(),
	})
}

/// Genesis block of the given network.
pub fn genesis_for(chain_type: ChainTypes) -> core::Block {
	match chain_type {
		ChainTypes::Testnet1 => genesis_testnet1(),
		ChainTypes::Testnet2 => genesis_testnet2(),
		ChainTypes::Mainnet => genesis_main(),
	}
}
