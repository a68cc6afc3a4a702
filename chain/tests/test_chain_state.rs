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


use self::chain_test_helper::{mine_chain, setup};
use gringo_chain::store::Error as StoreError;
use gringo_chain::{BlockId, ChainState, ChainStore, Error, MemoryStore};
use gringo_core::core::hash::{Hash, Hashed};
use gringo_core::core::{Block, BlockHeader};
use gringo_core::genesis;
use gringo_core::pow::Difficulty;
use std::sync::Arc;

#[test]
fn fresh_chain_reflects_genesis() {
	let genesis = genesis::genesis_testnet1();
	let (chain, store) = setup(genesis.clone());

	assert_eq!(chain.height(), genesis.header.height);
	assert_eq!(chain.total_difficulty(), genesis.header.total_difficulty);
	assert_eq!(chain.head_hash(), genesis.hash());
	assert_eq!(chain.genesis(), genesis);
	assert!(chain.contains(&genesis.hash()));

	let head = chain.head();
	assert_eq!(head.height, 0);
	assert_eq!(head.last_block_h, genesis.hash());

	// genesis gets saved so peers can sync from it
	assert_eq!(store.len(), 1);
}

#[test]
fn genesis_not_saved_twice() {
	let genesis = genesis::genesis_main();
	let store = Arc::new(MemoryStore::new());
	store.save_block(&genesis).unwrap();
	let chain = ChainState::new(genesis, store.clone());
	assert_eq!(store.len(), 1);
	assert_eq!(chain.total_difficulty(), Difficulty::from_num(1000));
}

#[test]
fn get_block_by_hash_and_id() {
	let genesis = genesis::genesis_testnet2();
	let (chain, _) = setup(genesis.clone());
	let hashes = mine_chain(&chain, 3);

	assert_eq!(chain.get_block(None), Ok(None));
	let b = chain.get_block(Some(&hashes[1])).unwrap().unwrap();
	assert_eq!(b.header.height, 2);
	assert_eq!(chain.get_block(Some(&Hash::from_vec(&[9; 32]))), Ok(None));

	let by_height = chain.get_block_id(&BlockId::from_height(3)).unwrap().unwrap();
	assert_eq!(by_height.hash(), hashes[2]);
	let mismatch = chain.get_block_id(&BlockId::new(hashes[2], 1)).unwrap();
	assert!(mismatch.is_none());
	let g = chain.get_block_id(&BlockId::from_hash(genesis.hash())).unwrap();
	assert_eq!(g.map(|b| b.header.hash()), Some(genesis.hash()));
}

fn disk_on_fire() -> StoreError {
	StoreError::OtherErr("disk on fire".to_owned())
}

struct BrokenStore;

impl ChainStore for BrokenStore {
	fn get_block(&self, _: &BlockId) -> Result<Option<Block>, StoreError> {
		Err(disk_on_fire())
	}
	fn get_block_header(&self, _: &BlockId) -> Result<Option<BlockHeader>, StoreError> {
		Err(disk_on_fire())
	}
	fn blocks_from(&self, _: &BlockId, _: usize) -> Result<Vec<Block>, StoreError> {
		Err(disk_on_fire())
	}
	fn headers_from(&self, _: &BlockId, _: usize) -> Result<Vec<BlockHeader>, StoreError> {
		Err(disk_on_fire())
	}
	fn save_block(&self, _: &Block) -> Result<(), StoreError> {
		Err(disk_on_fire())
	}
	fn save_block_header(&self, _: &BlockHeader) -> Result<(), StoreError> {
		Err(disk_on_fire())
	}
}

/// Saves fine, but can't read ranges back.
struct NoRangeStore(MemoryStore);

impl ChainStore for NoRangeStore {
	fn get_block(&self, id: &BlockId) -> Result<Option<Block>, StoreError> {
		self.0.get_block(id)
	}
	fn get_block_header(&self, id: &BlockId) -> Result<Option<BlockHeader>, StoreError> {
		self.0.get_block_header(id)
	}
	fn blocks_from(&self, _: &BlockId, _: usize) -> Result<Vec<Block>, StoreError> {
		Err(disk_on_fire())
	}
	fn headers_from(&self, _: &BlockId, _: usize) -> Result<Vec<BlockHeader>, StoreError> {
		Err(disk_on_fire())
	}
	fn save_block(&self, b: &Block) -> Result<(), StoreError> {
		self.0.save_block(b)
	}
	fn save_block_header(&self, bh: &BlockHeader) -> Result<(), StoreError> {
		self.0.save_block_header(bh)
	}
}

#[test]
fn store_errors_propagate_on_direct_lookup() {
	gringo_util::init_test_logger();
	let genesis = genesis::genesis_testnet1();
	let chain = ChainState::new(genesis.clone(), Arc::new(BrokenStore));
	assert_eq!(chain.height(), 0);

	match chain.get_block(Some(&genesis.hash())) {
		Err(Error::StoreErr(_)) => {}
		other => panic!("unexpected {:?}", other),
	}
	assert!(chain.get_block_id(&BlockId::from_height(0)).is_err());
	// no hash means no lookup at all
	assert_eq!(chain.get_block(None), Ok(None));
}

#[test]
fn store_errors_are_swallowed_by_header_queries() {
	gringo_util::init_test_logger();
	let genesis = genesis::genesis_testnet1();
	let chain = ChainState::new(genesis.clone(), Arc::new(NoRangeStore(MemoryStore::new())));
	let headers = chain_test_helper::headers_after(&genesis.header, 2);
	chain.process_headers(&headers).unwrap();
	assert_eq!(chain.height(), 2);

	assert!(chain.get_block_headers(&[genesis.hash()]).is_empty());
}

#[test]
fn unsaved_headers_are_not_accepted() {
	gringo_util::init_test_logger();
	let genesis = genesis::genesis_testnet1();
	let chain = ChainState::new(genesis.clone(), Arc::new(BrokenStore));
	let headers = chain_test_helper::headers_after(&genesis.header, 2);

	assert_eq!(chain.process_headers(&headers), Err(Error::StoreErr(disk_on_fire())));
	assert_eq!(chain.height(), 0);
	assert_eq!(chain.head_hash(), genesis.hash());
	assert!(!chain.contains(&headers[0].hash()));
}
