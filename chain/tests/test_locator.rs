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


use self::chain_test_helper::{headers_after, mine_chain, setup};
use gringo_chain::ChainState;
use gringo_core::consensus::{MAX_BLOCK_HEADERS, MAX_LOCATORS};
use gringo_core::core::hash::{Hash, Hashed};
use gringo_core::core::{Block, BlockHeader};
use gringo_core::genesis;
use rand::Rng;

fn random_hash() -> Hash {
	let bytes: Vec<u8> = (0..Hash::LEN).map(|_| rand::thread_rng().gen()).collect();
	Hash::from_vec(&bytes)
}

fn hashes_of(headers: &[BlockHeader]) -> Vec<Hash> {
	headers.iter().map(|h| h.hash()).collect()
}

#[test]
fn genesis_only_chain_has_nothing_to_send() {
	let genesis = genesis::genesis_testnet1();
	let (chain, _) = setup(genesis.clone());
	assert!(chain.get_block_headers(&[genesis.hash()]).is_empty());
}

#[test]
fn headers_follow_common_ancestor() {
	let genesis = genesis::genesis_testnet1();
	let (chain, _) = setup(genesis.clone());
	let hashes = mine_chain(&chain, 2);
	assert_eq!(chain.height(), 2);

	let headers = chain.get_block_headers(&[genesis.hash()]);
	assert_eq!(hashes_of(&headers), hashes);
	assert_eq!(headers[0].height, 1);
	assert_eq!(headers[1].height, 2);
}

#[test]
fn most_recent_match_wins() {
	let genesis = genesis::genesis_testnet1();
	let (chain, _) = setup(genesis.clone());
	let hashes = mine_chain(&chain, 5);

	// locator order doesn't matter, the newest known hash is the ancestor
	let locator = vec![genesis.hash(), random_hash(), hashes[1], hashes[0]];
	let headers = chain.get_block_headers(&locator);
	assert_eq!(hashes_of(&headers), hashes[2..].to_vec());
}

#[test]
fn match_at_tip_is_empty() {
	let genesis = genesis::genesis_testnet1();
	let (chain, _) = setup(genesis.clone());
	let hashes = mine_chain(&chain, 3);
	let locator = vec![hashes[2], hashes[1], genesis.hash()];
	assert!(chain.get_block_headers(&locator).is_empty());
}

#[test]
fn unknown_locator_is_empty() {
	let genesis = genesis::genesis_testnet1();
	let (chain, _) = setup(genesis);
	mine_chain(&chain, 3);
	let locator: Vec<Hash> = (0..5).map(|_| random_hash()).collect();
	assert!(chain.get_block_headers(&locator).is_empty());
	assert!(chain.get_block_headers(&[]).is_empty());
}

#[test]
fn only_first_locators_considered() {
	let genesis = genesis::genesis_testnet1();
	let (chain, _) = setup(genesis.clone());
	mine_chain(&chain, 2);

	let mut locator: Vec<Hash> = (0..MAX_LOCATORS).map(|_| random_hash()).collect();
	locator.push(genesis.hash());
	assert!(chain.get_block_headers(&locator).is_empty());

	locator.pop();
	locator[MAX_LOCATORS - 1] = genesis.hash();
	assert_eq!(chain.get_block_headers(&locator).len(), 2);
}

#[test]
fn result_is_capped() {
	let genesis = genesis::genesis_testnet2();
	let (chain, _) = setup(genesis.clone());
	let hashes = mine_chain(&chain, MAX_BLOCK_HEADERS + 10);

	let headers = chain.get_block_headers(&[genesis.hash()]);
	assert_eq!(headers.len(), MAX_BLOCK_HEADERS);
	assert_eq!(hashes_of(&headers), hashes[..MAX_BLOCK_HEADERS].to_vec());

	let rest = chain.get_block_headers(&[hashes[MAX_BLOCK_HEADERS - 1]]);
	assert_eq!(hashes_of(&rest), hashes[MAX_BLOCK_HEADERS..].to_vec());
}

#[test]
fn headers_are_served_before_bodies() {
	let genesis = genesis::genesis_testnet1();
	let (chain, _) = setup(genesis.clone());
	assert!(chain.get_block_headers(&[genesis.hash()]).is_empty());

	let headers = headers_after(&genesis.header, 2);
	chain.process_headers(&headers).unwrap();
	assert_eq!(chain.height(), 2);
	assert_eq!(chain.get_block_headers(&[genesis.hash()]), headers);
}

#[test]
fn ancestor_without_body() {
	let genesis = genesis::genesis_testnet1();
	let (chain, _) = setup(genesis.clone());
	let headers = headers_after(&genesis.header, 3);
	chain.process_headers(&headers).unwrap();
	for h in &headers[1..] {
		chain.process_block(Block::with_header(h.clone())).unwrap();
	}

	let served = chain.get_block_headers(&[headers[0].hash()]);
	assert_eq!(served, headers[1..].to_vec());
}

#[test]
fn shared_store_ahead_of_history() {
	let genesis = genesis::genesis_testnet1();
	let (ahead, store) = setup(genesis.clone());
	let hashes = mine_chain(&ahead, 5);

	let behind = ChainState::new(genesis.clone(), store.clone());
	let known: Vec<BlockHeader> = hashes[..2]
		.iter()
		.map(|h| ahead.get_block(Some(h)).unwrap().unwrap().header)
		.collect();
	behind.process_headers(&known).unwrap();
	assert_eq!(behind.height(), 2);

	// the store has 5 blocks past genesis, we only know of 2
	assert_eq!(behind.get_block_headers(&[genesis.hash()]), known);
	assert!(behind.get_block_headers(&[hashes[1]]).is_empty());

	// a diverging history saved in the same store is never served
	let other = ChainState::new(genesis.clone(), store.clone());
	let diverging = headers_after(&genesis.header, 1)
		.into_iter()
		.map(|h| BlockHeader { nonce: 99, ..h })
		.collect::<Vec<_>>();
	other.process_headers(&diverging).unwrap();
	let served = ahead.get_block_headers(&[genesis.hash()]);
	assert!(hashes_of(&served).iter().zip(&hashes).all(|(a, b)| a == b));
	assert_eq!(other.get_block_headers(&[genesis.hash()]), diverging);
}

#[test]
fn genesis_above_zero() {
	let mut genesis = genesis::genesis_testnet1();
	genesis.header.height = 5;
	let (chain, _) = setup(genesis.clone());

	let headers = headers_after(&genesis.header, 2);
	chain.process_headers(&headers).unwrap();
	assert_eq!(chain.height(), 7);
	assert_eq!(chain.get_block_headers(&[genesis.hash()]), headers);

	// bodies for known headers are matched at their real height
	for h in &headers {
		chain.process_block(Block::with_header(h.clone())).unwrap();
	}
	let hashes = mine_chain(&chain, 1);
	let served = chain.get_block_headers(&[headers[0].hash()]);
	assert_eq!(served.len(), 2);
	assert_eq!(served[1].hash(), hashes[0]);
	assert_eq!(served[1].height, 8);
}
