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
use gringo_chain::BlockId;
use gringo_core::genesis;
use std::sync::Arc;
use std::thread;

#[test]
fn concurrent_readers() {
	let genesis = genesis::genesis_testnet1();
	let (chain, _) = setup(genesis.clone());
	let hashes = mine_chain(&chain, 20);
	let chain = Arc::new(chain);

	let handles: Vec<_> = (0..8)
		.map(|i| {
			let chain = chain.clone();
			let gh = genesis.hash();
			let expected = hashes.clone();
			thread::spawn(move || {
				for _ in 0..50 {
					assert_eq!(chain.height(), 20);
					assert_eq!(chain.total_difficulty().to_num(), 10 + 20 * 2);
					let headers = chain.get_block_headers(&[expected[i], gh]);
					assert_eq!(headers.len(), 20 - i - 1);
				}
			})
		})
		.collect();

	for h in handles {
		h.join().unwrap();
	}
}

#[test]
fn readers_see_consistent_heads_while_extending() {
	let genesis = genesis::genesis_testnet1();
	let (chain, _) = setup(genesis.clone());
	let chain = Arc::new(chain);

	let writer = {
		let chain = chain.clone();
		thread::spawn(move || {
			mine_chain(&chain, 100);
		})
	};

	let readers: Vec<_> = (0..4)
		.map(|_| {
			let chain = chain.clone();
			let gh = genesis.hash();
			thread::spawn(move || {
				for _ in 0..200 {
					let head = chain.head();
					// difficulty grows by 2 per block over the genesis 10
					assert_eq!(head.total_difficulty.to_num(), 10 + head.height * 2);
					let b = chain
						.get_block_id(&BlockId::from_hash(head.last_block_h))
						.unwrap()
						.unwrap();
					assert_eq!(b.header.height, head.height);

					let headers = chain.get_block_headers(&[gh]);
					for (i, h) in headers.iter().enumerate() {
						assert_eq!(h.height, i as u64 + 1);
					}
				}
			})
		})
		.collect();

	writer.join().unwrap();
	for r in readers {
		r.join().unwrap();
	}
	assert_eq!(chain.height(), 100);
}
