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

//! Storage of headers and blocks the chain relies on. Only an in-memory
//! implementation is provided, indexed both by hash and by height.

use std::collections::HashMap;

use crate::core::core::hash::{Hash, Hashed};
use crate::core::core::{Block, BlockHeader};
use crate::types::{BlockId, ChainStore};
use crate::util::RwLock;

/// Store errors
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
	/// Couldn't find what we were looking for
	#[error("DB Not Found Error: {0}")]
	NotFoundErr(String),
	/// Any other failure of the underlying store
	#[error("DB Error: {0}")]
	OtherErr(String),
}

#[derive(Default)]
struct Blocks {
	headers: HashMap<Hash, BlockHeader>,
	bodies: HashMap<Hash, Block>,
	by_height: HashMap<u64, Hash>,
}

impl Blocks {
	fn header(&self, id: &BlockId) -> Option<&BlockHeader> {
		match (id.hash, id.height) {
			(Some(h), height) => self
				.headers
				.get(&h)
				.filter(|bh| height.map_or(true, |n| bh.height == n)),
			(None, Some(n)) => self.by_height.get(&n).and_then(|h| self.headers.get(h)),
			(None, None) => None,
		}
	}

	fn block(&self, id: &BlockId) -> Option<&Block> {
		self.header(id)
			.and_then(|bh| self.bodies.get(&bh.hash()))
	}

	fn next_hash(&self, height: u64) -> Option<&Hash> {
		self.by_height.get(&(height + 1))
	}

	fn start(&self, id: &BlockId) -> Result<u64, Error> {
		self.header(id)
			.map(|bh| bh.height)
			.ok_or_else(|| Error::NotFoundErr(format!("block {}", id)))
	}

	fn index_header(&mut self, bh: &BlockHeader) -> Hash {
		let hash = bh.hash();
		self.by_height.insert(bh.height, hash);
		self.headers.insert(hash, bh.clone());
		hash
	}
}

/// Headers and blocks kept in memory. A header can be stored without its
/// body, the last header saved at a given height is the one returned by
/// height lookups and range reads.
#[derive(Default)]
pub struct MemoryStore {
	blocks: RwLock<Blocks>,
}

impl MemoryStore {
	/// An empty store.
	pub fn new() -> MemoryStore {
		MemoryStore::default()
	}

	/// Number of full blocks stored.
	pub fn len(&self) -> usize {
		self.blocks.read().bodies.len()
	}

	/// Whether no full block was stored yet.
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

impl ChainStore for MemoryStore {
	fn get_block(&self, id: &BlockId) -> Result<Option<Block>, Error> {
		Ok(self.blocks.read().block(id).cloned())
	}

	fn get_block_header(&self, id: &BlockId) -> Result<Option<BlockHeader>, Error> {
		Ok(self.blocks.read().header(id).cloned())
	}

	fn blocks_from(&self, id: &BlockId, limit: usize) -> Result<Vec<Block>, Error> {
		let blocks = self.blocks.read();
		let mut height = blocks.start(id)?;

		let mut res = vec![];
		while res.len() < limit {
			match blocks.next_hash(height).and_then(|h| blocks.bodies.get(h)) {
				Some(b) => res.push(b.clone()),
				None => break,
			}
			height += 1;
		}
		Ok(res)
	}

	fn headers_from(&self, id: &BlockId, limit: usize) -> Result<Vec<BlockHeader>, Error> {
		let blocks = self.blocks.read();
		let mut height = blocks.start(id)?;

		let mut res = vec![];
		while res.len() < limit {
			match blocks.next_hash(height).and_then(|h| blocks.headers.get(h)) {
				Some(bh) => res.push(bh.clone()),
				None => break,
			}
			height += 1;
		}
		Ok(res)
	}

	fn save_block(&self, b: &Block) -> Result<(), Error> {
		let mut blocks = self.blocks.write();
		let hash = blocks.index_header(&b.header);
		blocks.bodies.insert(hash, b.clone());
		Ok(())
	}

	fn save_block_header(&self, bh: &BlockHeader) -> Result<(), Error> {
		self.blocks.write().index_header(bh);
		Ok(())
	}
}
