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

//! Facade and handler for the rest of the blockchain implementation
//! and mostly the chain pipeline.

use std::cmp::min;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::core::consensus::{MAX_BLOCK_HEADERS, MAX_LOCATORS};
use crate::core::core::hash::{Hash, Hashed};
use crate::core::core::{Block, BlockHeader};
use crate::core::pow::{self, Difficulty, PowVerifier};
use crate::error::Error;
use crate::pipe::{self, BlockContext};
use crate::types::{BlockId, BlockVerifier, ChainStore, StructuralVerifier, Tip};
use crate::util::RwLock;

/// Everything that moves when the chain is extended. Kept behind a single
/// lock so readers always see height, difficulty and hashes agree.
struct ChainData {
	height: u64,
	total_difficulty: Difficulty,
	prev_hash: Hash,
	// oldest first, genesis at 0
	hashes: Vec<Hash>,
	// hash to height
	index: HashMap<Hash, u64>,
}

impl ChainData {
	fn new(genesis: &BlockHeader) -> ChainData {
		let gh = genesis.hash();
		let mut index = HashMap::new();
		index.insert(gh, genesis.height);
		ChainData {
			height: genesis.height,
			total_difficulty: genesis.total_difficulty,
			prev_hash: genesis.previous,
			hashes: vec![gh],
			index,
		}
	}

	fn tail(&self) -> Hash {
		*self
			.hashes
			.last()
			.expect("chain hash history can never be empty")
	}

	fn head(&self) -> Tip {
		Tip {
			height: self.height,
			last_block_h: self.tail(),
			prev_block_h: self.prev_hash,
			total_difficulty: self.total_difficulty,
		}
	}

	fn push(&mut self, tip: Tip) {
		self.index.insert(tip.last_block_h, tip.height);
		self.hashes.push(tip.last_block_h);
		self.height = tip.height;
		self.total_difficulty = tip.total_difficulty;
		self.prev_hash = tip.prev_block_h;
	}
}

/// Facade to the blockchain state: the genesis block, the accepted header
/// history and the store holding full blocks. Maintains locking for the
/// pipeline to avoid conflicting processing.
pub struct ChainState {
	genesis: Block,
	store: Arc<dyn ChainStore>,
	data: RwLock<ChainData>,

	// POW verification function
	pow_verifier: PowVerifier,
	block_verifier: Arc<dyn BlockVerifier>,
}

impl ChainState {
	/// Chain rooted at the provided genesis block, only checking the shape of
	/// proofs of work and block bodies.
	pub fn new(genesis: Block, store: Arc<dyn ChainStore>) -> ChainState {
		ChainState::init(
			genesis,
			store,
			pow::verify_size,
			Arc::new(StructuralVerifier),
		)
	}

	/// Chain rooted at the provided genesis block. The genesis is trusted
	/// as is, and saved in store if not already there so that peers can sync
	/// from it.
	pub fn init(
		genesis: Block,
		store: Arc<dyn ChainStore>,
		pow_verifier: PowVerifier,
		block_verifier: Arc<dyn BlockVerifier>,
	) -> ChainState {
		let gh = genesis.hash();
		match store.get_block(&BlockId::from_hash(gh)) {
			Ok(Some(_)) => {}
			Ok(None) => {
				if let Err(e) = store.save_block(&genesis) {
					warn!("chain: init: could not save genesis {}: {}", gh, e);
				}
			}
			Err(e) => warn!("chain: init: could not look up genesis {}: {}", gh, e),
		}
		debug!(
			"chain: init: genesis {} at {}, difficulty {}",
			gh, genesis.header.height, genesis.header.total_difficulty
		);

		let data = RwLock::new(ChainData::new(&genesis.header));
		ChainState {
			genesis,
			store,
			data,
			pow_verifier,
			block_verifier,
		}
	}

	/// The genesis block this chain is rooted at.
	pub fn genesis(&self) -> Block {
		self.genesis.clone()
	}

	/// Current height of the chain
	pub fn height(&self) -> u64 {
		self.data.read().height
	}

	/// Total difficulty at the head of the chain
	pub fn total_difficulty(&self) -> Difficulty {
		self.data.read().total_difficulty
	}

	/// Hash of the last accepted header.
	pub fn head_hash(&self) -> Hash {
		self.data.read().tail()
	}

	/// Consistent view of the chain head.
	pub fn head(&self) -> Tip {
		self.data.read().head()
	}

	/// Whether the header with the provided hash is part of the chain.
	pub fn contains(&self, hash: &Hash) -> bool {
		self.data.read().index.contains_key(hash)
	}

	/// Headers following the most recent hash of the locator we know about,
	/// oldest first. An empty result means either the peer is already up to
	/// date with us or we share no history at all.
	pub fn get_block_headers(&self, locator: &[Hash]) -> Vec<BlockHeader> {
		let locator = if locator.len() > MAX_LOCATORS {
			warn!(
				"chain: locator of {} hashes, only considering the first {}",
				locator.len(),
				MAX_LOCATORS
			);
			&locator[..MAX_LOCATORS]
		} else {
			locator
		};
		let wanted: HashSet<&Hash> = locator.iter().collect();

		// held through the store lookup, the headers returned must follow
		// the history we matched against
		let data = self.data.read();

		let found = data
			.hashes
			.iter()
			.enumerate()
			.rev()
			.find(|(_, h)| wanted.contains(h));

		let (pos, ancestor) = match found {
			Some(f) => f,
			None => {
				debug!("chain: no common ancestor in locator of {}", locator.len());
				return vec![];
			}
		};
		let following = &data.hashes[pos + 1..];
		if following.is_empty() {
			return vec![];
		}

		let height = data.height - following.len() as u64;
		let id = BlockId::new(*ancestor, height);
		let headers = match self
			.store
			.headers_from(&id, min(MAX_BLOCK_HEADERS, following.len()))
		{
			Ok(headers) => headers,
			Err(e) => {
				error!("chain: could not read headers from {}: {}", id, e);
				return vec![];
			}
		};

		// the store may know more, or other, headers than our history
		let mut res = Vec::with_capacity(headers.len());
		for (header, expected) in headers.into_iter().zip(following) {
			if header.hash() != *expected {
				warn!(
					"chain: store header {} at {} not in our history, stopping",
					header.hash(),
					header.height
				);
				break;
			}
			res.push(header);
		}
		res
	}

	/// Gets a block by hash. No hash, no block.
	pub fn get_block(&self, hash: Option<&Hash>) -> Result<Option<Block>, Error> {
		match hash {
			None => Ok(None),
			Some(h) => self.get_block_id(&BlockId::from_hash(*h)),
		}
	}

	/// Gets a block by hash, height or both, straight from the store.
	pub fn get_block_id(&self, id: &BlockId) -> Result<Option<Block>, Error> {
		self.store.get_block(id).map_err(Error::StoreErr)
	}

	/// Attempt to add new headers to the chain. Headers we already have at
	/// the start of the batch are skipped, the rest must extend our head.
	/// Either the whole batch is accepted or none of it. Accepted headers are
	/// saved so peers can sync them before we have the full blocks.
	pub fn process_headers(&self, headers: &[BlockHeader]) -> Result<(), Error> {
		let mut data = self.data.write();

		let known = headers
			.iter()
			.take_while(|h| data.index.contains_key(&h.hash()))
			.count();
		let headers = &headers[known..];
		let first = match headers.first() {
			Some(first) => first,
			None => return Ok(()),
		};
		self.check_extends(&data, &first.previous)?;

		let ctx = self.ctx(data.head());
		let tips = pipe::validate_headers(headers, &ctx)?;

		// saved headers not yet in the history are never served
		for header in headers {
			self.store.save_block_header(header)?;
		}
		for tip in tips {
			data.push(tip);
		}
		debug!(
			"chain: process_headers: accepted {}, skipped {}, head now {} at {}",
			headers.len(),
			known,
			data.tail(),
			data.height
		);
		Ok(())
	}

	/// Attempt to add a new block to the chain. The block either extends
	/// our head, or carries the body of a header we accepted earlier.
	pub fn process_block(&self, b: Block) -> Result<(), Error> {
		let mut data = self.data.write();
		let bhash = b.hash();
		let ctx = self.ctx(data.head());

		if let Some(height) = data.index.get(&bhash) {
			if *height != b.header.height {
				return Err(Error::InvalidBlockHeight);
			}
			pipe::validate_block(&b, &ctx)?;
			self.store.save_block(&b)?;
			debug!("chain: process_block: body for known header {} at {}", bhash, height);
			return Ok(());
		}

		self.check_extends(&data, &b.header.previous)?;
		pipe::validate_header(&b.header, &ctx.head, &ctx)?;
		pipe::validate_block(&b, &ctx)?;
		self.store.save_block(&b)?;
		data.push(Tip::from_header(&b.header));

		info!(
			"chain: process_block: accepted {} at {}, total difficulty {}",
			bhash, b.header.height, b.header.total_difficulty
		);
		Ok(())
	}

	fn check_extends(&self, data: &ChainData, previous: &Hash) -> Result<(), Error> {
		if *previous == data.tail() {
			Ok(())
		} else if data.index.contains_key(previous) {
			Err(Error::Unfit(format!("fork from {} not supported", previous)))
		} else {
			Err(Error::Orphan)
		}
	}

	fn ctx(&self, head: Tip) -> BlockContext<'_> {
		BlockContext {
			head,
			pow_verifier: self.pow_verifier,
			block_verifier: self.block_verifier.as_ref(),
		}
	}
}
