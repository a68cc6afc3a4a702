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

//! Base types that the block chain pipeline requires.

use std::fmt;

use crate::core::core::block;
use crate::core::core::hash::{Hash, Hashed};
use crate::core::core::{Block, BlockHeader};
use crate::core::pow::Difficulty;
use crate::store::Error;

/// Query key addressing a block in the store, by hash, by height or both.
/// When both are set the hash decides which block is meant and the height
/// has to agree with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BlockId {
	/// Hash of the block
	pub hash: Option<Hash>,
	/// Height of the block
	pub height: Option<u64>,
}

impl BlockId {
	/// Key for the block with the given hash.
	pub fn from_hash(hash: Hash) -> BlockId {
		BlockId {
			hash: Some(hash),
			height: None,
		}
	}

	/// Key for the block at the given height.
	pub fn from_height(height: u64) -> BlockId {
		BlockId {
			hash: None,
			height: Some(height),
		}
	}

	/// Key for the given hash, expected at the given height.
	pub fn new(hash: Hash, height: u64) -> BlockId {
		BlockId {
			hash: Some(hash),
			height: Some(height),
		}
	}
}

impl fmt::Display for BlockId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match (self.hash, self.height) {
			(Some(h), Some(n)) => write!(f, "{} at {}", h, n),
			(Some(h), None) => write!(f, "{}", h),
			(None, Some(n)) => write!(f, "height {}", n),
			(None, None) => write!(f, "(empty)"),
		}
	}
}

/// The tip of the chain. References the max height and the latest and
/// previous blocks for convenience and the total difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tip {
	/// Height of the tip (max height of the fork)
	pub height: u64,
	/// Last block pushed to the fork
	pub last_block_h: Hash,
	/// Block previous to last
	pub prev_block_h: Hash,
	/// Total difficulty accumulated on that fork
	pub total_difficulty: Difficulty,
}

impl Tip {
	/// Tip pointing at the provided header.
	pub fn from_header(bh: &BlockHeader) -> Tip {
		Tip {
			height: bh.height,
			last_block_h: bh.hash(),
			prev_block_h: bh.previous,
			total_difficulty: bh.total_difficulty,
		}
	}
}

/// Trait the chain requires an implementor for to look up and persist
/// blocks.
pub trait ChainStore: Send + Sync {
	/// Gets a block by hash, height or both. A block that is simply not
	/// there is `Ok(None)`, errors are reserved for a store that could not
	/// answer.
	fn get_block(&self, id: &BlockId) -> Result<Option<Block>, Error>;

	/// Gets a block header by hash, height or both, whether the full block
	/// is stored or not.
	fn get_block_header(&self, id: &BlockId) -> Result<Option<BlockHeader>, Error>;

	/// Up to `limit` blocks following the one identified by `id`, oldest
	/// first. The identified block itself isn't included, and neither is
	/// anything past the first block missing its body.
	fn blocks_from(&self, id: &BlockId, limit: usize) -> Result<Vec<Block>, Error>;

	/// Up to `limit` headers following the one identified by `id`, oldest
	/// first, bodies stored or not.
	fn headers_from(&self, id: &BlockId, limit: usize) -> Result<Vec<BlockHeader>, Error>;

	/// Save the provided block, header included, in store
	fn save_block(&self, b: &Block) -> Result<(), Error>;

	/// Save the provided block header in store, ahead of its body
	fn save_block_header(&self, bh: &BlockHeader) -> Result<(), Error>;
}

/// Verification of a block body. The default only checks what can be
/// checked without cryptography, a node plugs in full commitment, range
/// proof and signature verification here.
pub trait BlockVerifier: Send + Sync {
	/// Verifies the body of the provided block.
	fn verify_block(&self, b: &Block) -> Result<(), block::Error>;
}

/// Checks weight, ordering and uniqueness of the block body.
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuralVerifier;

impl BlockVerifier for StructuralVerifier {
	fn verify_block(&self, b: &Block) -> Result<(), block::Error> {
		b.validate_read()
	}
}
