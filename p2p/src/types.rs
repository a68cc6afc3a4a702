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

use crate::chain;
use crate::core::core::hash::Hash;
use crate::core::core::{Block, BlockHeader};
use crate::core::pow::Difficulty;
use crate::core::ser;

pub use crate::core::consensus::{BLOCK_HASH_SIZE, MAX_BLOCK_HEADERS, MAX_LOCATORS};

/// Errors handling a peer message
#[derive(Debug, thiserror::Error)]
pub enum Error {
	/// Payload couldn't be read or the reply couldn't be written
	#[error("Serialization Error: {0}")]
	Serialization(ser::Error),
	/// The chain refused what the peer sent
	#[error("Chain Error: {0}")]
	Chain(chain::Error),
}

impl From<ser::Error> for Error {
	fn from(e: ser::Error) -> Error {
		Error::Serialization(e)
	}
}

impl From<chain::Error> for Error {
	fn from(e: chain::Error) -> Error {
		Error::Chain(e)
	}
}

/// Bridge between the networking layer and the rest of the system. Handles the
/// forwarding or querying of blocks from the network.
pub trait ChainAdapter: Sync + Send {
	/// Current total difficulty on our chain
	fn total_difficulty(&self) -> Difficulty;

	/// Current total height
	fn total_height(&self) -> u64;

	/// Finds a list of block headers based on the provided locator. Tries to
	/// identify the common chain and gets the headers that follow it
	/// immediately.
	fn locate_headers(&self, locator: &[Hash]) -> Vec<BlockHeader>;

	/// Gets a full block by its hash.
	fn get_block(&self, h: Hash) -> Option<Block>;

	/// A set of block headers has been received, typically in response to a
	/// locator.
	fn headers_received(&self, headers: &[BlockHeader]) -> Result<(), chain::Error>;

	/// A block has been received from one of our peers.
	fn block_received(&self, b: Block) -> Result<(), chain::Error>;
}
