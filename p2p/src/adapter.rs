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

//! Chain state seen through the eyes of the networking layer.

use crate::chain::{self, ChainState};
use crate::core::core::hash::Hash;
use crate::core::core::{Block, BlockHeader};
use crate::core::pow::Difficulty;
use crate::types::ChainAdapter;

impl ChainAdapter for ChainState {
	fn total_difficulty(&self) -> Difficulty {
		ChainState::total_difficulty(self)
	}

	fn total_height(&self) -> u64 {
		self.height()
	}

	fn locate_headers(&self, locator: &[Hash]) -> Vec<BlockHeader> {
		let headers = self.get_block_headers(locator);
		debug!(
			"locate_headers: {} locator hashes, returning {} headers",
			locator.len(),
			headers.len()
		);
		headers
	}

	fn get_block(&self, h: Hash) -> Option<Block> {
		match ChainState::get_block(self, Some(&h)) {
			Ok(b) => b,
			Err(e) => {
				error!("get_block: could not read block {}: {}", h, e);
				None
			}
		}
	}

	fn headers_received(&self, headers: &[BlockHeader]) -> Result<(), chain::Error> {
		self.process_headers(headers)
	}

	fn block_received(&self, b: Block) -> Result<(), chain::Error> {
		self.process_block(b)
	}
}
