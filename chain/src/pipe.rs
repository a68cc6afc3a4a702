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

//! Implementation of the chain block acceptance (or refusal) pipeline.
//! Checks are arranged by order of cost to have as little DoS surface as
//! possible: cheap header fields first, proof of work last.

use chrono::prelude::Utc;
use chrono::Duration;

use crate::core::consensus::{FTL_SEC, HEADER_VERSION};
use crate::core::core::hash::Hashed;
use crate::core::core::{Block, BlockHeader};
use crate::core::pow::PowVerifier;
use crate::error::Error;
use crate::types::{BlockVerifier, Tip};

/// Contextual information required to process a new header or block and
/// either reject or accept it.
pub struct BlockContext<'a> {
	/// The head the next header has to build on
	pub head: Tip,
	/// Proof of work verification function
	pub pow_verifier: PowVerifier,
	/// Verification of block bodies
	pub block_verifier: &'a dyn BlockVerifier,
}

/// Validates a run of headers, each building on the previous one and the
/// first on the context head. Nothing is applied: the returned tips are
/// the successive heads the chain goes through if the batch is accepted.
pub fn validate_headers(headers: &[BlockHeader], ctx: &BlockContext<'_>) -> Result<Vec<Tip>, Error> {
	let mut head = ctx.head;
	let mut tips = Vec::with_capacity(headers.len());
	for header in headers {
		validate_header(header, &head, ctx)?;
		head = Tip::from_header(header);
		tips.push(head);
	}
	Ok(tips)
}

/// First level of block validation that only needs to act on the block
/// header, checked against the head it claims to extend.
pub fn validate_header(header: &BlockHeader, head: &Tip, ctx: &BlockContext<'_>) -> Result<(), Error> {
	if header.version != HEADER_VERSION {
		return Err(Error::InvalidBlockVersion(header.version));
	}
	if header.previous != head.last_block_h {
		return Err(Error::Unfit(format!(
			"header {} does not build on {}",
			header.hash(),
			head.last_block_h
		)));
	}
	if header.height != head.height + 1 {
		return Err(Error::InvalidBlockHeight);
	}
	if header.timestamp > Utc::now() + Duration::seconds(FTL_SEC) {
		return Err(Error::InvalidBlockTime);
	}
	if header.difficulty.to_num() == 0 {
		return Err(Error::DifficultyTooLow);
	}
	if header.total_difficulty != head.total_difficulty + header.difficulty {
		return Err(Error::WrongTotalDifficulty);
	}
	if let Err(e) = (ctx.pow_verifier)(header) {
		error!(
			"pipe: validate_header bad cuckoo cycle for {} at {}: {}",
			header.hash(),
			header.height,
			e
		);
		return Err(Error::InvalidPow(e));
	}
	Ok(())
}

/// Validates the block body. Commitment, range proof and signature checks
/// live behind the verifier.
pub fn validate_block(b: &Block, ctx: &BlockContext<'_>) -> Result<(), Error> {
	ctx.block_verifier.verify_block(b).map_err(|e| {
		debug!("pipe: validate_block {} failed: {}", b.hash(), e);
		Error::InvalidBlockProof(e)
	})
}
