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

//! Error types for chain

use crate::core::core::block;
use crate::core::pow;
use crate::core::ser;
use crate::store;

/// Chain error definitions
#[derive(Clone, Eq, PartialEq, Debug, thiserror::Error)]
pub enum Error {
	/// The block doesn't fit anywhere in our chain
	#[error("Block is unfit: {0}")]
	Unfit(String),
	/// Special case of orphan blocks, parent unknown
	#[error("Orphan")]
	Orphan,
	/// Block height is invalid (not previous + 1)
	#[error("Invalid Block Height")]
	InvalidBlockHeight,
	/// Block time is too far in the future
	#[error("Invalid Block Time")]
	InvalidBlockTime,
	/// Invalid block version, either a mistake or outdated software
	#[error("Invalid Block Version: {0}")]
	InvalidBlockVersion(u16),
	/// Difficulty is too low
	#[error("Difficulty is too low")]
	DifficultyTooLow,
	/// Addition of difficulties on all previous block is wrong
	#[error("Addition of difficulties on all previous blocks is wrong")]
	WrongTotalDifficulty,
	/// The proof of work is invalid
	#[error("Invalid PoW: {0}")]
	InvalidPow(pow::Error),
	/// The block body is malformed or fails verification
	#[error("Invalid Block Proof: {0}")]
	InvalidBlockProof(block::Error),
	/// Internal issue when trying to save or load data from store
	#[error("Store Error: {0}")]
	StoreErr(store::Error),
	/// Error serializing or deserializing a type
	#[error("Serialization Error: {0}")]
	SerErr(ser::Error),
}

impl Error {
	/// Whether the error is due to a block that was intrinsically wrong,
	/// meaning the peer that sent it misbehaved.
	pub fn is_bad_data(&self) -> bool {
		match self {
			Error::Unfit(_)
			| Error::Orphan
			| Error::StoreErr(_)
			| Error::SerErr(_) => false,
			_ => true,
		}
	}
}

impl From<store::Error> for Error {
	fn from(e: store::Error) -> Error {
		Error::StoreErr(e)
	}
}

impl From<ser::Error> for Error {
	fn from(e: ser::Error) -> Error {
		Error::SerErr(e)
	}
}

impl From<block::Error> for Error {
	fn from(e: block::Error) -> Error {
		Error::InvalidBlockProof(e)
	}
}

impl From<pow::Error> for Error {
	fn from(e: pow::Error) -> Error {
		Error::InvalidPow(e)
	}
}
