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

//! Proof of work types carried by block headers. The header only carries a
//! Cuckoo Cycle solution; verifying that the solution forms a cycle is the
//! job of a pluggable verifier. What this module checks itself is the shape
//! of the solution.

use std::fmt;
use std::ops::Add;

use crate::consensus::PROOFSIZE;
use crate::core::BlockHeader;
use crate::ser::{self, Readable, Reader, Writeable, Writer};

/// Proof of work verification error
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
	/// Solution doesn't carry the expected number of nonces
	#[error("Invalid Cycle length: {0}")]
	InvalidCycle(usize),
	/// Nonces aren't in strictly ascending order
	#[error("Edges not ascending")]
	EdgesNotAscending,
	/// Solution failed cycle verification
	#[error("Verification Error: {0}")]
	Verification(String),
}

/// Signature of a full proof of work verifier, plugged into the chain.
pub type PowVerifier = fn(&BlockHeader) -> Result<(), Error>;

/// The difficulty is defined as the maximum target divided by the block hash.
/// Only ordering and addition matter for chain selection.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Eq, Ord, Hash, Serialize, Deserialize)]
pub struct Difficulty {
	num: u64,
}

impl Difficulty {
	/// Difficulty of zero, which is invalid (no target can be
	/// calculated from it) but very useful as a start for additions.
	pub fn zero() -> Difficulty {
		Difficulty { num: 0 }
	}

	/// Convert a `u64` into a `Difficulty`. Zero is bumped to one so a
	/// computed difficulty is always usable as a target.
	pub fn from_num(num: u64) -> Difficulty {
		Difficulty {
			num: std::cmp::max(num, 1),
		}
	}

	/// Converts the difficulty into a u64
	pub fn to_num(&self) -> u64 {
		self.num
	}

	/// Raw constructor, keeps zero as zero. Genesis data needs it.
	pub fn from_raw(num: u64) -> Difficulty {
		Difficulty { num }
	}
}

impl fmt::Display for Difficulty {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.num)
	}
}

impl Add<Difficulty> for Difficulty {
	type Output = Difficulty;
	fn add(self, other: Difficulty) -> Difficulty {
		Difficulty {
			num: self.num.saturating_add(other.num),
		}
	}
}

impl Writeable for Difficulty {
	fn write<W: Writer>(&self, writer: &mut W) -> Result<(), ser::Error> {
		writer.write_u64(self.num)
	}
}

impl Readable for Difficulty {
	fn read<R: Reader>(reader: &mut R) -> Result<Difficulty, ser::Error> {
		let num = reader.read_u64()?;
		Ok(Difficulty { num })
	}
}

/// A Cuckoo Cycle proof of work, consisting of the nonces of the edges
/// forming the cycle.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Proof {
	/// The nonces
	pub nonces: Vec<u32>,
}

impl fmt::Debug for Proof {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Cuckoo(")?;
		for (i, val) in self.nonces[..].iter().enumerate() {
			write!(f, "{:x}", val)?;
			if i < self.nonces.len() - 1 {
				write!(f, " ")?;
			}
		}
		write!(f, ")")
	}
}

impl Proof {
	/// Builds a proof with provided nonces
	pub fn new(nonces: Vec<u32>) -> Proof {
		Proof { nonces }
	}

	/// Builds a proof with all nonces at zero, of the given size.
	pub fn zero(proof_size: usize) -> Proof {
		Proof {
			nonces: vec![0; proof_size],
		}
	}

	/// Returns the proof size
	pub fn proof_size(&self) -> usize {
		self.nonces.len()
	}
}

impl Writeable for Proof {
	fn write<W: Writer>(&self, writer: &mut W) -> Result<(), ser::Error> {
		if self.nonces.len() > u8::MAX as usize {
			return Err(ser::Error::TooLargeWriteErr);
		}
		writer.write_u8(self.nonces.len() as u8)?;
		for n in &self.nonces {
			writer.write_u32(*n)?;
		}
		Ok(())
	}
}

impl Readable for Proof {
	fn read<R: Reader>(reader: &mut R) -> Result<Proof, ser::Error> {
		let count = reader.read_u8()? as usize;
		let mut nonces = Vec::with_capacity(count);
		for _ in 0..count {
			nonces.push(reader.read_u32()?);
		}
		Ok(Proof { nonces })
	}
}

/// Structural check of the header's proof of work: exactly PROOFSIZE nonces,
/// strictly ascending. Says nothing about the cycle itself.
pub fn verify_size(header: &BlockHeader) -> Result<(), Error> {
	let nonces = &header.pow.nonces;
	if nonces.len() != PROOFSIZE {
		return Err(Error::InvalidCycle(nonces.len()));
	}
	if nonces.windows(2).any(|w| w[0] >= w[1]) {
		return Err(Error::EdgesNotAscending);
	}
	Ok(())
}
