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

//! Blocks and blockheaders

use std::time::UNIX_EPOCH;

use chrono::prelude::{DateTime, TimeZone, Utc};

use crate::consensus::{self, HEADER_VERSION, PROOFSIZE};
use crate::core::hash::{DefaultHashable, Hash, Hashed, ZERO_HASH};
use crate::core::{Input, Output, TxKernel};
use crate::pow::{Difficulty, Proof};
use crate::ser::{self, Readable, Reader, VerifySortedAndUnique, Writeable, Writer};

/// Errors thrown by Block validation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
	/// Too many inputs, outputs or kernels in the block
	#[error("Block Weight Exceeded")]
	WeightExceeded,
	/// Body elements not in canonical order, or duplicated
	#[error("Serialization Error: {0}")]
	Serialization(ser::Error),
}

impl From<ser::Error> for Error {
	fn from(e: ser::Error) -> Error {
		Error::Serialization(e)
	}
}

/// Block header, fairly standard compared to other blockchains.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockHeader {
	/// Version of the block
	pub version: u16,
	/// Height of this block since the genesis block (height 0)
	pub height: u64,
	/// Hash of the block previous to this in the chain.
	pub previous: Hash,
	/// Timestamp at which the block was built.
	pub timestamp: DateTime<Utc>,
	/// Difficulty used to mine the block.
	pub difficulty: Difficulty,
	/// Total accumulated difficulty since genesis block
	pub total_difficulty: Difficulty,
	/// Merklish root of all the commitments in the UTXO set
	pub utxo_root: Hash,
	/// Merklish root of all range proofs in the UTXO set
	pub range_proof_root: Hash,
	/// Merklish root of all transaction kernels in the UTXO set
	pub kernel_root: Hash,
	/// Nonce increment used to mine this block.
	pub nonce: u64,
	/// Proof of work data.
	pub pow: Proof,
}

impl DefaultHashable for BlockHeader {}

impl Default for BlockHeader {
	fn default() -> BlockHeader {
		BlockHeader {
			version: HEADER_VERSION,
			height: 0,
			previous: ZERO_HASH,
			timestamp: DateTime::<Utc>::from(UNIX_EPOCH),
			difficulty: Difficulty::from_num(1),
			total_difficulty: Difficulty::from_num(1),
			utxo_root: ZERO_HASH,
			range_proof_root: ZERO_HASH,
			kernel_root: ZERO_HASH,
			nonce: 0,
			pow: Proof::zero(PROOFSIZE),
		}
	}
}

/// Serialization of a block header
impl Writeable for BlockHeader {
	fn write<W: Writer>(&self, writer: &mut W) -> Result<(), ser::Error> {
		ser_multiwrite!(
			writer,
			[write_u16, self.version],
			[write_u64, self.height],
			[write_fixed_bytes, &self.previous],
			[write_i64, self.timestamp.timestamp()],
			[write_fixed_bytes, &self.utxo_root],
			[write_fixed_bytes, &self.range_proof_root],
			[write_fixed_bytes, &self.kernel_root],
			[write_u64, self.nonce]
		);
		self.difficulty.write(writer)?;
		self.total_difficulty.write(writer)?;
		self.pow.write(writer)
	}
}

/// Deserialization of a block header
impl Readable for BlockHeader {
	fn read<R: Reader>(reader: &mut R) -> Result<BlockHeader, ser::Error> {
		let (version, height) = ser_multiread!(reader, read_u16, read_u64);
		let previous = Hash::read(reader)?;
		let timestamp = reader.read_i64()?;
		let utxo_root = Hash::read(reader)?;
		let range_proof_root = Hash::read(reader)?;
		let kernel_root = Hash::read(reader)?;
		let nonce = reader.read_u64()?;
		let difficulty = Difficulty::read(reader)?;
		let total_difficulty = Difficulty::read(reader)?;
		let pow = Proof::read(reader)?;

		let timestamp = Utc
			.timestamp_opt(timestamp, 0)
			.single()
			.ok_or(ser::Error::CorruptedData)?;

		Ok(BlockHeader {
			version,
			height,
			previous,
			timestamp,
			difficulty,
			total_difficulty,
			utxo_root,
			range_proof_root,
			kernel_root,
			nonce,
			pow,
		})
	}
}

/// A block as expressed in the MimbleWimble protocol. The reward is
/// non-explicit, assumed to be deducible from block height (similar to
/// bitcoin's schedule) and expressed as a global transaction fee (added v.H),
/// additive to the total of fees ever collected.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Block {
	/// The header with metadata and commitments to the rest of the data
	pub header: BlockHeader,
	/// List of transaction inputs
	pub inputs: Vec<Input>,
	/// List of transaction outputs
	pub outputs: Vec<Output>,
	/// List of transaction kernels and associated proofs
	pub kernels: Vec<TxKernel>,
}

/// Implementation of Writeable for a block, defines how to write the block to a
/// binary writer. Differentiates between writing the block for the purpose of
/// full serialization and the one of just extracting a hash.
impl Writeable for Block {
	fn write<W: Writer>(&self, writer: &mut W) -> Result<(), ser::Error> {
		self.header.write(writer)?;

		if writer.serialization_mode() != ser::SerializationMode::Hash {
			ser_multiwrite!(
				writer,
				[write_u64, self.inputs.len() as u64],
				[write_u64, self.outputs.len() as u64],
				[write_u64, self.kernels.len() as u64]
			);
			for input in &self.inputs {
				input.write(writer)?;
			}
			for output in &self.outputs {
				output.write(writer)?;
			}
			for kernel in &self.kernels {
				kernel.write(writer)?;
			}
		}
		Ok(())
	}
}

/// Implementation of Readable for a block, defines how to read a full block
/// from a binary stream. The body is refused before allocation when it is
/// too heavy, and after reading when not in canonical order.
impl Readable for Block {
	fn read<R: Reader>(reader: &mut R) -> Result<Block, ser::Error> {
		let header = BlockHeader::read(reader)?;

		let (input_len, output_len, kernel_len) =
			ser_multiread!(reader, read_u64, read_u64, read_u64);

		if consensus::exceeds_weight(input_len as usize, output_len as usize, kernel_len as usize) {
			return Err(ser::Error::TooLargeReadErr);
		}

		let inputs = read_multi(reader, input_len)?;
		let outputs = read_multi(reader, output_len)?;
		let kernels = read_multi(reader, kernel_len)?;

		let block = Block {
			header,
			inputs,
			outputs,
			kernels,
		};
		block.validate_read().map_err(|e| {
			debug!("block {} refused on read: {}", block.hash(), e);
			match e {
				Error::Serialization(e) => e,
				Error::WeightExceeded => ser::Error::TooLargeReadErr,
			}
		})?;
		Ok(block)
	}
}

fn read_multi<T: Readable, R: Reader>(reader: &mut R, count: u64) -> Result<Vec<T>, ser::Error> {
	let mut res = Vec::with_capacity(count as usize);
	for _ in 0..count {
		res.push(T::read(reader)?);
	}
	Ok(res)
}

impl Block {
	/// Builds a block from a header and a body, putting the body in
	/// canonical order.
	pub fn new(
		header: BlockHeader,
		mut inputs: Vec<Input>,
		mut outputs: Vec<Output>,
		mut kernels: Vec<TxKernel>,
	) -> Block {
		inputs.sort();
		outputs.sort();
		kernels.sort();
		Block {
			header,
			inputs,
			outputs,
			kernels,
		}
	}

	/// A block with an empty body.
	pub fn with_header(header: BlockHeader) -> Block {
		Block {
			header,
			..Default::default()
		}
	}

	/// The block hash, which is the hash of its header.
	pub fn hash(&self) -> Hash {
		self.header.hash()
	}

	/// Sum of the fees of all kernels.
	pub fn total_fees(&self) -> u64 {
		self.kernels.iter().map(|k| k.fee).sum()
	}

	/// Checks that can be done on a block without any chain context: the
	/// body fits the weight limit, and inputs, outputs and kernels are all
	/// sorted and free of duplicates.
	pub fn validate_read(&self) -> Result<(), Error> {
		if consensus::exceeds_weight(self.inputs.len(), self.outputs.len(), self.kernels.len()) {
			return Err(Error::WeightExceeded);
		}
		self.inputs.verify_sorted_and_unique()?;
		self.outputs.verify_sorted_and_unique()?;
		self.kernels.verify_sorted_and_unique()?;
		Ok(())
	}
}
