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

//! Transaction body elements carried by a block: inputs, outputs and
//! kernels. Only their data and wire format live here, verifying the
//! commitments, range proofs and signatures they hold is done elsewhere.

use std::cmp::Ordering;
use std::convert::TryFrom;
use std::fmt;

use crate::core::hash::{DefaultHashable, Hashed};
use crate::ser::{self, Readable, Reader, Writeable, Writer};
use crate::util::secp::constants::{COMPACT_SIGNATURE_SIZE, MAX_PROOF_SIZE, PEDERSEN_COMMITMENT_SIZE};
use crate::util::secp::pedersen::{Commitment, RangeProof};
use crate::util::secp::Signature;

/// Orders body elements by their hash, the canonical order on the wire.
macro_rules! hash_ordered {
	($t:ty) => {
		impl PartialOrd for $t {
			fn partial_cmp(&self, other: &$t) -> Option<Ordering> {
				Some(self.cmp(other))
			}
		}

		impl Ord for $t {
			fn cmp(&self, other: &$t) -> Ordering {
				self.hash().cmp(&other.hash())
			}
		}
	};
}

/// Various flavors of tx outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum OutputFeatures {
	/// Plain output (the default for Grin txs).
	Plain = 0,
	/// A coinbase output.
	Coinbase = 1,
}

impl Default for OutputFeatures {
	fn default() -> OutputFeatures {
		OutputFeatures::Plain
	}
}

impl TryFrom<u8> for OutputFeatures {
	type Error = ser::Error;

	fn try_from(b: u8) -> Result<OutputFeatures, ser::Error> {
		match b {
			0 => Ok(OutputFeatures::Plain),
			1 => Ok(OutputFeatures::Coinbase),
			_ => Err(ser::Error::CorruptedData),
		}
	}
}

/// Various flavors of tx kernels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum KernelFeatures {
	/// Plain kernel (the default for Grin txs).
	Plain = 0,
	/// A coinbase kernel.
	Coinbase = 1,
	/// A kernel with an explicit lock height.
	HeightLocked = 2,
}

impl Default for KernelFeatures {
	fn default() -> KernelFeatures {
		KernelFeatures::Plain
	}
}

impl TryFrom<u8> for KernelFeatures {
	type Error = ser::Error;

	fn try_from(b: u8) -> Result<KernelFeatures, ser::Error> {
		match b {
			0 => Ok(KernelFeatures::Plain),
			1 => Ok(KernelFeatures::Coinbase),
			2 => Ok(KernelFeatures::HeightLocked),
			_ => Err(ser::Error::CorruptedData),
		}
	}
}

fn write_commitment<W: Writer>(writer: &mut W, commit: &Commitment) -> Result<(), ser::Error> {
	writer.write_fixed_bytes(&commit.0[..])
}

fn read_commitment<R: Reader>(reader: &mut R) -> Result<Commitment, ser::Error> {
	let bytes = reader.read_fixed_bytes(PEDERSEN_COMMITMENT_SIZE)?;
	Ok(Commitment::from_vec(bytes))
}

/// A transaction input, spending a previous output identified by its
/// commitment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Input {
	/// Features of the output being spent.
	pub features: OutputFeatures,
	/// The commitment of the output being spent.
	pub commit: Commitment,
}

impl DefaultHashable for Input {}
hash_ordered!(Input);

impl Input {
	/// Builds an input spending the output with the given commitment.
	pub fn new(features: OutputFeatures, commit: Commitment) -> Input {
		Input { features, commit }
	}

	/// The commitment of the spent output.
	pub fn commitment(&self) -> Commitment {
		self.commit
	}
}

impl Writeable for Input {
	fn write<W: Writer>(&self, writer: &mut W) -> Result<(), ser::Error> {
		writer.write_u8(self.features as u8)?;
		write_commitment(writer, &self.commit)
	}
}

impl Readable for Input {
	fn read<R: Reader>(reader: &mut R) -> Result<Input, ser::Error> {
		let features = OutputFeatures::try_from(reader.read_u8()?)?;
		let commit = read_commitment(reader)?;
		Ok(Input { features, commit })
	}
}

/// Output for a transaction, defining the new ownership of coins that are
/// being transferred. The commitment hides the amount, the range proof
/// proves it is positive without revealing it.
#[derive(Clone)]
pub struct Output {
	/// Options for an output's structure or use
	pub features: OutputFeatures,
	/// The homomorphic commitment representing the output amount
	pub commit: Commitment,
	/// A proof that the commitment is in the right range
	pub proof: RangeProof,
}

impl DefaultHashable for Output {}
hash_ordered!(Output);

impl PartialEq for Output {
	fn eq(&self, other: &Output) -> bool {
		self.features == other.features
			&& self.commit == other.commit
			&& self.proof.bytes() == other.proof.bytes()
	}
}

impl Eq for Output {}

impl fmt::Debug for Output {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Output")
			.field("features", &self.features)
			.field("commit", &self.commit)
			.field("proof_len", &self.proof.plen)
			.finish()
	}
}

impl Output {
	/// Commitment for the output
	pub fn commitment(&self) -> Commitment {
		self.commit
	}

	/// Range proof for the output
	pub fn proof_bytes(&self) -> &[u8] {
		self.proof.bytes()
	}
}

impl Writeable for Output {
	fn write<W: Writer>(&self, writer: &mut W) -> Result<(), ser::Error> {
		writer.write_u8(self.features as u8)?;
		write_commitment(writer, &self.commit)?;
		writer.write_bytes(self.proof.bytes())
	}
}

impl Readable for Output {
	fn read<R: Reader>(reader: &mut R) -> Result<Output, ser::Error> {
		let features = OutputFeatures::try_from(reader.read_u8()?)?;
		let commit = read_commitment(reader)?;
		let bytes = reader.read_bytes_len_prefix()?;
		if bytes.len() > MAX_PROOF_SIZE {
			return Err(ser::Error::TooLargeReadErr);
		}
		let mut proof = [0; MAX_PROOF_SIZE];
		proof[..bytes.len()].copy_from_slice(&bytes);
		Ok(Output {
			features,
			commit,
			proof: RangeProof {
				proof,
				plen: bytes.len(),
			},
		})
	}
}

/// A proof that a transaction sums to zero. Includes both the transaction's
/// Pedersen commitment and the signature, that guarantees that the commitments
/// amount to zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxKernel {
	/// Options for a kernel's structure or use
	pub features: KernelFeatures,
	/// Fee originally included in the transaction this proof is for.
	pub fee: u64,
	/// This kernel is not valid earlier than lock_height blocks
	pub lock_height: u64,
	/// Remainder of the sum of all transaction commitments. If the transaction
	/// is well formed, amounts components should sum to zero and the excess
	/// is hence a valid public key.
	pub excess: Commitment,
	/// The signature proving the excess is a valid public key, which signs
	/// the transaction fee.
	pub excess_sig: Signature,
}

impl DefaultHashable for TxKernel {}
hash_ordered!(TxKernel);

impl Writeable for TxKernel {
	fn write<W: Writer>(&self, writer: &mut W) -> Result<(), ser::Error> {
		ser_multiwrite!(
			writer,
			[write_u8, self.features as u8],
			[write_u64, self.fee],
			[write_u64, self.lock_height]
		);
		write_commitment(writer, &self.excess)?;
		writer.write_fixed_bytes(&self.excess_sig.to_raw_data()[..])
	}
}

impl Readable for TxKernel {
	fn read<R: Reader>(reader: &mut R) -> Result<TxKernel, ser::Error> {
		let features = KernelFeatures::try_from(reader.read_u8()?)?;
		let (fee, lock_height) = ser_multiread!(reader, read_u64, read_u64);
		let excess = read_commitment(reader)?;
		let sig_bytes = reader.read_fixed_bytes(COMPACT_SIGNATURE_SIZE)?;
		let mut raw = [0; COMPACT_SIGNATURE_SIZE];
		raw.copy_from_slice(&sig_bytes);
		let excess_sig = Signature::from_raw_data(&raw).map_err(|_| ser::Error::CorruptedData)?;
		Ok(TxKernel {
			features,
			fee,
			lock_height,
			excess,
			excess_sig,
		})
	}
}
