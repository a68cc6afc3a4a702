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

//! Hash Function
//!
//! Primary hash function used in the protocol
//!

use std::cmp::min;
use std::convert::AsRef;
use std::{fmt, ops};

use blake2_rfc::blake2b::Blake2b;

use crate::consensus::BLOCK_HASH_SIZE;
use crate::ser::{self, Readable, Reader, SerializationMode, Writeable, Writer};
use crate::util;

/// A hash consisting of all zeroes, used as a sentinel. No known preimage.
pub const ZERO_HASH: Hash = Hash([0; BLOCK_HASH_SIZE]);

/// A hash to uniquely (or close enough) identify one of the main blockchain
/// constructs. Used pervasively for blocks, transactions and outputs.
#[derive(Copy, Clone, PartialEq, PartialOrd, Eq, Ord, Hash, Serialize, Deserialize)]
pub struct Hash([u8; BLOCK_HASH_SIZE]);

impl DefaultHashable for Hash {}

impl fmt::Debug for Hash {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.to_hex())
	}
}

impl fmt::Display for Hash {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let hash_hex = self.to_hex();
		write!(f, "{}", &hash_hex[..12])
	}
}

impl Hash {
	/// Size of a hash in bytes.
	pub const LEN: usize = BLOCK_HASH_SIZE;

	/// Builds a Hash from a byte array.
	pub const fn from_bytes(bytes: [u8; BLOCK_HASH_SIZE]) -> Hash {
		Hash(bytes)
	}

	/// Builds a Hash from a byte vector. If the vector is too short, it will be
	/// completed by zeroes. If it's too long, it will be truncated.
	pub fn from_vec(v: &[u8]) -> Hash {
		let mut h = [0; Hash::LEN];
		let copy_size = min(v.len(), Hash::LEN);
		h[..copy_size].copy_from_slice(&v[..copy_size]);
		Hash(h)
	}

	/// Converts the hash to a byte vector
	pub fn to_vec(&self) -> Vec<u8> {
		self.0.to_vec()
	}

	/// Returns a byte slice of the hash contents.
	pub fn as_bytes(&self) -> &[u8] {
		&self.0
	}

	/// Convert a hash to hex string format.
	pub fn to_hex(&self) -> String {
		util::to_hex(&self.0)
	}

	/// Convert hex string back to hash.
	pub fn from_hex(hex: &str) -> Result<Hash, Error> {
		let bytes = util::from_hex(hex).map_err(|_| Error::HexError(hex.to_string()))?;
		if bytes.len() != Hash::LEN {
			return Err(Error::HexError(hex.to_string()));
		}
		Ok(Hash::from_vec(&bytes))
	}
}

/// Errors building a hash from its textual form
#[derive(Clone, Eq, PartialEq, Debug, thiserror::Error)]
pub enum Error {
	/// Not a 32 bytes hex string
	#[error("invalid hash hex: {0}")]
	HexError(String),
}

impl ops::Index<usize> for Hash {
	type Output = u8;

	fn index(&self, idx: usize) -> &u8 {
		&self.0[idx]
	}
}

impl ops::Index<ops::Range<usize>> for Hash {
	type Output = [u8];

	fn index(&self, idx: ops::Range<usize>) -> &[u8] {
		&self.0[idx]
	}
}

impl AsRef<[u8]> for Hash {
	fn as_ref(&self) -> &[u8] {
		&self.0
	}
}

impl Readable for Hash {
	fn read<R: Reader>(reader: &mut R) -> Result<Hash, ser::Error> {
		let v = reader.read_fixed_bytes(Hash::LEN)?;
		Ok(Hash::from_vec(&v))
	}
}

impl Writeable for Hash {
	fn write<W: Writer>(&self, writer: &mut W) -> Result<(), ser::Error> {
		writer.write_fixed_bytes(&self.0)
	}
}

/// Serializer that outputs a hash of the serialized object
pub struct HashWriter {
	state: Blake2b,
}

impl HashWriter {
	/// Consume the `HashWriter`, outputting its current hash into a 32-byte
	/// array
	pub fn finalize(self, output: &mut [u8]) {
		output.copy_from_slice(self.state.finalize().as_bytes());
	}

	/// Consume the `HashWriter`, outputting a `Hash` corresponding to its
	/// current state
	pub fn into_hash(self) -> Hash {
		let mut res = [0; Hash::LEN];
		res.copy_from_slice(self.state.finalize().as_bytes());
		Hash(res)
	}
}

impl Default for HashWriter {
	fn default() -> HashWriter {
		HashWriter {
			state: Blake2b::new(Hash::LEN),
		}
	}
}

impl Writer for HashWriter {
	fn serialization_mode(&self) -> SerializationMode {
		SerializationMode::Hash
	}

	fn write_fixed_bytes<T: AsRef<[u8]>>(&mut self, bytes: T) -> Result<(), ser::Error> {
		self.state.update(bytes.as_ref());
		Ok(())
	}
}

/// A trait for types that have a canonical hash
pub trait Hashed {
	/// Obtain the hash of the object
	fn hash(&self) -> Hash;
}

/// Implementing this trait enables the default
/// hash implementation
pub trait DefaultHashable: Writeable {}

impl<D: DefaultHashable> Hashed for D {
	fn hash(&self) -> Hash {
		let mut hasher = HashWriter::default();
		if let Err(e) = Writeable::write(self, &mut hasher) {
			// hashing only writes into memory, any error is a broken Writeable
			panic!("failed to hash a writeable: {}", e);
		}
		hasher.into_hash()
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn hex_round_trip() {
		let h = Hash::from_vec(&[0xab; 32]);
		let hex = h.to_hex();
		assert_eq!(hex.len(), 64);
		assert_eq!(Hash::from_hex(&hex).unwrap(), h);
		assert_eq!(format!("{}", h), "abababababab");
	}

	#[test]
	fn from_hex_rejects_wrong_length() {
		assert!(Hash::from_hex("abcd").is_err());
		assert!(Hash::from_hex("not hex").is_err());
	}

	#[test]
	fn from_vec_pads_and_truncates() {
		let short = Hash::from_vec(&[1, 2]);
		assert_eq!(short[0], 1);
		assert_eq!(short[1], 2);
		assert_eq!(&short[2..32], &[0; 30][..]);
		let long = Hash::from_vec(&[9; 40]);
		assert_eq!(long.as_bytes(), &[9; 32][..]);
	}

	#[test]
	fn hashing_is_deterministic() {
		let a = Hash::from_vec(&[1; 32]);
		let b = Hash::from_vec(&[2; 32]);
		assert_eq!(a.hash(), a.hash());
		assert_ne!(a.hash(), b.hash());
		assert_ne!(a.hash(), a);
	}
}
