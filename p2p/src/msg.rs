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

//! Message types that transit over the network and related serialization code.

use enum_primitive::FromPrimitive;

use crate::core::consensus::MAX_BLOCK_HEADERS;
use crate::core::core::hash::Hash;
use crate::core::core::BlockHeader;
use crate::core::ser::{self, Readable, Reader, Writeable, Writer};

enum_from_primitive! {
	/// Types of messages
	#[derive(Debug, Clone, Copy, PartialEq, Eq)]
	pub enum Type {
		/// Asks for the headers following a locator
		GetHeaders = 1,
		/// Headers answering a locator
		Headers = 2,
		/// Asks for a full block by hash
		GetBlock = 3,
		/// A full block
		Block = 4
	}
}

impl Writeable for Type {
	fn write<W: Writer>(&self, writer: &mut W) -> Result<(), ser::Error> {
		writer.write_u8(*self as u8)
	}
}

impl Readable for Type {
	fn read<R: Reader>(reader: &mut R) -> Result<Type, ser::Error> {
		let t = reader.read_u8()?;
		Type::from_u8(t).ok_or(ser::Error::CorruptedData)
	}
}

/// Serializable wrapper for a list of block hashes, most recent first, sent
/// to find the most recent block two chains have in common.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locator {
	/// Candidate ancestor hashes
	pub hashes: Vec<Hash>,
}

impl Writeable for Locator {
	fn write<W: Writer>(&self, writer: &mut W) -> Result<(), ser::Error> {
		if self.hashes.len() > u8::MAX as usize {
			return Err(ser::Error::TooLargeWriteErr);
		}
		writer.write_u8(self.hashes.len() as u8)?;
		for h in &self.hashes {
			h.write(writer)?
		}
		Ok(())
	}
}

impl Readable for Locator {
	fn read<R: Reader>(reader: &mut R) -> Result<Locator, ser::Error> {
		let len = reader.read_u8()?;
		let mut hashes = Vec::with_capacity(len as usize);
		for _ in 0..len {
			hashes.push(Hash::read(reader)?);
		}
		Ok(Locator { hashes })
	}
}

/// Serializable wrapper for a list of block headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Headers {
	/// Actual headers
	pub headers: Vec<BlockHeader>,
}

impl Writeable for Headers {
	fn write<W: Writer>(&self, writer: &mut W) -> Result<(), ser::Error> {
		if self.headers.len() > MAX_BLOCK_HEADERS {
			return Err(ser::Error::TooLargeWriteErr);
		}
		writer.write_u16(self.headers.len() as u16)?;
		for h in &self.headers {
			h.write(writer)?
		}
		Ok(())
	}
}

impl Readable for Headers {
	fn read<R: Reader>(reader: &mut R) -> Result<Headers, ser::Error> {
		let len = reader.read_u16()? as usize;
		if len > MAX_BLOCK_HEADERS {
			return Err(ser::Error::TooLargeReadErr);
		}
		let mut headers = Vec::with_capacity(len);
		for _ in 0..len {
			headers.push(BlockHeader::read(reader)?);
		}
		Ok(Headers { headers })
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn type_byte() {
		let vec = ser::ser_vec(&Type::GetBlock).unwrap();
		assert_eq!(vec, vec![3]);
		let t: Type = ser::deserialize(&mut &vec[..]).unwrap();
		assert_eq!(t, Type::GetBlock);
		let bad: Result<Type, _> = ser::deserialize(&mut &[0u8][..]);
		assert_eq!(bad, Err(ser::Error::CorruptedData));
	}

	#[test]
	fn too_many_headers_refused() {
		let mut vec = vec![];
		vec.extend_from_slice(&((MAX_BLOCK_HEADERS + 1) as u16).to_be_bytes());
		let res: Result<Headers, _> = ser::deserialize(&mut &vec[..]);
		assert_eq!(res, Err(ser::Error::TooLargeReadErr));
	}
}
