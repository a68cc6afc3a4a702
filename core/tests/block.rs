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

use chrono::prelude::{TimeZone, Utc};
use gringo_core::consensus::{MAX_BLOCK_WEIGHT, PROOFSIZE};
use gringo_core::core::hash::{Hash, Hashed};
use gringo_core::core::{Block, BlockHeader, Input, OutputFeatures};
use gringo_core::pow::{Difficulty, Proof};
use gringo_core::ser::{self, Writeable, Writer};
use gringo_util::secp::constants::PEDERSEN_COMMITMENT_SIZE;
use gringo_util::secp::pedersen::Commitment;
use rand::Rng;

fn random_hash() -> Hash {
	let bytes: Vec<u8> = (0..Hash::LEN).map(|_| rand::thread_rng().gen()).collect();
	Hash::from_vec(&bytes)
}

fn test_header() -> BlockHeader {
	BlockHeader {
		height: 7,
		previous: random_hash(),
		timestamp: Utc.with_ymd_and_hms(2018, 3, 1, 12, 30, 5).unwrap(),
		difficulty: Difficulty::from_num(3),
		total_difficulty: Difficulty::from_num(99),
		utxo_root: random_hash(),
		nonce: 42,
		pow: Proof::new((1..=PROOFSIZE as u32).collect()),
		..Default::default()
	}
}

fn input(b: u8) -> Input {
	Input::new(
		OutputFeatures::Plain,
		Commitment::from_vec(vec![b; PEDERSEN_COMMITMENT_SIZE]),
	)
}

#[test]
fn header_ser_deser() {
	let header = test_header();
	let vec = ser::ser_vec(&header).unwrap();
	let header2: BlockHeader = ser::deserialize(&mut &vec[..]).unwrap();
	assert_eq!(header2, header);
	assert_eq!(header2.hash(), header.hash());
}

#[test]
fn header_hash_commits_to_pow() {
	let header = test_header();
	let mut other = header.clone();
	other.pow.nonces[0] = 0;
	assert_ne!(header.hash(), other.hash());
}

#[test]
fn truncated_header_is_rejected() {
	let vec = ser::ser_vec(&test_header()).unwrap();
	let res: Result<BlockHeader, _> = ser::deserialize(&mut &vec[..vec.len() - 3]);
	assert!(res.unwrap_err().is_truncation());
}

#[test]
fn block_ser_deser() {
	let block = Block::new(test_header(), vec![input(3), input(1), input(2)], vec![], vec![]);
	assert!(block.validate_read().is_ok());
	let vec = ser::ser_vec(&block).unwrap();
	let block2: Block = ser::deserialize(&mut &vec[..]).unwrap();
	assert_eq!(block2, block);
	assert_eq!(block2.hash(), block.header.hash());
}

#[test]
fn unsorted_block_is_refused() {
	let mut block = Block::new(test_header(), vec![input(1), input(2)], vec![], vec![]);
	block.inputs.reverse();
	assert!(block.validate_read().is_err());

	let vec = ser::ser_vec(&block).unwrap();
	let res: Result<Block, _> = ser::deserialize(&mut &vec[..]);
	assert_eq!(res, Err(ser::Error::SortError));
}

#[test]
fn duplicate_inputs_are_refused() {
	let block = Block::new(test_header(), vec![input(1), input(1)], vec![], vec![]);
	assert!(block.validate_read().is_err());
}

struct HeaderOnly<'a>(&'a BlockHeader, u64);

impl<'a> Writeable for HeaderOnly<'a> {
	fn write<W: Writer>(&self, writer: &mut W) -> Result<(), ser::Error> {
		self.0.write(writer)?;
		writer.write_u64(self.1)?;
		writer.write_u64(0)?;
		writer.write_u64(0)
	}
}

#[test]
fn overweight_block_is_refused_before_reading_body() {
	let header = test_header();
	let vec = ser::ser_vec(&HeaderOnly(&header, MAX_BLOCK_WEIGHT as u64 + 1)).unwrap();
	let res: Result<Block, _> = ser::deserialize(&mut &vec[..]);
	assert_eq!(res, Err(ser::Error::TooLargeReadErr));
}
