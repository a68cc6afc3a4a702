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

/// Implements hex-encoding from bytes to string and decoding of strings
/// to bytes. Simple enough that we can just have our own.
use std::fmt::Write;

/// Encode the provided bytes into a hex string
pub fn to_hex(bytes: &[u8]) -> String {
	let mut s = String::with_capacity(bytes.len() * 2);
	for byte in bytes {
		write!(&mut s, "{:02x}", byte).expect("writing to a String cannot fail");
	}
	s
}

/// Decode a hex string into bytes, an optional "0x" prefix is accepted.
pub fn from_hex(hex_str: &str) -> Result<Vec<u8>, String> {
	let hex_trim = hex_str.trim();
	let hex_trim = hex_trim.strip_prefix("0x").unwrap_or(hex_trim);
	if hex_trim.len() % 2 == 1 {
		return Err(format!("odd length hex string: {}", hex_str));
	}
	(0..hex_trim.len())
		.step_by(2)
		.map(|i| {
			hex_trim
				.get(i..i + 2)
				.and_then(|b| u8::from_str_radix(b, 16).ok())
				.ok_or_else(|| format!("invalid hex string: {}", hex_str))
		})
		.collect()
}
