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

//! Values that should be shared across all modules, without necessarily
//! having to pass them all over the place, but aren't consensus values.
//! Mostly the network a node runs on.

use std::fmt;
use std::str::FromStr;

/// Types of chain a server can run with, dictates the genesis block and
/// the peers a node would ever talk to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ChainTypes {
	/// First test network
	Testnet1,
	/// Second test network
	Testnet2,
	/// Main production network
	Mainnet,
}

impl ChainTypes {
	/// Short name representing the chain type ("test1", "test2", "main")
	pub fn shortname(&self) -> String {
		match *self {
			ChainTypes::Testnet1 => "test1".to_owned(),
			ChainTypes::Testnet2 => "test2".to_owned(),
			ChainTypes::Mainnet => "main".to_owned(),
		}
	}

	/// Every known network, test networks first.
	pub fn all() -> [ChainTypes; 3] {
		[ChainTypes::Testnet1, ChainTypes::Testnet2, ChainTypes::Mainnet]
	}
}

impl Default for ChainTypes {
	fn default() -> ChainTypes {
		ChainTypes::Mainnet
	}
}

impl fmt::Display for ChainTypes {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.shortname())
	}
}

impl FromStr for ChainTypes {
	type Err = String;

	fn from_str(s: &str) -> Result<ChainTypes, String> {
		match s.to_lowercase().as_str() {
			"test1" | "testnet1" => Ok(ChainTypes::Testnet1),
			"test2" | "testnet2" => Ok(ChainTypes::Testnet2),
			"main" | "mainnet" => Ok(ChainTypes::Mainnet),
			_ => Err(format!("unknown chain type: {}", s)),
		}
	}
}
