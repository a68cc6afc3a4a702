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

//! Comments for configuration + injection into output .toml
use std::collections::HashMap;

/// maps entries to Comments that should precede them
fn comments() -> HashMap<String, String> {
	let mut retval = HashMap::new();
	retval.insert(
		"[chain]".to_string(),
		"
# Generated Configuration File for gringo

#########################################
### CHAIN CONFIGURATION               ###
#########################################
"
		.to_string(),
	);

	retval.insert(
		"chain_type".to_string(),
		"
#The chain type, which defines the genesis block. Can be:
#Testnet1 - first test network
#Testnet2 - second test network
#Mainnet - production network
"
		.to_string(),
	);

	retval.insert(
		"[logging]".to_string(),
		"
#########################################
### LOGGING CONFIGURATION             ###
#########################################
"
		.to_string(),
	);

	retval.insert(
		"stdout_log_level".to_string(),
		"
#Log level for stdout: Error, Warning, Info, Debug, Trace
"
		.to_string(),
	);

	retval.insert(
		"log_max_size".to_string(),
		"
#maximum log file size in bytes before performing log rotation
#comment it to disable log rotation
"
		.to_string(),
	);

	retval
}

fn get_key(line: &str) -> String {
	if line.contains('[') && line.contains(']') {
		line.trim().to_owned()
	} else if line.contains('=') {
		line.split('=').next().unwrap_or("").trim().to_owned()
	} else {
		"NOT_FOUND".to_owned()
	}
}

/// Inserts the comments of the known keys before them.
pub fn insert_comments(orig: String) -> String {
	let comments = comments();
	let mut ret_val = String::new();
	for l in orig.split('\n') {
		if let Some(v) = comments.get(&get_key(l)) {
			ret_val.push_str(v);
		}
		ret_val.push_str(l);
		ret_val.push('\n');
	}
	ret_val
}
