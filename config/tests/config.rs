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

use gringo_config::{ConfigError, GlobalConfig};
use gringo_core::genesis;
use gringo_core::global::ChainTypes;
use gringo_util::LogLevel;
use pretty_assertions::assert_eq;
use std::fs;

fn scratch_file(name: &str) -> String {
	let dir = format!("target/tmp/config_{}", name);
	let _ = fs::remove_dir_all(&dir);
	fs::create_dir_all(&dir).unwrap();
	format!("{}/gringo.toml", dir)
}

fn clean(path: &str) {
	if let Some(dir) = std::path::Path::new(path).parent() {
		let _ = fs::remove_dir_all(dir);
	}
}

#[test]
fn file_config_equal_to_defaults() {
	let path = scratch_file("defaults");
	let global_config_without_file = GlobalConfig::default();
	global_config_without_file.write_to_file(&path).unwrap();

	let global_config_with_file = GlobalConfig::new(&path).unwrap();
	assert_eq!(
		global_config_without_file.members,
		global_config_with_file.members
	);
	assert_eq!(global_config_with_file.chain_type(), ChainTypes::Mainnet);
	clean(&path);
}

#[test]
fn written_config_is_commented() {
	let config = GlobalConfig::for_chain(ChainTypes::Testnet2);
	let raw = config.ser_config().unwrap();
	assert!(raw.contains("chain_type = \"Testnet2\""));

	let path = scratch_file("comments");
	config.write_to_file(&path).unwrap();
	let written = fs::read_to_string(&path).unwrap();
	assert!(written.contains("#The chain type"));
	assert_eq!(GlobalConfig::new(&path).unwrap().chain_type(), ChainTypes::Testnet2);
	clean(&path);
}

#[test]
fn partial_config_uses_defaults() {
	let path = scratch_file("partial");
	fs::write(
		&path,
		"[chain]\nchain_type = \"Testnet1\"\n\n[logging]\nstdout_log_level = \"Debug\"\n",
	)
	.unwrap();

	let config = GlobalConfig::new(&path).unwrap();
	assert_eq!(config.chain_type(), ChainTypes::Testnet1);
	assert_eq!(config.genesis(), genesis::genesis_testnet1());
	let logging = config.logging().unwrap();
	assert_eq!(logging.stdout_log_level, LogLevel::Debug);
	assert_eq!(logging.log_max_files, 32);

	fs::write(&path, "").unwrap();
	let empty = GlobalConfig::new(&path).unwrap();
	assert_eq!(empty.chain_type(), ChainTypes::Mainnet);
	assert!(empty.logging().is_none());
	clean(&path);
}

#[test]
fn bad_config_files() {
	match GlobalConfig::new("target/tmp/does/not/exist.toml") {
		Err(ConfigError::FileNotFoundError(_)) => {}
		other => panic!("unexpected {:?}", other),
	}

	let path = scratch_file("broken");
	fs::write(&path, "[chain]\nchain_type = \"Floonet\"\n").unwrap();
	match GlobalConfig::new(&path) {
		Err(ConfigError::ParseError(p, _)) => assert_eq!(p, path),
		other => panic!("unexpected {:?}", other),
	}
	clean(&path);
}
