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

//! Configuration file management

use std::fs::{self, File};
use std::io::prelude::*;
use std::path::PathBuf;

use crate::comments::insert_comments;
use crate::core::core::Block;
use crate::core::genesis;
use crate::core::global::ChainTypes;
use crate::types::{ChainConfig, ConfigError, ConfigMembers, GlobalConfig};
use crate::util::LoggingConfig;

/// Returns the defaults, as strewn throughout the code
impl Default for ConfigMembers {
	fn default() -> ConfigMembers {
		ConfigMembers {
			chain: ChainConfig::default(),
			logging: Some(LoggingConfig::default()),
		}
	}
}

impl Default for GlobalConfig {
	fn default() -> GlobalConfig {
		GlobalConfig {
			config_file_path: None,
			members: Some(ConfigMembers::default()),
		}
	}
}

impl GlobalConfig {
	/// Default configuration running on the given network.
	pub fn for_chain(chain_type: ChainTypes) -> GlobalConfig {
		let mut defaults = ConfigMembers::default();
		defaults.chain.chain_type = chain_type;
		GlobalConfig {
			config_file_path: None,
			members: Some(defaults),
		}
	}

	/// Requires the path to a config file
	pub fn new(file_path: &str) -> Result<GlobalConfig, ConfigError> {
		let config_file = PathBuf::from(file_path);
		if !config_file.exists() {
			return Err(ConfigError::FileNotFoundError(file_path.to_owned()));
		}

		let contents = fs::read_to_string(&config_file)?;
		let members: ConfigMembers = toml::from_str(&contents)
			.map_err(|e| ConfigError::ParseError(file_path.to_owned(), format!("{}", e)))?;

		Ok(GlobalConfig {
			config_file_path: Some(config_file),
			members: Some(members),
		})
	}

	/// Serialize config
	pub fn ser_config(&self) -> Result<String, ConfigError> {
		let members = self
			.members
			.as_ref()
			.ok_or_else(|| ConfigError::SerializationError("no configuration".to_owned()))?;
		toml::to_string(members).map_err(|e| ConfigError::SerializationError(format!("{}", e)))
	}

	/// Write configuration to a file
	pub fn write_to_file(&self, name: &str) -> Result<(), ConfigError> {
		let conf_out = insert_comments(self.ser_config()?);
		let mut file = File::create(name)?;
		file.write_all(conf_out.as_bytes())?;
		Ok(())
	}

	/// The network configured, mainnet when nothing is.
	pub fn chain_type(&self) -> ChainTypes {
		self.members
			.as_ref()
			.map(|m| m.chain.chain_type)
			.unwrap_or_default()
	}

	/// Logging configuration, if any.
	pub fn logging(&self) -> Option<LoggingConfig> {
		self.members.as_ref().and_then(|m| m.logging.clone())
	}

	/// Genesis block of the configured network.
	pub fn genesis(&self) -> Block {
		genesis::genesis_for(self.chain_type())
	}
}
