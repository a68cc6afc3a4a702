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

//! Public types for config modules

use std::io;
use std::path::PathBuf;

use crate::core::global::ChainTypes;
use crate::util::LoggingConfig;

/// Error type wrapping config errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	/// Config file isn't valid TOML for our sections
	#[error("Error parsing configuration file at {0} - {1}")]
	ParseError(String, String),

	/// Reading or writing the config file failed
	#[error("Config file IO error: {0}")]
	FileIOError(String),

	/// Config file doesn't exist
	#[error("Configuration file not found: {0}")]
	FileNotFoundError(String),

	/// Config couldn't be turned into TOML
	#[error("Error serializing configuration: {0}")]
	SerializationError(String),
}

impl From<io::Error> for ConfigError {
	fn from(error: io::Error) -> ConfigError {
		ConfigError::FileIOError(error.to_string())
	}
}

/// Chain related configuration.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct ChainConfig {
	/// The network to run on, defines the genesis block
	#[serde(default)]
	pub chain_type: ChainTypes,
}

/// Configuration of a node, along with the file it was read from.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct GlobalConfig {
	/// File the configuration was loaded from, if any
	pub config_file_path: Option<PathBuf>,
	/// Loaded sections, `None` until something was loaded or defaulted
	pub members: Option<ConfigMembers>,
}

/// The sections of the config file, one field per `[section]`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ConfigMembers {
	/// Chain config
	#[serde(default)]
	pub chain: ChainConfig,
	/// Logging config
	pub logging: Option<LoggingConfig>,
}
