// Copyright 2019 The Gringo Developers
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

//! Logging configuration types

use log::LevelFilter;

/// Verbosity of a log destination, as written in config files.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub enum LogLevel {
	/// Errors only
	Error,
	/// Errors and warnings
	Warning,
	/// Info and above
	Info,
	/// Debug and above
	Debug,
	/// Everything
	Trace,
}

impl From<LogLevel> for LevelFilter {
	fn from(level: LogLevel) -> LevelFilter {
		match level {
			LogLevel::Error => LevelFilter::Error,
			LogLevel::Warning => LevelFilter::Warn,
			LogLevel::Info => LevelFilter::Info,
			LogLevel::Debug => LevelFilter::Debug,
			LogLevel::Trace => LevelFilter::Trace,
		}
	}
}

/// Where and how much gringo logs. Keys missing from a config file take
/// their value from `LoggingConfig::default()`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
	/// Log to stdout
	pub log_to_stdout: bool,
	/// Threshold for stdout
	pub stdout_log_level: LogLevel,
	/// Log to a file
	pub log_to_file: bool,
	/// Threshold for the log file
	pub file_log_level: LogLevel,
	/// Path of the log file
	pub log_file_path: String,
	/// Append to an existing log file instead of truncating it
	pub log_file_append: bool,
	/// Size in bytes after which the file is rotated, no rotation if unset
	pub log_max_size: Option<u64>,
	/// How many rotated files are kept
	pub log_max_files: u32,
}

impl Default for LoggingConfig {
	fn default() -> LoggingConfig {
		LoggingConfig {
			log_to_stdout: true,
			stdout_log_level: LogLevel::Warning,
			log_to_file: true,
			file_log_level: LogLevel::Info,
			log_file_path: "gringo.log".to_owned(),
			log_file_append: true,
			// 16MB
			log_max_size: Some(16 * 1024 * 1024),
			log_max_files: 32,
		}
	}
}
