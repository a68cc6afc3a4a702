// Copyright 2021 The Gringo Developers
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

//! Logging wrapper to be used throughout all crates in the workspace
use crate::types::{LogLevel, LoggingConfig};
use crate::Mutex;

use backtrace::Backtrace;
use std::{panic, thread};

use log::{LevelFilter, Record};
use log4rs::append::console::ConsoleAppender;
use log4rs::append::file::FileAppender;
use log4rs::append::rolling_file::{
	policy::compound::roll::fixed_window::FixedWindowRoller,
	policy::compound::trigger::size::SizeTrigger, policy::compound::CompoundPolicy,
	RollingFileAppender,
};
use log4rs::append::Append;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use log4rs::filter::{threshold::ThresholdFilter, Filter, Response};

lazy_static! {
	/// Whether a logger was installed by one of the init functions
	static ref WAS_INIT: Mutex<bool> = Mutex::new(false);
	/// Configuration in use, the panic hook reads the log file path from it
	static ref LOGGING_CONFIG: Mutex<LoggingConfig> = Mutex::new(LoggingConfig::default());
}

const LOGGING_PATTERN: &str = "{d(%Y%m%d %H:%M:%S%.3f)} {h({l})} {M} - {m}{n}";

/// Only lets through records logged from gringo crates, dependencies
/// stay quiet.
#[derive(Debug)]
struct GringoFilter;

impl Filter for GringoFilter {
	fn filter(&self, record: &Record<'_>) -> Response {
		if let Some(module_path) = record.module_path() {
			if module_path.starts_with("gringo") {
				return Response::Neutral;
			}
		}

		Response::Reject
	}
}

fn file_appender(c: &LoggingConfig) -> Option<Box<dyn Append>> {
	let encoder = Box::new(PatternEncoder::new(LOGGING_PATTERN));
	// If maximum log size is specified, use rolling file appender
	// or use basic one otherwise
	let res: Result<Box<dyn Append>, String> = match c.log_max_size {
		Some(size) => FixedWindowRoller::builder()
			.build(&format!("{}.{{}}.gz", c.log_file_path), c.log_max_files)
			.map_err(|e| e.to_string())
			.and_then(|roller| {
				let trigger = SizeTrigger::new(size);
				let policy = CompoundPolicy::new(Box::new(trigger), Box::new(roller));
				RollingFileAppender::builder()
					.append(c.log_file_append)
					.encoder(encoder)
					.build(&c.log_file_path, Box::new(policy))
					.map(|a| Box::new(a) as Box<dyn Append>)
					.map_err(|e| e.to_string())
			}),
		None => FileAppender::builder()
			.append(c.log_file_append)
			.encoder(encoder)
			.build(&c.log_file_path)
			.map(|a| Box::new(a) as Box<dyn Append>)
			.map_err(|e| e.to_string()),
	};
	match res {
		Ok(appender) => Some(appender),
		Err(e) => {
			eprintln!("Failed to create logfile {}: {}", c.log_file_path, e);
			None
		}
	}
}

fn stdout_appender(level: LevelFilter, encoder: PatternEncoder) -> Appender {
	let stdout = ConsoleAppender::builder().encoder(Box::new(encoder)).build();
	Appender::builder()
		.filter(Box::new(ThresholdFilter::new(level)))
		.filter(Box::new(GringoFilter))
		.build("stdout", Box::new(stdout))
}

fn build_config(c: &LoggingConfig) -> Result<Config, String> {
	let level_stdout: LevelFilter = c.stdout_log_level.into();
	let level_file: LevelFilter = c.file_log_level.into();

	let mut root = Root::builder();
	let mut appenders = vec![];
	let mut level_minimum = LevelFilter::Off;

	if c.log_to_stdout {
		appenders.push(stdout_appender(
			level_stdout,
			PatternEncoder::new(LOGGING_PATTERN),
		));
		root = root.appender("stdout");
		level_minimum = level_minimum.max(level_stdout);
	}

	if c.log_to_file {
		if let Some(file) = file_appender(c) {
			appenders.push(
				Appender::builder()
					.filter(Box::new(ThresholdFilter::new(level_file)))
					.filter(Box::new(GringoFilter))
					.build("file", file),
			);
			root = root.appender("file");
			level_minimum = level_minimum.max(level_file);
		}
	}

	Config::builder()
		.appenders(appenders)
		.build(root.build(level_minimum))
		.map_err(|e| e.to_string())
}

/// Initializes logging from the provided configuration and routes panics
/// to the log. Without a configuration only the panic hook is installed.
pub fn init_logger(config: Option<LoggingConfig>) {
	if let Some(c) = config {
		let mut was_init = WAS_INIT.lock();
		*LOGGING_CONFIG.lock() = c.clone();

		let res = build_config(&c)
			.and_then(|config| log4rs::init_config(config).map_err(|e| e.to_string()));
		if let Err(e) = res {
			eprintln!("Failed to initialize logging: {}", e);
			return;
		}

		info!(
			"log4rs is initialized, file level: {:?}, stdout level: {:?}",
			c.file_log_level, c.stdout_log_level
		);
		*was_init = true;
	}

	send_panic_to_log();
}

/// Initializes debug logging to stdout for tests. Safe to call from every
/// test, only the first call does anything.
pub fn init_test_logger() {
	let mut was_init = WAS_INIT.lock();
	if *was_init {
		return;
	}
	let mut c = LoggingConfig::default();
	c.log_to_file = false;
	c.stdout_log_level = LogLevel::Debug;
	*LOGGING_CONFIG.lock() = c.clone();

	let level: LevelFilter = c.stdout_log_level.into();
	let res = Config::builder()
		.appender(stdout_appender(level, PatternEncoder::default()))
		.build(Root::builder().appender("stdout").build(level));

	// another test harness may already own the global logger
	if let Ok(config) = res {
		let _ = log4rs::init_config(config);
	}
	*was_init = true;
}

/// hook to send panics to logs as well as stderr
fn send_panic_to_log() {
	panic::set_hook(Box::new(|info| {
		let backtrace = Backtrace::new();

		let thread = thread::current();
		let thread = thread.name().unwrap_or("unnamed");

		let msg = match info.payload().downcast_ref::<&'static str>() {
			Some(s) => *s,
			None => match info.payload().downcast_ref::<String>() {
				Some(s) => &**s,
				None => "Box<Any>",
			},
		};

		match info.location() {
			Some(location) => {
				error!(
					"\nthread '{}' panicked at '{}': {}:{}{:?}\n\n",
					thread,
					msg,
					location.file(),
					location.line(),
					backtrace
				);
			}
			None => error!("thread '{}' panicked at '{}'{:?}", thread, msg, backtrace),
		}
		//also print to stderr
		let config = LOGGING_CONFIG.lock();
		eprintln!(
			"Thread '{}' panicked with message:\n\"{}\"\nSee {} for further details.",
			thread, msg, config.log_file_path
		);
	}));
}
