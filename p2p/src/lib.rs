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

//! Messages exchanged with peers to sync chains, and the handling of the
//! requests a peer sends us.

#![deny(non_upper_case_globals)]
#![deny(non_camel_case_types)]
#![deny(non_snake_case)]
#![deny(unused_mut)]
#![warn(missing_docs)]

#[macro_use]
extern crate enum_primitive;
#[macro_use]
extern crate log;

use gringo_chain as chain;
use gringo_core as core;

mod adapter;
pub mod msg;
mod protocol;
pub mod types;

pub use crate::msg::{Headers, Locator, Type};
pub use crate::protocol::Protocol;
pub use crate::types::{ChainAdapter, Error, MAX_BLOCK_HEADERS, MAX_LOCATORS};
