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

use std::sync::Arc;

use crate::core::core::hash::Hash;
use crate::core::core::Block;
use crate::core::ser;
use crate::msg::{Headers, Locator, Type};
use crate::types::{ChainAdapter, Error};

/// Handles the messages a peer sends us, answering requests from our chain.
pub struct Protocol {
	adapter: Arc<dyn ChainAdapter>,
}

impl Protocol {
	/// Protocol answering from the provided chain.
	pub fn new(adapter: Arc<dyn ChainAdapter>) -> Protocol {
		Protocol { adapter }
	}

	/// Handles a message payload of the given type, returning the reply to
	/// send back if there is one.
	pub fn handle(&self, msg_type: Type, payload: &[u8]) -> Result<Option<(Type, Vec<u8>)>, Error> {
		let mut payload = payload;
		match msg_type {
			Type::GetHeaders => {
				let loc: Locator = ser::deserialize(&mut payload)?;
				let headers = self.adapter.locate_headers(&loc.hashes);
				debug!(
					"handle GetHeaders: {} hashes, sending {} headers",
					loc.hashes.len(),
					headers.len()
				);
				let body = ser::ser_vec(&Headers { headers })?;
				Ok(Some((Type::Headers, body)))
			}
			Type::GetBlock => {
				let h: Hash = ser::deserialize(&mut payload)?;
				match self.adapter.get_block(h) {
					Some(b) => Ok(Some((Type::Block, ser::ser_vec(&b)?))),
					None => {
						debug!("handle GetBlock: {} not found", h);
						Ok(None)
					}
				}
			}
			Type::Headers => {
				let headers: Headers = ser::deserialize(&mut payload)?;
				self.adapter.headers_received(&headers.headers)?;
				Ok(None)
			}
			Type::Block => {
				let b: Block = ser::deserialize(&mut payload)?;
				let bhash = b.hash();
				if let Err(e) = self.adapter.block_received(b) {
					warn!("handle Block: refused {}: {}", bhash, e);
					return Err(e.into());
				}
				Ok(None)
			}
		}
	}

	/// Handles a raw message, its type byte followed by the payload. The
	/// reply, if any, is framed the same way.
	pub fn handle_msg(&self, msg: &[u8]) -> Result<Option<Vec<u8>>, Error> {
		let mut msg = msg;
		let msg_type: Type = ser::deserialize(&mut msg)?;
		let reply = self.handle(msg_type, msg)?;
		match reply {
			Some((t, body)) => {
				let mut res = ser::ser_vec(&t)?;
				res.extend(body);
				Ok(Some(res))
			}
			None => Ok(None),
		}
	}
}
