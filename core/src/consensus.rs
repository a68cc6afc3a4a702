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

//! All the rules required for a cryptocurrency to have reach consensus across
//! the whole network are complex and hard to completely isolate. Some can be
//! simple parameters, others complex algorithms. However, as long as they're
//! simple enough, consensus-relevant constants and short functions should be
//! kept here.

/// Size in bytes of a block hash
pub const BLOCK_HASH_SIZE: usize = 32;

/// Current block header version, the only one we accept
pub const HEADER_VERSION: u16 = 1;

/// Block interval, in seconds, the network will tune its next_target for.
pub const BLOCK_TIME_SEC: u64 = 60;

/// Refuse blocks more than 12 block intervals in the future.
pub const FTL_SEC: i64 = 12 * BLOCK_TIME_SEC as i64;

/// Cuckoo-cycle proof size (cycle length)
pub const PROOFSIZE: usize = 42;

/// Maximum number of hashes in a block header locator request. Longer
/// locators get truncated before being matched against the chain.
pub const MAX_LOCATORS: usize = 20;

/// Maximum number of block headers a peer should ever send in response to
/// a single locator request.
pub const MAX_BLOCK_HEADERS: usize = 512;

/// Weight of an input when counted against the max block weight capacity
pub const BLOCK_INPUT_WEIGHT: usize = 1;

/// Weight of an output when counted against the max block weight capacity
pub const BLOCK_OUTPUT_WEIGHT: usize = 21;

/// Weight of a kernel when counted against the max block weight capacity
pub const BLOCK_KERNEL_WEIGHT: usize = 3;

/// Total maximum block weight.
pub const MAX_BLOCK_WEIGHT: usize = 40_000;

/// Total weight of a body with the given number of inputs, outputs and kernels.
pub fn body_weight(num_inputs: usize, num_outputs: usize, num_kernels: usize) -> usize {
	num_inputs
		.saturating_mul(BLOCK_INPUT_WEIGHT)
		.saturating_add(num_outputs.saturating_mul(BLOCK_OUTPUT_WEIGHT))
		.saturating_add(num_kernels.saturating_mul(BLOCK_KERNEL_WEIGHT))
}

/// Whether a body of the given shape is too heavy to fit in a block.
pub fn exceeds_weight(num_inputs: usize, num_outputs: usize, num_kernels: usize) -> bool {
	body_weight(num_inputs, num_outputs, num_kernels) > MAX_BLOCK_WEIGHT
}
