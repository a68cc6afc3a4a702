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

//! Macros shortening the serialization code of the format types.

/// Reads several values in a row from a `Reader`, bailing out on the first
/// error, and returns them as a tuple:
///   let (version, height) = ser_multiread!(reader, read_u16, read_u64);
#[macro_export]
macro_rules! ser_multiread {
	($rdr:ident, $($read_call:ident $(($val:expr)),*),*) => {
		( $($rdr.$read_call($($val),*)?),* )
	}
}

/// Writes several values in a row to a `Writer`, bailing out on the first
/// error:
///   ser_multiwrite!(writer, [write_u16, self.version], [write_u64, self.height]);
#[macro_export]
macro_rules! ser_multiwrite {
	($wrtr:ident, $([ $write_call:ident, $val:expr ]),* ) => {
		$( $wrtr.$write_call($val)? );*
	}
}
