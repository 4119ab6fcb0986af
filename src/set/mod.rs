/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

pub mod hash_set;
pub mod tree_set;

pub use hash_set::{HashSet, HashSetSync};
pub use tree_set::{TreeSet, TreeSetSync};
