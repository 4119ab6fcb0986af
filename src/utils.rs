/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

use std::collections::hash_map::RandomState;
use std::hash::{BuildHasher, Hash, Hasher};

/// The hasher used by `HashMap`/`HashSet` when the caller does not supply
/// one.
pub type DefaultBuildHasher = RandomState;

#[inline]
pub(crate) fn replace<T>(dest: &mut T, src: T) -> T {
    std::mem::replace(dest, src)
}

#[inline]
pub(crate) fn hash_value<T: ?Sized + Hash, H: BuildHasher>(value: &T, hasher_builder: &H) -> u64 {
    let mut hasher = hasher_builder.build_hasher();
    value.hash(&mut hasher);
    hasher.finish()
}
