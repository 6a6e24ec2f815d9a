// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Two-level directory listing (e.g., property-set library groups and files)

use crate::Result;

/// Lists groups and the leaves inside each group
///
/// Backs the group/leaf half of the cascading selector. Listing may block on
/// the filesystem; callers treat it as an ordinary call.
pub trait DirectoryListing: Send + Sync {
    /// All group names, in a stable order
    fn list_groups(&self) -> Result<Vec<String>>;

    /// Leaf names inside `group`, in a stable order
    fn list_leaves(&self, group: &str) -> Result<Vec<String>>;
}
