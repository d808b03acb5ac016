//! Tree tables: filtering and cascading checkbox selection over flat lists.

mod selection;

pub use selection::{CheckedSet, FilteredRow, TableNode, TableOptions, TableRow, TreeTable};
