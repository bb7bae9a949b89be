use tracing::Level;

use crate::Entry;

/// Enriches log entries before they are emitted.
///
/// Hooks are shared by every thread logging through the same
/// [`Logger`](crate::Logger), so `fire` only gets `&self`.
pub trait Hook: Send + Sync {
    /// The levels this hook fires for.
    fn levels(&self) -> &[Level];

    fn fire(&self, entry: &mut Entry) -> errstack::Result<()>;
}
