use std::path::Path;
use std::sync::Arc;

use tokio::sync::RwLock;

/// Cheaply cloneable, immutable string shared between actors.
///
/// Actor messages move owned values across task boundaries, so string
/// payloads use `Arc<str>` instead of `String` to make cloning a pointer
/// copy.
pub type ArcStr = Arc<str>;

/// Cheaply cloneable, immutable filesystem path shared between actors.
pub type ArcPath = Arc<Path>;

/// Cheaply cloneable, immutable slice shared between actors.
///
/// Used for collection-valued results (story ID lists, cached story
/// collections) that many callers hold on to at once.
pub type ArcSlice<T> = Arc<[T]>;

/// Shared handle to an open file.
///
/// The `Fs` actor caches open files and hands out clones of this handle;
/// the `RwLock` serializes writers across tasks.
pub type ArcFile = Arc<RwLock<tokio::fs::File>>;

/// Replaces the default panic hook with one that prints the panic as a
/// single line, so service logs capture it intact.
pub fn install_panic_hook() -> anyhow::Result<()> {
    std::panic::set_hook(Box::new(|info| {
        eprintln!("panic: {info}");
    }));
    Ok(())
}
