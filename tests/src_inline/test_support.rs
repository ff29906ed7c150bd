use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Fresh directory under the system temp dir, unique per process and call.
pub fn make_temp_dir(prefix: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("qpcr_ddct_{}_{}_{}", prefix, std::process::id(), id));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}
