use std::time::{SystemTime, UNIX_EPOCH};

use uuid::Uuid;

/// Collision-resistant stem for scratch filenames: a random component plus
/// the current unix timestamp. Concurrent transforms never need to lock the
/// scratch directory, and no two in-flight downloads target the same path.
#[must_use]
pub fn unique_stem(prefix: &str) -> String {
    let random = Uuid::new_v4().simple().to_string();
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    format!("{prefix}_{}{secs}", &random[..7])
}
