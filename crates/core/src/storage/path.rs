//! Storage key generation.
//!
//! Keys have the shape `{base}/{YYYY/MM/DD}/{uuid}{ext}`. The date segment
//! groups objects by upload day for retention tooling; the UUID v4 token
//! makes collisions within a day directory negligible, so no
//! retry-on-collision logic exists.

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use super::rules::file_extension;

/// Generates a storage key for an uploaded file under the given base path.
///
/// The date segment is wall-clock UTC "today" at generation time. The
/// original extension (dot included, case preserved) is appended verbatim;
/// a filename without an extension gets none.
#[must_use]
pub fn generate_storage_key(base_path: &str, original_name: &str) -> String {
    dated_storage_key(base_path, original_name, Utc::now().date_naive())
}

pub(crate) fn dated_storage_key(base_path: &str, original_name: &str, date: NaiveDate) -> String {
    let extension = file_extension(original_name);
    let unique_name = format!("{}{extension}", Uuid::new_v4());
    let date_segment = date.format("%Y/%m/%d");

    let base = base_path.trim_end_matches('/');
    if base.is_empty() {
        format!("{date_segment}/{unique_name}")
    } else {
        format!("{base}/{date_segment}/{unique_name}")
    }
}
