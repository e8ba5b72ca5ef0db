use std::collections::hash_map::RandomState;
use std::hash::{BuildHasher, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};

static FALLBACK_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Generate a collision-resistant instance id, e.g. `HeadingBlock-6f1c…`.
///
/// Uses OS randomness (formatted as a v4 UUID) and falls back to a random
/// fragment plus a nanosecond timestamp when the OS source is unavailable.
pub fn generate_instance_id(type_id: &str) -> String {
    let mut bytes = [0u8; 16];
    match getrandom::getrandom(&mut bytes) {
        Ok(()) => format!(
            "{}-{}",
            type_id,
            uuid::Builder::from_random_bytes(bytes).into_uuid()
        ),
        Err(err) => {
            tracing::debug!(%err, "secure random source unavailable, using fallback id");
            fallback_instance_id(type_id)
        }
    }
}

/// `<type>-<random><timestamp><sequence>`, all base 36.
///
/// The sequence number makes ids unique within the process even when two
/// calls land on the same timestamp.
pub(crate) fn fallback_instance_id(type_id: &str) -> String {
    let sequence = FALLBACK_COUNTER.fetch_add(1, Ordering::Relaxed);
    let timestamp = chrono::Utc::now()
        .timestamp_nanos_opt()
        .unwrap_or_default()
        .unsigned_abs();

    let mut hasher = RandomState::new().build_hasher();
    hasher.write_u64(sequence);
    hasher.write_u64(timestamp);
    let random = hasher.finish();

    format!(
        "{}-{}{}{}",
        type_id,
        to_base36(random),
        to_base36(timestamp),
        to_base36(sequence)
    )
}

fn to_base36(mut value: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

    if value == 0 {
        return "0".to_string();
    }

    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}
