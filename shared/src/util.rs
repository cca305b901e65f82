/// Current UTC time in Unix milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Generate a Snowflake-style i64 for use as resource ID.
///
/// Layout (53 bits, fits in JavaScript's Number.MAX_SAFE_INTEGER):
///   - 41 bits: milliseconds since 2024-01-01 UTC (~69 years)
///   - 12 bits: per-process sequence with a random starting point
///
/// The admin UI stores ids as JS numbers, hence the 53-bit ceiling.
/// Unique within a process up to 4096 ids per millisecond.
pub fn snowflake_id() -> i64 {
    use rand::Rng;
    use std::sync::OnceLock;
    use std::sync::atomic::{AtomicI64, Ordering};

    // Custom epoch: 2024-01-01 00:00:00 UTC
    const EPOCH_MS: i64 = 1_704_067_200_000;
    static SEED: OnceLock<i64> = OnceLock::new();
    static SEQ: AtomicI64 = AtomicI64::new(0);

    let seed = *SEED.get_or_init(|| rand::thread_rng().gen_range(0..0x1000));
    let seq = (seed + SEQ.fetch_add(1, Ordering::Relaxed)) & 0xFFF; // 12 bits
    let ts = (now_millis() - EPOCH_MS) & 0x1FF_FFFF_FFFF; // 41 bits
    (ts << 12) | seq
}
