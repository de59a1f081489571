//! Search module - keyword search over reference texts
//!
//! BM25 scores are unbounded, so every score leaving this module is mapped
//! onto `[0, 1)` with `normalize_score` before it is compared against a
//! confidence threshold.

#[cfg(feature = "similarity")]
pub mod keyword;

#[cfg(feature = "similarity")]
pub use keyword::KeywordIndex;

/// Map a raw BM25 score onto `[0, 1)`
pub fn normalize_score(raw: f32) -> f32 {
    if raw.is_nan() || raw <= 0.0 {
        0.0
    } else {
        raw / (raw + 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_score_bounds() {
        assert_eq!(normalize_score(0.0), 0.0);
        assert_eq!(normalize_score(-3.0), 0.0);
        assert_eq!(normalize_score(f32::NAN), 0.0);
        assert_eq!(normalize_score(1.0), 0.5);
        assert!(normalize_score(1000.0) < 1.0);
    }

    #[test]
    fn test_normalize_score_is_monotonic() {
        assert!(normalize_score(2.0) > normalize_score(1.0));
    }
}
