//! # Chunk Splitting — Token to QR Payload Strings
//!
//! Splits the numeric body across the minimal number of QR symbols, keeping
//! every boundary on a two-digit group so reassembly never corrupts a
//! character.
//!
//! ## Wire Format
//!
//! ```text
//! shc:/<numeric>                    total == 1
//! shc:/<index>/<total>/<numeric>    total > 1, 1 <= index <= total
//! ```
//!
//! Chunks are self-describing: a receiver reconstructs from the embedded
//! `index/total`, not from scan order.

use shc_core::{QrError, ShcError, ValidationError};
use shc_token::SignedToken;

use crate::config::QrConfig;
use crate::numeric::encode_numeric;

/// Scheme tag prefixing every chunk string.
pub const SCHEME_TAG: &str = "shc:/";

/// One QR symbol's worth of the encoded token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrChunk {
    index: usize,
    total: usize,
    numeric_body: String,
}

impl QrChunk {
    /// 1-based position of this chunk.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Total chunk count of this encoding. Identical across all chunks.
    pub fn total(&self) -> usize {
        self.total
    }

    /// The even-length digit segment carried by this chunk.
    pub fn numeric_body(&self) -> &str {
        &self.numeric_body
    }

    /// The full chunk string handed to the symbol renderer.
    pub fn payload(&self) -> String {
        if self.total == 1 {
            format!("{SCHEME_TAG}{}", self.numeric_body)
        } else {
            format!(
                "{SCHEME_TAG}{}/{}/{}",
                self.index, self.total, self.numeric_body
            )
        }
    }
}

/// Encode a signed token into ordered, pair-aligned QR chunk strings.
///
/// # Errors
///
/// - `QrError::UnencodableCharacter` if the token leaves the base64url/dot
///   alphabet.
/// - `QrError::Capacity` if the ceiling cannot hold even one digit pair
///   plus chunk overhead.
/// - `QrError::InvalidChunkCount` if an explicit override is zero or larger
///   than the number of digit pairs.
pub fn encode_chunks(token: &SignedToken, config: &QrConfig) -> Result<Vec<QrChunk>, ShcError> {
    let token_str = token.as_str();
    if token_str.is_empty() {
        return Err(ValidationError::EmptyToken.into());
    }

    let body = encode_numeric(token_str)?;
    let capacity = config.capacity_per_symbol;
    let min_required = SCHEME_TAG.len() + 2;
    if capacity < min_required {
        return Err(QrError::Capacity {
            required: min_required,
            available: capacity,
        }
        .into());
    }

    let total_pairs = body.len() / 2;
    let total = match config.chunk_count {
        Some(n) => {
            validate_override(n, total_pairs, capacity)?;
            n
        }
        None => minimal_chunk_count(total_pairs, capacity)?,
    };

    // Balanced pair-aligned split: earlier chunks absorb the remainder, so
    // segment lengths differ by at most one pair.
    let base = total_pairs / total;
    let extra = total_pairs % total;
    let mut chunks = Vec::with_capacity(total);
    let mut offset = 0usize;
    for index in 1..=total {
        let take = base + usize::from(index <= extra);
        let segment = &body[offset * 2..(offset + take) * 2];
        chunks.push(QrChunk {
            index,
            total,
            numeric_body: segment.to_string(),
        });
        offset += take;
    }
    Ok(chunks)
}

/// Per-chunk digit-pair budget once the `shc:/...` prefix is accounted for.
///
/// Multi-chunk overhead is sized for the worst case: an index as wide as
/// the total, so every chunk of one encoding fits the same budget.
fn pair_budget(total: usize, capacity: usize) -> usize {
    capacity.saturating_sub(chunk_overhead(total)) / 2
}

/// Characters consumed by the chunk prefix for a given total.
fn chunk_overhead(total: usize) -> usize {
    if total == 1 {
        SCHEME_TAG.len()
    } else {
        // "shc:/" + index + "/" + total + "/"
        SCHEME_TAG.len() + 2 * decimal_width(total) + 2
    }
}

/// Smallest chunk count whose balanced split keeps every chunk within the
/// capacity ceiling.
fn minimal_chunk_count(total_pairs: usize, capacity: usize) -> Result<usize, QrError> {
    if total_pairs <= pair_budget(1, capacity) {
        return Ok(1);
    }
    let mut total = 2;
    loop {
        let budget = pair_budget(total, capacity);
        if budget == 0 {
            // Growing the count only widens the prefix; unusable ceiling.
            return Err(QrError::Capacity {
                required: chunk_overhead(total) + 2,
                available: capacity,
            });
        }
        if total * budget >= total_pairs {
            return Ok(total);
        }
        total += 1;
    }
}

/// Check that an explicit chunk-count override is feasible.
fn validate_override(total: usize, total_pairs: usize, capacity: usize) -> Result<(), QrError> {
    if total == 0 || total > total_pairs {
        return Err(QrError::InvalidChunkCount(total));
    }
    let budget = pair_budget(total, capacity);
    let widest = total_pairs.div_ceil(total);
    if widest > budget {
        return Err(QrError::Capacity {
            required: chunk_overhead(total) + 2 * widest,
            available: capacity,
        });
    }
    Ok(())
}

/// Number of decimal digits in `n` (for `n >= 1`).
fn decimal_width(mut n: usize) -> usize {
    let mut width = 1;
    while n >= 10 {
        n /= 10;
        width += 1;
    }
    width
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::QrConfig;
    use crate::numeric::decode_numeric;
    use shc_token::SignedToken;

    fn token(len: usize) -> SignedToken {
        // A synthetic token drawn from the base64url/dot alphabet.
        let alphabet: Vec<char> =
            "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_."
                .chars()
                .collect();
        let s: String = (0..len).map(|i| alphabet[i % alphabet.len()]).collect();
        SignedToken::new(s).unwrap()
    }

    fn config(capacity: usize) -> QrConfig {
        QrConfig {
            capacity_per_symbol: capacity,
            ..QrConfig::default()
        }
    }

    fn reassemble(chunks: &[QrChunk]) -> String {
        let mut ordered = chunks.to_vec();
        ordered.sort_by_key(QrChunk::index);
        let body: String = ordered.iter().map(QrChunk::numeric_body).collect();
        decode_numeric(&body).unwrap()
    }

    #[test]
    fn single_chunk_when_capacity_ample() {
        let token = token(100);
        let chunks = encode_chunks(&token, &config(1195)).unwrap();
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].index(), 1);
        assert_eq!(chunks[0].total(), 1);
        // Single-chunk format carries no index/total part.
        let payload = chunks[0].payload();
        assert!(payload.starts_with("shc:/"));
        assert!(payload["shc:/".len()..].bytes().all(|b| b.is_ascii_digit()));
        assert_eq!(payload.len(), 5 + 200);
    }

    #[test]
    fn multi_chunk_when_capacity_constrained() {
        let token = token(300); // 600 digits
        let chunks = encode_chunks(&token, &config(200)).unwrap();
        assert!(chunks.len() > 1);
        for chunk in &chunks {
            let payload = chunk.payload();
            assert!(payload.len() <= 200, "chunk overflows capacity: {}", payload.len());
            assert_eq!(chunk.numeric_body().len() % 2, 0);
            assert!(payload.starts_with(&format!("shc:/{}/{}/", chunk.index(), chunk.total())));
        }
        assert_eq!(reassemble(&chunks), token.as_str());
    }

    #[test]
    fn chunk_count_is_minimal() {
        let token = token(300); // 600 digits, 300 pairs
        // capacity 200: multi overhead = 5 + 2*1 + 2 = 9, budget 95 pairs,
        // 300 pairs / 95 = 3.16 → 4 chunks.
        let chunks = encode_chunks(&token, &config(200)).unwrap();
        assert_eq!(chunks.len(), 4);
    }

    #[test]
    fn indices_are_contiguous_and_totals_agree() {
        let token = token(500);
        let chunks = encode_chunks(&token, &config(150)).unwrap();
        let total = chunks[0].total();
        assert_eq!(chunks.len(), total);
        for (i, chunk) in chunks.iter().enumerate() {
            assert_eq!(chunk.index(), i + 1);
            assert_eq!(chunk.total(), total);
        }
    }

    #[test]
    fn split_is_balanced() {
        let token = token(301); // 301 pairs across N chunks
        let chunks = encode_chunks(&token, &config(200)).unwrap();
        let lens: Vec<usize> = chunks.iter().map(|c| c.numeric_body().len()).collect();
        let min = lens.iter().min().unwrap();
        let max = lens.iter().max().unwrap();
        assert!(max - min <= 2, "pair imbalance: {lens:?}");
    }

    #[test]
    fn capacity_below_minimum_is_rejected() {
        let tok = token(10);
        for capacity in 0..7 {
            let err = encode_chunks(&tok, &config(capacity)).unwrap_err();
            assert!(
                matches!(err, ShcError::Qr(QrError::Capacity { .. })),
                "capacity {capacity} should be unusable"
            );
        }
        // 7 characters fit exactly "shc:/" + one pair.
        assert!(encode_chunks(&token(1), &config(7)).is_ok());
    }

    #[test]
    fn capacity_too_small_for_multi_overhead_is_rejected() {
        // Needs chunking but cannot even fit "shc:/1/2/" + one pair.
        let token = token(100);
        let err = encode_chunks(&token, &config(9)).unwrap_err();
        assert!(matches!(err, ShcError::Qr(QrError::Capacity { .. })));
    }

    #[test]
    fn override_is_honored_when_feasible() {
        let token = token(100); // 100 pairs
        let mut cfg = config(1195);
        cfg.chunk_count = Some(3);
        let chunks = encode_chunks(&token, &cfg).unwrap();
        assert_eq!(chunks.len(), 3);
        assert_eq!(reassemble(&chunks), token.as_str());
    }

    #[test]
    fn override_zero_is_rejected() {
        let mut cfg = config(1195);
        cfg.chunk_count = Some(0);
        assert!(matches!(
            encode_chunks(&token(10), &cfg).unwrap_err(),
            ShcError::Qr(QrError::InvalidChunkCount(0))
        ));
    }

    #[test]
    fn override_beyond_pair_count_is_rejected() {
        let mut cfg = config(1195);
        cfg.chunk_count = Some(11);
        assert!(matches!(
            encode_chunks(&token(10), &cfg).unwrap_err(),
            ShcError::Qr(QrError::InvalidChunkCount(11))
        ));
    }

    #[test]
    fn infeasible_override_is_a_capacity_error() {
        let token = token(300); // 300 pairs; 2 chunks of capacity 100 hold 2*45 pairs
        let mut cfg = config(100);
        cfg.chunk_count = Some(2);
        assert!(matches!(
            encode_chunks(&token, &cfg).unwrap_err(),
            ShcError::Qr(QrError::Capacity { .. })
        ));
    }

    #[test]
    fn overhead_widens_with_double_digit_totals() {
        // Force a total >= 10 and confirm every chunk still fits.
        let token = token(600); // 1200 digits
        let chunks = encode_chunks(&token, &config(120)).unwrap();
        assert!(chunks[0].total() >= 10);
        for chunk in &chunks {
            assert!(chunk.payload().len() <= 120);
        }
        assert_eq!(reassemble(&chunks), token.as_str());
    }
}
