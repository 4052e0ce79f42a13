//! # QR Encoder Configuration
//!
//! The capacity ceiling is policy, not mechanism: the mapping from "digits
//! per symbol" to a concrete QR version is left to the external symbol
//! renderer. This encoder only guarantees that every chunk string fits the
//! configured ceiling.

/// Default per-symbol capacity in characters: the conservative single-symbol
/// ceiling for a version-22 numeric-mode QR code used by the SMART Health
/// Cards framework (`shc:/` prefix plus numeric body).
pub const DEFAULT_CAPACITY_PER_SYMBOL: usize = 1195;

/// QR error-correction level, consumed by the external symbol renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ErrorCorrectionLevel {
    /// ~7% recovery. The SMART Health Cards default.
    #[default]
    L,
    /// ~15% recovery.
    M,
    /// ~25% recovery.
    Q,
    /// ~30% recovery.
    H,
}

impl ErrorCorrectionLevel {
    /// The single-letter identifier renderers expect.
    pub fn as_char(self) -> char {
        match self {
            Self::L => 'L',
            Self::M => 'M',
            Self::Q => 'Q',
            Self::H => 'H',
        }
    }
}

impl std::fmt::Display for ErrorCorrectionLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Configuration surface for the chunk encoder.
#[derive(Debug, Clone)]
pub struct QrConfig {
    /// Maximum characters one QR symbol may carry, counting the chunk's
    /// `shc:/...` prefix.
    pub capacity_per_symbol: usize,
    /// Error-correction level for the external renderer.
    pub error_correction: ErrorCorrectionLevel,
    /// Explicit chunk count, overriding the minimal computation. Rejected
    /// if the payload cannot fit the requested number of symbols.
    pub chunk_count: Option<usize>,
}

impl Default for QrConfig {
    fn default() -> Self {
        Self {
            capacity_per_symbol: DEFAULT_CAPACITY_PER_SYMBOL,
            error_correction: ErrorCorrectionLevel::L,
            chunk_count: None,
        }
    }
}
