//! Sequence-length pairs and their short mnemonics.

use crate::error::SweepError;
use std::fmt;
use std::str::FromStr;

/// Tokens added to `isl + osl` when sizing the model context.
pub const MAX_MODEL_LEN_HEADROOM: u64 = 200;

/// An input/output sequence-length pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SeqLen {
    pub isl: u32,
    pub osl: u32,
}

/// Recognized `(isl, osl)` pairs and their short labels.
pub const SEQ_LEN_MNEMONICS: &[(&str, SeqLen)] = &[
    ("1k1k", SeqLen::new(1024, 1024)),
    ("1k8k", SeqLen::new(1024, 8192)),
    ("8k1k", SeqLen::new(8192, 1024)),
];

impl SeqLen {
    pub const fn new(isl: u32, osl: u32) -> Self {
        Self { isl, osl }
    }

    /// The mnemonic for this pair, if it has one.
    pub fn mnemonic(self) -> Option<&'static str> {
        SEQ_LEN_MNEMONICS.iter().find(|(_, s)| *s == self).map(|(name, _)| *name)
    }

    /// Short label used in experiment names: the mnemonic, or `{isl}_{osl}`.
    pub fn label(self) -> String {
        match self.mnemonic() {
            Some(name) => name.to_string(),
            None => format!("{}_{}", self.isl, self.osl),
        }
    }

    /// Context length a run at this pair needs. Widened so it is exact for
    /// any pair of 32-bit lengths.
    pub fn max_model_len(self) -> u64 {
        u64::from(self.isl) + u64::from(self.osl) + MAX_MODEL_LEN_HEADROOM
    }
}

impl From<(u32, u32)> for SeqLen {
    fn from((isl, osl): (u32, u32)) -> Self {
        Self::new(isl, osl)
    }
}

impl fmt::Display for SeqLen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Parses a mnemonic (`1k1k`) or the literal `{isl}_{osl}` form.
impl FromStr for SeqLen {
    type Err = SweepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some((_, seq_len)) = SEQ_LEN_MNEMONICS.iter().find(|(name, _)| *name == s) {
            return Ok(*seq_len);
        }

        let literal = s.split_once('_').and_then(|(isl, osl)| {
            let isl = isl.parse::<u32>().ok().filter(|v| *v > 0)?;
            let osl = osl.parse::<u32>().ok().filter(|v| *v > 0)?;
            Some(Self::new(isl, osl))
        });

        literal.ok_or_else(|| SweepError::UnknownSeqLen {
            value: s.to_string(),
            valid: SEQ_LEN_MNEMONICS.iter().map(|(name, _)| name.to_string()).collect(),
        })
    }
}
