// The firewall's binary-pattern signature engine. Named `FirewallSignature`
// to avoid any confusion with a transaction's cryptographic signature.
use std::fs;
use std::path::Path;

pub type FirewallSignature = Vec<u8>;

/// `signature_engine.all/0` + `signature_engine.is_infected/2`.
pub trait SignatureEngine: Send + Sync {
    fn all(&self) -> Vec<FirewallSignature>;

    /// `Some(signature)` for the first loaded signature that matches
    /// `data`, `None` if no signature matches.
    fn is_infected<'a>(
        &self,
        data: &[u8],
        signatures: &'a [FirewallSignature],
    ) -> Option<&'a FirewallSignature>;
}

/// Matches by substring containment — the simplest faithful model of
/// "binary signature matches payload".
#[derive(Debug, Clone, Default)]
pub struct SubstringSignatureEngine {
    signatures: Vec<FirewallSignature>,
}

impl SubstringSignatureEngine {
    pub fn new(signatures: Vec<FirewallSignature>) -> Self {
        Self { signatures }
    }

    /// Loads newline-delimited byte patterns from a file. Blank lines are
    /// skipped.
    pub fn load_from_file(path: &Path) -> std::io::Result<Self> {
        let contents = fs::read(path)?;
        let signatures = contents
            .split(|&b| b == b'\n')
            .map(|line| line.strip_suffix(b"\r").unwrap_or(line))
            .filter(|line| !line.is_empty())
            .map(|line| line.to_vec())
            .collect();
        Ok(Self { signatures })
    }
}

impl SignatureEngine for SubstringSignatureEngine {
    fn all(&self) -> Vec<FirewallSignature> {
        self.signatures.clone()
    }

    fn is_infected<'a>(
        &self,
        data: &[u8],
        signatures: &'a [FirewallSignature],
    ) -> Option<&'a FirewallSignature> {
        signatures.iter().find(|sig| {
            !sig.is_empty()
                && data
                    .windows(sig.len())
                    .any(|window| window == sig.as_slice())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_matching_payload_and_passes_clean_one() {
        let engine = SubstringSignatureEngine::new(vec![b"badstuff".to_vec()]);
        let sigs = engine.all();
        assert!(engine.is_infected(b"badstuff", &sigs).is_some());
        assert!(engine.is_infected(b"goodstuff", &sigs).is_none());
    }

    #[test]
    fn matches_as_substring_not_just_exact_equality() {
        let engine = SubstringSignatureEngine::new(vec![b"evil".to_vec()]);
        let sigs = engine.all();
        assert!(engine.is_infected(b"this is evil payload", &sigs).is_some());
    }
}
