// Cache key generation

use sha2::{Digest, Sha256};

/// Generate the SHA256 fingerprint for a generation request.
///
/// The key is a pure function of its inputs: the same model, size, quality,
/// style and normalized prompt always hash to the same key. The prompt is
/// trimmed and lowercased so that cosmetic whitespace or casing differences
/// still hit the same entry.
pub fn fingerprint(model: &str, size: &str, quality: &str, style: &str, prompt: &str) -> String {
    let mut hasher = Sha256::new();

    hasher.update(model.as_bytes());
    hasher.update(b"\x1f");
    hasher.update(size.as_bytes());
    hasher.update(b"\x1f");
    hasher.update(quality.as_bytes());
    hasher.update(b"\x1f");
    hasher.update(style.as_bytes());
    hasher.update(b"\x1f");
    hasher.update(normalize_prompt(prompt).as_bytes());

    hex::encode(hasher.finalize())
}

/// Normalize a prompt for key derivation: trim and lowercase.
pub fn normalize_prompt(prompt: &str) -> String {
    prompt.trim().to_lowercase()
}
