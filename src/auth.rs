use sha2::{Digest, Sha256};

// Shared-secret guard for the X-API-Key header.
pub struct AuthGuard {
    secret_digest: [u8; 32],
}

impl AuthGuard {
    pub fn new(secret: &str) -> Self {
        Self {
            secret_digest: Sha256::digest(secret.as_bytes()).into(),
        }
    }

    // Digests are compared instead of the raw strings so the comparison
    // cost does not depend on how long a shared prefix is.
    pub fn verify(&self, presented: Option<&str>) -> bool {
        match presented {
            Some(key) if !key.is_empty() => {
                let digest: [u8; 32] = Sha256::digest(key.as_bytes()).into();
                digest == self.secret_digest
            }
            _ => false,
        }
    }
}
