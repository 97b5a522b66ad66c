use rand::RngCore;

/// Length of every entity id: 24 lowercase hex characters.
pub const OBJECT_ID_LEN: usize = 24;

/// Generate a new opaque entity id (12 random bytes, hex-encoded).
pub fn generate() -> String {
    let mut bytes = [0u8; OBJECT_ID_LEN / 2];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Check that a caller-supplied id has the expected shape.
pub fn is_valid(id: &str) -> bool {
    id.len() == OBJECT_ID_LEN && id.bytes().all(|b| b.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_24_hex_chars() {
        let id = generate();
        assert!(is_valid(&id), "bad id: {id}");
    }

    #[test]
    fn rejects_wrong_length_and_non_hex() {
        assert!(!is_valid("abc"));
        assert!(!is_valid("zzzzzzzzzzzzzzzzzzzzzzzz"));
    }
}
