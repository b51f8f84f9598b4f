use rand::Rng;

const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Creates a random alphanumeric secret of the given length
pub fn create_random_secret(secret_len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..secret_len)
        .map(|_| {
            let idx = rng.gen_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_secret_of_given_length() {
        for len in [0, 1, 16, 64].iter() {
            assert_eq!(create_random_secret(*len).len(), *len);
        }
    }

    #[test]
    fn generates_different_secrets() {
        assert_ne!(create_random_secret(32), create_random_secret(32));
    }
}
