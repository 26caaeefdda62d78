//! Test helpers for the NetBox API

#[cfg(test)]
pub fn create_test_client(url: &str) -> super::Client {
    super::Client::new(url, "0123456789abcdef", true).unwrap()
}

#[cfg(test)]
pub const TEST_AUTH_HEADER: &str = "Token 0123456789abcdef";
