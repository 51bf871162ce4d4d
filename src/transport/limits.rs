//! Response size limits.
//!
//! Bodies larger than the cap are cut at the cap; the surplus is not read.
//! A truncated JSON body usually fails to decode, which surfaces as a decode
//! error rather than a size error.

use reqwest::Response;

/// Ceiling on bytes read from any response body (48 MiB).
pub const MAX_RESPONSE_BYTES: usize = 48 * 1024 * 1024;

/// A body read under a size cap.
#[derive(Debug, Default)]
pub struct CappedBody {
    pub bytes: Vec<u8>,
    pub truncated: bool,
}

/// Append `chunk` to `buf` without exceeding `cap`. Returns false once the
/// cap is hit and bytes had to be dropped.
pub fn append_capped(buf: &mut Vec<u8>, chunk: &[u8], cap: usize) -> bool {
    let remaining = cap.saturating_sub(buf.len());
    if chunk.len() > remaining {
        buf.extend_from_slice(&chunk[..remaining]);
        false
    } else {
        buf.extend_from_slice(chunk);
        true
    }
}

/// Read `response` chunk by chunk, stopping at `cap` bytes.
pub async fn read_capped(mut response: Response, cap: usize) -> Result<CappedBody, reqwest::Error> {
    let mut body = CappedBody::default();
    while let Some(chunk) = response.chunk().await? {
        if !append_capped(&mut body.bytes, &chunk, cap) {
            body.truncated = true;
            break;
        }
    }
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_under_cap() {
        let mut buf = Vec::new();
        assert!(append_capped(&mut buf, b"hello", 10));
        assert!(append_capped(&mut buf, b"world", 10)); // Exactly at cap
        assert_eq!(buf, b"helloworld");
    }

    #[test]
    fn test_append_over_cap_truncates() {
        let mut buf = b"12345678".to_vec();
        assert!(!append_capped(&mut buf, b"abcdef", 10));
        assert_eq!(buf, b"12345678ab");

        // Full buffer drops everything further
        assert!(!append_capped(&mut buf, b"z", 10));
        assert_eq!(buf.len(), 10);
    }

    #[test]
    fn test_cap_is_48_mib() {
        assert_eq!(MAX_RESPONSE_BYTES, 50_331_648);
    }
}
