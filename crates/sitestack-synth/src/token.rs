//! Deploy-time reference tokens.
//!
//! Physical names and IDs do not exist at synthesis time, so declarations
//! reference each other through `${kind:logical-id}` placeholder strings.
//! The deploy engine records physical values under the same keys and calls
//! [`resolve`] to substitute them.

use crate::error::SynthError;

/// Token for a bucket's physical name.
#[must_use]
pub fn bucket_name(logical_id: &str) -> String {
    format!("${{bucket-name:{logical_id}}}")
}

/// Token for a bucket's ARN.
#[must_use]
pub fn bucket_arn(logical_id: &str) -> String {
    format!("${{bucket-arn:{logical_id}}}")
}

/// Token for the ARN matching every object in a bucket.
#[must_use]
pub fn bucket_objects_arn(logical_id: &str) -> String {
    format!("${{bucket-objects-arn:{logical_id}}}")
}

/// Token for a distribution's physical ID.
#[must_use]
pub fn distribution_id(logical_id: &str) -> String {
    format!("${{distribution-id:{logical_id}}}")
}

/// Token for a distribution's ARN.
#[must_use]
pub fn distribution_arn(logical_id: &str) -> String {
    format!("${{distribution-arn:{logical_id}}}")
}

/// Token for a distribution's public domain name.
#[must_use]
pub fn distribution_domain(logical_id: &str) -> String {
    format!("${{distribution-domain:{logical_id}}}")
}

/// Whether a value contains any unresolved token.
#[must_use]
pub fn contains_token(value: &str) -> bool {
    value.contains("${")
}

/// Substitute every `${...}` token in `value` using `lookup`, which receives
/// the token body (e.g. `bucket-name:content`).
///
/// # Errors
/// Returns [`SynthError::MalformedToken`] on an unterminated `${`, and
/// [`SynthError::UnresolvedToken`] when `lookup` has no value for a token.
pub fn resolve<F>(value: &str, lookup: F) -> Result<String, SynthError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut out = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find('}') else {
            return Err(SynthError::MalformedToken(value.to_owned()));
        };
        let body = &after[..end];
        match lookup(body) {
            Some(resolved) => out.push_str(&resolved),
            None => return Err(SynthError::UnresolvedToken(body.to_owned())),
        }
        rest = &after[end + 1..];
    }

    out.push_str(rest);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_format_tokens() {
        assert_eq!(bucket_name("content"), "${bucket-name:content}");
        assert_eq!(distribution_arn("site"), "${distribution-arn:site}");
        assert_eq!(distribution_domain("site"), "${distribution-domain:site}");
    }

    #[test]
    fn test_should_resolve_embedded_tokens() {
        let value = format!("arn:aws:s3:::{}/*", bucket_name("content"));
        let resolved = resolve(&value, |body| {
            (body == "bucket-name:content").then(|| "my-bucket-1234".to_owned())
        })
        .unwrap();
        assert_eq!(resolved, "arn:aws:s3:::my-bucket-1234/*");
    }

    #[test]
    fn test_should_pass_through_plain_values() {
        let resolved = resolve("no tokens here", |_| None).unwrap();
        assert_eq!(resolved, "no tokens here");
    }

    #[test]
    fn test_should_fail_on_unresolved_token() {
        let err = resolve("${bucket-name:missing}", |_| None).unwrap_err();
        assert!(matches!(err, SynthError::UnresolvedToken(_)));
    }

    #[test]
    fn test_should_fail_on_unterminated_token() {
        let err = resolve("${bucket-name:open", |_| None).unwrap_err();
        assert!(matches!(err, SynthError::MalformedToken(_)));
    }

    #[test]
    fn test_should_resolve_multiple_tokens() {
        let value = format!("{}/{}", bucket_name("a"), distribution_id("b"));
        let resolved = resolve(&value, |body| match body {
            "bucket-name:a" => Some("bucket-a".to_owned()),
            "distribution-id:b" => Some("E2EXAMPLE".to_owned()),
            _ => None,
        })
        .unwrap();
        assert_eq!(resolved, "bucket-a/E2EXAMPLE");
    }
}
