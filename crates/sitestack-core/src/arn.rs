//! ARN formatting helpers for the resource types SiteStack declares.
//!
//! S3 bucket ARNs are region- and account-less; CloudFront distribution ARNs
//! are region-less but carry the account. Only the forms SiteStack actually
//! uses are provided here.

/// ARN of an S3 bucket.
#[must_use]
pub fn bucket(bucket_name: &str) -> String {
    format!("arn:aws:s3:::{bucket_name}")
}

/// ARN matching every object in an S3 bucket.
#[must_use]
pub fn bucket_objects(bucket_name: &str) -> String {
    format!("arn:aws:s3:::{bucket_name}/*")
}

/// ARN of a specific CloudFront distribution.
#[must_use]
pub fn distribution(account_id: &str, distribution_id: &str) -> String {
    format!("arn:aws:cloudfront::{account_id}:distribution/{distribution_id}")
}

/// ARN matching every CloudFront distribution in an account.
#[must_use]
pub fn any_distribution(account_id: &str) -> String {
    distribution(account_id, "*")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_format_bucket_arns() {
        assert_eq!(bucket("my-bucket"), "arn:aws:s3:::my-bucket");
        assert_eq!(bucket_objects("my-bucket"), "arn:aws:s3:::my-bucket/*");
    }

    #[test]
    fn test_should_format_distribution_arns() {
        assert_eq!(
            distribution("111222333444", "E2EXAMPLE"),
            "arn:aws:cloudfront::111222333444:distribution/E2EXAMPLE"
        );
        assert_eq!(
            any_distribution("111222333444"),
            "arn:aws:cloudfront::111222333444:distribution/*"
        );
    }
}
