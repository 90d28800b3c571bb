//! AWS SDK client bundle shared by both jobs.

use aws_config::BehaviorVersion;

/// Bundle of AWS SDK clients used by the rotation jobs.
///
/// Both clients share the same underlying [`aws_config::SdkConfig`] so that
/// credentials are resolved once and reused for every call in the run. The
/// bundle is built once per process and each loop iteration reuses it.
#[derive(Clone)]
pub struct AwsClients {
    /// IAM client: list, create, demote, and delete access keys.
    pub iam: aws_sdk_iam::Client,
    /// Secrets Manager client: read and overwrite the mirrored credential
    /// documents.
    pub secretsmanager: aws_sdk_secretsmanager::Client,
}

impl AwsClients {
    /// Initialise both AWS SDK clients.
    ///
    /// Credentials and region are resolved via the standard AWS chain (the
    /// execution role of whatever runs the job). No endpoint overrides, no
    /// explicit timeouts; the SDK defaults apply.
    pub async fn init() -> Self {
        let config = aws_config::defaults(BehaviorVersion::latest()).load().await;

        Self {
            iam: aws_sdk_iam::Client::new(&config),
            secretsmanager: aws_sdk_secretsmanager::Client::new(&config),
        }
    }
}
