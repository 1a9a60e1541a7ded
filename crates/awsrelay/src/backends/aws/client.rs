//! AWS SDK configuration loading.

use aws_config::{BehaviorVersion, Region, SdkConfig};

use crate::config::Config;

/// Loads the shared SDK configuration.
///
/// Credentials come from the default provider chain, which honours
/// `AWS_PROFILE`. `AWS_ENDPOINT_URL` redirects every client, which is how the
/// server is pointed at LocalStack.
pub async fn load_sdk_config(config: &Config) -> SdkConfig {
    let mut loader =
        aws_config::defaults(BehaviorVersion::latest()).region(Region::new(config.region.clone()));

    if let Some(endpoint) = &config.endpoint_url {
        loader = loader.endpoint_url(endpoint);
    }

    loader.load().await
}

/// Returns a display string for the target environment.
pub fn target_display(config: &Config) -> String {
    match &config.endpoint_url {
        Some(url) => format!("custom endpoint ({url})"),
        None => format!("AWS (region: {})", config.region),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_display_for_region() {
        let config = Config::default();
        assert_eq!(target_display(&config), "AWS (region: us-west-2)");
    }

    #[test]
    fn test_target_display_for_endpoint() {
        let config = Config {
            endpoint_url: Some("http://localhost:4566".to_string()),
            ..Config::default()
        };
        assert_eq!(
            target_display(&config),
            "custom endpoint (http://localhost:4566)"
        );
    }
}
