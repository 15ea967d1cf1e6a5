//! Command handlers -- one module per subcommand

pub mod check;
pub mod config;
pub mod ip;
pub mod profile_name;
pub mod run;

use calico_st_core::config::RetryConfig;
use calico_st_utils::RetryPolicy;

use crate::cli::RetryArgs;

/// Builds the retry policy from config, with CLI flags taking priority.
pub(crate) fn retry_policy(config: &RetryConfig, args: RetryArgs) -> RetryPolicy {
    let mut policy = RetryPolicy::from(config);
    if let Some(retries) = args.retries {
        policy.retries = retries;
    }
    if let Some(ms) = args.interval_ms {
        policy.interval = std::time::Duration::from_millis(ms);
    }
    policy
}
