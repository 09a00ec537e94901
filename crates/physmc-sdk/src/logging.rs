//! 日志初始化
//!
//! 各层只通过 `tracing` 宏记录日志，是否输出由应用决定。应用启动时调用一次 [`init`]：
//!
//! ```rust
//! physmc_sdk::logging::init();
//! ```
//!
//! 日志写到 stderr，stdout 留给程序输出。过滤规则优先读取 `RUST_LOG`，例如 `RUST_LOG=physmc_control=trace`。
//! 依赖 `log` crate 的第三方库记录也会转发到同一个订阅者。

use std::sync::Once;
use tracing_subscriber::EnvFilter;

/// 未设置 `RUST_LOG` 时的过滤规则
pub const DEFAULT_FILTER: &str = "info";

static INIT: Once = Once::new();

/// 使用默认过滤规则初始化日志
pub fn init() {
    init_with_filter(DEFAULT_FILTER);
}

/// 使用指定的默认过滤规则初始化日志
///
/// 多次调用只有第一次生效。进程中已经存在全局订阅者时保留原有订阅者。
pub fn init_with_filter(default_filter: &str) {
    INIT.call_once(|| {
        // log -> tracing 桥接；已有 logger 时跳过
        let _ = tracing_log::LogTracer::init();

        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(default_filter))
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .finish();
        if tracing::subscriber::set_global_default(subscriber).is_err() {
            tracing::debug!("Global tracing subscriber already installed, keeping it");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        init();
        init_with_filter("debug");
        init();
        tracing::info!("logging initialized");
    }

    #[test]
    fn test_invalid_filter_does_not_panic() {
        init_with_filter("physmc=[not a valid directive");
    }
}
