//! 连接串脱敏，日志中只出现脱敏后的目标

use url::Url;

/// 去掉连接串中的用户信息与查询参数，只保留 `scheme://host[:port][/path]`
///
/// 无法解析时返回占位符，不回显原文。
pub fn redact_url(raw: &str) -> String {
    let Ok(url) = Url::parse(raw.trim()) else {
        return "<invalid url>".to_string();
    };

    let Some(host) = url.host_str() else {
        return format!("{}://<unknown host>", url.scheme());
    };

    let mut redacted = format!("{}://", url.scheme());
    if !url.username().is_empty() || url.password().is_some() {
        redacted.push_str("***@");
    }
    redacted.push_str(host);
    if let Some(port) = url.port() {
        redacted.push_str(&format!(":{}", port));
    }
    let path = url.path();
    if !path.is_empty() && path != "/" {
        redacted.push_str(path);
    }
    redacted
}
