//! 惰性编译的正则。

use regex::Regex;
use std::str::FromStr;
use std::sync::OnceLock;
use tracing::error;

/// 首次使用时编译的静态正则。编译失败时该字段按缺失处理。
pub(crate) struct Pattern {
    source: &'static str,
    compiled: OnceLock<Option<Regex>>,
}

impl Pattern {
    pub(crate) const fn new(source: &'static str) -> Self {
        Self {
            source,
            compiled: OnceLock::new(),
        }
    }

    pub(crate) fn regex(&self) -> Option<&Regex> {
        self.compiled
            .get_or_init(|| {
                Regex::new(self.source)
                    .map_err(|err| error!(pattern = self.source, error = %err, "regex compile failed"))
                    .ok()
            })
            .as_ref()
    }

    /// 第一个捕获组。
    pub(crate) fn capture<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.regex()?
            .captures(text)?
            .get(1)
            .map(|m| m.as_str())
    }

    pub(crate) fn capture_parsed<T: FromStr>(&self, text: &str) -> Option<T> {
        self.capture(text)?.trim().parse().ok()
    }
}
