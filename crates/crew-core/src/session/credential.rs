use std::fmt;
use zeroize::Zeroize;

/// Opaque session token.
///
/// 会话凭证：
/// - Debug / Display 不输出真实内容
/// - 不可 Serialize，只能通过 `expose` 借用
/// - Drop 时清零内存
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    inner: String,
}

impl Credential {
    pub fn new(value: String) -> Self {
        Self { inner: value }
    }

    /// Borrow the raw token, e.g. to persist it.
    ///
    /// 只允许通过借用方式读取。
    pub fn expose(&self) -> &str {
        &self.inner
    }

    pub fn is_empty(&self) -> bool {
        self.inner.trim().is_empty()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential([REDACTED])")
    }
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl Drop for Credential {
    fn drop(&mut self) {
        self.inner.zeroize();
    }
}
