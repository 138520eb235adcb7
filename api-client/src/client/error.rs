use anyhow::Error as AnyError;
use std::{error, fmt};

/// 通用错误的错误码
pub mod error_code {
    /// 非法请求：请求尚未发出即构建失败（URL 解析、请求体序列化等）
    pub const INVALID_REQUEST: i32 = -34124;

    /// 非法响应：传输失败、令牌刷新失败，或响应无法按约定的类型解码
    pub const INVALID_RESPONSE: i32 = -32234;
}

/// 通用错误
///
/// 请求无法完成，或响应既不符合成功类型也不符合业务错误类型时，
/// 通过该类型向 `on_error` 回调交付失败。
/// 构建后不可变；不携带底层错误时，错误信息与调用栈为缺省而非空字符串。
#[derive(Debug)]
pub struct GenericError {
    error_code: i32,
    error_message: Option<String>,
    stack_trace: Option<String>,
}

impl GenericError {
    /// 创建不携带底层错误的通用错误
    #[inline]
    pub fn new(error_code: i32) -> Self {
        Self {
            error_code,
            error_message: None,
            stack_trace: None,
        }
    }

    /// 通过底层错误创建通用错误
    ///
    /// 错误信息取底层错误的描述，调用栈取底层错误链的调试输出
    pub fn with_source(err: AnyError, error_code: i32) -> Self {
        Self {
            error_code,
            error_message: Some(err.to_string()),
            stack_trace: Some(format!("{:?}", err)),
        }
    }

    /// 获取错误码
    #[inline]
    pub fn error_code(&self) -> i32 {
        self.error_code
    }

    /// 获取错误信息
    #[inline]
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// 获取错误的调用栈信息
    #[inline]
    pub fn stack_trace(&self) -> Option<&str> {
        self.stack_trace.as_deref()
    }
}

impl fmt::Display for GenericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.error_message.as_deref() {
            Some(error_message) => {
                write!(f, "{} (error code {})", error_message, self.error_code)
            }
            None => write!(f, "error code {}", self.error_code),
        }
    }
}

impl error::Error for GenericError {}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn test_generic_error_without_source() {
        let err = GenericError::new(error_code::INVALID_RESPONSE);
        assert_eq!(err.error_code(), -32234);
        assert_eq!(err.error_message(), None);
        assert_eq!(err.stack_trace(), None);
        assert_eq!(err.to_string(), "error code -32234");
    }

    #[test]
    fn test_generic_error_with_source() {
        let err = GenericError::with_source(anyhow!("connection refused"), error_code::INVALID_RESPONSE);
        assert_eq!(err.error_code(), -32234);
        assert_eq!(err.error_message(), Some("connection refused"));
        assert!(err.stack_trace().is_some());
        assert_eq!(err.to_string(), "connection refused (error code -32234)");
    }

    #[test]
    fn test_error_code_classes_are_distinct() {
        assert_ne!(error_code::INVALID_REQUEST, error_code::INVALID_RESPONSE);
    }
}
