use serde_json::Value as JsonValue;
use std::fmt::Debug;
use yunke_http::HeaderMap;

/// HTTP 请求拦截器
///
/// 按注册顺序依次作用于即将发出的请求，每个拦截器看到的是上一个拦截器的输出。
/// 既可以提供附加的请求头，也可以改写结构化的 JSON 请求体；
/// 两个方法都带缺省实现，具体拦截器只需覆盖自己关心的那一个。
/// 实现必须是无状态的纯变换。
pub trait RequestInterceptor: Debug + Send + Sync {
    /// 返回附加的请求头
    ///
    /// 相同名称的请求头，后注册的拦截器的取值生效
    #[inline]
    fn request_headers(&self) -> HeaderMap {
        Default::default()
    }

    /// 改写 JSON 请求体，在最终序列化之前调用
    ///
    /// 请求体的静态类型为原始字符串时不会被调用
    #[inline]
    fn update_request_body(&self, request_body: JsonValue) -> JsonValue {
        request_body
    }
}

/// HTTP 响应拦截器
///
/// 在解码之前按注册顺序依次改写响应体文本，
/// 每个拦截器看到的是上一个拦截器的输出。实现必须是无状态的纯变换。
pub trait ResponseInterceptor: Debug + Send + Sync {
    /// 改写响应体文本
    #[inline]
    fn update_response_body(&self, response_body: String) -> String {
        response_body
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct NoopInterceptor;
    impl RequestInterceptor for NoopInterceptor {}
    impl ResponseInterceptor for NoopInterceptor {}

    #[test]
    fn test_default_implementations_are_noops() {
        assert!(NoopInterceptor.request_headers().is_empty());
        assert_eq!(
            NoopInterceptor.update_request_body(serde_json::json!({"a": 1})),
            serde_json::json!({"a": 1})
        );
        assert_eq!(
            NoopInterceptor.update_response_body("raw".to_owned()),
            "raw"
        );
    }
}
