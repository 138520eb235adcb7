use super::{
    dispatcher::Dispatcher,
    interceptor::{RequestInterceptor, ResponseInterceptor},
    token::TokenHandler,
};
use std::{fmt::Debug, sync::Arc};

/// API 管理器
///
/// 由调用方实现，为每个上下文路径（逻辑接口）解析完整 URL、拦截器链、
/// 网络调度器与可选的令牌处理器，是 SDK 唯一的配置入口。
/// 实例在构建 [`ApiClient`](super::ApiClient) 时注入，
/// 可以被任意多个客户端通过 `Arc` 共享；方法在每次请求时被读取，
/// 实现应当无副作用，并发调用之间互不影响。
pub trait ApiManager: Debug + Send + Sync {
    /// 获取指定上下文路径的完整 URL
    fn complete_url(&self, context_path: &str) -> String;

    /// 获取指定上下文路径的请求拦截器链，按应用顺序排列
    #[inline]
    fn request_interceptors(&self, _context_path: &str) -> Vec<Arc<dyn RequestInterceptor>> {
        Default::default()
    }

    /// 获取指定上下文路径的响应拦截器链，按应用顺序排列
    #[inline]
    fn response_interceptors(&self, _context_path: &str) -> Vec<Arc<dyn ResponseInterceptor>> {
        Default::default()
    }

    /// 获取指定上下文路径使用的网络调度器
    #[cfg(feature = "ureq")]
    #[inline]
    fn dispatcher(&self, _context_path: &str) -> Arc<dyn Dispatcher> {
        Arc::new(super::dispatcher::CoreDispatcher::default())
    }

    /// 获取指定上下文路径使用的网络调度器
    #[cfg(not(feature = "ureq"))]
    fn dispatcher(&self, context_path: &str) -> Arc<dyn Dispatcher>;

    /// 获取指定上下文路径的令牌处理器
    ///
    /// 返回 `None` 时 401 响应不触发刷新，按普通响应交付
    #[inline]
    fn token_handler(&self, _context_path: &str) -> Option<Arc<dyn TokenHandler>> {
        None
    }
}

#[cfg(all(test, feature = "ureq"))]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct MinimalManager;

    impl ApiManager for MinimalManager {
        fn complete_url(&self, context_path: &str) -> String {
            format!("http://api.example.com/{}", context_path)
        }
    }

    #[test]
    fn test_manager_defaults() {
        let manager = MinimalManager;
        assert_eq!(manager.complete_url("user"), "http://api.example.com/user");
        assert!(manager.request_interceptors("user").is_empty());
        assert!(manager.response_interceptors("user").is_empty());
        assert!(manager.token_handler("user").is_none());
        let _default_dispatcher = manager.dispatcher("user");
    }
}
