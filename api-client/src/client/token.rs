use anyhow::Result as AnyResult;
use std::fmt::Debug;

/// 令牌处理器
///
/// 请求收到 401 响应时由调度器调用，在后台调度线程上阻塞执行，
/// 因此实现可以安全地发起自己的网络请求来换取新令牌。
/// 返回 `Ok(())` 表示令牌已刷新，原请求会被重新提交一次；
/// 返回错误则终止本次请求，错误通过 `on_error` 回调交付给调用方。
pub trait TokenHandler: Debug + Send + Sync {
    /// 刷新令牌
    fn refresh(&self) -> AnyResult<()>;
}
