use super::token::TokenHandler;
use anyhow::Error as AnyError;
use std::{fmt::Debug, sync::Arc};
use yunke_http::{Request, StatusCode};

#[cfg(feature = "ureq")]
use {
    crate::spawn::spawn,
    std::{
        io::Read,
        sync::atomic::{AtomicUsize, Ordering::Relaxed},
    },
    yunke_http::prelude::*,
    yunke_ureq::Client as UreqClient,
};

/// 调度成功后交付的响应内容
#[derive(Debug, Clone)]
pub struct CallResponse {
    body: String,
    status_code: StatusCode,
}

impl CallResponse {
    /// 创建调度响应
    #[inline]
    pub fn new(body: String, status_code: StatusCode) -> Self {
        Self { body, status_code }
    }

    /// 获取响应体文本
    #[inline]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// 获取 HTTP 状态码
    #[inline]
    pub fn status_code(&self) -> StatusCode {
        self.status_code
    }

    /// 转换为响应体文本与状态码
    #[inline]
    pub fn into_parts(self) -> (String, StatusCode) {
        (self.body, self.status_code)
    }
}

/// 调度结果
///
/// 任何 HTTP 状态码都是成功的调度结果，只有传输层失败、
/// 令牌刷新失败或响应体读取失败才是错误
pub type CallResult = Result<CallResponse, AnyError>;

/// 调度完成回调
pub type OnCallCompletion = Box<dyn FnOnce(CallResult) + Send + 'static>;

/// 网络调度器接口
///
/// 接受构建完成的请求并异步执行，完成后在后台线程上调用回调，
/// 并且恰好调用一次。实现该接口即可定制 SDK 发起网络调用的方式。
pub trait Dispatcher: Debug + Send + Sync {
    /// 异步提交请求
    ///
    /// 提交后不可取消，请求会执行到交付结果为止
    fn dispatch(
        &self,
        request: Request,
        on_completion: OnCallCompletion,
        token_handler: Option<Arc<dyn TokenHandler>>,
    );
}

/// 令牌刷新后重发原请求的缺省次数上限
#[cfg(feature = "ureq")]
const DEFAULT_MAX_TOKEN_REFRESHES: usize = 1;

#[cfg(feature = "ureq")]
static DISPATCH_SEQUENCE: AtomicUsize = AtomicUsize::new(0);

/// 核心网络调度器
///
/// 每次调度在独立的后台线程上执行；每次尝试使用一次性的 HTTP 引擎客户端，
/// 无论尝试成功、失败还是触发重发，引擎客户端都会随即被释放。
/// 收到 401 响应且配置了令牌处理器时，先刷新令牌再重新提交原请求；
/// 重发次数由 `max_token_refreshes` 限制，
/// 超出上限后的 401 响应按普通响应交付，因此不存在无限重试。
#[cfg(feature = "ureq")]
#[cfg_attr(feature = "docs", doc(cfg(feature = "ureq")))]
#[derive(Debug, Clone)]
pub struct CoreDispatcher {
    max_token_refreshes: usize,
}

#[cfg(feature = "ureq")]
impl Default for CoreDispatcher {
    #[inline]
    fn default() -> Self {
        Self::new(DEFAULT_MAX_TOKEN_REFRESHES)
    }
}

#[cfg(feature = "ureq")]
impl CoreDispatcher {
    /// 创建核心网络调度器，并指定令牌刷新后重发原请求的次数上限
    #[inline]
    pub fn new(max_token_refreshes: usize) -> Self {
        Self {
            max_token_refreshes,
        }
    }

    /// 获取令牌刷新后重发原请求的次数上限
    #[inline]
    pub fn max_token_refreshes(&self) -> usize {
        self.max_token_refreshes
    }
}

#[cfg(feature = "ureq")]
impl Dispatcher for CoreDispatcher {
    fn dispatch(
        &self,
        mut request: Request,
        on_completion: OnCallCompletion,
        token_handler: Option<Arc<dyn TokenHandler>>,
    ) {
        let max_token_refreshes = self.max_token_refreshes;
        let task_name = format!(
            "yunke-api-dispatcher-{}",
            DISPATCH_SEQUENCE.fetch_add(1, Relaxed)
        );
        let spawn_result = spawn(task_name, move || {
            on_completion(run_attempts(
                &mut request,
                max_token_refreshes,
                token_handler.as_deref(),
            ));
        });
        if let Err(err) = spawn_result {
            log::error!("failed to spawn dispatch thread: {}", err);
        }
    }
}

#[cfg(feature = "ureq")]
fn run_attempts(
    request: &mut Request,
    max_token_refreshes: usize,
    token_handler: Option<&dyn TokenHandler>,
) -> CallResult {
    let mut refreshes = 0;
    loop {
        if refreshes > 0 {
            request.body_mut().reset()?;
        }
        // 一次性引擎客户端，本次尝试结束后随即释放
        let engine = UreqClient::default();
        let mut response = engine.call(request)?;
        if response.status_code() == StatusCode::UNAUTHORIZED && refreshes < max_token_refreshes {
            if let Some(token_handler) = token_handler {
                log::info!("got 401 from {}, refreshing token", request.url());
                token_handler.refresh()?;
                refreshes += 1;
                continue;
            }
        }
        let mut body = String::new();
        response.body_mut().read_to_string(&mut body)?;
        log::debug!(
            "request to {} completed with status {}",
            request.url(),
            response.status_code()
        );
        return Ok(CallResponse::new(body, response.status_code()));
    }
}

#[cfg(all(test, feature = "ureq"))]
mod tests {
    use super::*;
    use anyhow::Result as AnyResult;
    use bytes::Bytes;
    use futures::channel::oneshot::channel as oneshot_channel;
    use std::{
        sync::{atomic::AtomicUsize, mpsc::channel},
        time::Duration,
    };
    use tokio::task::spawn_blocking;
    use warp::{filters::body::bytes, path, Filter};
    use yunke_http::{Method, RequestBody};

    macro_rules! starts_with_server {
        ($addr:ident, $routes:ident, $code:block) => {{
            let (tx, rx) = oneshot_channel();
            let ($addr, server) = warp::serve($routes).bind_with_graceful_shutdown(([127, 0, 0, 1], 0), async move {
                rx.await.ok();
            });
            let handler = tokio::spawn(server);
            $code?;
            tx.send(()).ok();
            handler.await.ok();
        }};
    }

    #[derive(Debug, Default)]
    struct CountingTokenHandler {
        refreshed: AtomicUsize,
    }

    impl TokenHandler for CountingTokenHandler {
        fn refresh(&self) -> AnyResult<()> {
            self.refreshed.fetch_add(1, Relaxed);
            Ok(())
        }
    }

    #[derive(Debug)]
    struct FailingTokenHandler;

    impl TokenHandler for FailingTokenHandler {
        fn refresh(&self) -> AnyResult<()> {
            Err(anyhow::anyhow!("token refresh failed"))
        }
    }

    fn secure_routes(
        hits: Arc<AtomicUsize>,
        failures_before_success: usize,
    ) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
        path!("v1" / "secure").and(bytes()).map(move |body: Bytes| {
            let hit = hits.fetch_add(1, Relaxed);
            if hit < failures_before_success {
                warp::reply::with_status(
                    "unauthorized".to_owned(),
                    warp::http::StatusCode::UNAUTHORIZED,
                )
            } else {
                assert_eq!(&body[..], &b"payload"[..]);
                warp::reply::with_status("refreshed ok".to_owned(), warp::http::StatusCode::OK)
            }
        })
    }

    fn dispatch_and_wait(
        addr: std::net::SocketAddr,
        token_handler: Option<Arc<dyn TokenHandler>>,
    ) -> AnyResult<CallResponse> {
        let mut builder = Request::builder();
        let request = builder
            .method(Method::POST)
            .url(format!("http://{}/v1/secure", addr).parse()?)
            .body(RequestBody::from_bytes(b"payload".to_vec()))
            .build();
        let (tx, rx) = channel();
        CoreDispatcher::default().dispatch(
            request,
            Box::new(move |result| {
                tx.send(result).ok();
            }),
            token_handler,
        );
        rx.recv_timeout(Duration::from_secs(10))?
    }

    #[tokio::test]
    async fn test_token_refresh_retries_once() -> AnyResult<()> {
        env_logger::builder().is_test(true).try_init().ok();

        let hits = Arc::new(AtomicUsize::new(0));
        let routes = secure_routes(hits.to_owned(), 1);
        starts_with_server!(addr, routes, {
            let token_handler = Arc::new(CountingTokenHandler::default());
            let refreshed = token_handler.to_owned();
            spawn_blocking(move || {
                let response =
                    dispatch_and_wait(addr, Some(token_handler as Arc<dyn TokenHandler>))?;
                assert_eq!(response.status_code(), StatusCode::OK);
                assert_eq!(response.body(), "refreshed ok");
                assert_eq!(refreshed.refreshed.load(Relaxed), 1);
                Ok::<_, AnyError>(())
            })
            .await?
        });
        assert_eq!(hits.load(Relaxed), 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_persistent_401_is_delivered_after_refresh_cap() -> AnyResult<()> {
        env_logger::builder().is_test(true).try_init().ok();

        let hits = Arc::new(AtomicUsize::new(0));
        let routes = secure_routes(hits.to_owned(), usize::MAX);
        starts_with_server!(addr, routes, {
            let token_handler = Arc::new(CountingTokenHandler::default());
            let refreshed = token_handler.to_owned();
            spawn_blocking(move || {
                let response =
                    dispatch_and_wait(addr, Some(token_handler as Arc<dyn TokenHandler>))?;
                assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
                assert_eq!(response.body(), "unauthorized");
                assert_eq!(refreshed.refreshed.load(Relaxed), 1);
                Ok::<_, AnyError>(())
            })
            .await?
        });
        assert_eq!(hits.load(Relaxed), 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_401_without_token_handler_is_delivered() -> AnyResult<()> {
        env_logger::builder().is_test(true).try_init().ok();

        let hits = Arc::new(AtomicUsize::new(0));
        let routes = secure_routes(hits.to_owned(), usize::MAX);
        starts_with_server!(addr, routes, {
            spawn_blocking(move || {
                let response = dispatch_and_wait(addr, None)?;
                assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
                Ok::<_, AnyError>(())
            })
            .await?
        });
        assert_eq!(hits.load(Relaxed), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_failing_token_handler_fails_the_call() -> AnyResult<()> {
        env_logger::builder().is_test(true).try_init().ok();

        let hits = Arc::new(AtomicUsize::new(0));
        let routes = secure_routes(hits.to_owned(), usize::MAX);
        starts_with_server!(addr, routes, {
            spawn_blocking(move || {
                let err = dispatch_and_wait(addr, Some(Arc::new(FailingTokenHandler)))
                    .err()
                    .ok_or_else(|| anyhow::anyhow!("expected the call to fail"))?;
                assert!(err.to_string().contains("token refresh failed"));
                Ok::<_, AnyError>(())
            })
            .await?
        });
        assert_eq!(hits.load(Relaxed), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_transport_error_fails_the_call() -> AnyResult<()> {
        env_logger::builder().is_test(true).try_init().ok();

        spawn_blocking(|| {
            let mut builder = Request::builder();
            let request = builder
                .method(Method::GET)
                .url("http://127.0.0.1:9/v1/secure".parse()?)
                .build();
            let (tx, rx) = channel();
            CoreDispatcher::default().dispatch(
                request,
                Box::new(move |result| {
                    tx.send(result).ok();
                }),
                None,
            );
            let result = rx.recv_timeout(Duration::from_secs(10))?;
            assert!(result.is_err());
            Ok::<_, AnyError>(())
        })
        .await??;

        Ok(())
    }
}
