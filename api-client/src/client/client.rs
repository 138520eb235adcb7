use super::{
    dispatcher::{CallResult, OnCallCompletion},
    error::{error_code, GenericError},
    manager::ApiManager,
    response::DecodedResponse,
};
use anyhow::Result as AnyResult;
use serde::{de::DeserializeOwned, Serialize};
use std::{any::Any, sync::Arc};
use yunke_http::{
    header::{HeaderMap, HeaderValue, CONTENT_TYPE},
    Method, Request, RequestBody, Uri,
};

/// API 客户端
///
/// 面向单个逻辑接口（上下文路径）的入口，提供 GET / POST / PUT / DELETE 四种操作，
/// 按泛型参数解码成功响应与业务错误响应。
/// 接口配置（完整 URL、拦截器链、调度器、令牌处理器）由构建时注入的
/// [`ApiManager`] 按上下文路径解析。
///
/// 所有操作都是异步非阻塞的，三个结果回调中恰好有一个会在后台调度线程上
/// 被调用一次，不会回到发起调用的线程。
#[derive(Debug, Clone)]
pub struct ApiClient {
    context_path: Box<str>,
    manager: Arc<dyn ApiManager>,
}

impl ApiClient {
    /// 创建 API 客户端
    ///
    /// 同一个管理器实例可以被多个客户端共享
    #[inline]
    pub fn new(context_path: impl Into<Box<str>>, manager: Arc<dyn ApiManager>) -> Self {
        Self {
            context_path: context_path.into(),
            manager,
        }
    }

    /// 获取上下文路径
    #[inline]
    pub fn context_path(&self) -> &str {
        &self.context_path
    }

    /// 发起 GET 请求
    ///
    /// 响应体按成功类型解码成功时调用 `on_success`；
    /// 失败后按业务错误类型解码成功时调用 `on_error_response`；
    /// 其余情况（传输失败、两种类型都无法解码等）调用 `on_error`
    pub fn get<R, E>(
        &self,
        on_success: impl FnOnce(R) + Send + 'static,
        on_error_response: impl FnOnce(E) + Send + 'static,
        on_error: impl FnOnce(GenericError) + Send + 'static,
    ) where
        R: DeserializeOwned + 'static,
        E: DeserializeOwned + 'static,
    {
        self.send_request::<String, R, E>(Method::GET, None, on_success, on_error_response, on_error)
    }

    /// 发起 POST 请求
    ///
    /// 请求体序列化为 JSON 后发送；请求体的静态类型为 `String` 时跳过序列化，
    /// 文本原样发送。回调约定与 [`ApiClient::get`] 相同
    pub fn post<T, R, E>(
        &self,
        request_body: Option<&T>,
        on_success: impl FnOnce(R) + Send + 'static,
        on_error_response: impl FnOnce(E) + Send + 'static,
        on_error: impl FnOnce(GenericError) + Send + 'static,
    ) where
        T: Serialize + 'static,
        R: DeserializeOwned + 'static,
        E: DeserializeOwned + 'static,
    {
        self.send_request(Method::POST, request_body, on_success, on_error_response, on_error)
    }

    /// 发起 PUT 请求
    ///
    /// 请求体与回调约定与 [`ApiClient::post`] 相同
    pub fn put<T, R, E>(
        &self,
        request_body: Option<&T>,
        on_success: impl FnOnce(R) + Send + 'static,
        on_error_response: impl FnOnce(E) + Send + 'static,
        on_error: impl FnOnce(GenericError) + Send + 'static,
    ) where
        T: Serialize + 'static,
        R: DeserializeOwned + 'static,
        E: DeserializeOwned + 'static,
    {
        self.send_request(Method::PUT, request_body, on_success, on_error_response, on_error)
    }

    /// 发起 DELETE 请求
    ///
    /// 请求体与回调约定与 [`ApiClient::post`] 相同
    pub fn delete<T, R, E>(
        &self,
        request_body: Option<&T>,
        on_success: impl FnOnce(R) + Send + 'static,
        on_error_response: impl FnOnce(E) + Send + 'static,
        on_error: impl FnOnce(GenericError) + Send + 'static,
    ) where
        T: Serialize + 'static,
        R: DeserializeOwned + 'static,
        E: DeserializeOwned + 'static,
    {
        self.send_request(Method::DELETE, request_body, on_success, on_error_response, on_error)
    }

    fn send_request<T, R, E>(
        &self,
        method: Method,
        request_body: Option<&T>,
        on_success: impl FnOnce(R) + Send + 'static,
        on_error_response: impl FnOnce(E) + Send + 'static,
        on_error: impl FnOnce(GenericError) + Send + 'static,
    ) where
        T: Serialize + 'static,
        R: DeserializeOwned + 'static,
        E: DeserializeOwned + 'static,
    {
        let request = match self.prepare_request(method, request_body) {
            Ok(request) => request,
            Err(err) => {
                log::warn!(
                    "failed to build request for {}: {:#}",
                    self.context_path,
                    err
                );
                on_error(GenericError::with_source(err, error_code::INVALID_REQUEST));
                return;
            }
        };
        let dispatcher = self.manager.dispatcher(&self.context_path);
        let response_interceptors = self.manager.response_interceptors(&self.context_path);
        let token_handler = self.manager.token_handler(&self.context_path);
        let on_completion: OnCallCompletion = Box::new(move |result: CallResult| match result {
            Ok(response) => {
                let (response_body, _status_code) = response.into_parts();
                let response_body = response_interceptors
                    .iter()
                    .fold(response_body, |response_body, interceptor| {
                        interceptor.update_response_body(response_body)
                    });
                match DecodedResponse::<R, E>::decode(response_body) {
                    DecodedResponse::Success(success) => on_success(success),
                    DecodedResponse::ErrorResponse(error_response) => {
                        on_error_response(error_response)
                    }
                    DecodedResponse::Failure(failure) => on_error(failure),
                }
            }
            Err(err) => on_error(GenericError::with_source(err, error_code::INVALID_RESPONSE)),
        });
        dispatcher.dispatch(request, on_completion, token_handler);
    }

    fn prepare_request<T: Serialize + 'static>(
        &self,
        method: Method,
        request_body: Option<&T>,
    ) -> AnyResult<Request> {
        let url: Uri = self.manager.complete_url(&self.context_path).parse()?;
        let request_interceptors = self.manager.request_interceptors(&self.context_path);

        let mut raw_body = None;
        let mut body_tree = None;
        if let Some(request_body) = request_body {
            match raw_string_body(request_body) {
                Some(raw) => raw_body = Some(raw),
                None => body_tree = Some(serde_json::to_value(request_body)?),
            }
        }

        let mut headers = HeaderMap::new();
        if body_tree.is_some() {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }
        for interceptor in &request_interceptors {
            for (header_name, header_value) in interceptor.request_headers() {
                if let Some(header_name) = header_name {
                    headers.insert(header_name, header_value);
                }
            }
            if let Some(tree) = body_tree.take() {
                body_tree = Some(interceptor.update_request_body(tree));
            }
        }

        let mut builder = Request::builder();
        builder.method(method).url(url).headers(headers);
        if let Some(tree) = body_tree {
            builder.body(RequestBody::from_bytes(serde_json::to_vec(&tree)?));
        } else if let Some(raw) = raw_body {
            builder.body(RequestBody::from_bytes(raw.into_bytes()));
        }
        Ok(builder.build())
    }
}

// 请求体的静态类型为 String 时原样发送，不做 JSON 序列化
fn raw_string_body<T: 'static>(request_body: &T) -> Option<String> {
    (request_body as &dyn Any).downcast_ref::<String>().cloned()
}
