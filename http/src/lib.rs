#![cfg_attr(feature = "docs", feature(doc_cfg))]
#![deny(
    absolute_paths_not_starting_with_crate,
    anonymous_parameters,
    explicit_outlives_requirements,
    keyword_idents,
    macro_use_extern_crate,
    meta_variable_misuse,
    missing_debug_implementations,
    missing_docs,
    non_ascii_idents,
    trivial_numeric_casts,
    unsafe_code,
    unused_extern_crates,
    unused_import_braces,
    unused_qualifications
)]

//! # yunke-http
//!
//! ## 云客 HTTP 接口定义
//!
//! 为云客 SDK 提供 HTTP 请求 / 响应的抽象接口，
//! 任何实现了 [`HttpCaller`] 的类型都可以作为云客 SDK 的 HTTP 引擎。
//! 本库自身不发起网络请求。

mod error;
mod request;
mod response;

pub use error::{Error as ResponseError, ErrorKind as ResponseErrorKind};
pub use http::{
    header::{self, HeaderMap, HeaderName, HeaderValue},
    method::Method,
    status::StatusCode,
    uri::Uri,
};
pub use request::{Request, RequestBody, RequestBuilder, RequestParts, UserAgent};
pub use response::{
    Response, ResponseBody, ResponseBuilder, ResponseParts, Result as ResponseResult,
};

use std::{any::Any, io::Result as IoResult};

/// HTTP 请求处理接口
///
/// 实现该接口，即可处理云客 SDK 发送的所有 HTTP 请求
pub trait HttpCaller: Any + Send + Sync {
    /// 阻塞发送 HTTP 请求
    ///
    /// 任何 HTTP 状态码都应该作为响应返回，只有传输层失败才返回错误
    fn call(&self, request: &mut Request) -> ResponseResult;

    /// 转换为 HTTP 请求处理接口引用
    fn as_http_caller(&self) -> &dyn HttpCaller;

    /// 转换为 `Any` 引用
    fn as_any(&self) -> &dyn Any;
}

/// 重置输入流
///
/// 在重新发送请求前，将请求体恢复到起始位置
pub trait Reset {
    /// 重置输入流到起始位置
    fn reset(&mut self) -> IoResult<()>;
}

impl<T> Reset for std::io::Cursor<T> {
    #[inline]
    fn reset(&mut self) -> IoResult<()> {
        self.set_position(0);
        Ok(())
    }
}

/// 将所有 Trait 全部重新导出，方便统一导入
pub mod prelude {
    pub use super::{HttpCaller, Reset};
}
