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
    unused_import_braces
)]

//! # yunke-api-client
//!
//! ## 云客 API 客户端
//!
//! 在 HTTP 引擎之上提供带类型的请求 / 响应便利层：
//! 按上下文路径解析接口配置，支持可插拔的请求 / 响应拦截器、
//! 401 触发的令牌刷新重试，以及成功 / 业务错误两段式 JSON 解码。
//! 协议实现、连接管理与重试退避策略均由底层 HTTP 引擎负责。
//!
//! 所有请求都在后台调度线程上执行，三个结果回调中恰好有一个会被调用一次，
//! 并且回调不会回到发起调用的线程。

mod client;
mod spawn;

pub use yunke_http as http;

#[cfg(feature = "ureq")]
#[cfg_attr(feature = "docs", doc(cfg(feature = "ureq")))]
pub use yunke_ureq as ureq;

#[cfg(feature = "ureq")]
#[cfg_attr(feature = "docs", doc(cfg(feature = "ureq")))]
pub use client::CoreDispatcher;
pub use client::{
    error_code, ApiClient, ApiManager, CallResponse, CallResult, DecodedResponse, Dispatcher,
    GenericError, OnCallCompletion, RequestInterceptor, ResponseInterceptor, TokenHandler,
};

/// 将所有 Trait 全部重新导出，方便统一导入
pub mod prelude {
    pub use super::{
        ApiManager, Dispatcher, RequestInterceptor, ResponseInterceptor, TokenHandler,
    };
    pub use yunke_http::prelude::*;
}
