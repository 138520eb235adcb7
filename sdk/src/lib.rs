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

//! # yunke-sdk
//!
//! ## 云客 SDK
//!
//! 通过功能开关按需引入云客 SDK 的各个组成部分

#[cfg(feature = "http")]
#[cfg_attr(feature = "docs", doc(cfg(feature = "http")))]
pub use yunke_http as http;

#[cfg(feature = "ureq")]
#[cfg_attr(feature = "docs", doc(cfg(feature = "ureq")))]
pub use yunke_ureq as ureq;

#[cfg(feature = "api-client")]
#[cfg_attr(feature = "docs", doc(cfg(feature = "api-client")))]
pub use yunke_api_client as api_client;

/// 将所有 Trait 全部重新导出，方便统一导入
pub mod prelude {
    #[cfg(feature = "http")]
    pub use yunke_http::prelude::*;

    #[cfg(feature = "api-client")]
    pub use yunke_api_client::prelude::*;
}
