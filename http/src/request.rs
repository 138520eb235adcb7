use http::{
    header::{HeaderMap, IntoHeaderName},
    method::Method,
    uri::Uri,
    HeaderValue,
};
use once_cell::sync::Lazy;
use std::{
    fmt,
    mem::take,
    ops::{Deref, DerefMut},
};

static FULL_USER_AGENT: Lazy<Box<str>> =
    Lazy::new(|| format!("YunkeRust/yunke-http-{}", env!("CARGO_PKG_VERSION")).into());

/// UserAgent 信息
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UserAgent {
    inner: String,
}

impl UserAgent {
    /// 获取 UserAgent 字符串
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// 追加 UserAgent 字符串
    #[inline]
    pub fn push_str(&mut self, s: &str) {
        self.inner.push_str(s)
    }
}

impl From<String> for UserAgent {
    #[inline]
    fn from(inner: String) -> Self {
        Self { inner }
    }
}

impl From<&str> for UserAgent {
    #[inline]
    fn from(inner: &str) -> Self {
        Self {
            inner: inner.to_owned(),
        }
    }
}

impl fmt::Display for UserAgent {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.inner.fmt(f)
    }
}

/// HTTP 请求信息
///
/// 不包含请求体信息
#[derive(Debug)]
pub struct RequestParts {
    method: Method,
    url: Uri,
    headers: HeaderMap,
    appended_user_agent: UserAgent,
}

impl Default for RequestParts {
    #[inline]
    fn default() -> Self {
        Self {
            method: Method::GET,
            url: Default::default(),
            headers: Default::default(),
            appended_user_agent: Default::default(),
        }
    }
}

impl RequestParts {
    /// 获取请求 HTTP 方法
    #[inline]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// 获取请求 HTTP 方法的可变引用
    #[inline]
    pub fn method_mut(&mut self) -> &mut Method {
        &mut self.method
    }

    /// 获取 HTTP 请求 URL
    #[inline]
    pub fn url(&self) -> &Uri {
        &self.url
    }

    /// 获取 HTTP 请求 URL 的可变引用
    #[inline]
    pub fn url_mut(&mut self) -> &mut Uri {
        &mut self.url
    }

    /// 获取请求 HTTP Headers
    #[inline]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// 获取请求 HTTP Headers 的可变引用
    #[inline]
    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    /// 获取 UserAgent
    ///
    /// 在库自身的 UserAgent 后追加自定义的部分
    #[inline]
    pub fn user_agent(&self) -> UserAgent {
        let mut user_agent = UserAgent::from(FULL_USER_AGENT.as_ref());
        user_agent.push_str(self.appended_user_agent().as_str());
        user_agent
    }

    /// 获取追加的 UserAgent
    #[inline]
    pub fn appended_user_agent(&self) -> &UserAgent {
        &self.appended_user_agent
    }

    /// 获取追加的 UserAgent 的可变引用
    #[inline]
    pub fn appended_user_agent_mut(&mut self) -> &mut UserAgent {
        &mut self.appended_user_agent
    }
}

mod body {
    use super::super::Reset;
    use std::{
        fmt::Debug,
        io::{Cursor, Read, Result as IoResult},
    };

    trait ReadDebug: Read + Reset + Debug + Send + Sync {}
    impl<T: Read + Reset + Debug + Send + Sync> ReadDebug for T {}

    /// HTTP 请求体
    #[derive(Debug)]
    pub struct RequestBody(RequestBodyInner);

    #[derive(Debug)]
    enum RequestBodyInner {
        Reader { reader: Box<dyn ReadDebug>, size: u64 },
        Bytes(Cursor<Vec<u8>>),
    }

    impl RequestBody {
        /// 通过输入流创建 HTTP 请求体
        ///
        /// 必须提供请求体的长度，单位为字节
        #[inline]
        pub fn from_reader(
            reader: impl Read + Reset + Debug + Send + Sync + 'static,
            size: u64,
        ) -> Self {
            Self(RequestBodyInner::Reader {
                reader: Box::new(reader),
                size,
            })
        }

        /// 通过二进制数据创建 HTTP 请求体
        #[inline]
        pub fn from_bytes(bytes: Vec<u8>) -> Self {
            Self(RequestBodyInner::Bytes(Cursor::new(bytes)))
        }

        /// 获取请求体大小
        ///
        /// 单位为字节
        #[inline]
        pub fn size(&self) -> u64 {
            match &self.0 {
                RequestBodyInner::Reader { size, .. } => *size,
                RequestBodyInner::Bytes(bytes) => bytes.get_ref().len() as u64,
            }
        }
    }

    impl Default for RequestBody {
        #[inline]
        fn default() -> Self {
            Self::from_bytes(Default::default())
        }
    }

    impl Read for RequestBody {
        #[inline]
        fn read(&mut self, buf: &mut [u8]) -> IoResult<usize> {
            match &mut self.0 {
                RequestBodyInner::Reader { reader, .. } => reader.read(buf),
                RequestBodyInner::Bytes(bytes) => bytes.read(buf),
            }
        }
    }

    impl Reset for RequestBody {
        #[inline]
        fn reset(&mut self) -> IoResult<()> {
            match &mut self.0 {
                RequestBodyInner::Reader { reader, .. } => reader.reset(),
                RequestBodyInner::Bytes(bytes) => bytes.reset(),
            }
        }
    }
}
pub use body::RequestBody;

/// HTTP 请求
///
/// 封装 HTTP 请求信息与请求体
#[derive(Debug, Default)]
pub struct Request {
    parts: RequestParts,
    body: RequestBody,
}

impl Request {
    /// 创建 HTTP 请求构建器
    #[inline]
    pub fn builder() -> RequestBuilder {
        RequestBuilder::default()
    }

    /// 获取 HTTP 请求信息
    #[inline]
    pub fn parts(&self) -> &RequestParts {
        &self.parts
    }

    /// 获取 HTTP 请求信息的可变引用
    #[inline]
    pub fn parts_mut(&mut self) -> &mut RequestParts {
        &mut self.parts
    }

    /// 获取 HTTP 请求体
    #[inline]
    pub fn body(&self) -> &RequestBody {
        &self.body
    }

    /// 获取 HTTP 请求体的可变引用
    #[inline]
    pub fn body_mut(&mut self) -> &mut RequestBody {
        &mut self.body
    }

    /// 转换为 HTTP 请求信息与请求体
    #[inline]
    pub fn into_parts(self) -> (RequestParts, RequestBody) {
        (self.parts, self.body)
    }

    /// 通过 HTTP 请求信息与请求体创建 HTTP 请求
    #[inline]
    pub fn from_parts(parts: RequestParts, body: RequestBody) -> Self {
        Self { parts, body }
    }
}

impl Deref for Request {
    type Target = RequestParts;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.parts
    }
}

impl DerefMut for Request {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.parts
    }
}

/// HTTP 请求构建器
#[derive(Debug, Default)]
pub struct RequestBuilder {
    inner: Request,
}

impl RequestBuilder {
    /// 设置请求 HTTP 方法
    #[inline]
    pub fn method(&mut self, method: Method) -> &mut Self {
        self.inner.parts.method = method;
        self
    }

    /// 设置 HTTP 请求 URL
    #[inline]
    pub fn url(&mut self, url: Uri) -> &mut Self {
        self.inner.parts.url = url;
        self
    }

    /// 添加 HTTP 请求 Header
    #[inline]
    pub fn header(&mut self, header_name: impl IntoHeaderName, header_value: HeaderValue) -> &mut Self {
        self.inner.parts.headers.insert(header_name, header_value);
        self
    }

    /// 设置 HTTP 请求 Headers
    #[inline]
    pub fn headers(&mut self, headers: HeaderMap) -> &mut Self {
        self.inner.parts.headers = headers;
        self
    }

    /// 设置追加的 UserAgent
    #[inline]
    pub fn appended_user_agent(&mut self, user_agent: impl Into<UserAgent>) -> &mut Self {
        self.inner.parts.appended_user_agent = user_agent.into();
        self
    }

    /// 设置 HTTP 请求体
    #[inline]
    pub fn body(&mut self, body: RequestBody) -> &mut Self {
        self.inner.body = body;
        self
    }

    /// 构建 HTTP 请求，同时构建器被重置
    #[inline]
    pub fn build(&mut self) -> Request {
        take(&mut self.inner)
    }
}
