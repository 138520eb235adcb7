use http::{
    header::{HeaderMap, HeaderName, IntoHeaderName},
    status::StatusCode,
    HeaderValue,
};
use std::{
    fmt::Debug,
    io::{Cursor, Read, Result as IoResult},
    mem::take,
    ops::{Deref, DerefMut},
    result,
};

trait ReadDebug: Read + Debug + Send {}
impl<T: Read + Debug + Send> ReadDebug for T {}

/// HTTP 响应体
#[derive(Debug)]
pub struct ResponseBody(ResponseBodyInner);

#[derive(Debug)]
enum ResponseBodyInner {
    Reader(Box<dyn ReadDebug>),
    Bytes(Cursor<Vec<u8>>),
}

impl ResponseBody {
    /// 通过输入流创建 HTTP 响应体
    #[inline]
    pub fn from_reader(reader: impl Read + Debug + Send + 'static) -> Self {
        Self(ResponseBodyInner::Reader(Box::new(reader)))
    }

    /// 通过二进制数据创建 HTTP 响应体
    #[inline]
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self(ResponseBodyInner::Bytes(Cursor::new(bytes)))
    }
}

impl Default for ResponseBody {
    #[inline]
    fn default() -> Self {
        Self::from_bytes(Default::default())
    }
}

impl Read for ResponseBody {
    #[inline]
    fn read(&mut self, buf: &mut [u8]) -> IoResult<usize> {
        match &mut self.0 {
            ResponseBodyInner::Reader(reader) => reader.read(buf),
            ResponseBodyInner::Bytes(bytes) => bytes.read(buf),
        }
    }
}

/// HTTP 响应信息
///
/// 不包含响应体信息
#[derive(Debug, Default)]
pub struct ResponseParts {
    status_code: StatusCode,
    headers: HeaderMap,
}

impl ResponseParts {
    /// 获取 HTTP 状态码
    #[inline]
    pub fn status_code(&self) -> StatusCode {
        self.status_code
    }

    /// 获取 HTTP 状态码的可变引用
    #[inline]
    pub fn status_code_mut(&mut self) -> &mut StatusCode {
        &mut self.status_code
    }

    /// 获取 HTTP Headers
    #[inline]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// 获取 HTTP Headers 的可变引用
    #[inline]
    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    /// 获取 HTTP 响应 Header
    #[inline]
    pub fn header(&self, header_name: &HeaderName) -> Option<&HeaderValue> {
        self.headers.get(header_name)
    }
}

/// HTTP 响应
///
/// 封装 HTTP 响应信息与响应体
#[derive(Debug, Default)]
pub struct Response {
    parts: ResponseParts,
    body: ResponseBody,
}

impl Response {
    /// 创建 HTTP 响应构建器
    #[inline]
    pub fn builder() -> ResponseBuilder {
        ResponseBuilder::default()
    }

    /// 获取 HTTP 响应信息
    #[inline]
    pub fn parts(&self) -> &ResponseParts {
        &self.parts
    }

    /// 获取 HTTP 响应信息的可变引用
    #[inline]
    pub fn parts_mut(&mut self) -> &mut ResponseParts {
        &mut self.parts
    }

    /// 获取 HTTP 响应体
    #[inline]
    pub fn body(&self) -> &ResponseBody {
        &self.body
    }

    /// 获取 HTTP 响应体的可变引用
    #[inline]
    pub fn body_mut(&mut self) -> &mut ResponseBody {
        &mut self.body
    }

    /// 直接获取 HTTP 响应体
    #[inline]
    pub fn into_body(self) -> ResponseBody {
        self.body
    }

    /// 转换为 HTTP 响应信息与响应体
    #[inline]
    pub fn into_parts(self) -> (ResponseParts, ResponseBody) {
        (self.parts, self.body)
    }

    /// 通过 HTTP 响应信息与响应体创建 HTTP 响应
    #[inline]
    pub fn from_parts(parts: ResponseParts, body: ResponseBody) -> Self {
        Self { parts, body }
    }
}

impl Deref for Response {
    type Target = ResponseParts;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.parts
    }
}

impl DerefMut for Response {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.parts
    }
}

/// HTTP 响应构建器
#[derive(Debug, Default)]
pub struct ResponseBuilder {
    inner: Response,
}

impl ResponseBuilder {
    /// 设置 HTTP 状态码
    #[inline]
    pub fn status_code(&mut self, status_code: StatusCode) -> &mut Self {
        self.inner.parts.status_code = status_code;
        self
    }

    /// 添加 HTTP Header
    #[inline]
    pub fn header(&mut self, header_name: impl IntoHeaderName, header_value: HeaderValue) -> &mut Self {
        self.inner.parts.headers.insert(header_name, header_value);
        self
    }

    /// 设置 HTTP Headers
    #[inline]
    pub fn headers(&mut self, headers: HeaderMap) -> &mut Self {
        self.inner.parts.headers = headers;
        self
    }

    /// 设置 HTTP 响应体
    #[inline]
    pub fn body(&mut self, body: ResponseBody) -> &mut Self {
        self.inner.body = body;
        self
    }

    /// 构建 HTTP 响应，同时构建器被重置
    #[inline]
    pub fn build(&mut self) -> Response {
        take(&mut self.inner)
    }
}

/// HTTP 响应结果
pub type Result = result::Result<Response, super::ResponseError>;
