use anyhow::Error as AnyError;
use std::{
    any::Any,
    fmt::{self, Display},
    io::{Read, Result as IoResult},
};
use ureq::{
    Agent, Error as UreqError, ErrorKind as UreqErrorKind, Request as UreqRequest,
    Response as UreqResponse,
};
use yunke_http::{
    header::{CONTENT_LENGTH, USER_AGENT},
    HeaderName, HeaderValue, HttpCaller, Request, RequestParts, Response, ResponseBody,
    ResponseError, ResponseErrorKind, ResponseResult, StatusCode,
};

/// Ureq 客户端
///
/// 基于 `ureq::Agent` 实现 [`HttpCaller`] 接口
#[derive(Debug, Clone)]
pub struct Client {
    client: Agent,
}

impl Client {
    /// 创建 Ureq 客户端
    #[inline]
    pub fn new(client: Agent) -> Self {
        Self { client }
    }
}

impl From<Agent> for Client {
    #[inline]
    fn from(agent: Agent) -> Self {
        Self::new(agent)
    }
}

impl Default for Client {
    #[inline]
    fn default() -> Self {
        Self {
            client: ureq::agent(),
        }
    }
}

impl HttpCaller for Client {
    fn call(&self, request: &mut Request) -> ResponseResult {
        let ureq_request = make_ureq_request(&self.client, request)?;
        match ureq_request.send(request.body_mut()) {
            Ok(response) => make_ureq_response(response),
            Err(err) => {
                let kind = err.kind();
                match err {
                    UreqError::Status(_, response) => make_ureq_response(response),
                    UreqError::Transport(transport) => {
                        Err(from_ureq_error(kind, AnyError::new(transport)))
                    }
                }
            }
        }
    }

    #[inline]
    fn as_http_caller(&self) -> &dyn HttpCaller {
        self
    }

    #[inline]
    fn as_any(&self) -> &dyn Any {
        self
    }
}

fn make_user_agent(request: &RequestParts) -> Result<HeaderValue, ResponseError> {
    let user_agent = format!("{}/yunke-ureq", request.user_agent());
    HeaderValue::from_str(&user_agent).map_err(|err| build_header_value_error(&user_agent, &err))
}

fn make_ureq_request(agent: &Agent, request: &Request) -> Result<UreqRequest, ResponseError> {
    let mut request_builder = agent.request(request.method().as_str(), &request.url().to_string());
    for (header_name, header_value) in request.headers() {
        request_builder = set_header_for_request_builder(request_builder, header_name, header_value)?;
    }
    request_builder = set_header_for_request_builder(request_builder, &USER_AGENT, &make_user_agent(request)?)?;
    request_builder = request_builder.set(CONTENT_LENGTH.as_str(), &request.body().size().to_string());
    Ok(request_builder)
}

fn make_ureq_response(response: UreqResponse) -> ResponseResult {
    let mut response_builder = Response::builder();
    response_builder.status_code(status_code_of_response(&response)?);
    for header_name_str in response.headers_names() {
        if let Some(header_value_str) = response.header(&header_name_str) {
            let header_name = HeaderName::from_bytes(header_name_str.as_bytes())
                .map_err(|err| build_header_name_error(&header_name_str, &err))?;
            let header_value = HeaderValue::from_bytes(header_value_str.as_bytes())
                .map_err(|err| build_header_value_error(header_value_str, &err))?;
            response_builder.header(header_name, header_value);
        }
    }
    response_builder.body(ResponseBody::from_reader(ResponseReaderWrapper(
        response.into_reader(),
    )));
    return Ok(response_builder.build());

    struct ResponseReaderWrapper<R>(R);

    impl<R: Read> Read for ResponseReaderWrapper<R> {
        #[inline]
        fn read(&mut self, buf: &mut [u8]) -> IoResult<usize> {
            self.0.read(buf)
        }
    }

    impl<R> fmt::Debug for ResponseReaderWrapper<R> {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.debug_tuple("ResponseReaderWrapper").finish()
        }
    }
}

fn status_code_of_response(response: &UreqResponse) -> Result<StatusCode, ResponseError> {
    StatusCode::from_u16(response.status())
        .map_err(|err| build_status_code_error(response.status(), &err))
}

fn from_ureq_error(kind: UreqErrorKind, err: AnyError) -> ResponseError {
    let response_error_kind = match kind {
        UreqErrorKind::InvalidUrl => ResponseErrorKind::InvalidUrl,
        UreqErrorKind::UnknownScheme => ResponseErrorKind::InvalidUrl,
        UreqErrorKind::Dns => ResponseErrorKind::DnsServerError,
        UreqErrorKind::ConnectionFailed => ResponseErrorKind::ConnectError,
        UreqErrorKind::TooManyRedirects => ResponseErrorKind::TooManyRedirect,
        UreqErrorKind::BadStatus => ResponseErrorKind::InvalidRequestResponse,
        UreqErrorKind::BadHeader => ResponseErrorKind::InvalidHeader,
        UreqErrorKind::Io => ResponseErrorKind::LocalIoError,
        UreqErrorKind::InvalidProxyUrl => ResponseErrorKind::ProxyError,
        UreqErrorKind::ProxyConnect => ResponseErrorKind::ProxyError,
        UreqErrorKind::ProxyUnauthorized => ResponseErrorKind::ProxyError,
        UreqErrorKind::HTTP => ResponseErrorKind::InvalidRequestResponse,
        UreqErrorKind::InsecureRequestHttpsOnly => ResponseErrorKind::SslError,
    };
    ResponseError::new(response_error_kind, err)
}

fn build_status_code_error(code: u16, err: &dyn Display) -> ResponseError {
    ResponseError::new(
        ResponseErrorKind::InvalidRequestResponse,
        format!("invalid status code({}): {}", code, err),
    )
}

fn build_header_name_error(header_name: &str, err: &dyn Display) -> ResponseError {
    ResponseError::new(
        ResponseErrorKind::InvalidHeader,
        format!("invalid header name({}): {}", header_name, err),
    )
}

fn build_header_value_error(header_value: &str, err: &dyn Display) -> ResponseError {
    ResponseError::new(
        ResponseErrorKind::InvalidHeader,
        format!("invalid header value({}): {}", header_value, err),
    )
}

fn convert_header_value_error(header_value: &HeaderValue, err: &dyn Display) -> ResponseError {
    ResponseError::new(
        ResponseErrorKind::InvalidHeader,
        format!("invalid header value({:?}): {}", header_value, err),
    )
}

fn set_header_for_request_builder(
    request_builder: UreqRequest,
    header_name: &HeaderName,
    header_value: &HeaderValue,
) -> Result<UreqRequest, ResponseError> {
    Ok(request_builder.set(
        header_name.as_str(),
        header_value
            .to_str()
            .map_err(|err| convert_header_value_error(header_value, &err))?,
    ))
}
