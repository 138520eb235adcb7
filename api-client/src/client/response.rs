use super::error::{error_code, GenericError};
use serde::de::DeserializeOwned;
use std::any::{Any, TypeId};

/// 按固定顺序解码后的响应
///
/// 响应体文本先尝试按成功类型解码，失败后再尝试按业务错误类型解码，
/// 两者都失败时退化为携带原始解码错误的通用错误。
/// HTTP 状态码不参与判定，能否解码是唯一的区分标准。
#[derive(Debug)]
pub enum DecodedResponse<R, E> {
    /// 响应体符合成功类型
    Success(R),

    /// 响应体符合业务错误类型
    ErrorResponse(E),

    /// 响应体两种类型都不符合
    Failure(GenericError),
}

impl<R, E> DecodedResponse<R, E>
where
    R: DeserializeOwned + 'static,
    E: DeserializeOwned + 'static,
{
    /// 按固定顺序解码响应体文本
    ///
    /// 成功类型为原始字符串时跳过 JSON 解码，响应体原样交付
    pub fn decode(response_body: String) -> Self {
        if TypeId::of::<R>() == TypeId::of::<String>() {
            let boxed: Box<dyn Any> = Box::new(response_body);
            return match boxed.downcast::<R>() {
                Ok(body) => Self::Success(*body),
                Err(_) => Self::Failure(GenericError::new(error_code::INVALID_RESPONSE)),
            };
        }
        match serde_json::from_str::<R>(&response_body) {
            Ok(success) => Self::Success(success),
            Err(err) => match serde_json::from_str::<E>(&response_body) {
                Ok(error_response) => Self::ErrorResponse(error_response),
                Err(_) => Self::Failure(GenericError::with_source(
                    err.into(),
                    error_code::INVALID_RESPONSE,
                )),
            },
        }
    }
}
