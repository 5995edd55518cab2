//! XML-RPC 编解码
//!
//! 基于 `quick-xml` 事件流的最小实现，覆盖 XML-RPC 规范中的全部值类型。
//! 字符串值保留首尾空白（TXT 记录等依赖原样内容），只有结构元素之间的空白会被忽略。

use std::borrow::Cow;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::NaiveDateTime;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use thiserror::Error;

use super::value::{Struct, Value};

/// `dateTime.iso8601` 的标准格式（ISO 8601 basic）
const DATETIME_FORMAT: &str = "%Y%m%dT%H:%M:%S";
/// 部分服务端使用的扩展格式
const DATETIME_FORMAT_EXTENDED: &str = "%Y-%m-%dT%H:%M:%S";

/// Errors raised while encoding or decoding XML-RPC documents.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("expected <{expected}>, found {found}")]
    UnexpectedElement { expected: String, found: String },

    #[error("unexpected end of document")]
    UnexpectedEof,

    #[error("unknown value type <{0}>")]
    UnknownType(String),

    #[error("invalid {kind} value '{raw}'")]
    InvalidScalar { kind: &'static str, raw: String },

    #[error("malformed fault: {0}")]
    MalformedFault(String),
}

/// An XML-RPC `<fault>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fault {
    pub code: i64,
    pub message: String,
}

impl Fault {
    fn from_value(value: &Value) -> Result<Self, CodecError> {
        let members = value
            .as_struct()
            .ok_or_else(|| CodecError::MalformedFault(format!("got {}", value.type_name())))?;
        let code = members
            .get("faultCode")
            .and_then(Value::as_i64)
            .ok_or_else(|| CodecError::MalformedFault("missing faultCode".to_string()))?;
        let message = members
            .get("faultString")
            .and_then(Value::as_str)
            .ok_or_else(|| CodecError::MalformedFault("missing faultString".to_string()))?;
        Ok(Self {
            code,
            message: message.to_string(),
        })
    }

    #[cfg(any(test, feature = "test-utils"))]
    fn to_value(&self) -> Value {
        let mut members = Struct::new();
        members.insert("faultCode".to_string(), Value::Int(self.code));
        members.insert("faultString".to_string(), Value::from(self.message.as_str()));
        Value::Struct(members)
    }
}

/// The body of a `<methodResponse>`.
#[derive(Debug, Clone, PartialEq)]
pub enum MethodResponse {
    Success(Value),
    Fault(Fault),
}

/// A decoded `<methodCall>`.
#[cfg(any(test, feature = "test-utils"))]
#[derive(Debug, Clone, PartialEq)]
pub struct MethodCall {
    pub method: String,
    pub params: Vec<Value>,
}

// ============ Encoding ============

struct Encoder {
    writer: Writer<Vec<u8>>,
}

impl Encoder {
    fn new() -> Result<Self, CodecError> {
        let mut writer = Writer::new(Vec::new());
        writer.write_event(Event::Decl(BytesDecl::new("1.0", None, None)))?;
        Ok(Self { writer })
    }

    fn start(&mut self, tag: &str) -> Result<(), CodecError> {
        self.writer.write_event(Event::Start(BytesStart::new(tag)))?;
        Ok(())
    }

    fn end(&mut self, tag: &str) -> Result<(), CodecError> {
        self.writer.write_event(Event::End(BytesEnd::new(tag)))?;
        Ok(())
    }

    fn element(&mut self, tag: &str, text: &str) -> Result<(), CodecError> {
        self.start(tag)?;
        self.writer.write_event(Event::Text(BytesText::new(text)))?;
        self.end(tag)
    }

    fn value(&mut self, value: &Value) -> Result<(), CodecError> {
        self.start("value")?;
        match value {
            Value::Int(i) => {
                let tag = if i32::try_from(*i).is_ok() { "int" } else { "i8" };
                self.element(tag, &i.to_string())?;
            }
            Value::Boolean(b) => self.element("boolean", if *b { "1" } else { "0" })?,
            Value::String(s) => self.element("string", s)?,
            Value::Double(d) => self.element("double", &d.to_string())?,
            Value::DateTime(dt) => {
                self.element("dateTime.iso8601", &dt.format(DATETIME_FORMAT).to_string())?;
            }
            Value::Base64(bytes) => self.element("base64", &STANDARD.encode(bytes))?,
            Value::Struct(members) => {
                self.start("struct")?;
                for (name, member) in members {
                    self.start("member")?;
                    self.element("name", name)?;
                    self.value(member)?;
                    self.end("member")?;
                }
                self.end("struct")?;
            }
            Value::Array(items) => {
                self.start("array")?;
                self.start("data")?;
                for item in items {
                    self.value(item)?;
                }
                self.end("data")?;
                self.end("array")?;
            }
            Value::Nil => {
                self.writer
                    .write_event(Event::Empty(BytesStart::new("nil")))?;
            }
        }
        self.end("value")
    }

    fn param(&mut self, value: &Value) -> Result<(), CodecError> {
        self.start("param")?;
        self.value(value)?;
        self.end("param")
    }

    fn finish(self) -> Result<String, CodecError> {
        Ok(String::from_utf8(self.writer.into_inner())?)
    }
}

/// Encodes a `<methodCall>` document.
pub fn encode_call(method: &str, params: &[Value]) -> Result<String, CodecError> {
    let mut enc = Encoder::new()?;
    enc.start("methodCall")?;
    enc.element("methodName", method)?;
    enc.start("params")?;
    for param in params {
        enc.param(param)?;
    }
    enc.end("params")?;
    enc.end("methodCall")?;
    enc.finish()
}

/// Encodes a `<methodResponse>` document.
///
/// Server side of the protocol; only built for tests and the `test-utils` feature.
#[cfg(any(test, feature = "test-utils"))]
pub fn encode_response(response: &MethodResponse) -> Result<String, CodecError> {
    let mut enc = Encoder::new()?;
    enc.start("methodResponse")?;
    match response {
        MethodResponse::Success(value) => {
            enc.start("params")?;
            enc.param(value)?;
            enc.end("params")?;
        }
        MethodResponse::Fault(fault) => {
            enc.start("fault")?;
            enc.value(&fault.to_value())?;
            enc.end("fault")?;
        }
    }
    enc.end("methodResponse")?;
    enc.finish()
}

// ============ Decoding ============

fn tag_name(name: &[u8]) -> String {
    String::from_utf8_lossy(name).into_owned()
}

fn describe(event: &Event<'_>) -> String {
    match event {
        Event::Start(e) | Event::Empty(e) => format!("<{}>", tag_name(e.name().as_ref())),
        Event::End(e) => format!("</{}>", tag_name(e.name().as_ref())),
        Event::Text(_) | Event::CData(_) => "text".to_string(),
        _ => "markup".to_string(),
    }
}

fn unexpected(expected: &str, found: &Event<'_>) -> CodecError {
    CodecError::UnexpectedElement {
        expected: expected.to_string(),
        found: describe(found),
    }
}

fn unescape(text: &BytesText<'_>) -> Result<String, CodecError> {
    text.unescape()
        .map(Cow::into_owned)
        .map_err(|e| CodecError::Xml(e.into()))
}

fn parse_datetime(raw: &str) -> Result<NaiveDateTime, CodecError> {
    let raw = raw.trim();
    NaiveDateTime::parse_from_str(raw, DATETIME_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(raw, DATETIME_FORMAT_EXTENDED))
        .map_err(|_| CodecError::InvalidScalar {
            kind: "dateTime.iso8601",
            raw: raw.to_string(),
        })
}

/// `<string/>`、`<nil/>` 等自闭合类型元素
fn empty_typed(tag: &str) -> Result<Value, CodecError> {
    match tag {
        "string" => Ok(Value::String(String::new())),
        "nil" => Ok(Value::Nil),
        "struct" => Ok(Value::Struct(Struct::new())),
        "array" => Ok(Value::Array(Vec::new())),
        "base64" => Ok(Value::Base64(Vec::new())),
        "int" | "i4" | "i8" | "boolean" | "double" | "dateTime.iso8601" => {
            Err(CodecError::InvalidScalar {
                kind: "scalar",
                raw: String::new(),
            })
        }
        other => Err(CodecError::UnknownType(other.to_string())),
    }
}

struct Decoder<'a> {
    reader: Reader<&'a [u8]>,
}

impl<'a> Decoder<'a> {
    fn new(xml: &'a str) -> Self {
        Self {
            reader: Reader::from_str(xml),
        }
    }

    fn next_event(&mut self) -> Result<Event<'a>, CodecError> {
        match self.reader.read_event()? {
            Event::Eof => Err(CodecError::UnexpectedEof),
            event => Ok(event),
        }
    }

    /// 跳过声明、注释以及纯空白文本
    fn next_significant(&mut self) -> Result<Event<'a>, CodecError> {
        loop {
            match self.next_event()? {
                Event::Decl(_) | Event::Comment(_) | Event::PI(_) | Event::DocType(_) => {}
                Event::Text(t) if t.iter().all(u8::is_ascii_whitespace) => {}
                event => return Ok(event),
            }
        }
    }

    fn expect_start(&mut self, tag: &str) -> Result<(), CodecError> {
        match self.next_significant()? {
            Event::Start(e) if e.name().as_ref() == tag.as_bytes() => Ok(()),
            other => Err(unexpected(tag, &other)),
        }
    }

    fn expect_end(&mut self, tag: &str) -> Result<(), CodecError> {
        match self.next_significant()? {
            Event::End(e) if e.name().as_ref() == tag.as_bytes() => Ok(()),
            other => Err(unexpected(&format!("/{tag}"), &other)),
        }
    }

    fn text_until(&mut self, tag: &str) -> Result<String, CodecError> {
        let mut text = String::new();
        loop {
            match self.next_event()? {
                Event::Text(t) => text.push_str(&unescape(&t)?),
                Event::CData(c) => text.push_str(&String::from_utf8_lossy(&c)),
                Event::Comment(_) => {}
                Event::End(e) if e.name().as_ref() == tag.as_bytes() => return Ok(text),
                other => return Err(unexpected(&format!("/{tag}"), &other)),
            }
        }
    }

    /// 读取下一个 `<value>` 元素
    fn value(&mut self) -> Result<Value, CodecError> {
        match self.next_significant()? {
            Event::Start(e) if e.name().as_ref() == b"value" => self.value_body(),
            Event::Empty(e) if e.name().as_ref() == b"value" => Ok(Value::String(String::new())),
            other => Err(unexpected("value", &other)),
        }
    }

    /// `<value>` 已被读取；无类型元素时按字符串处理
    fn value_body(&mut self) -> Result<Value, CodecError> {
        let mut text = String::new();
        loop {
            match self.next_event()? {
                Event::Text(t) => text.push_str(&unescape(&t)?),
                Event::CData(c) => text.push_str(&String::from_utf8_lossy(&c)),
                Event::Comment(_) => {}
                Event::End(e) if e.name().as_ref() == b"value" => return Ok(Value::String(text)),
                Event::Start(e) => {
                    let value = self.typed(&tag_name(e.name().as_ref()))?;
                    self.expect_end("value")?;
                    return Ok(value);
                }
                Event::Empty(e) => {
                    let value = empty_typed(&tag_name(e.name().as_ref()))?;
                    self.expect_end("value")?;
                    return Ok(value);
                }
                other => return Err(unexpected("/value", &other)),
            }
        }
    }

    fn typed(&mut self, tag: &str) -> Result<Value, CodecError> {
        match tag {
            "int" | "i4" | "i8" => {
                let raw = self.text_until(tag)?;
                raw.trim()
                    .parse::<i64>()
                    .map(Value::Int)
                    .map_err(|_| CodecError::InvalidScalar { kind: "int", raw })
            }
            "boolean" => {
                let raw = self.text_until(tag)?;
                match raw.trim() {
                    "1" | "true" => Ok(Value::Boolean(true)),
                    "0" | "false" => Ok(Value::Boolean(false)),
                    _ => Err(CodecError::InvalidScalar {
                        kind: "boolean",
                        raw,
                    }),
                }
            }
            "string" => Ok(Value::String(self.text_until(tag)?)),
            "double" => {
                let raw = self.text_until(tag)?;
                raw.trim()
                    .parse::<f64>()
                    .map(Value::Double)
                    .map_err(|_| CodecError::InvalidScalar { kind: "double", raw })
            }
            "dateTime.iso8601" => {
                let raw = self.text_until(tag)?;
                parse_datetime(&raw).map(Value::DateTime)
            }
            "base64" => {
                let raw = self.text_until(tag)?;
                let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
                STANDARD
                    .decode(compact)
                    .map(Value::Base64)
                    .map_err(|_| CodecError::InvalidScalar { kind: "base64", raw })
            }
            "nil" => {
                self.text_until(tag)?;
                Ok(Value::Nil)
            }
            "struct" => self.struct_body(),
            "array" => self.array_body(),
            other => Err(CodecError::UnknownType(other.to_string())),
        }
    }

    fn struct_body(&mut self) -> Result<Value, CodecError> {
        let mut members = Struct::new();
        loop {
            match self.next_significant()? {
                Event::Start(e) if e.name().as_ref() == b"member" => {
                    self.expect_start("name")?;
                    let name = self.text_until("name")?;
                    let value = self.value()?;
                    self.expect_end("member")?;
                    members.insert(name, value);
                }
                Event::End(e) if e.name().as_ref() == b"struct" => {
                    return Ok(Value::Struct(members));
                }
                other => return Err(unexpected("member", &other)),
            }
        }
    }

    fn array_body(&mut self) -> Result<Value, CodecError> {
        match self.next_significant()? {
            Event::Start(e) if e.name().as_ref() == b"data" => {}
            Event::Empty(e) if e.name().as_ref() == b"data" => {
                self.expect_end("array")?;
                return Ok(Value::Array(Vec::new()));
            }
            other => return Err(unexpected("data", &other)),
        }

        let mut items = Vec::new();
        loop {
            match self.next_significant()? {
                Event::Start(e) if e.name().as_ref() == b"value" => items.push(self.value_body()?),
                Event::Empty(e) if e.name().as_ref() == b"value" => {
                    items.push(Value::String(String::new()));
                }
                Event::End(e) if e.name().as_ref() == b"data" => break,
                other => return Err(unexpected("value", &other)),
            }
        }
        self.expect_end("array")?;
        Ok(Value::Array(items))
    }

    /// 读取 `<params>` 列表；`<params>` 起始标签已被读取
    fn params_body(&mut self) -> Result<Vec<Value>, CodecError> {
        let mut params = Vec::new();
        loop {
            match self.next_significant()? {
                Event::Start(e) if e.name().as_ref() == b"param" => {
                    params.push(self.value()?);
                    self.expect_end("param")?;
                }
                Event::End(e) if e.name().as_ref() == b"params" => return Ok(params),
                other => return Err(unexpected("param", &other)),
            }
        }
    }
}

/// Decodes a `<methodResponse>` document into its value or fault.
///
/// An empty `<params/>` decodes to [`Value::Nil`].
pub fn decode_response(xml: &str) -> Result<MethodResponse, CodecError> {
    let mut dec = Decoder::new(xml);
    dec.expect_start("methodResponse")?;

    let response = match dec.next_significant()? {
        Event::Start(e) if e.name().as_ref() == b"params" => {
            let value = dec.params_body()?.into_iter().next().unwrap_or(Value::Nil);
            MethodResponse::Success(value)
        }
        Event::Empty(e) if e.name().as_ref() == b"params" => MethodResponse::Success(Value::Nil),
        Event::Start(e) if e.name().as_ref() == b"fault" => {
            let value = dec.value()?;
            dec.expect_end("fault")?;
            MethodResponse::Fault(Fault::from_value(&value)?)
        }
        other => return Err(unexpected("params", &other)),
    };

    dec.expect_end("methodResponse")?;
    Ok(response)
}

/// Decodes a `<methodCall>` document.
///
/// Server side of the protocol; only built for tests and the `test-utils` feature.
#[cfg(any(test, feature = "test-utils"))]
pub fn decode_call(xml: &str) -> Result<MethodCall, CodecError> {
    let mut dec = Decoder::new(xml);
    dec.expect_start("methodCall")?;
    dec.expect_start("methodName")?;
    let method = dec.text_until("methodName")?.trim().to_string();

    let params = match dec.next_significant()? {
        Event::Start(e) if e.name().as_ref() == b"params" => {
            let params = dec.params_body()?;
            dec.expect_end("methodCall")?;
            params
        }
        Event::Empty(e) if e.name().as_ref() == b"params" => {
            dec.expect_end("methodCall")?;
            Vec::new()
        }
        Event::End(e) if e.name().as_ref() == b"methodCall" => Vec::new(),
        other => return Err(unexpected("params", &other)),
    };

    Ok(MethodCall { method, params })
}
