//! HTTP/1.x Request Assembler
//!
//! Turns the token events of an HTTP/1.x scanner into a [`Request`][request::Request] value.
//!
//! ```
//! use h1_assemble::{http::{Method, Version}, message::Limit, request::Request};
//!
//! let req = Request::parse(&b"GET / HTTP/1.1\r\nHost: a\r\n\r\n"[..], Limit::default()).unwrap();
//! assert_eq!(req.method(), Method::GET);
//! assert_eq!(req.uri(), "/");
//! assert_eq!(req.version(), Version::HTTP_11);
//! assert_eq!(req.header("host").unwrap(), "a");
//! ```
#![warn(missing_debug_implementations)]

mod log;

pub mod bytestr;
pub mod span;
pub mod http;
pub mod headers;
pub mod message;
pub mod scanner;
pub mod request;

pub use bytestr::ByteStr;
pub use span::Span;
