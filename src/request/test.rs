use bytes::Bytes;

use super::{Assembler, FieldName, Malformed, ParseError, PendingField, Request};
use crate::http::{Method, Version};
use crate::message::{Limit, LimitKind};
use crate::scanner::{Fault, Framing, Handler, Head};
use crate::span::Span;

const _: () = {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Request>();
    assert_send_sync::<ParseError>();
};

fn parse(input: &'static [u8]) -> Result<Request, ParseError> {
    Request::parse(input, Limit::default())
}

fn header_set(req: &Request) -> Vec<(String, Vec<u8>)> {
    req.headers()
        .iter()
        .map(|(name, value)| (name.as_str().to_owned(), value.as_bytes().to_vec()))
        .collect()
}

fn span<'a>(buf: &'a Bytes, offset: usize, len: usize) -> Span<'a> {
    Span::new(buf, offset, len).unwrap()
}

#[test]
fn parse_get() {
    let req = parse(b"GET / HTTP/1.1\r\nHost: a\r\n\r\n").unwrap();

    assert_eq!(req.method(), Method::GET);
    assert_eq!(req.uri(), "/");
    assert_eq!(req.version(), Version::HTTP_11);
    assert_eq!(header_set(&req), [("host".to_owned(), b"a".to_vec())]);
    assert!(req.body().is_empty());
}

#[test]
fn parse_post() {
    let req = parse(b"POST /x HTTP/1.0\r\nContent-Length: 4\r\n\r\nabcd").unwrap();

    assert_eq!(req.method(), Method::POST);
    assert_eq!(req.uri(), "/x");
    assert_eq!(req.version(), Version::HTTP_10);
    assert_eq!(req.header("Content-Length").unwrap(), "4");
    assert_eq!(req.headers().len(), 1);
    assert_eq!(req.body(), b"abcd");
    assert!(!req.message().is_chunked());
}

#[test]
fn parse_shares_input() {
    let buf = Bytes::from_static(b"GET /shared HTTP/1.1\r\nHost: example.com\r\n\r\n");
    let req = Request::parse(buf.clone(), Limit::default()).unwrap();

    assert_eq!(req.uri().as_ptr(), buf[4..].as_ptr());
    assert_eq!(req.header("host").unwrap().as_bytes().as_ptr(), buf[28..].as_ptr());
}

#[test]
fn parse_chunked() {
    let req = parse(
        b"POST /upload HTTP/1.1\r\n\
        Transfer-Encoding: chunked\r\n\r\n\
        4\r\nWiki\r\n\
        5\r\npedia\r\n\
        0\r\n\
        Expires: never\r\n\r\n",
    )
    .unwrap();

    assert_eq!(req.body(), b"Wikipedia");
    assert!(req.message().is_chunked());
    assert_eq!(req.header("transfer-encoding").unwrap(), "chunked");
    assert_eq!(req.header("Expires").unwrap(), "never");
    assert_eq!(
        req.to_string(),
        "POST /upload HTTP/1.1\r\n\
        transfer-encoding: chunked\r\n\
        expires: never\r\n\r\n\
        9\r\nWikipedia\r\n0\r\n\r\n"
    );
}

#[test]
fn parse_unknown_method() {
    let req = parse(b"PROPFIND /dav HTTP/1.1\r\n\r\n").unwrap();

    assert_eq!(req.method(), Method::UNKNOWN);
    assert_eq!(req.to_string(), "UNKNOWN /dav HTTP/1.1\r\n\r\n");
}

#[test]
fn header_lookup() {
    let req = parse(b"GET / HTTP/1.1\r\nAccept: a\r\nX-Trace: 1\r\naccept: b\r\n\r\n").unwrap();

    assert_eq!(req.header("ACCEPT").unwrap(), "a");
    assert_eq!(req.header("accept").unwrap(), "a");
    assert_eq!(req.header("x-trace").unwrap(), "1");
    assert!(req.header("host").is_none());

    let all: Vec<_> = req.headers().get_all("Accept").map(|v| v.as_bytes()).collect();
    assert_eq!(all, [b"a", b"b"]);
    assert_eq!(req.headers().len(), 3);
}

#[test]
fn render_reparse() {
    let inputs: [&[u8]; 5] = [
        b"GET / HTTP/1.1\r\nHost: a\r\n\r\n",
        b"POST /x HTTP/1.0\r\nContent-Length: 4\r\n\r\nabcd",
        b"DELETE /items/1?force=true HTTP/1.1\r\nHost: a\r\nHost: b\r\n\r\n",
        b"PUT /c HTTP/1.1\r\nTransfer-Encoding: chunked\r\n\r\n3\r\nabc\r\n0\r\nX-Sum: 1\r\n\r\n",
        b"PUT /c HTTP/1.1\r\nTransfer-Encoding: chunked\r\n\r\n3\r\nabc\r\n0\r\nContent-Length: 3\r\n\r\n",
    ];

    for input in inputs {
        let req = parse(input).unwrap();
        let again = Request::parse(req.to_bytes(), Limit::default()).unwrap();

        assert_eq!(again.method(), req.method());
        assert_eq!(again.uri(), req.uri());
        assert_eq!(again.version(), req.version());
        assert_eq!(header_set(&again), header_set(&req));
        assert_eq!(again.body(), req.body());
    }
}

#[test]
fn trailer_cannot_set_framing() {
    let req = parse(
        b"PUT /c HTTP/1.1\r\nTransfer-Encoding: chunked\r\n\r\n3\r\nabc\r\n0\r\n\
        Content-Length: 3\r\nTRANSFER-ENCODING: chunked\r\nHost: b\r\nX-Sum: 1\r\n\r\n",
    )
    .unwrap();

    assert_eq!(
        header_set(&req),
        [
            ("transfer-encoding".to_owned(), b"chunked".to_vec()),
            ("x-sum".to_owned(), b"1".to_vec()),
        ]
    );
    assert!(req.header("content-length").is_none());
    assert!(req.header("host").is_none());
    assert_eq!(req.body(), &b"abc"[..]);
}

#[test]
fn header_size_follows_limit() {
    let mut input = b"GET / HTTP/1.1\r\nX-Big: ".to_vec();
    input.resize(input.len() + 70_000, b'v');
    input.extend_from_slice(b"\r\n\r\n");
    let input = Bytes::from(input);

    let req = Request::parse(input.clone(), Limit::default().with_max_header_size(1 << 20)).unwrap();
    assert_eq!(req.header("x-big").map(|v| v.len()), Some(70_000));

    let err = Request::parse(input, Limit::default()).unwrap_err();
    assert!(matches!(err, ParseError::LimitExceeded(LimitKind::HeaderSize)), "{err:?}");
}

#[test]
fn reset_reparse() {
    let first = b"POST /a HTTP/1.0\r\nContent-Length: 3\r\nX-A: 1\r\n\r\nabc";
    let second = b"GET /b HTTP/1.1\r\nHost: b\r\n\r\n";

    let mut req = parse(first).unwrap();
    req.parse_from(&second[..]).unwrap();
    let fresh = parse(second).unwrap();

    assert_eq!(req.to_bytes(), fresh.to_bytes());
    assert_eq!(header_set(&req), header_set(&fresh));

    req.reset();
    assert_eq!(req.to_bytes(), Request::default().to_bytes());
}

#[test]
fn failed_parse_leaves_reset() {
    let mut req = Request::new(Limit::new(16));
    req.parse_from(&b"GET /a HTTP/1.1\r\nHost: a\r\n\r\n"[..]).unwrap();

    assert!(req.parse_from(&b"POST /b HTTP/1.1\r\nHost: b\r\nContent-Length: 9"[..]).is_err());
    assert_eq!(req.method(), Method::GET);
    assert_eq!(req.uri(), "/");
    assert!(req.headers().is_empty());
    assert!(req.body().is_empty());
    assert_eq!(req.limit(), &Limit::new(16));
}

#[test]
fn setters() {
    let mut req = Request::default();
    req.set_method(Method::PUT)
        .set_uri("/target")
        .set_version(Version::HTTP_10);
    req.message_mut().extend_body(b"hi").unwrap();

    assert_eq!(req.to_string(), "PUT /target HTTP/1.0\r\n\r\nhi");
}

macro_rules! assert_err {
    ($input:expr, $limit:expr, $err:pat) => {
        match Request::parse(&$input[..], $limit) {
            Err($err) => {}
            other => panic!("expected {}, got {other:?}", stringify!($err)),
        }
    };
    ($input:expr, $err:pat) => {
        assert_err!($input, Limit::default(), $err)
    };
}

#[test]
fn limit_exceeded() {
    use ParseError::LimitExceeded;

    assert_err!(
        b"POST / HTTP/1.1\r\nContent-Length: 4\r\n\r\nabcd",
        Limit::new(3),
        LimitExceeded(LimitKind::Body)
    );
    // declared length is rejected before the body arrives
    assert_err!(
        b"POST / HTTP/1.1\r\nContent-Length: 1000\r\n\r\n",
        Limit::new(3),
        LimitExceeded(LimitKind::Body)
    );
    assert_err!(
        b"POST / HTTP/1.1\r\nTransfer-Encoding: chunked\r\n\r\n4\r\nWiki\r\n5\r\npedia\r\n0\r\n\r\n",
        Limit::new(8),
        LimitExceeded(LimitKind::Body)
    );
    assert_err!(
        b"GET / HTTP/1.1\r\nHost: example.com\r\n\r\n",
        Limit::default().with_max_header_size(5),
        LimitExceeded(LimitKind::HeaderSize)
    );
    assert_err!(
        b"GET / HTTP/1.1\r\nA: 1\r\nB: 2\r\n\r\n",
        Limit::default().with_max_headers(1),
        LimitExceeded(LimitKind::HeaderCount)
    );
    assert_err!(
        b"PUT / HTTP/1.1\r\nTransfer-Encoding: chunked\r\n\r\n0\r\nX-A: 1\r\n\r\n",
        Limit::default().with_max_headers(1),
        LimitExceeded(LimitKind::HeaderCount)
    );

    let err = Request::parse(&b"GET / HTTP/1.1\r\nA: 1\r\n\r\n"[..], Limit::default().with_max_headers(0))
        .unwrap_err();
    assert!(!err.is_malformed());

    // exactly at the limit
    Request::parse(&b"POST / HTTP/1.1\r\nContent-Length: 4\r\n\r\nabcd"[..], Limit::new(4)).unwrap();
}

#[test]
fn malformed() {
    use ParseError::Malformed as M;

    assert_err!(b"GET /index.html\r\n\r\n", M(Malformed::Scan(Fault::Syntax(_))));
    assert_err!(b"GET/ HTTP/1.1\r\n\r\n", M(Malformed::Scan(Fault::Syntax(_))));
    assert_err!(b"GET / HTTP/1.1\r\nHost: a\r\n", M(Malformed::Scan(Fault::Incomplete)));
    assert_err!(b"", M(Malformed::Scan(Fault::Incomplete)));
    assert_err!(
        b"POST / HTTP/1.1\r\nContent-Length: 8\r\n\r\nabcd",
        M(Malformed::Scan(Fault::Incomplete))
    );
    assert_err!(
        b"POST / HTTP/1.1\r\nContent-Length: 4x\r\n\r\nabcd",
        M(Malformed::Scan(Fault::InvalidContentLength))
    );
    assert_err!(
        b"POST / HTTP/1.1\r\nContent-Length: 4\r\nContent-Length: 5\r\n\r\nabcd",
        M(Malformed::Scan(Fault::InvalidContentLength))
    );
    assert_err!(
        b"POST / HTTP/1.1\r\nTransfer-Encoding: chunked\r\nContent-Length: 4\r\n\r\n0\r\n\r\n",
        M(Malformed::Scan(Fault::AmbiguousLength))
    );
    assert_err!(
        b"POST / HTTP/1.1\r\nTransfer-Encoding: gzip\r\n\r\n",
        M(Malformed::Scan(Fault::InvalidTransferEncoding))
    );
    assert_err!(
        b"POST / HTTP/1.1\r\nTransfer-Encoding: chunked\r\n\r\nx\r\n",
        M(Malformed::Scan(Fault::InvalidChunk))
    );

    let err = parse(b"GET / HTTP/1.1\r\nHost a\r\n\r\n").unwrap_err();
    assert!(err.is_malformed());
}

#[test]
fn trailing_bytes() {
    assert_err!(b"GET / HTTP/1.1\r\n\r\nGET / HTTP/1.1\r\n\r\n", ParseError::TrailingBytes);
    assert_err!(
        b"POST / HTTP/1.1\r\nContent-Length: 2\r\n\r\nabcd",
        ParseError::TrailingBytes
    );
    assert!(parse(b"GET / HTTP/1.1\r\n\r\nx").unwrap_err().is_malformed());
}

// ===== Handler events =====

#[test]
fn split_field_name() {
    let buf = Bytes::from_static(b"GET / Content-Type text Cache-XControl no-store");
    let mut req = Request::default();

    {
        let mut asm = Assembler::new(&mut req);
        asm.on_message_begin(span(&buf, 0, 3)).unwrap();
        asm.on_url(span(&buf, 4, 1)).unwrap();

        // contiguous pieces stay a single span
        asm.on_header_field(span(&buf, 6, 8)).unwrap();
        asm.on_header_field(span(&buf, 14, 4)).unwrap();
        assert!(matches!(asm.field(), PendingField::Field(FieldName::Span(s)) if s.len() == 12));
        asm.on_header_value(span(&buf, 19, 4)).unwrap();
        assert!(!asm.field().is_pending());

        // non-contiguous pieces are copied
        asm.on_header_field(span(&buf, 24, 6)).unwrap();
        asm.on_header_field(span(&buf, 31, 7)).unwrap();
        assert!(matches!(asm.field(), PendingField::Field(FieldName::Owned(_))));
        asm.on_header_value(span(&buf, 39, 8)).unwrap();

        asm.on_headers_complete(&Head::new(Version::HTTP_11, Framing::Empty)).unwrap();
        asm.on_message_complete().unwrap();
        assert!(asm.is_complete());
    }

    assert_eq!(req.header("content-type").unwrap(), "text");
    assert_eq!(req.header("cache-control").unwrap(), "no-store");
    assert_eq!(req.header("content-type").unwrap().as_bytes().as_ptr(), buf[19..].as_ptr());
}

#[test]
fn ordering_violation() {
    let buf = Bytes::from_static(b"GET / Host a");
    let method = span(&buf, 0, 3);
    let target = span(&buf, 4, 1);
    let name = span(&buf, 6, 4);
    let value = span(&buf, 11, 1);
    let head = Head::new(Version::HTTP_11, Framing::Empty);

    macro_rules! assert_violation {
        ($result:expr) => {{
            let err = $result.unwrap_err();
            assert!(matches!(err, ParseError::OrderingViolation(_)), "{err:?}");
            assert!(err.is_malformed());
        }};
    }

    let mut req = Request::default();

    // value without field name
    let mut asm = Assembler::new(&mut req);
    asm.on_message_begin(method).unwrap();
    asm.on_url(target).unwrap();
    assert_violation!(asm.on_header_value(value));

    // value after value
    let mut asm = Assembler::new(&mut req);
    asm.on_message_begin(method).unwrap();
    asm.on_url(target).unwrap();
    asm.on_header_field(name).unwrap();
    asm.on_header_value(value).unwrap();
    assert_violation!(asm.on_header_value(value));

    // field without value at end of header block
    let mut asm = Assembler::new(&mut req);
    asm.on_message_begin(method).unwrap();
    asm.on_url(target).unwrap();
    asm.on_header_field(name).unwrap();
    assert_violation!(asm.on_headers_complete(&head));

    // request target before method
    let mut asm = Assembler::new(&mut req);
    assert_violation!(asm.on_url(target));

    // header field before request target
    let mut asm = Assembler::new(&mut req);
    asm.on_message_begin(method).unwrap();
    assert_violation!(asm.on_header_field(name));

    // method twice
    let mut asm = Assembler::new(&mut req);
    asm.on_message_begin(method).unwrap();
    assert_violation!(asm.on_message_begin(method));

    // body before header block end
    let mut asm = Assembler::new(&mut req);
    asm.on_message_begin(method).unwrap();
    asm.on_url(target).unwrap();
    assert_violation!(asm.on_body(value));

    // end before header block end
    let mut asm = Assembler::new(&mut req);
    asm.on_message_begin(method).unwrap();
    assert_violation!(asm.on_message_complete());
}

#[test]
fn trailer_events() {
    let buf = Bytes::from_static(b"POST / body X-Sum 1");
    let mut req = Request::default();

    {
        let mut asm = Assembler::new(&mut req);
        asm.on_message_begin(span(&buf, 0, 4)).unwrap();
        asm.on_url(span(&buf, 5, 1)).unwrap();
        asm.on_headers_complete(&Head::new(Version::HTTP_11, Framing::Chunked)).unwrap();
        asm.on_body(span(&buf, 7, 2)).unwrap();
        asm.on_body(span(&buf, 9, 2)).unwrap();
        asm.on_header_field(span(&buf, 12, 5)).unwrap();
        asm.on_header_value(span(&buf, 18, 1)).unwrap();

        // body after trailers
        let err = asm.on_body(span(&buf, 7, 2)).unwrap_err();
        assert!(matches!(err, ParseError::OrderingViolation(_)));
        asm.on_message_complete().unwrap();
    }

    assert_eq!(req.method(), Method::POST);
    assert_eq!(req.body(), b"body");
    assert_eq!(req.header("x-sum").unwrap(), "1");
    assert!(req.message().is_chunked());
}
