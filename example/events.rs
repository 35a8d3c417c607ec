use bytes::Bytes;
use h1_assemble::{
    Span,
    scanner::{Handler, Head, Scanner},
};
use std::convert::Infallible;

struct Print;

fn lossy(span: Span<'_>) -> String {
    String::from_utf8_lossy(span.as_slice()).into_owned()
}

impl<'a> Handler<'a> for Print {
    type Error = Infallible;

    fn on_message_begin(&mut self, method: Span<'a>) -> Result<(), Infallible> {
        println!("method  {:?}", lossy(method));
        Ok(())
    }

    fn on_url(&mut self, target: Span<'a>) -> Result<(), Infallible> {
        println!("url     {:?}", lossy(target));
        Ok(())
    }

    fn on_header_field(&mut self, name: Span<'a>) -> Result<(), Infallible> {
        println!("field   {:?}", lossy(name));
        Ok(())
    }

    fn on_header_value(&mut self, value: Span<'a>) -> Result<(), Infallible> {
        println!("value   {:?}", lossy(value));
        Ok(())
    }

    fn on_headers_complete(&mut self, head: &Head) -> Result<(), Infallible> {
        println!("head    {} {:?}", head.version(), head.framing());
        Ok(())
    }

    fn on_body(&mut self, chunk: Span<'a>) -> Result<(), Infallible> {
        println!("body    {:?} at {}", lossy(chunk), chunk.offset());
        Ok(())
    }

    fn on_message_complete(&mut self) -> Result<(), Infallible> {
        println!("done");
        Ok(())
    }
}

fn main() {
    env_logger::init();

    let buf = b"POST /upload HTTP/1.1\r\n\
        Host: example.com\r\n\
        Transfer-Encoding: chunked\r\n\r\n\
        4\r\nWiki\r\n\
        5\r\npedia\r\n\
        0\r\n\
        Expires: never\r\n\r\n";
    let buf = Bytes::from_static(buf);

    match Scanner::new().execute(&buf, &mut Print) {
        Ok(read) => println!("{read} of {} bytes", buf.len()),
        Err(err) => println!("error: {err}"),
    }
}
