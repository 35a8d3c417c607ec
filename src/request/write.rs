use bytes::BufMut;

use super::Request;
use crate::message::write_message;

/// Write request in wire format.
pub fn write_request<B: BufMut>(req: &Request, mut bufm: B) {
    let version = req.version();
    let mut fmt = itoa::Buffer::new();

    bufm.put_slice(req.method().as_str().as_bytes());
    bufm.put_u8(b' ');
    bufm.put_slice(req.uri().as_bytes());
    bufm.put_slice(b" HTTP/");
    bufm.put_slice(fmt.format(version.major()).as_bytes());
    bufm.put_u8(b'.');
    bufm.put_slice(fmt.format(version.minor()).as_bytes());
    bufm.put_slice(b"\r\n");

    write_message(req.message(), bufm);
}
