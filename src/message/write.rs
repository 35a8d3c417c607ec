use bytes::BufMut;

use super::Message;

const HEX: &[u8; 16] = b"0123456789abcdef";

/// Write header fields, the empty line and the body.
pub fn write_message<B: BufMut>(msg: &Message, mut bufm: B) {
    for (name, value) in msg.headers().iter() {
        bufm.put_slice(name.as_str().as_bytes());
        bufm.put_slice(b": ");
        bufm.put_slice(value.as_bytes());
        bufm.put_slice(b"\r\n");
    }

    bufm.put_slice(b"\r\n");

    if !msg.is_chunked() {
        bufm.put_slice(msg.body());
        return;
    }

    // the whole body is written as a single chunk
    if !msg.body().is_empty() {
        put_hex(&mut bufm, msg.body().len());
        bufm.put_slice(b"\r\n");
        bufm.put_slice(msg.body());
        bufm.put_slice(b"\r\n");
    }
    bufm.put_slice(b"0\r\n\r\n");
}

fn put_hex<B: BufMut>(bufm: &mut B, mut value: usize) {
    let mut digits = [0u8; size_of::<usize>() * 2];
    let mut start = digits.len();
    loop {
        start -= 1;
        digits[start] = HEX[value & 0xF];
        value >>= 4;
        if value == 0 {
            break;
        }
    }
    bufm.put_slice(&digits[start..]);
}
