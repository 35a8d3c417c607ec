/// Lookup table for header name bytes.
///
/// Any invalid character will have it MSB set. Valid characters are normalized to lowercase.
///
/// token   = 1*tchar
/// tchar   = "!" / "#" / "$" / "%" / "&" / "'" / "*"
///         / "+" / "-" / "." / "^" / "_" / "`" / "|" / "~"
///         / DIGIT / ALPHA
pub(crate) const HEADER_NAME: [u8; 256] = {
    let mut bytes = [0b1000_0000; 256];
    let mut i = 0u8;
    loop {
        if is_token(i) {
            bytes[i as usize] = i.to_ascii_lowercase();
        }
        if i == 255 {
            break;
        }
        i += 1;
    }
    bytes
};

const fn is_token(byte: u8) -> bool {
    matches!(
        byte,
        | b'!' | b'#' | b'$' | b'%' | b'&' | b'\'' | b'*'
        | b'+' | b'-' | b'.' | b'^' | b'_' | b'`' | b'|' | b'~'
        | b'0'..=b'9' | b'a'..=b'z' | b'A'..=b'Z'
    )
}

/// field-vchar = VCHAR / obs-text
///
/// SP and HTAB are allowed between visible characters.
#[inline]
pub(crate) const fn is_header_value(byte: u8) -> bool {
    matches!(byte, b'\t' | b' '..=b'~' | 0x80..=0xFF)
}
