use nom::bytes::complete::{take, take_while_m_n};
use nom::character::is_hex_digit;
use nom::combinator::map_res;
use nom::IResult;
use tracing::warn;

/// Largest payload whose length still fits a four digit header.
pub(crate) const MAX_PAYLOAD_LEN: usize = 0xffff - 4;

const ERR_PREFIX: &[u8] = b"ERR ";

/// Frame `payload` as a pkt-line: four lowercase hex digits holding the
/// total length, header included, followed by the payload bytes.
pub(crate) fn packet_line(payload: &str) -> Vec<u8> {
    if payload.len() > MAX_PAYLOAD_LEN {
        warn!(
            len = payload.len(),
            "pkt-line payload too long, header will be malformed"
        );
    }
    let mut pkt = format!("{:04x}", 4 + payload.len()).into_bytes();
    pkt.extend_from_slice(payload.as_bytes());
    pkt
}

/// The request that opens a git daemon session. The NULs are part of the payload.
pub(crate) fn service_request(service: &str, repo: &str, host: &str) -> Vec<u8> {
    let msg: String = [service, " /", repo, "\0host=", host, "\0"].concat();
    packet_line(&msg)
}

fn packet_length(input: &[u8]) -> IResult<&[u8], usize> {
    map_res(take_while_m_n(4, 4, is_hex_digit), |hex: &[u8]| {
        std::str::from_utf8(hex)
            .map_err(|_| ())
            .and_then(|s| usize::from_str_radix(s, 16).map_err(|_| ()))
    })(input)
}

/// Read one pkt-line off the front of `input`.
///
/// Flush and the other special packets (length below 4) yield an empty payload.
pub(crate) fn decode_packet(input: &[u8]) -> IResult<&[u8], &[u8]> {
    let (rest, len) = packet_length(input)?;
    if len < 4 {
        return Ok((rest, &rest[..0]));
    }
    take(len - 4)(rest)
}

/// The message of a server `ERR` packet at the start of `response`, if that is what it holds.
pub(crate) fn error_packet(response: &[u8]) -> Option<String> {
    let (_, payload) = decode_packet(response).ok()?;
    if payload.starts_with(ERR_PREFIX) {
        let msg = String::from_utf8_lossy(&payload[ERR_PREFIX.len()..]);
        Some(msg.trim_end().to_owned())
    } else {
        None
    }
}
