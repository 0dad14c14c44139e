//! ID3 tag detection.
//!
//! Tags are removed before a segment reaches the MP3 demuxer so a trailing
//! ID3v1 block is not mistaken for a truncated frame.

const ID3V2_HEADER_LEN: usize = 10;
const ID3V2_FOOTER_FLAG: u8 = 0x10;
const ID3V1_LEN: usize = 128;

/// Length of a leading ID3v2 tag, including header and optional footer.
///
/// Returns 0 when `data` does not start with a well-formed tag header.
pub fn id3v2_len(data: &[u8]) -> usize {
    if data.len() < ID3V2_HEADER_LEN || &data[..3] != b"ID3" {
        return 0;
    }
    let size_bytes = &data[6..10];
    // Syncsafe: 7 bits per byte, top bit always clear
    if size_bytes.iter().any(|b| b & 0x80 != 0) {
        return 0;
    }
    let size = size_bytes
        .iter()
        .fold(0usize, |acc, b| (acc << 7) | usize::from(*b));
    let footer = if data[5] & ID3V2_FOOTER_FLAG == 0 {
        0
    } else {
        ID3V2_HEADER_LEN
    };
    ID3V2_HEADER_LEN + size + footer
}

/// Whether `data` ends with a 128-byte ID3v1 tag.
pub fn has_id3v1(data: &[u8]) -> bool {
    data.len() >= ID3V1_LEN && &data[data.len() - ID3V1_LEN..][..3] == b"TAG"
}

/// The bytes between a leading ID3v2 tag and a trailing ID3v1 tag.
pub fn strip_tags(data: &[u8]) -> &[u8] {
    let end = if has_id3v1(data) {
        data.len() - ID3V1_LEN
    } else {
        data.len()
    };
    let start = id3v2_len(data).min(end);
    &data[start..end]
}
