//! MPEG audio decoding check for a single segment.
//!
//! A segment is demuxed and every frame is run through the MP3 decoder.
//! Only frames the decoder accepts are kept, byte for byte, so the assembled
//! file is built from audio that is known to play.

use std::io::{self, Cursor};

use symphonia::core::codecs::{CODEC_TYPE_MP3, DecoderOptions};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use tracing::debug;

/// Frames of one segment that decoded cleanly.
#[derive(Debug, Default)]
pub struct DecodedFrames {
    /// Raw frame bytes (header included), in stream order.
    pub data: Vec<u8>,
    pub frames: usize,
    /// Frames the demuxer found but the decoder refused.
    pub rejected: usize,
}

/// Decode `body` as an MP3 stream and collect its playable frames.
///
/// Fails when the data is not recognized as MPEG audio at all or when no
/// frame in it decodes.
pub fn decode_frames(body: &[u8]) -> Result<DecodedFrames, SymphoniaError> {
    let source = MediaSourceStream::new(Box::new(Cursor::new(body.to_vec())), Default::default());
    let mut hint = Hint::new();
    hint.with_extension("mp3");

    let probed = symphonia::default::get_probe().format(
        &hint,
        source,
        &FormatOptions::default(),
        &MetadataOptions::default(),
    )?;
    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec == CODEC_TYPE_MP3)
        .ok_or(SymphoniaError::Unsupported("no MP3 track"))?;
    let track_id = track.id;
    let mut decoder =
        symphonia::default::get_codecs().make(&track.codec_params, &DecoderOptions::default())?;

    let mut decoded = DecodedFrames::default();
    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::IoError(e)) if e.kind() == io::ErrorKind::UnexpectedEof => break,
            Err(SymphoniaError::ResetRequired) => break,
            Err(e) => return Err(e),
        };
        if packet.track_id() != track_id {
            continue;
        }
        match decoder.decode(&packet) {
            Ok(_) => {
                decoded.data.extend_from_slice(packet.buf());
                decoded.frames += 1;
            }
            Err(SymphoniaError::DecodeError(reason)) => {
                debug!(reason, "Frame rejected by decoder");
                decoded.rejected += 1;
            }
            Err(e) => return Err(e),
        }
    }

    if decoded.frames == 0 {
        return Err(SymphoniaError::DecodeError("no decodable frames"));
    }
    Ok(decoded)
}
