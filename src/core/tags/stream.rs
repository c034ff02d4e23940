//! core/tags/stream.rs
//! Stream facts (duration, average bit rate) via a Symphonia probe.
//!
//! The probe is also the "is this really an audio container?" check:
//! a file that Symphonia cannot open never makes it into the working set.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use symphonia::core::formats::FormatOptions;
use symphonia::core::io::{MediaSourceStream, MediaSourceStreamOptions};
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use symphonia::core::units::TimeBase;

use super::super::types::StreamInfo;
use super::util::id3v2_tag_len;

pub(crate) fn probe_stream(path: &Path) -> Result<StreamInfo, String> {
    let file = File::open(path).map_err(|e| format!("Open failed: {e}"))?;
    let file_len = file.metadata().map(|m| m.len()).ok();
    let mss = MediaSourceStream::new(Box::new(file), MediaSourceStreamOptions::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| format!("Format probe failed: {e}"))?;

    let track = probed
        .format
        .default_track()
        .ok_or_else(|| "No supported audio track found.".to_string())?;

    let params = &track.codec_params;
    let duration_ms = duration_from_params(params.time_base, params.n_frames);

    let tag_len = leading_tag_len(path);
    let bitrate_kbps = match (file_len, duration_ms) {
        (Some(len), Some(ms)) if ms > 0 => Some(average_kbps(len.saturating_sub(tag_len), ms)),
        _ => None,
    };

    Ok(StreamInfo {
        duration_ms,
        bitrate_kbps,
    })
}

fn duration_from_params(time_base: Option<TimeBase>, n_frames: Option<u64>) -> Option<u64> {
    let tb = time_base?;
    let frames = n_frames?;

    let t = tb.calc_time(frames);
    let ms = (t.seconds as f64 * 1000.0) + (t.frac * 1000.0);
    Some(ms.round() as u64)
}

/// bits per millisecond == kbit/s
fn average_kbps(audio_bytes: u64, duration_ms: u64) -> u32 {
    (audio_bytes.saturating_mul(8) / duration_ms) as u32
}

fn leading_tag_len(path: &Path) -> u64 {
    let mut header = [0u8; 10];
    let read = File::open(path).and_then(|mut f| f.read_exact(&mut header));
    match read {
        Ok(()) => id3v2_tag_len(&header).unwrap_or(0),
        Err(_) => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn average_bitrate_is_bits_per_millisecond() {
        // 16_000 bytes over one second == 128 kbit/s
        assert_eq!(average_kbps(16_000, 1_000), 128);
        assert_eq!(average_kbps(0, 1_000), 0);
    }

    #[test]
    fn duration_needs_both_time_base_and_frame_count() {
        let tb = TimeBase::new(1, 44_100);
        assert_eq!(duration_from_params(Some(tb), Some(44_100)), Some(1_000));
        assert_eq!(duration_from_params(None, Some(44_100)), None);
        assert_eq!(duration_from_params(Some(tb), None), None);
    }
}
