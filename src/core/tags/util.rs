//! core/tags/util.rs
//! Small parsing helpers shared by tag reading/writing.

/// ID3 text frames may carry several values separated by NUL.
/// The editor only shows (and writes) the first one.
pub(crate) fn first_value(s: &str) -> String {
    s.split('\0').next().unwrap_or("").to_string()
}

/// Total byte length of a leading ID3v2 tag (header + body + footer),
/// given the first 10 bytes of a file. `None` if there is no tag.
pub(crate) fn id3v2_tag_len(header: &[u8]) -> Option<u64> {
    if header.len() < 10 || &header[0..3] != b"ID3" {
        return None;
    }

    // Size is a 28-bit "syncsafe" integer: 7 useful bits per byte.
    let mut size: u64 = 0;
    for &b in &header[6..10] {
        if b & 0x80 != 0 {
            return None;
        }
        size = (size << 7) | u64::from(b);
    }

    let has_footer = header[5] & 0x10 != 0;
    Some(10 + size + if has_footer { 10 } else { 0 })
}

/// Leading integer of strings like "3", "03/12", "1998-05-01".
pub(crate) fn leading_number(s: &str) -> Option<u64> {
    let digits: String = s
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_value_drops_extra_nul_separated_values() {
        assert_eq!(first_value("Rock\0Pop"), "Rock");
        assert_eq!(first_value("Rock"), "Rock");
        assert_eq!(first_value(""), "");
    }

    #[test]
    fn id3v2_len_decodes_syncsafe_size() {
        // size bytes 0x00 0x00 0x02 0x01 => (2 << 7) | 1 = 257
        let h = [b'I', b'D', b'3', 4, 0, 0, 0, 0, 2, 1];
        assert_eq!(id3v2_tag_len(&h), Some(267));

        let with_footer = [b'I', b'D', b'3', 4, 0, 0x10, 0, 0, 0, 5];
        assert_eq!(id3v2_tag_len(&with_footer), Some(25));

        assert_eq!(id3v2_tag_len(&[0xFF, 0xFB, 0x90, 0, 0, 0, 0, 0, 0, 0]), None);
        assert_eq!(id3v2_tag_len(b"ID3"), None);
    }

    #[test]
    fn leading_number_parses_track_and_date_shapes() {
        assert_eq!(leading_number("3"), Some(3));
        assert_eq!(leading_number(" 03/12"), Some(3));
        assert_eq!(leading_number("1998-05-01"), Some(1998));
        assert_eq!(leading_number("side A"), None);
    }
}
