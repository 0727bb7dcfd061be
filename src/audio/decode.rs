use base64::{engine::general_purpose::STANDARD, Engine};

use crate::error::Result;

/// Decode a standard-alphabet, padded base64 string into raw bytes.
///
/// An empty string decodes to an empty buffer. Characters outside the
/// alphabet, or a length that is not a multiple of 4, are rejected.
pub fn decode_base64(input: &str) -> Result<Vec<u8>> {
    if input.is_empty() {
        return Ok(Vec::new());
    }
    Ok(STANDARD.decode(input)?)
}

#[cfg(test)]
mod tests {
    use super::decode_base64;
    use crate::error::VoiceError;
    use base64::{engine::general_purpose::STANDARD, Engine};
    use proptest::prelude::*;

    #[test]
    fn empty_string_is_empty_buffer() {
        assert_eq!(decode_base64("").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn drops_bytes_for_padding() {
        assert_eq!(decode_base64("AAA=").unwrap(), vec![0x00, 0x00]);
        assert_eq!(decode_base64("AA==").unwrap(), vec![0x00]);
        assert_eq!(decode_base64("AAAA").unwrap(), vec![0x00, 0x00, 0x00]);
    }

    #[test]
    fn round_trips_arbitrary_bytes() {
        let bytes: Vec<u8> = (0..=255u8).collect();
        let encoded = STANDARD.encode(&bytes);
        assert_eq!(decode_base64(&encoded).unwrap(), bytes);
    }

    #[test]
    fn rejects_characters_outside_alphabet() {
        let err = decode_base64("AA*=").unwrap_err();
        assert!(matches!(err, VoiceError::Decode(_)));
    }

    #[test]
    fn rejects_unpadded_length() {
        assert!(matches!(
            decode_base64("AAA").unwrap_err(),
            VoiceError::Decode(_)
        ));
    }

    proptest! {
        #[test]
        fn decodes_whatever_the_standard_engine_encodes(
            bytes in prop::collection::vec(any::<u8>(), 0..2048)
        ) {
            let encoded = STANDARD.encode(&bytes);
            prop_assert_eq!(decode_base64(&encoded).unwrap(), bytes);
        }
    }
}
