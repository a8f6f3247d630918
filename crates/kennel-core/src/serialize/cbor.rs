use crate::serialize::SerializeError;
use serde::{Serialize, de::DeserializeOwned};
use serde_cbor::{from_slice, to_vec};
use std::panic::{AssertUnwindSafe, catch_unwind};

/// Serialize a value into CBOR bytes.
pub(super) fn serialize<T>(t: &T) -> Result<Vec<u8>, SerializeError>
where
    T: Serialize,
{
    to_vec(t).map_err(|e| SerializeError::Serialize(e.to_string()))
}

/// Deserialize CBOR bytes into a value.
///
/// - Input size is bounded before decode.
/// - Any panic during decode is caught and reported as a deserialize error.
pub(super) fn deserialize_bounded<T>(bytes: &[u8], max_bytes: usize) -> Result<T, SerializeError>
where
    T: DeserializeOwned,
{
    if bytes.len() > max_bytes {
        return Err(SerializeError::DeserializeSizeLimitExceeded {
            len: bytes.len(),
            max_bytes,
        });
    }

    let result = catch_unwind(AssertUnwindSafe(|| from_slice(bytes)));

    match result {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(err)) => Err(SerializeError::Deserialize(err.to_string())),
        Err(_) => Err(SerializeError::Deserialize(
            "panic during CBOR deserialization".into(),
        )),
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq, Serialize)]
    struct Row {
        name: String,
        breed: Option<String>,
    }

    #[test]
    fn optional_fields_survive_encoding() {
        let row = Row {
            name: String::new(),
            breed: None,
        };
        let bytes = serialize(&row).expect("encode");

        assert_eq!(deserialize_bounded::<Row>(&bytes, 1024).expect("decode"), row);
    }

    #[test]
    fn oversized_input_is_rejected_before_decode() {
        let err = deserialize_bounded::<Row>(&[0u8; 16], 8).unwrap_err();

        assert!(matches!(
            err,
            SerializeError::DeserializeSizeLimitExceeded {
                len: 16,
                max_bytes: 8
            }
        ));
    }

    #[test]
    fn garbage_is_a_deserialize_error() {
        let err = deserialize_bounded::<Row>(&[0xff, 0x00, 0x13], 1024).unwrap_err();

        assert!(matches!(err, SerializeError::Deserialize(_)));
    }

    proptest::proptest! {
        #[test]
        fn arbitrary_bytes_never_panic(bytes in proptest::collection::vec(proptest::num::u8::ANY, 0..256)) {
            let _ = deserialize_bounded::<Row>(&bytes, 1024);
        }
    }
}
