//! Tests for base64 decoding.

use b64_base64::{decode, encode, DecodeError, LINE_BREAK};
use rand::Rng;

fn generate_blob() -> Vec<u8> {
    let mut rng = rand::thread_rng();
    let length = rng.gen_range(1..=300);
    (0..length).map(|_| rng.gen::<u8>()).collect()
}

#[test]
fn works() {
    for _ in 0..100 {
        let blob = generate_blob();
        let encoded = encode(&blob).unwrap();
        assert_eq!(decode(&encoded).unwrap(), blob);
        assert_eq!(decode(encoded.replace(LINE_BREAK, "")).unwrap(), blob);
    }
}

#[test]
fn handles_invalid_values() {
    for _ in 0..100 {
        let blob = generate_blob();
        let encoded = encode(&blob).unwrap();
        let invalid = format!("{encoded}!!!!");
        let result = decode(&invalid);
        assert_eq!(
            result,
            Err(DecodeError::InvalidCharacter {
                character: '!',
                position: encoded.len()
            })
        );
    }
}

#[test]
fn known_vector() {
    assert_eq!(decode("TWFu").unwrap(), [0x4d, 0x61, 0x6e]);
}

#[test]
fn hello_world() {
    assert_eq!(decode("aGVsbG8gd29ybGQ=").unwrap(), b"hello world");
}

#[test]
fn whitespace_anywhere() {
    assert_eq!(decode(" a\tGV\r\nsbG8\ngd2 9ybG\rQ= ").unwrap(), b"hello world");
}

#[test]
fn invalid_character() {
    let err = decode("AB%D").unwrap_err();
    assert_eq!(
        err,
        DecodeError::InvalidCharacter {
            character: '%',
            position: 2
        }
    );
    assert_eq!(err.to_string(), "Invalid character '%' at position 2");
}

#[test]
fn truncated() {
    assert_eq!(decode("QQ"), Err(DecodeError::TruncatedInput { leftover: 2 }));
}

#[test]
fn misplaced_padding() {
    assert!(matches!(decode("A=AA"), Err(DecodeError::InvalidPadding { .. })));
}

#[test]
fn bytes_input() {
    assert_eq!(decode(b"Zm9v".as_slice()).unwrap(), b"foo");
    assert_eq!(decode(b"Zm9v".to_vec()).unwrap(), b"foo");
}
