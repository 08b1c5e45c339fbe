use cmb_body_expander::{CommandBuffer, Error, CMD_MAX_LENGTH, CMD_MAX_PAYLOAD};

#[test]
fn capacity_is_sixty_four_with_terminator() {
    assert_eq!(CMD_MAX_LENGTH, 64);
    assert_eq!(CMD_MAX_PAYLOAD, 63);
}

#[test]
fn sixty_four_byte_command_is_rejected() {
    let mut buffer = CommandBuffer::new();
    let oversized = [b'A'; 64];
    assert_eq!(
        buffer.extend_from_slice(&oversized),
        Err(Error::CommandTooLong {
            capacity: 63,
            attempted: 64
        })
    );
    assert!(buffer.is_empty());

    let fits = [b'A'; 63];
    buffer.extend_from_slice(&fits).unwrap();
    assert_eq!(buffer.len(), 63);
}

#[test]
fn byte_stream_stops_at_the_bound() {
    let mut buffer = CommandBuffer::new();
    let accepted = (0..100u8)
        .map(|i| buffer.push(b'0' + i % 10))
        .take_while(Result::is_ok)
        .count();
    assert_eq!(accepted, CMD_MAX_PAYLOAD);
    assert!(buffer.as_str().unwrap().starts_with("0123456789"));
}

#[test]
fn text_round_trip() {
    let buffer = CommandBuffer::try_from(":OP00").unwrap();
    assert_eq!(buffer.as_str(), Ok(":OP00"));
    assert!(CommandBuffer::try_from("x".repeat(64).as_str()).is_err());
}
