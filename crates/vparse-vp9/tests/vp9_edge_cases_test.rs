#![allow(dead_code)]
#![allow(unused_variables)]
#![allow(unused_mut)]
#![allow(unused_comparisons)]
#![allow(unused_doc_comments)]
// Edge case tests for VP9 frame and parsing
use vparse_vp9::{extract_vp9_frames, parse_vp9};

#[test]
fn test_parse_vp9_empty_data() {
    let data: &[u8] = &[];
    let result = parse_vp9(data);
    assert!(result.is_ok());
    let stream = result.unwrap();
    assert_eq!(stream.frame_count(), 0);
}

#[test]
fn test_parse_vp9_no_frames() {
    let data = [0xFF, 0xFF, 0xFF, 0xFF];
    let result = parse_vp9(&data);
    assert!(result.is_ok());
}

#[test]
fn test_parse_vp9_all_zeros() {
    let data = [0x00; 128];
    let result = parse_vp9(&data);
    assert!(result.is_ok() || result.is_err());
}

#[test]
fn test_parse_vp9_all_ones() {
    let data = [0xFF; 128];
    let result = parse_vp9(&data);
    assert!(result.is_ok() || result.is_err());
}

#[test]
fn test_parse_vp9_single_byte() {
    let data = [0x82];
    let result = parse_vp9(&data);
    assert!(result.is_ok() || result.is_err());
}

#[test]
fn test_parse_vp9_two_bytes() {
    let data = [0x82, 0x00];
    let result = parse_vp9(&data);
    assert!(result.is_ok() || result.is_err());
}

#[test]
fn test_parse_vp9_with_superframe_index() {
    let mut data = vec![0u8; 64];
    data[0] = 0x82; // frame_marker + profile + show_frame
    data[1] = 0x49; // sync_code

    let result = parse_vp9(&data);
    assert!(result.is_ok() || result.is_err());
}

#[test]
fn test_parse_vp9_alternating_pattern() {
    let mut data = vec![0u8; 64];
    for i in 0..64 {
        data[i] = if i % 2 == 0 { 0xAA } else { 0x55 };
    }

    let result = parse_vp9(&data);
    assert!(result.is_ok() || result.is_err());
}

#[test]
fn test_parse_vp9_incrementing_data() {
    let mut data = vec![0u8; 64];
    for i in 0..64 {
        data[i] = i as u8;
    }

    let result = parse_vp9(&data);
    assert!(result.is_ok() || result.is_err());
}

#[test]
fn test_extract_vp9_frames_empty() {
    let data: &[u8] = &[];
    let result = extract_vp9_frames(data);
    assert!(result.is_ok());
    let frames = result.unwrap();
    assert_eq!(frames.len(), 0);
}

#[test]
fn test_extract_vp9_frames_no_frames() {
    let data = [0xFF; 32];
    let result = extract_vp9_frames(&data);
    assert!(result.is_ok());
    let frames = result.unwrap();
    assert_eq!(frames.len(), 0);
}

#[test]
fn test_extract_vp9_frames_with_superframe() {
    let mut data = vec![0u8; 128];
    // Minimal frame with marker
    data[0] = 0x82;
    data[1] = 0x49;

    let result = extract_vp9_frames(&data);
    assert!(result.is_ok() || result.is_err());
}

#[test]
fn test_extract_vp9_frames_consecutive_frames() {
    let mut data = vec![0u8; 256];
    // First frame
    data[0] = 0x82;
    data[1] = 0x49;
    // Second frame offset
    data[128] = 0x82;
    data[129] = 0x49;

    let result = extract_vp9_frames(&data);
    assert!(result.is_ok() || result.is_err());
}
