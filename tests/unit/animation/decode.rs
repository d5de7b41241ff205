use super::*;

use std::borrow::Cow;

// index 0 = red, index 1 = blue
const PALETTE: [u8; 6] = [255, 0, 0, 0, 0, 255];

fn encode_gif(frames: &[(Vec<u8>, gif::DisposalMethod)]) -> Vec<u8> {
    let mut bytes = Vec::new();
    {
        let mut encoder = gif::Encoder::new(&mut bytes, 2, 1, &PALETTE).unwrap();
        for (pixels, dispose) in frames {
            let mut frame = gif::Frame::default();
            frame.width = 2;
            frame.height = 1;
            frame.buffer = Cow::Borrowed(pixels.as_slice());
            frame.dispose = *dispose;
            encoder.write_frame(&frame).unwrap();
        }
    }
    bytes
}

#[test]
fn decodes_frames_and_disposals_in_lock_step() {
    let bytes = encode_gif(&[
        (vec![0, 0], gif::DisposalMethod::Keep),
        (vec![1, 1], gif::DisposalMethod::Background),
        (vec![0, 1], gif::DisposalMethod::Previous),
    ]);

    let anim = decode_animation(&bytes[..]).unwrap();
    assert_eq!(anim.screen_width, 2);
    assert_eq!(anim.screen_height, 1);
    assert_eq!(anim.len(), 3);
    assert_eq!(anim.disposals.len(), 3);
    assert_eq!(anim.disposal(0), Disposal::Keep);
    assert_eq!(anim.disposal(1), Disposal::Background);
    assert_eq!(anim.disposal(2), Disposal::Previous);
    assert_eq!(anim.frames[0].pixels, vec![0, 0]);
    assert_eq!(anim.frames[2].pixels, vec![0, 1]);
}

#[test]
fn frames_fall_back_to_the_global_palette() {
    let bytes = encode_gif(&[(vec![0, 1], gif::DisposalMethod::Keep)]);
    let anim = decode_animation(&bytes[..]).unwrap();

    let palette = &anim.frames[0].palette;
    assert_eq!(&palette[..3], &[255, 0, 0]);
    assert_eq!(&palette[3..6], &[0, 0, 255]);
}

#[test]
fn transparent_index_survives_decoding() {
    let mut bytes = Vec::new();
    {
        let mut encoder = gif::Encoder::new(&mut bytes, 1, 1, &PALETTE).unwrap();
        let mut frame = gif::Frame::default();
        frame.width = 1;
        frame.height = 1;
        frame.buffer = Cow::Borrowed(&[1]);
        frame.transparent = Some(1);
        encoder.write_frame(&frame).unwrap();
    }

    let anim = decode_animation(&bytes[..]).unwrap();
    assert_eq!(anim.frames[0].transparent, Some(1));
    assert_eq!(anim.frames[0].rgba_at(0, 0), [0, 0, 0, 0]);
}

#[test]
fn frame_rect_preserves_patch_placement() {
    let mut bytes = Vec::new();
    {
        let mut encoder = gif::Encoder::new(&mut bytes, 4, 3, &PALETTE).unwrap();
        let mut frame = gif::Frame::default();
        frame.left = 2;
        frame.top = 1;
        frame.width = 2;
        frame.height = 2;
        frame.buffer = Cow::Borrowed(&[0, 1, 1, 0]);
        encoder.write_frame(&frame).unwrap();
    }

    let anim = decode_animation(&bytes[..]).unwrap();
    let rect = anim.frames[0].rect;
    assert_eq!((rect.left, rect.top, rect.width, rect.height), (2, 1, 2, 2));
}

#[test]
fn garbage_input_is_a_decode_error() {
    let err = decode_animation(&b"not a gif at all"[..]).unwrap_err();
    assert!(matches!(err, GifstillError::Decode(_)));
}

#[test]
fn truncated_stream_is_a_decode_error() {
    let bytes = encode_gif(&[(vec![0, 1], gif::DisposalMethod::Keep)]);
    let err = decode_animation(&bytes[..bytes.len() / 2]).unwrap_err();
    assert!(matches!(err, GifstillError::Decode(_)));
}
