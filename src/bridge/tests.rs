use super::lyrics::sidecar_path;
use super::media::mime_for_path;
use super::metadata::{UNKNOWN_ARTIST, read_metadata};
use super::*;
use crate::config::LibrarySettings;
use lofty::config::WriteOptions;
use lofty::file::{AudioFile, TaggedFileExt};
use lofty::prelude::Accessor;
use lofty::tag::{ItemKey, ItemValue, Tag, TagItem, TagType};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

/// A FLAC stream with a STREAMINFO block only: one second of 44.1kHz
/// 16-bit stereo and no audio frames. Enough for the tag reader.
fn bare_flac() -> Vec<u8> {
    let mut out = b"fLaC".to_vec();
    // Last metadata block, type STREAMINFO, 34 bytes long.
    out.extend_from_slice(&[0x80, 0x00, 0x00, 34]);
    // Min/max block size.
    out.extend_from_slice(&4096u16.to_be_bytes());
    out.extend_from_slice(&4096u16.to_be_bytes());
    // Min/max frame size (unknown).
    out.extend_from_slice(&[0; 6]);
    // Sample rate (20 bits), channels - 1 (3), bits per sample - 1 (5), total samples (36).
    let packed: u64 = (44_100u64 << 44) | (1 << 41) | (15 << 36) | 44_100;
    out.extend_from_slice(&packed.to_be_bytes());
    // MD5 of the (empty) audio data.
    out.extend_from_slice(&[0; 16]);
    out
}

#[test]
fn mime_for_path_follows_extension() {
    assert_eq!(mime_for_path(Path::new("/m/a.m4a")), "audio/mp4");
    assert_eq!(mime_for_path(Path::new("/m/a.MP4")), "audio/mp4");
    assert_eq!(mime_for_path(Path::new("/m/a.wav")), "audio/wav");
    assert_eq!(mime_for_path(Path::new("/m/a.ogg")), "audio/ogg");
    assert_eq!(mime_for_path(Path::new("/m/a.Flac")), "audio/flac");
    assert_eq!(mime_for_path(Path::new("/m/a.mp3")), "audio/mpeg");
    assert_eq!(mime_for_path(Path::new("/m/a.aac")), "audio/mpeg");
    assert_eq!(mime_for_path(Path::new("/m/noext")), "audio/mpeg");
}

#[test]
fn sidecar_path_appends_txt() {
    assert_eq!(
        sidecar_path(Path::new("/music/song.mp3")),
        Path::new("/music/song.mp3.txt")
    );
}

#[test]
fn save_lyrics_writes_sidecar_verbatim_and_overwrites() {
    let dir = tempdir().unwrap();
    let audio = dir.path().join("song.mp3");
    fs::write(&audio, b"audio bytes").unwrap();

    let bridge = NativeBridge::new(&LibrarySettings::default());
    let text = "first line\n  second line  \n\nüñí";
    assert!(bridge.save_lyrics(&audio, text));
    assert_eq!(
        fs::read_to_string(dir.path().join("song.mp3.txt")).unwrap(),
        text
    );

    assert!(bridge.save_lyrics(&audio, "short"));
    assert_eq!(bridge.read_sidecar_lyrics(&audio).as_deref(), Some("short"));

    // The audio file itself is untouched.
    assert_eq!(fs::read(&audio).unwrap(), b"audio bytes");
}

#[test]
fn save_lyrics_reports_false_when_unwritable() {
    let dir = tempdir().unwrap();
    let audio = dir.path().join("missing-dir").join("song.mp3");

    let bridge = NativeBridge::new(&LibrarySettings::default());
    assert!(!bridge.save_lyrics(&audio, "text"));
}

#[test]
fn read_sidecar_lyrics_is_none_without_file() {
    let dir = tempdir().unwrap();
    let bridge = NativeBridge::new(&LibrarySettings::default());
    assert!(bridge.read_sidecar_lyrics(&dir.path().join("x.mp3")).is_none());
}

#[test]
fn read_metadata_falls_back_for_untagged_files() {
    let dir = tempdir().unwrap();
    let audio = dir.path().join("My Song.mp3");
    fs::write(&audio, b"not a real mp3").unwrap();

    let meta = read_metadata(&audio);
    assert_eq!(meta.title, "My Song.mp3");
    assert_eq!(meta.artist, UNKNOWN_ARTIST);
    assert!(meta.lyrics.is_none());

    let missing = read_metadata(&dir.path().join("gone.flac"));
    assert_eq!(missing, TrackMetadata::fallback(&dir.path().join("gone.flac")));
    assert_eq!(missing.title, "gone.flac");
}

#[test]
fn read_metadata_prefers_tag_values_and_joins_lyrics() {
    let dir = tempdir().unwrap();
    let audio = dir.path().join("track01.flac");
    fs::write(&audio, bare_flac()).unwrap();

    let mut tagged = lofty::read_from_path(&audio).unwrap();
    let mut tag = Tag::new(TagType::VorbisComments);
    tag.set_title("Blue Hour".to_string());
    tag.set_artist("The Quiet Rooms".to_string());
    tag.push(TagItem::new(ItemKey::Lyrics, ItemValue::Text("a".to_string())));
    tag.push(TagItem::new(ItemKey::Lyrics, ItemValue::Text("b".to_string())));
    tagged.insert_tag(tag);
    tagged
        .save_to_path(&audio, WriteOptions::default())
        .unwrap();

    let meta = read_metadata(&audio);
    assert_eq!(meta.title, "Blue Hour");
    assert_eq!(meta.artist, "The Quiet Rooms");
    assert_eq!(meta.lyrics.as_deref(), Some("a\nb"));
    let secs = meta.duration.unwrap();
    assert!((secs - 1.0).abs() < 0.01, "duration was {secs}");

    // The bridge hands back the same values.
    let bridge = NativeBridge::new(&LibrarySettings::default());
    assert_eq!(bridge.read_metadata(&audio), meta);
}

#[test]
fn read_metadata_keeps_fallbacks_for_blank_tag_fields() {
    let dir = tempdir().unwrap();
    let audio = dir.path().join("untitled.flac");
    fs::write(&audio, bare_flac()).unwrap();

    let mut tagged = lofty::read_from_path(&audio).unwrap();
    let mut tag = Tag::new(TagType::VorbisComments);
    tag.set_title("   ".to_string());
    tag.set_album("Only an album".to_string());
    tagged.insert_tag(tag);
    tagged
        .save_to_path(&audio, WriteOptions::default())
        .unwrap();

    let meta = read_metadata(&audio);
    assert_eq!(meta.title, "untitled.flac");
    assert_eq!(meta.artist, UNKNOWN_ARTIST);
    assert!(meta.lyrics.is_none());
}

#[test]
fn read_media_carries_bytes_and_mime() {
    let dir = tempdir().unwrap();
    let audio = dir.path().join("clip.ogg");
    fs::write(&audio, b"OggS").unwrap();

    let bridge = NativeBridge::new(&LibrarySettings::default());
    let source = bridge.read_media(&audio).unwrap();
    assert_eq!(&source.bytes[..], b"OggS");
    assert_eq!(source.mime, "audio/ogg");
}

#[test]
fn read_media_propagates_missing_file() {
    let dir = tempdir().unwrap();
    let bridge = NativeBridge::new(&LibrarySettings::default());
    let err = bridge.read_media(&dir.path().join("nope.mp3")).unwrap_err();
    assert!(matches!(err, BridgeError::Read { .. }));
}
