use super::display::display_from_fields;
use super::scan::is_audio_file;
use super::*;
use crate::bridge::TrackMetadata;
use crate::config::{LibrarySettings, TrackDisplayField};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

#[test]
fn display_from_fields_can_format_title_artist() {
    let p = Path::new("/tmp/Song.mp3");
    assert_eq!(
        display_from_fields(
            p,
            "Song",
            "Artist",
            &[TrackDisplayField::Title, TrackDisplayField::Artist],
            " - ",
        ),
        "Song - Artist"
    );
    assert_eq!(
        display_from_fields(
            p,
            "Song",
            "  Artist  ",
            &[TrackDisplayField::Artist, TrackDisplayField::Title],
            " - ",
        ),
        "Artist - Song"
    );
    assert_eq!(
        display_from_fields(p, "Song", "Artist", &[TrackDisplayField::Filename], " - "),
        "Song.mp3"
    );
    assert_eq!(display_from_fields(p, "Song", "Artist", &[], " - "), "Song");
}

#[test]
fn from_metadata_generates_distinct_ids() {
    let settings = LibrarySettings::default();
    let meta = TrackMetadata {
        title: "Song".into(),
        artist: "Unknown".into(),
        lyrics: Some("la la".into()),
        duration: Some(12.5),
    };

    let a = Track::from_metadata(PathBuf::from("/music/a.mp3"), meta.clone(), &settings);
    let b = Track::from_metadata(PathBuf::from("/music/a.mp3"), meta, &settings);

    assert_ne!(a.id, b.id);
    assert_eq!(a.display, "Song - Unknown");
    assert_eq!(a.lyrics.as_deref(), Some("la la"));
    assert_eq!(a.duration, Some(12.5));
    assert!(a.artwork.is_none());
}

#[test]
fn is_audio_file_matches_configured_extensions_case_insensitive() {
    let settings = LibrarySettings::default();
    assert!(is_audio_file(Path::new("/tmp/a.mp3"), &settings));
    assert!(is_audio_file(Path::new("/tmp/a.MP3"), &settings));
    assert!(is_audio_file(Path::new("/tmp/a.m4a"), &settings));
    assert!(is_audio_file(Path::new("/tmp/a.flac"), &settings));
    assert!(is_audio_file(Path::new("/tmp/a.aac"), &settings));
    assert!(!is_audio_file(Path::new("/tmp/a.mp3.txt"), &settings));
    assert!(!is_audio_file(Path::new("/tmp/a"), &settings));
}

#[test]
fn expand_paths_keeps_file_order_and_sorts_directory_hits() {
    let dir = tempdir().unwrap();
    let album = dir.path().join("album");
    fs::create_dir_all(&album).unwrap();
    fs::write(album.join("b.ogg"), b"not real").unwrap();
    fs::write(album.join("a.MP3"), b"not real").unwrap();
    fs::write(album.join("a.MP3.txt"), b"lyrics").unwrap();

    let single = dir.path().join("z.wav");
    fs::write(&single, b"not real").unwrap();

    let settings = LibrarySettings::default();
    let out = expand_paths(
        &[single.clone(), album.clone(), dir.path().join("missing.mp3")],
        &settings,
    );

    assert_eq!(out, vec![single, album.join("a.MP3"), album.join("b.ogg")]);
}

#[test]
fn expand_paths_respects_hidden_and_recursion_settings() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join(".hidden.mp3"), b"not real").unwrap();
    fs::write(dir.path().join("root.mp3"), b"not real").unwrap();
    let sub = dir.path().join("sub");
    fs::create_dir_all(&sub).unwrap();
    fs::write(sub.join("child.mp3"), b"not real").unwrap();

    let flat = LibrarySettings {
        recursive: false,
        ..LibrarySettings::default()
    };
    let out = expand_paths(&[dir.path().to_path_buf()], &flat);
    assert_eq!(out, vec![dir.path().join("root.mp3")]);

    let everything = LibrarySettings {
        include_hidden: true,
        ..LibrarySettings::default()
    };
    let out = expand_paths(&[dir.path().to_path_buf()], &everything);
    assert_eq!(out.len(), 3);
}
