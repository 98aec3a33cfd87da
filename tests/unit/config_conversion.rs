use assert_matches::assert_matches;
use pretty_assertions::assert_eq;
use retroconv::conversion::{ConversionConfig, ConversionEngine};
use retroconv::error::{ConversionError, ConversionErrorKind};
use retroconv::parser::ConfigSource;
use retroconv::{convert_xml, TypedValue};
use std::io::Write;
use tempfile::NamedTempFile;

const GAME_CONFIG: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<config>
  <DisplaySettings FullScreen="true" Width="1920" Gamma="1.2" WindowTitle="MyGame"/>
  <Audio>
    <sound_volume>75</sound_volume>
    <MusicEnabled>false</MusicEnabled>
  </Audio>
</config>"#;

#[test]
fn test_sections_and_settings_are_normalized() {
    let engine = ConversionEngine::new(ConversionConfig::default());
    let data = engine.convert_str(GAME_CONFIG).unwrap();

    let display = data.document.section("display_settings").unwrap();
    assert_eq!(display.get("full_screen"), Some(&TypedValue::Boolean(true)));
    assert_eq!(display.get("width"), Some(&TypedValue::Integer(1920)));
    assert_eq!(display.get("gamma"), Some(&TypedValue::Float(1.2)));

    let audio = data.document.section("audio").unwrap();
    assert_eq!(audio.get("sound_volume"), Some(&TypedValue::Integer(75)));
    assert_eq!(audio.get("music_enabled"), Some(&TypedValue::Boolean(false)));

    assert_eq!(data.metadata.section_count, 2);
    assert_eq!(data.metadata.setting_count, 6);
}

#[test]
fn test_output_parses_back_as_toml() {
    let toml_text = convert_xml(GAME_CONFIG).unwrap();
    let table: toml::Table = toml_text.parse().unwrap();

    let display = table["display_settings"].as_table().unwrap();
    assert_eq!(display["full_screen"].as_bool(), Some(true));
    assert_eq!(display["width"].as_integer(), Some(1920));
    assert_eq!(display["gamma"].as_float(), Some(1.2));
    assert_eq!(display["window_title"].as_str(), Some("MyGame"));
    assert_eq!(table["audio"]["sound_volume"].as_integer(), Some(75));
}

#[test]
fn test_section_order_is_preserved() {
    let xml = r#"<config><Zeta A="1"/><Alpha B="2"/><Mid C="3"/></config>"#;
    let toml_text = convert_xml(xml).unwrap();

    let zeta = toml_text.find("[zeta]").unwrap();
    let alpha = toml_text.find("[alpha]").unwrap();
    let mid = toml_text.find("[mid]").unwrap();
    assert!(zeta < alpha && alpha < mid);
}

#[test]
fn test_strings_only_mode() {
    let engine = ConversionEngine::new(ConversionConfig::strings_only());
    let data = engine.convert_str(GAME_CONFIG).unwrap();

    let display = data.document.section("display_settings").unwrap();
    assert_eq!(display.get("full_screen"), Some(&TypedValue::String("true".into())));
    assert_eq!(display.get("width"), Some(&TypedValue::String("1920".into())));
}

#[test]
fn test_namespaced_names_are_stripped() {
    let xml = r#"<cfg:config xmlns:cfg="urn:game"><cfg:Video cfg:VSync="true"/></cfg:config>"#;
    let engine = ConversionEngine::new(ConversionConfig::default());
    let data = engine.convert_str(xml).unwrap();

    let video = data.document.section("video").unwrap();
    assert_eq!(video.get("v_sync"), Some(&TypedValue::Boolean(true)));
}

#[test]
fn test_key_collision_is_reported() {
    let xml = r#"<config><Input MouseSpeed="1" mouse_speed="2"/></config>"#;
    let engine = ConversionEngine::new(ConversionConfig::default());
    let err = engine.convert_str(xml).unwrap_err();

    assert_matches!(
        err.kind(),
        Some(ConversionErrorKind::KeyCollision { key, .. }) if key == "mouse_speed"
    );
}

#[test]
fn test_malformed_xml_is_parse_error() {
    let engine = ConversionEngine::new(ConversionConfig::default());
    let err = engine.convert_str("<config><Audio Volume=\"1\"></config>").unwrap_err();
    assert_matches!(err, ConversionError::ParseError(_));
}

#[test]
fn test_wrong_root_is_parse_error() {
    let engine = ConversionEngine::new(ConversionConfig::default());
    let err = engine.convert_str(r#"<settings><Audio Volume="1"/></settings>"#).unwrap_err();
    assert!(err.user_message().contains("<config>"));
}

#[test]
fn test_file_source() {
    let mut tmp = NamedTempFile::new().unwrap();
    write!(tmp, r#"<config><Net Port="7777" Host="localhost"/></config>"#).unwrap();

    let engine = ConversionEngine::new(ConversionConfig::default());
    let data = engine
        .convert_from_source(&ConfigSource::File(tmp.path().to_path_buf()))
        .unwrap();

    let net = data.document.section("net").unwrap();
    assert_eq!(net.get("port"), Some(&TypedValue::Integer(7777)));
    assert_eq!(net.get("host"), Some(&TypedValue::String("localhost".into())));
}

#[test]
fn test_source_over_memory_limit() {
    let mut tmp = NamedTempFile::new().unwrap();
    let padding = "x".repeat(4096);
    write!(tmp, r#"<config><Big Blob="{}"/></config>"#, padding).unwrap();

    let config = ConversionConfig::default().with_memory_limit(1024);
    let engine = ConversionEngine::new(config);
    let err = engine
        .convert_from_source(&ConfigSource::File(tmp.path().to_path_buf()))
        .unwrap_err();
    assert_matches!(err.kind(), Some(ConversionErrorKind::SourceTooLarge { .. }));
}
