use super::*;
use crate::core::persistence::THEME_KEY;
use crate::core::reveal::RevealMode;
use tempfile::TempDir;

fn parse_args(argv: &[&str]) -> Args {
    Args::try_parse_from(argv)
        .unwrap_or_else(|err| panic!("argv={argv:?} should parse successfully: {err}"))
}

#[test]
fn no_subcommand_means_chat() {
    let args = parse_args(&["network-chat"]);
    assert!(args.command.is_none());
    assert!(!args.instant);
    assert!(!args.ephemeral);
}

#[test]
fn global_flags_are_accepted_after_subcommand() {
    let args = parse_args(&[
        "network-chat",
        "chat",
        "--endpoint",
        "http://agent.test/api",
        "--instant",
        "--log",
        "chat.log",
    ]);
    assert!(matches!(args.command, Some(Commands::Chat)));
    assert_eq!(args.endpoint.as_deref(), Some("http://agent.test/api"));
    assert_eq!(args.log, Some(PathBuf::from("chat.log")));

    let overrides = args.overrides();
    assert!(overrides.instant_reveal);
    let settings = Config::default().resolve_with_env(&overrides, None);
    assert_eq!(settings.endpoint, "http://agent.test/api");
    assert_eq!(settings.reveal_mode, RevealMode::Instant);
}

#[test]
fn say_collects_the_whole_prompt() {
    let args = parse_args(&["network-chat", "say", "who", "won", "today?"]);
    match args.command {
        Some(Commands::Say { prompt }) => {
            assert_eq!(prompt.join(" "), "who won today?");
        }
        _ => panic!("expected say subcommand"),
    }
}

#[test]
fn set_accepts_multi_word_values_and_bare_key() {
    let args = parse_args(&["network-chat", "set", "endpoint", "http://agent.test"]);
    match args.command {
        Some(Commands::Set { key, value }) => {
            assert_eq!(key, "endpoint");
            assert_eq!(value, Some(vec!["http://agent.test".to_string()]));
        }
        _ => panic!("expected set subcommand"),
    }

    let args = parse_args(&["network-chat", "set", "reveal"]);
    assert!(matches!(
        args.command,
        Some(Commands::Set { value: None, .. })
    ));
}

#[test]
fn ephemeral_store_never_touches_disk() {
    let dir = TempDir::new().expect("tempdir");
    let settings = Config {
        data_dir: Some(dir.path().join("state")),
        ..Config::default()
    }
    .resolve_with_env(&SettingsOverrides::default(), None);

    let store = open_persistence(&settings, true).expect("store");
    store.set(THEME_KEY, "light").expect("write");
    assert!(!dir.path().join("state").exists());
}

#[test]
fn file_store_uses_configured_data_dir() {
    let dir = TempDir::new().expect("tempdir");
    let settings = Config::default().resolve_with_env(
        &SettingsOverrides {
            data_dir: Some(dir.path().join("state")),
            ..SettingsOverrides::default()
        },
        None,
    );

    let store = open_persistence(&settings, false).expect("store");
    store.set(THEME_KEY, "light").expect("write");
    assert!(dir.path().join("state").join(THEME_KEY).exists());
}
