// tests/index_tests.rs

mod common;

use chrono::NaiveDate;
use marias::index::{read, OptionToken};
use marias::{DocumentError, HundredRule, IndexDocument, Play, SyntaxError};

#[test]
fn test_read_header_and_options() {
    let document = read(common::FLEKY).unwrap();
    assert_eq!(document.date, NaiveDate::from_ymd_opt(2024, 3, 14));
    assert_eq!(document.place, "U Fleků");
    assert_eq!(
        document.options,
        vec![
            OptionToken {
                text: "hundred=add".to_string(),
                offset: 20,
            },
            OptionToken {
                text: "multiplier=2".to_string(),
                offset: 32,
            },
        ]
    );
    assert_eq!(document.scoring.hundred_rule, HundredRule::Additive);
    assert_eq!(document.scoring.stake_multiplier, 2);
}

#[test]
fn test_read_groups_players_and_offsets() {
    let document = read(common::FLEKY).unwrap();
    assert_eq!(document.groups.len(), 2);
    assert_eq!(document.groups[0].len(), 3);
    assert_eq!(document.groups[1].len(), 4);

    let franta = document.groups[0].player("Franta").unwrap();
    assert_eq!(franta.plays[1], Play::new("+c", 71));

    let mirek = document.groups[1].player("Mirek").unwrap();
    assert_eq!(mirek.start, 109);
    assert!(document.groups[1].player("Jarda").unwrap().plays.is_empty());

    assert_eq!(document.player_names(), vec!["Pepa", "Franta", "Jarda", "Mirek"]);
    assert_eq!(document.play_count(), 7);
}

#[test]
fn test_from_str() {
    let document: IndexDocument = common::RUZEK.parse().unwrap();
    assert_eq!(document.date, NaiveDate::from_ymd_opt(2024, 4, 4));
    assert_eq!(document.scoring.hundred_rule, HundredRule::Multiplicative);
}

#[test]
fn test_unknown_option() {
    let err = read("2024-03-14 U Fleků {hundred=add multiplier=3}\nA\nB\nC").unwrap_err();
    assert_eq!(
        err,
        DocumentError::UnknownIndexOption {
            option: "multiplier=3".to_string(),
            offset: 32,
        }
    );
}

#[test]
fn test_first_error_wins() {
    // Player checks of a group run before its plays are scored.
    let err = read("2024-03-14 Praha\nA +k105\nB\nA").unwrap_err();
    assert!(matches!(
        err,
        DocumentError::DuplicatePlayer { ref name, .. } if name == "A"
    ));

    let err = read("2024-03-14 Praha\nA +k105\nB\nC").unwrap_err();
    assert!(matches!(
        err,
        DocumentError::InvalidPlay {
            source: SyntaxError::ScoreNotMultipleOfTen,
            ..
        }
    ));
}

#[test]
fn test_unterminated_comment_is_rejected_as_play() {
    let err = read("2024-03-14 Praha\nA e{oops\nB\nC").unwrap_err();
    assert!(matches!(err, DocumentError::InvalidPlay { play: 1, .. }));
}

#[test]
fn test_trailing_blank_lines_do_not_open_groups() {
    let document = read(&format!("{}\n\n\n", common::RUZEK)).unwrap();
    assert_eq!(document.groups.len(), 1);
}

#[test]
fn test_windows_line_endings() {
    let text = common::RUZEK.replace('\n', "\r\n");
    let document = read(&text).unwrap();
    assert_eq!(document.place, "Na Růžku");
    assert_eq!(document.groups[0].players[2].name, "Franta");
}

#[test]
fn test_whitespace_line_separates_groups() {
    let text = common::FLEKY.replacen("\n\n", "\n  \t\n", 1);
    let document = read(&text).unwrap();
    assert_eq!(document.groups.len(), 2);
    assert_eq!(document.groups[1].players[0].name, "Pepa");
}

#[test]
fn test_byte_order_mark_before_the_date() {
    let document = read(&format!("\u{feff}{}", common::RUZEK)).unwrap();
    assert_eq!(document.date, NaiveDate::from_ymd_opt(2024, 4, 4));
    assert_eq!(document.place, "Na Růžku");
    assert!(read("\u{feff}").unwrap().groups.is_empty());
}
