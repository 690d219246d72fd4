use crate::app::services::csv_parser::row_cleaner::{
    best_delimiter, clean, looks_like_footer, looks_like_header,
};

#[test]
fn strips_banner_above_the_header_row() {
    let raw = "Favorite Artists,,,\nArtist Name,On-Demand Audio Streams,Week\nDrake,100,01/06/2025";
    let cleaned = clean(raw);
    assert!(cleaned.starts_with("Artist Name,"));
    assert!(!cleaned.contains("Favorite Artists"));
}

#[test]
fn strips_footer_and_trailing_blank_lines() {
    let raw = "Artist,Streams,Week\nDrake,100,01/06/2025\n\nCopyright (c) Vendor Inc\n\n";
    let cleaned = clean(raw);
    assert_eq!(cleaned, "Artist,Streams,Week\nDrake,100,01/06/2025");
}

#[test]
fn leaves_a_plain_file_untouched() {
    let raw = "Artist,Streams,Week\nDrake,100,01/06/2025\nSZA,50,01/06/2025";
    assert_eq!(clean(raw), raw);
}

#[test]
fn keeps_whole_file_when_no_header_is_recognized() {
    let raw = "alpha,beta\n1,2";
    assert_eq!(clean(raw), raw);
}

#[test]
fn strips_leading_byte_order_mark() {
    let raw = "\u{feff}Artist,Streams\nDrake,100";
    assert!(!clean(raw).starts_with('\u{feff}'));
}

#[test]
fn banner_line_is_not_a_header() {
    assert!(!looks_like_header("Favorite Artists,,,"));
    assert!(!looks_like_header("export_2025_01_06,,"));
    assert!(looks_like_header("Artist Name,On-Demand Audio Streams,Week"));
    assert!(looks_like_header("name\tplays\tweek ending"));
}

#[test]
fn footer_detection_covers_copyright_and_vendor_phrases() {
    assert!(looks_like_footer("Copyright (c) Vendor 2025"));
    assert!(looks_like_footer("\u{a9} 2025 Vendor Inc"));
    assert!(looks_like_footer("All rights reserved."));
    assert!(looks_like_footer("Data provided by Luminate"));
    assert!(!looks_like_footer("Drake,100,01/06/2025"));
}

#[test]
fn delimiter_sniffing_counts_outside_quotes() {
    assert_eq!(best_delimiter("a,b,c"), b',');
    assert_eq!(best_delimiter("a\tb\tc"), b'\t');
    assert_eq!(best_delimiter("a;b;c"), b';');
    assert_eq!(best_delimiter("a|b|c"), b'|');
    // Commas inside a quoted cell must not outvote the real delimiter
    assert_eq!(best_delimiter("\"1,234,567\";streams;week"), b';');
    // No delimiter at all falls back to comma
    assert_eq!(best_delimiter("artist"), b',');
}
