use super::*;

fn counts(colors: &[DistinctColor]) -> Vec<(String, usize)> {
    colors.iter().map(|c| (c.hex.clone(), c.count)).collect()
}

#[test]
fn per_match_counts_every_scanner_hit() {
    let svg = r##"<rect fill="#00FF00"/><circle fill="rgb(0,255,0)"/>"##;
    let colors = extract(svg, SvgCounting::PerMatch);
    // hex scanner + quoted attribute for the rect, rgb() + quoted attribute for the circle
    assert_eq!(counts(&colors), vec![("#00ff00".to_string(), 4)]);
}

#[test]
fn per_occurrence_counts_each_span_once() {
    let svg = r##"<rect fill="#00FF00"/><circle fill="rgb(0,255,0)"/>"##;
    let colors = extract(svg, SvgCounting::PerOccurrence);
    assert_eq!(counts(&colors), vec![("#00ff00".to_string(), 2)]);
}

#[test]
fn rgb_red_and_hex_share_one_key() {
    let svg = r#"<g fill="red"><path stroke="rgb(255,0,0)"/><path stroke='#f00'/></g>"#;
    let colors = extract(svg, SvgCounting::PerOccurrence);
    assert_eq!(counts(&colors), vec![("#ff0000".to_string(), 3)]);
}

#[test]
fn none_transparent_and_references_are_never_collected() {
    let svg = r#"<svg><rect fill="none" stroke="transparent"/><rect fill=none/><rect fill="var(--brand, #123456)"/></svg>"#;
    let colors = extract(svg, SvgCounting::PerMatch);
    // The fallback hex inside var() is still a bare hex literal.
    assert_eq!(counts(&colors), vec![("#123456".to_string(), 1)]);
    assert!(colors.iter().all(|c| c.hex != "none" && c.hex != "transparent"));
}

#[test]
fn unquoted_attributes_and_rgba() {
    let svg = r#"<rect fill=blue stroke=#0000FF /><rect style="color: rgba(0, 0, 255, 0.4)"/>"#;
    let matches = scan(svg);
    let scanners: Vec<Scanner> = matches.iter().map(|m| m.scanner).collect();
    assert_eq!(
        scanners,
        vec![
            Scanner::Hex,
            Scanner::Rgba,
            Scanner::UnquotedAttr,
            Scanner::UnquotedAttr
        ]
    );
    assert!(matches.iter().all(|m| m.rgb == Rgb8::new(0, 0, 255)));
}

#[test]
fn spans_point_at_trimmed_values() {
    let svg = r#"<rect fill=" #abc "/>"#;
    let matches = scan(svg);
    assert_eq!(matches.len(), 2);
    for m in &matches {
        assert_eq!(&svg[m.span.clone()], "#abc");
    }
}

#[test]
fn hex_needs_a_word_boundary() {
    assert!(scan("#abcd #12345 #ggg").is_empty());
    assert_eq!(scan("#abcdef;").len(), 1);
}

#[test]
fn ranking_is_by_count_then_scan_order() {
    let svg = r##"<rect fill="#111111"/><rect fill="#222222"/><rect fill="#222222"/>"##;
    let colors = extract(svg, SvgCounting::PerOccurrence);
    assert_eq!(
        counts(&colors),
        vec![("#222222".to_string(), 2), ("#111111".to_string(), 1)]
    );
}

#[test]
fn counted_matches_follow_the_counting_mode() {
    let svg = r##"<rect fill="#00FF00"/><circle stroke=lime />"##;
    let all = counted_matches(svg, SvgCounting::PerMatch);
    assert_eq!(all.len(), 3);

    let once = counted_matches(svg, SvgCounting::PerOccurrence);
    let scanners: Vec<Scanner> = once.iter().map(|m| m.scanner).collect();
    assert_eq!(scanners, vec![Scanner::Hex, Scanner::UnquotedAttr]);

    let counted: usize = extract(svg, SvgCounting::PerOccurrence)
        .iter()
        .map(|c| c.count)
        .sum();
    assert_eq!(counted, once.len());
}
