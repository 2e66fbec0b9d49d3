use super::*;

fn key(s: &str) -> ColorKey {
    ColorKey::parse(s).unwrap()
}

#[test]
fn finish_ranks_by_count_and_keeps_discovery_order_on_ties() {
    let mut b = PaletteBuilder::new();
    for s in ["#0000ff", "#ff0000", "#00ff00", "#ff0000", "#00ff00", "#ff0000"] {
        b.add(key(s));
    }
    b.add(key("#ffffff"));
    assert_eq!(b.total(), 7);

    let colors = b.finish();
    let ranked: Vec<(String, usize)> = colors.iter().map(|c| (c.hex.clone(), c.count)).collect();
    assert_eq!(
        ranked,
        vec![
            ("#ff0000".to_string(), 3),
            ("#00ff00".to_string(), 2),
            ("#0000ff".to_string(), 1),
            ("#ffffff".to_string(), 1),
        ]
    );
    assert!(colors.iter().all(|c| c.name.is_empty()));
}

#[test]
fn five_beats_two() {
    let mut b = PaletteBuilder::new();
    for _ in 0..2 {
        b.add(key("#222222"));
    }
    for _ in 0..5 {
        b.add(key("#555555"));
    }
    let colors = b.finish();
    assert_eq!(colors[0].hex, "#555555");
    assert_eq!(colors[0].count, 5);
    assert_eq!(colors[1].count, 2);
}

#[test]
fn bind_trims_and_empty_unbinds() {
    let mut bindings = Bindings::new();
    bindings.bind(key("red"), "  primary ");
    assert_eq!(bindings.get(key("#ff0000")), Some("primary"));

    bindings.bind(key("red"), "brand");
    assert_eq!(bindings.len(), 1);
    assert_eq!(bindings.get(key("red")), Some("brand"));

    bindings.bind(key("red"), "   ");
    assert!(bindings.is_empty());
}

#[test]
fn from_colors_skips_unnamed() {
    let mut b = PaletteBuilder::new();
    b.add(key("#ff0000"));
    b.add(key("#00ff00"));
    let mut colors = b.finish();
    colors[1].name = "accent".to_string();

    let bindings = Bindings::from_colors(&colors);
    assert_eq!(bindings.len(), 1);
    assert_eq!(bindings.get(key("#00ff00")), Some("accent"));
    assert!(!colors[0].is_bound());
    assert!(colors[1].is_bound());
}

#[test]
fn deserializes_any_color_spelling_in_file_order() {
    let bindings: Bindings = serde_json::from_str(
        r##"{ "lime": "accent", "#F00": "primary", "rgb(0,0,255)": "" }"##,
    )
    .unwrap();
    let pairs: Vec<(String, &str)> = bindings.iter().map(|(k, n)| (k.hex(), n)).collect();
    assert_eq!(
        pairs,
        vec![
            ("#00ff00".to_string(), "accent"),
            ("#ff0000".to_string(), "primary"),
        ]
    );

    assert!(serde_json::from_str::<Bindings>(r#"{ "none": "x" }"#).is_err());
    assert!(serde_json::from_str::<Bindings>(r#"{ "red": 3 }"#).is_err());
}
