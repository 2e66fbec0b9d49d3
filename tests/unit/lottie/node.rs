use serde_json::json;

use super::*;

#[test]
fn classify_distinguishes_paint_from_plain_mappings() {
    let fill = json!({ "ty": "fl", "c": { "a": 0, "k": [1, 0, 0, 1] } });
    assert!(matches!(
        LottieNode::classify(&fill),
        LottieNode::Paint {
            role: PaintRole::Fill,
            ..
        }
    ));

    let gradient = json!({ "ty": "gf", "c": { "k": [1, 0, 0] } });
    assert!(matches!(
        LottieNode::classify(&gradient),
        LottieNode::Mapping(_)
    ));

    let no_color = json!({ "ty": "st", "w": { "k": 2 } });
    assert!(matches!(
        LottieNode::classify(&no_color),
        LottieNode::Mapping(_)
    ));

    assert!(matches!(
        LottieNode::classify(&json!([1, 2])),
        LottieNode::Sequence(_)
    ));
    assert!(matches!(LottieNode::classify(&json!("fl")), LottieNode::Scalar));
}

#[test]
fn resolve_static_and_keyframed_colors() {
    assert_eq!(
        resolve_color(&json!([0, 0, 1])),
        Some((Rgb8::new(0, 0, 255), false))
    );
    assert_eq!(
        resolve_color(&json!([
            { "t": 0, "s": [0, 1, 0, 1] },
            { "t": 30, "s": [1, 0, 0, 1] }
        ])),
        Some((Rgb8::new(0, 255, 0), true))
    );
}

#[test]
fn resolve_skips_malformed_shapes() {
    assert_eq!(resolve_color(&json!([1, 0])), None);
    assert_eq!(resolve_color(&json!(0.5)), None);
    assert_eq!(resolve_color(&json!([])), None);
    assert_eq!(resolve_color(&json!([{ "t": 0 }])), None);
    assert_eq!(resolve_color(&json!(["1", 0, 0])), None);
}

#[test]
fn walk_visits_paint_in_pre_order_with_paths() {
    let doc = json!({
        "layers": [
            {
                "shapes": [
                    { "ty": "st", "c": { "k": [0, 0, 1] } },
                    {
                        "ty": "gr",
                        "it": [ { "ty": "fl", "c": { "k": [1, 0, 0] } } ]
                    }
                ]
            }
        ]
    });

    let mut seen = Vec::new();
    walk(&doc, &mut |site| seen.push((site.path.to_string(), site.role, site.rgb)));
    assert_eq!(
        seen,
        vec![
            (
                "$.layers[0].shapes[0]".to_string(),
                PaintRole::Stroke,
                Rgb8::new(0, 0, 255)
            ),
            (
                "$.layers[0].shapes[1].it[0]".to_string(),
                PaintRole::Fill,
                Rgb8::new(255, 0, 0)
            ),
        ]
    );
}

#[test]
fn walk_descends_into_paint_nodes() {
    // A paint node nested inside another paint node's fields is still found.
    let doc = json!({
        "ty": "fl",
        "c": { "k": [1, 1, 1] },
        "nested": { "ty": "fl", "c": { "k": [0, 0, 0] } }
    });
    let mut n = 0;
    walk(&doc, &mut |_| n += 1);
    assert_eq!(n, 2);
}

#[test]
fn walk_mut_sees_the_same_sites_as_walk() {
    let mut doc = json!([
        { "ty": "fl", "c": { "k": [1, 0, 0] } },
        { "ty": "st", "c": { "k": [{ "s": [0, 1, 0] }] } },
        { "ty": "fl", "c": { "k": [1] } }
    ]);

    let mut read = Vec::new();
    walk(&doc, &mut |site| read.push(site.clone()));

    let mut written = Vec::new();
    walk_mut(&mut doc, &mut |site, fields| {
        written.push(site.clone());
        fields.insert("seen".to_string(), json!(true));
    });

    assert_eq!(read, written);
    assert_eq!(doc[0]["seen"], json!(true));
    assert_eq!(doc[1]["seen"], json!(true));
    assert!(doc[2].get("seen").is_none());
}
