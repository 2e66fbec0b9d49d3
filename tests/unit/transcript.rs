use super::*;

#[test]
fn recognizes_common_url_shapes() {
    let id = "dQw4w9WgXcQ";
    for url in [
        "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
        "https://www.youtube.com/watch?feature=share&v=dQw4w9WgXcQ&t=4",
        "https://www.youtube.com/embed/dQw4w9WgXcQ",
        "https://www.youtube.com/v/dQw4w9WgXcQ?version=3",
        "https://youtu.be/dQw4w9WgXcQ",
        "youtu.be/dQw4w9WgXcQ?t=10",
    ] {
        assert_eq!(extract_video_id(url), Some(id), "{url}");
    }
}

#[test]
fn rejects_other_hosts_and_short_ids() {
    assert_eq!(extract_video_id("https://vimeo.com/watch?v=dQw4w9WgXcQ"), None);
    assert_eq!(extract_video_id("https://www.youtube.com/watch?v=short"), None);
    assert_eq!(extract_video_id(""), None);
}

#[test]
fn caption_xml_is_flattened_and_decoded() {
    let xml = r#"<?xml version="1.0" encoding="utf-8" ?><transcript>
        <text start="0.5" dur="1.2">Hello &amp; welcome</text>
        <text start="1.7" dur="2">  it&#39;s   a &quot;test&quot;  </text>
        <text start="3.7" dur="1"> </text>
        <text start="4" dur="1">a &lt;b&gt;&nbsp;c</text>
    </transcript>"#;
    assert_eq!(
        parse_caption_xml(xml),
        r#"Hello & welcome it's a "test" a <b> c"#
    );
    assert_eq!(parse_caption_xml("<transcript/>"), "");
}

struct Fixed(Result<Transcript, TranscriptError>);

impl TranscriptProvider for Fixed {
    fn fetch(&self, video_id: &str) -> Result<Transcript, TranscriptError> {
        self.0.clone().map(|mut t| {
            t.video_id = video_id.to_string();
            t
        })
    }
}

#[test]
fn transcribe_passes_the_id_to_the_provider() {
    let provider = Fixed(Ok(Transcript {
        video_id: String::new(),
        title: "Demo".to_string(),
        text: "hi".to_string(),
    }));
    let t = transcribe(&provider, " https://youtu.be/dQw4w9WgXcQ ").unwrap();
    assert_eq!(t.video_id, "dQw4w9WgXcQ");
    assert_eq!(t.title, "Demo");
}

#[test]
fn failures_surface_distinct_messages() {
    let provider = Fixed(Err(TranscriptError::AgeRestricted));
    assert_eq!(
        transcribe(&provider, "https://example.com").unwrap_err(),
        TranscriptError::InvalidUrl
    );
    assert_eq!(
        transcribe(&provider, "https://youtu.be/dQw4w9WgXcQ").unwrap_err(),
        TranscriptError::AgeRestricted
    );

    let messages: Vec<String> = [
        TranscriptError::NotFound,
        TranscriptError::SignInRequired,
        TranscriptError::NoCaptions,
        TranscriptError::AgeRestricted,
    ]
    .iter()
    .map(ToString::to_string)
    .collect();
    let mut unique = messages.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), messages.len());
}
