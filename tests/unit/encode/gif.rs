use super::*;

fn strings(args: &[OsString]) -> Vec<String> {
    args.iter().map(|a| a.to_string_lossy().into_owned()).collect()
}

fn plan(settings: &GifSettings) -> GifPlan {
    GifPlan::new(
        settings,
        Path::new("input.mp4"),
        Path::new("palette.png"),
        Path::new("output.gif"),
    )
    .unwrap()
}

#[test]
fn default_high_quality_plan() {
    let p = plan(&GifSettings::default());
    assert_eq!(
        strings(&p.palette_args),
        vec![
            "-i",
            "input.mp4",
            "-vf",
            "fps=20,scale=720:-1:flags=lanczos,palettegen=max_colors=224:reserve_transparent=0",
            "palette.png",
        ]
    );
    assert_eq!(
        strings(&p.gif_args),
        vec![
            "-i",
            "input.mp4",
            "-i",
            "palette.png",
            "-lavfi",
            "fps=20,scale=720:-1:flags=lanczos[x];[x][1:v]paletteuse=dither=bayer:bayer_scale=3:diff_mode=rectangle",
            "-f",
            "gif",
            "-gifflags",
            "+transdiff",
            "output.gif",
        ]
    );
}

#[test]
fn ultra_uses_diff_stats_and_offsetting() {
    let p = plan(&GifSettings {
        quality: GifQuality::Ultra,
        ..GifSettings::default()
    });
    let palette = strings(&p.palette_args);
    assert!(palette[3].ends_with("palettegen=max_colors=256:reserve_transparent=0:stats_mode=diff"));
    let gif = strings(&p.gif_args);
    assert_eq!(&gif[gif.len() - 3..], ["-gifflags", "+offsetting", "output.gif"]);
}

#[test]
fn medium_has_no_gif_flags() {
    let p = plan(&GifSettings {
        quality: GifQuality::Medium,
        ..GifSettings::default()
    });
    let gif = strings(&p.gif_args);
    assert!(!gif.iter().any(|a| a == "-gifflags"));
    assert!(strings(&p.palette_args)[3].contains("max_colors=192"));
}

#[test]
fn trim_window_is_passed_to_both_passes() {
    let p = plan(&GifSettings {
        start_sec: Some(1.5),
        end_sec: Some(4.0),
        width: 480,
        fps: 12,
        ..GifSettings::default()
    });
    let palette = strings(&p.palette_args);
    assert_eq!(&palette[2..6], ["-ss", "1.5", "-to", "4"]);
    assert!(palette[7].starts_with("fps=12,scale=480:-1"));
    let gif = strings(&p.gif_args);
    assert_eq!(&gif[4..8], ["-ss", "1.5", "-to", "4"]);
}

#[test]
fn invalid_settings_are_rejected() {
    let bad = [
        GifSettings {
            width: 0,
            ..GifSettings::default()
        },
        GifSettings {
            fps: 0,
            ..GifSettings::default()
        },
        GifSettings {
            start_sec: Some(3.0),
            end_sec: Some(2.0),
            ..GifSettings::default()
        },
        GifSettings {
            start_sec: Some(-1.0),
            ..GifSettings::default()
        },
    ];
    for s in bad {
        let err = s.validate().unwrap_err();
        assert!(matches!(err, TokenError::Validation(_)), "{s:?}");
    }
}

#[test]
fn quality_serializes_lowercase() {
    let q: GifQuality = serde_json::from_str("\"ultra\"").unwrap();
    assert_eq!(q, GifQuality::Ultra);
    assert_eq!(gif_output_path(Path::new("clips/intro.mp4")), Path::new("clips/intro.gif"));
}
